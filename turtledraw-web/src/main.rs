use turtledraw_web_lib::window_conf;

#[macroquad::main(window_conf)]
async fn main() {
    turtledraw_web_lib::run().await;
}
