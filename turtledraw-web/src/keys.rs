use macroquad::prelude::KeyCode;
use turtledraw_core::Key;

/// Maps a macroquad key code onto the backend-neutral key the core binds.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Space => Key::Space,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter | KeyCode::KpEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        other => return letter_or_digit(other).map(Key::Char),
    };
    Some(key)
}

fn letter_or_digit(code: KeyCode) -> Option<char> {
    const LETTERS: [(KeyCode, char); 26] = [
        (KeyCode::A, 'a'),
        (KeyCode::B, 'b'),
        (KeyCode::C, 'c'),
        (KeyCode::D, 'd'),
        (KeyCode::E, 'e'),
        (KeyCode::F, 'f'),
        (KeyCode::G, 'g'),
        (KeyCode::H, 'h'),
        (KeyCode::I, 'i'),
        (KeyCode::J, 'j'),
        (KeyCode::K, 'k'),
        (KeyCode::L, 'l'),
        (KeyCode::M, 'm'),
        (KeyCode::N, 'n'),
        (KeyCode::O, 'o'),
        (KeyCode::P, 'p'),
        (KeyCode::Q, 'q'),
        (KeyCode::R, 'r'),
        (KeyCode::S, 's'),
        (KeyCode::T, 't'),
        (KeyCode::U, 'u'),
        (KeyCode::V, 'v'),
        (KeyCode::W, 'w'),
        (KeyCode::X, 'x'),
        (KeyCode::Y, 'y'),
        (KeyCode::Z, 'z'),
    ];
    const DIGITS: [(KeyCode, char); 10] = [
        (KeyCode::Key0, '0'),
        (KeyCode::Key1, '1'),
        (KeyCode::Key2, '2'),
        (KeyCode::Key3, '3'),
        (KeyCode::Key4, '4'),
        (KeyCode::Key5, '5'),
        (KeyCode::Key6, '6'),
        (KeyCode::Key7, '7'),
        (KeyCode::Key8, '8'),
        (KeyCode::Key9, '9'),
    ];

    LETTERS
        .iter()
        .chain(DIGITS.iter())
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_default_binding_keys() {
        assert_eq!(key_from_code(KeyCode::W), Some(Key::Char('w')));
        assert_eq!(key_from_code(KeyCode::Space), Some(Key::Space));
        assert_eq!(key_from_code(KeyCode::Backspace), Some(Key::Backspace));
        assert_eq!(key_from_code(KeyCode::KpEnter), Some(Key::Enter));
        assert_eq!(key_from_code(KeyCode::Left), Some(Key::Left));
        assert_eq!(key_from_code(KeyCode::Key7), Some(Key::Char('7')));
    }

    #[test]
    fn ignores_unmapped_keys() {
        assert_eq!(key_from_code(KeyCode::F1), None);
        assert_eq!(key_from_code(KeyCode::LeftShift), None);
    }
}
