use crate::drawing::{DrawingLog, TextRecord};
use crate::pen::Color;
use crate::pose::Point;
use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded(String),
    Blank,
}

/// Modal text-entry session. While open, turtle input is suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEntry {
    draft: Option<String>,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn open(&mut self) {
        self.draft = Some(String::new());
    }

    pub fn close(&mut self) {
        self.draft = None;
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(draft) = self.draft.as_mut() {
            draft.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.pop();
        }
    }

    /// Submits the current draft; see [`submit_text`].
    pub fn submit(&mut self, anchor: Point, color: Color, log: &mut DrawingLog) -> SubmitOutcome {
        let raw = self.draft.clone().unwrap_or_default();
        let outcome = submit_text(&raw, anchor, color, log);
        if matches!(outcome, SubmitOutcome::Recorded(_)) {
            self.close();
        }
        outcome
    }
}

/// Appends a trimmed record at `anchor`. Blank input changes nothing.
pub fn submit_text(raw: &str, anchor: Point, color: Color, log: &mut DrawingLog) -> SubmitOutcome {
    let content = raw.trim();
    if content.is_empty() {
        debug!("ignoring blank text submission");
        return SubmitOutcome::Blank;
    }

    log.push_text(TextRecord {
        content: content.to_string(),
        anchor,
        color,
    });
    info!("placed text {:?} at ({:.1}, {:.1})", content, anchor.x, anchor.y);
    SubmitOutcome::Recorded(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEN: Color = Color::rgb(255, 255, 255);

    #[test]
    fn blank_submission_is_discarded() {
        let mut log = DrawingLog::new();
        assert_eq!(
            submit_text("  ", Point::new(0.0, 0.0), PEN, &mut log),
            SubmitOutcome::Blank
        );
        assert!(log.texts().is_empty());
    }

    #[test]
    fn submission_is_trimmed_and_anchored() {
        let mut log = DrawingLog::new();
        let anchor = Point::new(12.0, 34.0);
        assert_eq!(
            submit_text(" hello ", anchor, PEN, &mut log),
            SubmitOutcome::Recorded("hello".to_string())
        );
        assert_eq!(log.texts().len(), 1);
        assert_eq!(log.texts()[0].content, "hello");
        assert_eq!(log.texts()[0].anchor, anchor);
        assert_eq!(log.texts()[0].color, PEN);
    }

    #[test]
    fn draft_editing_ignores_control_characters() {
        let mut entry = TextEntry::new();
        entry.push_char('x');
        assert_eq!(entry.draft(), None);

        entry.open();
        for c in ['h', 'i', '\r', '\u{8}', '!'] {
            entry.push_char(c);
        }
        assert_eq!(entry.draft(), Some("hi!"));
        entry.backspace();
        assert_eq!(entry.draft(), Some("hi"));
    }

    #[test]
    fn submit_closes_only_on_success() {
        let mut log = DrawingLog::new();
        let mut entry = TextEntry::new();
        entry.open();
        entry.push_char(' ');
        assert_eq!(
            entry.submit(Point::default(), PEN, &mut log),
            SubmitOutcome::Blank
        );
        assert!(entry.is_open());

        entry.push_char('a');
        assert_eq!(
            entry.submit(Point::default(), PEN, &mut log),
            SubmitOutcome::Recorded("a".to_string())
        );
        assert!(!entry.is_open());
    }
}
