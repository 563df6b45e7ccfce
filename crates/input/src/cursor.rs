//! Keyboard cursor over the bars.

use crate::types::InputAction;

/// Position of the keyboard cursor: a row and a bar within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarCursor {
    pub row: usize,
    pub bar: usize,
}

impl BarCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor. Returns true for cursor actions, false for anything else.
    ///
    /// Moving between rows keeps the bar column where possible.
    pub fn apply(&mut self, action: InputAction, sizes: &[u32]) -> bool {
        match action {
            InputAction::CursorUp => self.row = self.row.saturating_sub(1),
            InputAction::CursorDown => self.row = self.row.saturating_add(1),
            InputAction::CursorLeft => self.bar = self.bar.saturating_sub(1),
            InputAction::CursorRight => self.bar = self.bar.saturating_add(1),
            _ => return false,
        }
        self.clamp(sizes);
        true
    }

    /// Pull the cursor back inside the board (rows shrink and re-sort).
    pub fn clamp(&mut self, sizes: &[u32]) {
        if sizes.is_empty() {
            *self = Self::default();
            return;
        }
        self.row = self.row.min(sizes.len() - 1);
        let size = sizes[self.row] as usize;
        self.bar = self.bar.min(size.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_within_bounds() {
        let sizes = [1, 3, 5, 7];
        let mut c = BarCursor::new();
        assert!(c.apply(InputAction::CursorUp, &sizes));
        assert_eq!(c, BarCursor { row: 0, bar: 0 });

        for _ in 0..10 {
            c.apply(InputAction::CursorDown, &sizes);
            c.apply(InputAction::CursorRight, &sizes);
        }
        assert_eq!(c, BarCursor { row: 3, bar: 6 });

        c.apply(InputAction::CursorUp, &sizes);
        assert_eq!(c, BarCursor { row: 2, bar: 4 });
    }

    #[test]
    fn ignores_non_cursor_actions() {
        let mut c = BarCursor::new();
        assert!(!c.apply(InputAction::Press, &[3]));
        assert!(!c.apply(InputAction::Submit, &[3]));
    }

    #[test]
    fn clamp_follows_shrinking_board() {
        let mut c = BarCursor { row: 3, bar: 6 };
        c.clamp(&[1, 3]);
        assert_eq!(c, BarCursor { row: 1, bar: 2 });
        c.clamp(&[]);
        assert_eq!(c, BarCursor::default());
    }
}
