use unicode_width::UnicodeWidthStr;

/// Search input state for the TUI.
///
/// Editing only touches the in-memory term; nothing is fetched or
/// persisted until the term is submitted.
pub struct SearchInput {
    pub term: String,
    /// Byte offset into `term`, always on a char boundary.
    pub cursor_pos: usize,
    pub focused: bool,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self {
            term: String::new(),
            cursor_pos: 0,
            focused: true,
        }
    }
}

impl SearchInput {
    /// Input pre-filled with a term (the persisted one on startup), cursor
    /// at the end, focused.
    pub fn with_term(term: String) -> Self {
        Self {
            cursor_pos: term.len(),
            term,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, c: char) {
        self.term.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.prev_boundary();
            self.term.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.term.len() {
            self.term.remove(self.cursor_pos);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.term.len() {
            self.cursor_pos = self.term[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.term.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self) {
        self.cursor_pos = self.term.len();
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.cursor_pos = 0;
    }

    /// Display column of the cursor, for terminal cursor placement. Wide
    /// characters count for their rendered width, not their byte length.
    pub fn cursor_col(&self) -> u16 {
        self.term[..self.cursor_pos].width() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.term[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_advances_the_cursor() {
        let mut input = SearchInput::default();
        input.insert('r');
        input.insert('s');
        input.move_left();
        input.insert('u');
        assert_eq!(input.term, "rus");
        assert_eq!(input.cursor_pos, 2);
    }

    #[test]
    fn backspace_respects_char_boundaries() {
        let mut input = SearchInput::with_term("ré".to_string());
        input.backspace();
        assert_eq!(input.term, "r");
        assert_eq!(input.cursor_pos, 1);
        input.backspace();
        assert_eq!(input.term, "");
        input.backspace();
        assert_eq!(input.cursor_pos, 0);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut input = SearchInput::with_term("日本".to_string());
        assert_eq!(input.cursor_pos, 6);
        input.move_left();
        assert_eq!(input.cursor_pos, 3);
        input.move_right();
        assert_eq!(input.cursor_pos, 6);
        input.move_right();
        assert_eq!(input.cursor_pos, 6);
    }

    #[test]
    fn cursor_col_uses_display_width() {
        let input = SearchInput::with_term("日本".to_string());
        // Two double-width characters.
        assert_eq!(input.cursor_col(), 4);
    }

    #[test]
    fn clear_resets_term_and_cursor() {
        let mut input = SearchInput::with_term("react".to_string());
        input.clear();
        assert_eq!(input.term, "");
        assert_eq!(input.cursor_pos, 0);
    }
}
