use ropey::Rope;
use unicode_width::UnicodeWidthStr;

/// Cursor position in a [`TextBuffer`].
///
/// `col` is a byte offset into the line. `sticky_col` remembers the column
/// to return to when moving vertically across shorter lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn place(&mut self, line: usize, col: usize) {
        self.line = line;
        self.col = col;
        self.sticky_col = col;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rope-backed text of the editor pane.
///
/// Every mutation bumps [`TextBuffer::revision`], which the app compares
/// against the last revision it forwarded to the preview.
pub struct TextBuffer {
    rope: Rope,
    cursor: Cursor,
    revision: u64,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            revision: 0,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line terminator.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut line = self.rope.line(line_idx).to_string();
        while line.ends_with(['\n', '\r']) {
            line.pop();
        }
        Some(line)
    }

    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |line| line.len())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Terminal column of the cursor on its line.
    pub fn display_col(&self) -> usize {
        self.line_at(self.cursor.line)
            .map_or(0, |line| line[..self.cursor.col.min(line.len())].width())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        let at = self.cursor_char_idx();
        self.rope.insert_char(at, ch);
        self.cursor.place(self.cursor.line, self.cursor.col + ch.len_utf8());
        self.touch();
    }

    /// Insert text at the cursor, leaving the cursor after it.
    ///
    /// `\r\n` and lone `\r` are normalized to `\n`.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let at = self.cursor_char_idx();
        self.rope.insert(at, &normalized);
        match normalized.rsplit_once('\n') {
            Some((_, tail)) => {
                let added = normalized.matches('\n').count();
                self.cursor.place(self.cursor.line + added, tail.len());
            }
            None => self.cursor.place(self.cursor.line, self.cursor.col + normalized.len()),
        }
        self.touch();
    }

    pub fn split_line(&mut self) {
        let at = self.cursor_char_idx();
        self.rope.insert_char(at, '\n');
        self.cursor.place(self.cursor.line + 1, 0);
        self.touch();
    }

    /// Backspace. Returns `false` at the start of the buffer.
    pub fn delete_back(&mut self) -> bool {
        let Cursor { line, col, .. } = self.cursor;
        if line == 0 && col == 0 {
            return false;
        }
        let at = self.cursor_char_idx();
        if col == 0 {
            let joined_col = self.line_len(line - 1);
            self.rope.remove(at - 1..at);
            self.cursor.place(line - 1, joined_col);
        } else {
            let width = self.char_len_before(line, col);
            self.rope.remove(at - 1..at);
            self.cursor.place(line, col - width);
        }
        self.touch();
        true
    }

    /// Delete key. Returns `false` at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        let at = self.cursor_char_idx();
        if at >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(at..=at);
        self.touch();
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let Cursor { line, col, .. } = self.cursor;
        match direction {
            Direction::Left if col > 0 => {
                let width = self.char_len_before(line, col);
                self.cursor.place(line, col - width);
            }
            Direction::Left if line > 0 => self.cursor.place(line - 1, self.line_len(line - 1)),
            Direction::Right if col < self.line_len(line) => {
                let width = self.char_len_at(line, col);
                self.cursor.place(line, col + width);
            }
            Direction::Right if line + 1 < self.line_count() => self.cursor.place(line + 1, 0),
            Direction::Up if line > 0 => self.move_vertically(line - 1),
            Direction::Down if line + 1 < self.line_count() => self.move_vertically(line + 1),
            _ => {}
        }
    }

    pub fn move_home(&mut self) {
        self.cursor.place(self.cursor.line, 0);
    }

    pub fn move_end(&mut self) {
        self.cursor.place(self.cursor.line, self.line_len(self.cursor.line));
    }

    pub fn move_word_left(&mut self) {
        let Cursor { line, col, .. } = self.cursor;
        if col == 0 {
            if line > 0 {
                self.cursor.place(line - 1, self.line_len(line - 1));
            }
            return;
        }
        let text = self.line_at(line).unwrap_or_default();
        let before = text[..col].trim_end();
        let start = before
            .rfind(|c: char| !is_word_char(c))
            .map_or(0, |idx| idx + before[idx..].chars().next().map_or(1, char::len_utf8));
        self.cursor.place(line, start);
    }

    pub fn move_word_right(&mut self) {
        let Cursor { line, col, .. } = self.cursor;
        let len = self.line_len(line);
        if col >= len {
            if line + 1 < self.line_count() {
                self.cursor.place(line + 1, 0);
            }
            return;
        }
        let text = self.line_at(line).unwrap_or_default();
        let rest = &text[col..];
        let word_end = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
        let gap = rest[word_end..].find(is_word_char).unwrap_or(rest.len() - word_end);
        self.cursor.place(line, col + word_end + gap);
    }

    /// Move up by `rows` lines, keeping the sticky column.
    pub fn page_up(&mut self, rows: usize) {
        let target = self.cursor.line.saturating_sub(rows.max(1));
        self.move_vertically(target);
    }

    /// Move down by `rows` lines, keeping the sticky column.
    pub fn page_down(&mut self, rows: usize) {
        let last = self.line_count().saturating_sub(1);
        let target = self.cursor.line.saturating_add(rows.max(1)).min(last);
        self.move_vertically(target);
    }

    /// Move to `line` and the byte column closest to `col`, both clamped.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let text = self.line_at(line).unwrap_or_default();
        self.cursor.place(line, floor_char_boundary(&text, col));
    }

    /// Move to `line` and the byte column under terminal column `display_col`.
    pub fn move_to_display(&mut self, line: usize, display_col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let text = self.line_at(line).unwrap_or_default();
        let mut width = 0;
        let mut col = text.len();
        for (idx, ch) in text.char_indices() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if width + ch_width > display_col {
                col = idx;
                break;
            }
            width += ch_width;
        }
        self.move_to(line, col);
    }

    pub fn move_to_start(&mut self) {
        self.cursor.place(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor.place(last, self.line_len(last));
    }

    fn move_vertically(&mut self, line: usize) {
        let sticky = self.cursor.sticky_col;
        let text = self.line_at(line).unwrap_or_default();
        self.cursor.line = line;
        self.cursor.col = floor_char_boundary(&text, sticky);
    }

    const fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn cursor_char_idx(&self) -> usize {
        let start = self.rope.line_to_char(self.cursor.line);
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let col = floor_char_boundary(&text, self.cursor.col);
        start + text[..col].chars().count()
    }

    fn char_len_before(&self, line: usize, col: usize) -> usize {
        self.line_at(line)
            .and_then(|text| text[..col.min(text.len())].chars().next_back())
            .map_or(1, char::len_utf8)
    }

    fn char_len_at(&self, line: usize, col: usize) -> usize {
        self.line_at(line)
            .and_then(|text| text.get(col..).and_then(|rest| rest.chars().next()))
            .map_or(1, char::len_utf8)
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .field("revision", &self.revision)
            .finish()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn floor_char_boundary(text: &str, col: usize) -> usize {
    let mut col = col.min(text.len());
    while !text.is_char_boundary(col) {
        col -= 1;
    }
    col
}
