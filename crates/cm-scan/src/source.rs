//! Character backends a [`Cursor`](crate::Cursor) can read from.

use std::io::{self, BufRead};
use std::str::Chars;

/// Byte-order mark. Dropped when it opens a stream.
const BOM: char = '\u{FEFF}';

/// A stream of characters.
///
/// Implementations only hand out characters; position tracking and
/// capture live in the cursor and scan session built on top.
pub trait CharSource {
    /// Next character, or `None` once the input is exhausted.
    fn next_char(&mut self) -> io::Result<Option<char>>;

    /// Release the underlying input. Later reads return `None`.
    fn close(&mut self) {}
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// In-memory text.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        Self { chars: text.chars() }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }

    fn close(&mut self) {
        self.chars = "".chars();
    }
}

/// UTF-8 text pulled from a buffered reader one line at a time.
pub struct ReaderSource<R> {
    reader: Option<R>,
    line: String,
    offset: usize,
    started: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            line: String::new(),
            offset: 0,
            started: false,
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(ch) = self.line[self.offset..].chars().next() {
                self.offset += ch.len_utf8();
                return Ok(Some(ch));
            }
            let Some(reader) = self.reader.as_mut() else {
                return Ok(None);
            };
            self.line.clear();
            self.offset = 0;
            if reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if !self.started {
                self.started = true;
                if self.line.starts_with(BOM) {
                    self.offset = BOM.len_utf8();
                }
            }
        }
    }

    fn close(&mut self) {
        self.reader = None;
        self.line.clear();
        self.offset = 0;
    }
}
