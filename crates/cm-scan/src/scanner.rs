//! Scan session: one cursor plus the capture buffer its primitives share.

use std::io::{self, BufRead};

use cm_core::{Expected, ExpectingError};

use crate::cursor::{Current, Cursor, Mark};
use crate::source::{CharSource, ReaderSource, StrSource};

/// Owns the cursor and the capture buffer for one source unit.
///
/// Try-read primitives append what they consume to the capture buffer,
/// try-skip primitives do not. A failed attempt may leave a partial
/// capture behind, so callers clear the buffer before each token.
///
/// The backing source is closed when the session is dropped.
pub struct Scanner<S: CharSource> {
    cursor: Cursor<S>,
    capture: String,
}

impl<'a> Scanner<StrSource<'a>> {
    pub fn for_text(text: &'a str) -> Self {
        Self::new(StrSource::new(text))
    }
}

impl<R: BufRead> Scanner<ReaderSource<R>> {
    pub fn for_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Self {
            cursor: Cursor::new(source),
            capture: String::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor<S> {
        &self.cursor
    }

    pub fn current(&self) -> Current {
        self.cursor.current()
    }

    pub fn advance(&mut self) -> Current {
        self.cursor.advance()
    }

    pub fn ensure_started(&mut self) {
        self.cursor.ensure_started();
    }

    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    pub fn column(&self) -> usize {
        self.cursor.column()
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Append the current character, if there is one, to the capture.
    pub fn capture_current(&mut self) {
        if let Current::Char(ch) = self.cursor.current() {
            self.capture.push(ch);
        }
    }

    pub fn clear_capture(&mut self) {
        self.capture.clear();
    }

    pub fn capture(&self) -> &str {
        &self.capture
    }

    /// Hand out the capture and leave the buffer empty.
    pub fn take_capture(&mut self) -> String {
        std::mem::take(&mut self.capture)
    }

    pub fn mark(&mut self) -> Mark {
        self.cursor.mark()
    }

    pub fn commit(&mut self) {
        self.cursor.commit();
    }

    pub fn rewind(&mut self, mark: Mark) {
        self.cursor.rewind(mark);
    }

    /// Fail unless the current input is one of `expected`. An empty list
    /// accepts anything but end of input.
    pub fn expecting(&mut self, expected: &[Expected]) -> Result<(), ExpectingError> {
        self.ensure_started();
        let current = self.current();
        let accepted = if expected.is_empty() {
            !current.is_end()
        } else {
            expected.iter().any(|e| match (e, current) {
                (Expected::Char(want), Current::Char(got)) => *want == got,
                (Expected::EndOfInput, Current::End) => true,
                _ => false,
            })
        };
        if accepted {
            return Ok(());
        }
        Err(ExpectingError {
            expected: expected.to_vec(),
            found: current.char(),
            line: self.line(),
            column: self.column(),
            position: self.position(),
        })
    }

    /// Report a read error recorded since the last check.
    pub fn check(&mut self) -> io::Result<()> {
        match self.cursor.take_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Close the session, reporting any read error left unreported.
    pub fn finish(mut self) -> io::Result<()> {
        self.cursor.close();
        self.check()
    }
}

impl<S: CharSource> Drop for Scanner<S> {
    fn drop(&mut self) {
        self.cursor.close();
    }
}
