//! Position-tracking cursor over a [`CharSource`].

use std::collections::VecDeque;
use std::io;

use crate::source::CharSource;

/// What the cursor is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Current {
    /// Nothing has been read yet.
    BeforeStart,
    Char(char),
    /// Input exhausted.
    End,
}

impl Current {
    pub fn char(self) -> Option<char> {
        match self {
            Current::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn is(self, ch: char) -> bool {
        self == Current::Char(ch)
    }

    pub fn is_end(self) -> bool {
        self == Current::End
    }

    pub fn is_whitespace(self) -> bool {
        self.char().is_some_and(char::is_whitespace)
    }

    pub fn is_any_of(self, set: &[char]) -> bool {
        self.char().is_some_and(|c| set.contains(&c))
    }

    pub fn is_line_terminator(self) -> bool {
        matches!(self, Current::Char('\r' | '\n'))
    }
}

/// Snapshot of a cursor that can be returned to with [`Cursor::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    current: Current,
    position: u64,
    line: usize,
    column: usize,
}

/// Tracks `position` (characters read), `line` and `column` of the
/// character under the cursor.
///
/// A carriage return or line feed ends a line; the character after a line
/// feed starts the next one, so CRLF counts as a single line break. The
/// step onto [`Current::End`] bumps position and column exactly once.
///
/// Read errors from the backend are recorded and reported as end of input;
/// the scan session surfaces them.
pub struct Cursor<S> {
    source: S,
    current: Current,
    position: u64,
    line: usize,
    column: usize,
    journal: Option<Vec<char>>,
    replay: VecDeque<char>,
    error: Option<io::Error>,
}

impl<S: CharSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: Current::BeforeStart,
            position: 0,
            line: 1,
            column: 1,
            journal: None,
            replay: VecDeque::new(),
            error: None,
        }
    }

    pub fn current(&self) -> Current {
        self.current
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of real characters read, not counting the past-the-end step.
    pub fn chars_consumed(&self) -> u64 {
        match self.current {
            Current::End => self.position.saturating_sub(1),
            _ => self.position,
        }
    }

    pub fn ensure_started(&mut self) {
        if self.current == Current::BeforeStart {
            self.advance();
        }
    }

    /// Move to the next character and return it.
    pub fn advance(&mut self) -> Current {
        let next = match self.replay.pop_front() {
            Some(ch) => Some(ch),
            None if self.current == Current::End => None,
            None => self.pull(),
        };
        match next {
            Some(ch) => {
                match self.current {
                    Current::Char('\n') => {
                        self.line += 1;
                        self.column = 1;
                    }
                    Current::Char('\r') => self.column = 1,
                    Current::Char(_) => self.column += 1,
                    Current::BeforeStart | Current::End => {}
                }
                self.position += 1;
                if let Some(journal) = self.journal.as_mut() {
                    journal.push(ch);
                }
                self.current = Current::Char(ch);
            }
            None => {
                if self.current != Current::End {
                    self.position += 1;
                    self.column += 1;
                }
                self.current = Current::End;
            }
        }
        self.current
    }

    fn pull(&mut self) -> Option<char> {
        match self.source.next_char() {
            Ok(ch) => ch,
            Err(err) => {
                tracing::warn!(%err, line = self.line, "read failed, treating as end of input");
                if self.error.is_none() {
                    self.error = Some(err);
                }
                None
            }
        }
    }

    /// Snapshot the cursor and start recording what is read after it.
    /// Taking a new mark discards the previous one.
    pub fn mark(&mut self) -> Mark {
        self.journal = Some(Vec::new());
        Mark {
            current: self.current,
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Keep everything read since the last mark.
    pub fn commit(&mut self) {
        self.journal = None;
    }

    /// Return to `mark`; the characters read since then are read again.
    pub fn rewind(&mut self, mark: Mark) {
        let journal = self.journal.take().unwrap_or_default();
        for ch in journal.into_iter().rev() {
            self.replay.push_front(ch);
        }
        self.current = mark.current;
        self.position = mark.position;
        self.line = mark.line;
        self.column = mark.column;
    }

    /// The first read error, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn close(&mut self) {
        self.source.close();
        self.replay.clear();
        self.journal = None;
    }
}
