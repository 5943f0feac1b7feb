//! String and character literals.
//!
//! - `"..."` and `'...'`: backslash escapes the next character; a raw line
//!   break before the closing quote leaves the literal unterminated.
//! - `@"..."`: verbatim, `""` is a quote, may span lines.
//! - `$"..."`, `$@"..."`, `@$"..."`: interpolated; `{{` is a literal brace and
//!   `{...}` holes may hold nested literals and braces.

use crate::cursor::Current;
use crate::scanner::Scanner;
use crate::source::CharSource;

impl<S: CharSource> Scanner<S> {
    pub fn try_read_string(&mut self) -> bool {
        self.quoted('"', true)
    }

    pub fn try_skip_string(&mut self) -> bool {
        self.quoted('"', false)
    }

    pub fn try_read_char_literal(&mut self) -> bool {
        self.quoted('\'', true)
    }

    pub fn try_skip_char_literal(&mut self) -> bool {
        self.quoted('\'', false)
    }

    /// `@"..."` or `@$"..."`. When no quote follows the sigil(s) this fails
    /// with the sigils captured and the cursor on the next character.
    pub fn try_read_verbatim_string(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('@') {
            return false;
        }
        self.capture_current();
        let holes = self.advance().is('$');
        if holes {
            self.capture_current();
            self.advance();
        }
        if !self.current().is('"') {
            return false;
        }
        self.string_body(true, holes)
    }

    /// `$"..."` or `$@"..."`.
    pub fn try_read_interpolated_string(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('$') {
            return false;
        }
        self.capture_current();
        let verbatim = self.advance().is('@');
        if verbatim {
            self.capture_current();
            self.advance();
        }
        if !self.current().is('"') {
            return false;
        }
        self.string_body(verbatim, true)
    }

    fn keep(&mut self, capture: bool) {
        if capture {
            self.capture_current();
        }
    }

    fn quoted(&mut self, quote: char, capture: bool) -> bool {
        self.ensure_started();
        if !self.current().is(quote) {
            return false;
        }
        self.keep(capture);
        loop {
            match self.advance() {
                Current::Char(c) if c == quote => {
                    self.keep(capture);
                    self.advance();
                    return true;
                }
                Current::Char('\\') => {
                    self.keep(capture);
                    if self.advance().is_end() || self.current().is_line_terminator() {
                        return false;
                    }
                    self.keep(capture);
                }
                Current::Char('\r' | '\n') | Current::End | Current::BeforeStart => return false,
                Current::Char(_) => self.keep(capture),
            }
        }
    }

    /// Cursor on the opening quote.
    fn string_body(&mut self, verbatim: bool, holes: bool) -> bool {
        self.capture_current();
        self.advance();
        loop {
            match self.current() {
                Current::Char('"') => {
                    self.capture_current();
                    if verbatim && self.advance().is('"') {
                        self.capture_current();
                        self.advance();
                        continue;
                    }
                    if !verbatim {
                        self.advance();
                    }
                    return true;
                }
                Current::Char('{') if holes => {
                    self.capture_current();
                    if self.advance().is('{') {
                        self.capture_current();
                        self.advance();
                    } else if !self.hole() {
                        return false;
                    }
                }
                Current::Char('\\') if !verbatim => {
                    self.capture_current();
                    if self.advance().is_end() || self.current().is_line_terminator() {
                        return false;
                    }
                    self.capture_current();
                    self.advance();
                }
                Current::Char('\r' | '\n') if !verbatim => return false,
                Current::Char(_) => {
                    self.capture_current();
                    self.advance();
                }
                Current::End | Current::BeforeStart => return false,
            }
        }
    }

    /// Inside `{...}` just after the opening brace; consumes the closing one.
    fn hole(&mut self) -> bool {
        let mut depth = 0usize;
        loop {
            match self.current() {
                Current::Char('}') if depth == 0 => {
                    self.capture_current();
                    self.advance();
                    return true;
                }
                Current::Char(c @ ('{' | '}')) => {
                    if c == '{' {
                        depth += 1;
                    } else {
                        depth -= 1;
                    }
                    self.capture_current();
                    self.advance();
                }
                Current::Char('"') => {
                    if !self.try_read_string() {
                        return false;
                    }
                }
                Current::Char('\'') => {
                    if !self.try_read_char_literal() {
                        return false;
                    }
                }
                Current::Char('@') => {
                    if !self.try_read_verbatim_string() && self.current().is_end() {
                        return false;
                    }
                }
                Current::Char('$') => {
                    if !self.try_read_interpolated_string() && self.current().is_end() {
                        return false;
                    }
                }
                Current::Char(_) => {
                    self.capture_current();
                    self.advance();
                }
                Current::End | Current::BeforeStart => return false,
            }
        }
    }
}
