//! C-style `//` and `/* */` comments.
//!
//! Recognition needs two characters, so an attempt on a lone `/` consumes
//! it before failing; the read variants leave it in the capture.

use crate::cursor::Current;
use crate::scanner::Scanner;
use crate::source::CharSource;

impl<S: CharSource> Scanner<S> {
    /// `//` through the end of the line, line terminator excluded.
    pub fn try_read_line_comment(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('/') {
            return false;
        }
        self.capture_current();
        if !self.advance().is('/') {
            return false;
        }
        self.capture_current();
        self.read_rest_of_line();
        true
    }

    pub fn try_skip_line_comment(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('/') {
            return false;
        }
        if !self.advance().is('/') {
            return false;
        }
        self.skip_rest_of_line();
        true
    }

    /// `/*` through `*/` inclusive. False when unterminated.
    pub fn try_read_block_comment(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('/') {
            return false;
        }
        self.capture_current();
        if !self.advance().is('*') {
            return false;
        }
        self.capture_current();
        if self.advance().is_end() {
            return false;
        }
        self.try_read_until_str("*/")
    }

    pub fn try_skip_block_comment(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('/') {
            return false;
        }
        if !self.advance().is('*') {
            return false;
        }
        if self.advance().is_end() {
            return false;
        }
        self.try_skip_until_str("*/")
    }

    /// Either comment form.
    pub fn try_read_comment(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('/') {
            return false;
        }
        self.capture_current();
        match self.advance() {
            Current::Char('*') => {
                self.capture_current();
                if self.advance().is_end() {
                    return false;
                }
                self.try_read_until_str("*/")
            }
            Current::Char('/') => {
                self.capture_current();
                self.read_rest_of_line();
                true
            }
            _ => false,
        }
    }

    pub fn try_skip_comment(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is('/') {
            return false;
        }
        match self.advance() {
            Current::Char('*') => {
                if self.advance().is_end() {
                    return false;
                }
                self.try_skip_until_str("*/")
            }
            Current::Char('/') => {
                self.skip_rest_of_line();
                true
            }
            _ => false,
        }
    }

    /// Any mix of comments and whitespace. True if anything was consumed.
    pub fn try_read_comments_and_whitespace(&mut self) -> bool {
        let mut any = false;
        while self.try_read_whitespace() || self.try_read_comment() {
            any = true;
        }
        any
    }

    pub fn try_skip_comments_and_whitespace(&mut self) -> bool {
        let mut any = false;
        while self.try_skip_whitespace() || self.try_skip_comment() {
            any = true;
        }
        any
    }

    fn read_rest_of_line(&mut self) {
        while let Current::Char(c) = self.advance() {
            if c == '\r' || c == '\n' {
                break;
            }
            self.capture_current();
        }
    }

    fn skip_rest_of_line(&mut self) {
        while !self.advance().is_end() && !self.current().is_line_terminator() {}
    }
}
