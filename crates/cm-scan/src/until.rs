//! Run-until primitives: consume everything up to a terminator.
//!
//! With `consume` set the terminator is taken too (and captured by the
//! read variants); otherwise the cursor stops on it. Reaching the end of
//! input first is a failure.

use crate::cursor::Current;
use crate::scanner::Scanner;
use crate::source::CharSource;

impl<S: CharSource> Scanner<S> {
    pub fn try_read_until(&mut self, term: char, consume: bool) -> bool {
        self.ensure_started();
        loop {
            match self.current() {
                Current::Char(c) if c == term => {
                    if consume {
                        self.capture_current();
                        self.advance();
                    }
                    return true;
                }
                Current::Char(_) => {
                    self.capture_current();
                    self.advance();
                }
                _ => return false,
            }
        }
    }

    pub fn try_skip_until(&mut self, term: char, consume: bool) -> bool {
        self.ensure_started();
        loop {
            match self.current() {
                Current::Char(c) if c == term => {
                    if consume {
                        self.advance();
                    }
                    return true;
                }
                Current::Char(_) => {
                    self.advance();
                }
                _ => return false,
            }
        }
    }

    /// Like [`try_read_until`](Self::try_read_until), but the character
    /// after `escape` is always taken, even when it is `term`.
    pub fn try_read_until_escaped(&mut self, term: char, escape: char, consume: bool) -> bool {
        self.ensure_started();
        loop {
            match self.current() {
                Current::Char(c) if c == term => {
                    if consume {
                        self.capture_current();
                        self.advance();
                    }
                    return true;
                }
                Current::Char(c) => {
                    self.capture_current();
                    if c == escape {
                        if self.advance().is_end() {
                            return false;
                        }
                        self.capture_current();
                    }
                    self.advance();
                }
                _ => return false,
            }
        }
    }

    pub fn try_skip_until_escaped(&mut self, term: char, escape: char, consume: bool) -> bool {
        self.ensure_started();
        loop {
            match self.current() {
                Current::Char(c) if c == term => {
                    if consume {
                        self.advance();
                    }
                    return true;
                }
                Current::Char(c) => {
                    if c == escape && self.advance().is_end() {
                        return false;
                    }
                    self.advance();
                }
                _ => return false,
            }
        }
    }

    pub fn try_read_until_any(&mut self, set: &[char], consume: bool) -> bool {
        self.ensure_started();
        loop {
            match self.current() {
                Current::Char(c) if set.contains(&c) => {
                    if consume {
                        self.capture_current();
                        self.advance();
                    }
                    return true;
                }
                Current::Char(_) => {
                    self.capture_current();
                    self.advance();
                }
                _ => return false,
            }
        }
    }

    pub fn try_skip_until_any(&mut self, set: &[char], consume: bool) -> bool {
        self.ensure_started();
        loop {
            match self.current() {
                Current::Char(c) if set.contains(&c) => {
                    if consume {
                        self.advance();
                    }
                    return true;
                }
                Current::Char(_) => {
                    self.advance();
                }
                _ => return false,
            }
        }
    }

    /// Consume through the first occurrence of `text`.
    ///
    /// After a partial match the search resumes at the character that broke
    /// it, so overlapping patterns like `**/` against `*/` are found.
    pub fn try_read_until_str(&mut self, text: &str) -> bool {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let rest: Vec<char> = chars.collect();
        'scan: while self.try_read_until(first, false) {
            self.capture_current();
            for &want in &rest {
                if !self.advance().is(want) {
                    continue 'scan;
                }
                self.capture_current();
            }
            self.advance();
            return true;
        }
        false
    }

    pub fn try_skip_until_str(&mut self, text: &str) -> bool {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let rest: Vec<char> = chars.collect();
        'scan: while self.try_skip_until(first, false) {
            for &want in &rest {
                if !self.advance().is(want) {
                    continue 'scan;
                }
            }
            self.advance();
            return true;
        }
        false
    }
}
