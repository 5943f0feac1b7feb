use crate::scanner::Scanner;
use crate::source::CharSource;

impl<S: CharSource> Scanner<S> {
    /// Capture a maximal whitespace run. False if the current character
    /// is not whitespace.
    pub fn try_read_whitespace(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is_whitespace() {
            return false;
        }
        self.capture_current();
        while self.advance().is_whitespace() {
            self.capture_current();
        }
        true
    }

    pub fn try_skip_whitespace(&mut self) -> bool {
        self.ensure_started();
        if !self.current().is_whitespace() {
            return false;
        }
        while self.advance().is_whitespace() {}
        true
    }

    /// Skip whitespace without crossing a line terminator.
    pub fn try_skip_inline_whitespace(&mut self) -> bool {
        self.ensure_started();
        let inline = |s: &Self| s.current().is_whitespace() && !s.current().is_line_terminator();
        if !inline(self) {
            return false;
        }
        while inline(self) {
            self.advance();
        }
        true
    }
}
