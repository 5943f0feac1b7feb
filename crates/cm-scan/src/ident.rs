use crate::chars::{is_ident_continue, is_ident_start};
use crate::scanner::Scanner;
use crate::source::CharSource;

impl<S: CharSource> Scanner<S> {
    /// A letter or `_`, then letters, digits and `_`.
    pub fn try_read_identifier(&mut self) -> bool {
        self.ensure_started();
        if !self.current().char().is_some_and(is_ident_start) {
            return false;
        }
        self.capture_current();
        while self.advance().char().is_some_and(is_ident_continue) {
            self.capture_current();
        }
        true
    }

    pub fn try_skip_identifier(&mut self) -> bool {
        self.ensure_started();
        if !self.current().char().is_some_and(is_ident_start) {
            return false;
        }
        while self.advance().char().is_some_and(is_ident_continue) {}
        true
    }

    /// A digit followed by identifier characters, e.g. `42`, `0x1F`, `10UL`.
    /// Separators such as `.` and signs end the run.
    pub fn try_read_number(&mut self) -> bool {
        self.ensure_started();
        if !self.current().char().is_some_and(|c| c.is_ascii_digit()) {
            return false;
        }
        self.capture_current();
        while self.advance().char().is_some_and(is_ident_continue) {
            self.capture_current();
        }
        true
    }
}
