use crate::chars::is_ident_continue;
use crate::scanner::Scanner;
use crate::source::CharSource;

impl<S: CharSource> Scanner<S> {
    /// Consume exactly `literal`, stopping at the first mismatch.
    ///
    /// With `check_terminated` the character after the literal must not
    /// continue an identifier, so `intx` does not match keyword `int`.
    pub fn try_read_literal(&mut self, literal: &str, check_terminated: bool) -> bool {
        self.ensure_started();
        for want in literal.chars() {
            if !self.current().is(want) {
                return false;
            }
            self.capture_current();
            self.advance();
        }
        !check_terminated || self.at_literal_end()
    }

    pub fn try_skip_literal(&mut self, literal: &str, check_terminated: bool) -> bool {
        self.ensure_started();
        for want in literal.chars() {
            if !self.current().is(want) {
                return false;
            }
            self.advance();
        }
        !check_terminated || self.at_literal_end()
    }

    fn at_literal_end(&self) -> bool {
        !self.current().char().is_some_and(is_ident_continue)
    }
}
