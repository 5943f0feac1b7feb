//! Character-level scanning for C-family source text.
//!
//! A [`Scanner`] is one scan session over one input: a [`Cursor`] that
//! tracks position/line/column plus a capture buffer. The primitives are
//! methods on the session and follow one contract:
//!
//! - `try_read_*` consumes a construct and appends it to the capture,
//! - `try_skip_*` consumes without capturing,
//! - both return `false` on a mismatch and stop on the first character they
//!   could not take, leaving whatever was captured so far in place.

pub mod chars;
mod comment;
pub mod cursor;
mod ident;
mod literal;
pub mod scanner;
pub mod source;
mod string;
mod until;
mod whitespace;

pub use chars::{hex_value, is_hex_digit, is_ident_continue, is_ident_start};
pub use cursor::{Current, Cursor, Mark};
pub use scanner::Scanner;
pub use source::{CharSource, ReaderSource, StrSource};
