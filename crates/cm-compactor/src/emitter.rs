//! Minifying emitter: re-emits a source body as a compact token stream.
//!
//! Whitespace is dropped and a single space is put back only where two
//! atoms would otherwise run together into a different token. Ordinary comments
//! disappear; directive lines and `///` comments are kept on lines of their
//! own. Literals pass through untouched.

use std::io::{self, Write};

use cm_core::{Expected, MinifyConfig, MinifyError, Result};
use cm_scan::{is_ident_continue, is_ident_start, CharSource, Current, Scanner};

use crate::preamble::scan_header;

/// Characters that start their own dispatch arm and so end a punctuation run.
const DISPATCH: [char; 6] = ['#', '/', '@', '$', '"', '\''];

/// Output position carried from one source unit to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmissionState {
    /// Characters written since the last line break.
    pub column: usize,
    /// Last character written on the current line.
    pub tail: Option<char>,
}

pub struct MinifyingEmitter<W: Write> {
    out: W,
    line_width: usize,
    keep_doc_comments: bool,
    import_keyword: String,
    state: EmissionState,
    written: usize,
}

impl<W: Write> MinifyingEmitter<W> {
    pub fn new(out: W, config: &MinifyConfig) -> Self {
        Self {
            out,
            line_width: config.line_width,
            keep_doc_comments: config.keep_doc_comments,
            import_keyword: config.import_keyword.clone(),
            state: EmissionState::default(),
            written: 0,
        }
    }

    pub fn state(&self) -> EmissionState {
        self.state
    }

    /// Characters written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Emit the body of one source unit. Its header is scanned again and
    /// discarded; the merged preamble already carries it.
    pub fn emit_unit<S: CharSource>(
        &mut self,
        scanner: &mut Scanner<S>,
        source_name: &str,
    ) -> Result<()> {
        scan_header(scanner, &self.import_keyword);
        loop {
            scanner.try_skip_whitespace();
            scanner.clear_capture();
            match scanner.current() {
                Current::End | Current::BeforeStart => return Ok(()),
                Current::Char('#') => self.directive(scanner)?,
                Current::Char('/') => self.slash(scanner, source_name)?,
                Current::Char('@') => {
                    if !scanner.try_read_verbatim_string() {
                        unterminated(scanner, source_name, '"')?;
                        scanner.try_read_identifier();
                    }
                    self.emit_capture(scanner)?;
                }
                Current::Char('$') => {
                    if !scanner.try_read_interpolated_string() {
                        unterminated(scanner, source_name, '"')?;
                    }
                    self.emit_capture(scanner)?;
                }
                Current::Char('"') => {
                    if !scanner.try_read_string() {
                        unterminated(scanner, source_name, '"')?;
                    }
                    self.emit_capture(scanner)?;
                }
                Current::Char('\'') => {
                    if !scanner.try_read_char_literal() {
                        unterminated(scanner, source_name, '\'')?;
                    }
                    self.emit_capture(scanner)?;
                }
                Current::Char(c) if is_ident_start(c) => {
                    scanner.try_read_identifier();
                    self.emit_capture(scanner)?;
                }
                Current::Char(c) if c.is_ascii_digit() => {
                    scanner.try_read_number();
                    self.emit_capture(scanner)?;
                }
                Current::Char(_) => {
                    read_punctuation(scanner);
                    self.emit_capture(scanner)?;
                }
            }
        }
    }

    /// End the output with a line break unless it already does, then flush.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.state.column != 0 {
            self.newline()?;
        }
        self.out.flush()
    }

    /// `#` through the end of the line. A trailing `\` continues the
    /// directive onto the next line.
    fn directive<S: CharSource>(&mut self, scanner: &mut Scanner<S>) -> io::Result<()> {
        loop {
            scanner.try_read_until_any(&['\r', '\n'], false);
            if !scanner.capture().ends_with('\\') || !scanner.current().is_line_terminator() {
                break;
            }
            if scanner.current().is('\r') {
                scanner.capture_current();
                scanner.advance();
            }
            if scanner.current().is('\n') {
                scanner.capture_current();
                scanner.advance();
            }
        }
        let line = scanner.take_capture();
        self.own_line(line.trim_end())
    }

    fn slash<S: CharSource>(&mut self, scanner: &mut Scanner<S>, source_name: &str) -> Result<()> {
        if !scanner.try_read_comment() {
            if scanner.capture().starts_with("/*") {
                unterminated(scanner, source_name, '*')?;
            }
            return self.emit_capture(scanner);
        }
        if self.keep_doc_comments && scanner.capture().starts_with("///") {
            let comment = scanner.take_capture();
            self.own_line(comment.trim_end())?;
        }
        Ok(())
    }

    fn emit_capture<S: CharSource>(&mut self, scanner: &mut Scanner<S>) -> Result<()> {
        let atom = scanner.take_capture();
        self.atom(&atom)?;
        if self.wrap_due() && scanner.current().is_whitespace() {
            self.newline()?;
        }
        Ok(())
    }

    fn wrap_due(&self) -> bool {
        self.line_width > 0 && self.state.column >= self.line_width
    }

    fn atom(&mut self, text: &str) -> io::Result<()> {
        let Some(first) = text.chars().next() else {
            return Ok(());
        };
        if self.state.tail.is_some_and(|tail| needs_separator(tail, first)) {
            if self.wrap_due() {
                self.newline()?;
            } else {
                self.raw(" ")?;
            }
        }
        self.raw(text)?;
        self.state.tail = text.chars().next_back();
        Ok(())
    }

    /// Write `text` on a line of its own.
    fn own_line(&mut self, text: &str) -> io::Result<()> {
        if self.state.column != 0 {
            self.newline()?;
        }
        self.raw(text)?;
        self.newline()
    }

    fn newline(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.written += 1;
        self.state = EmissionState::default();
        Ok(())
    }

    fn raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.written += text.chars().count();
        match text.rfind(['\r', '\n']) {
            Some(at) => self.state.column = text[at + 1..].chars().count(),
            None => self.state.column += text.chars().count(),
        }
        Ok(())
    }
}

/// Whether `prev` followed directly by `next` would lex as a different
/// token than the two kept apart.
fn needs_separator(prev: char, next: char) -> bool {
    match (prev, next) {
        ('/', '*' | '/') => true,
        ('-', '-') | ('+', '+') | ('&', '&') | ('|', '|') => true,
        _ => is_ident_continue(prev) && is_ident_continue(next),
    }
}

/// A literal or comment that failed to close is fatal. The sigil-only
/// forms (`@name`, a bare `$`) are not literals and pass.
fn unterminated<S: CharSource>(
    scanner: &mut Scanner<S>,
    source_name: &str,
    closing: char,
) -> Result<()> {
    let opened = scanner.capture().contains(['"', '\'']) || scanner.capture().starts_with("/*");
    if !opened {
        return Ok(());
    }
    scanner
        .expecting(&[Expected::Char(closing)])
        .map_err(|source| MinifyError::Syntax {
            source_name: source_name.to_string(),
            source,
        })
}

/// A run of operator characters. Always takes at least the current one.
fn read_punctuation<S: CharSource>(scanner: &mut Scanner<S>) {
    scanner.capture_current();
    loop {
        let current = scanner.advance();
        let ends = match current {
            Current::Char(c) => c.is_whitespace() || is_ident_continue(c),
            _ => true,
        };
        if ends || current.is_any_of(&DISPATCH) {
            break;
        }
        scanner.capture_current();
    }
}
