//! Preamble extraction: the leading `#define NAME` and import directives of
//! a source unit, merged across units into one deduplicated table.

use std::collections::HashSet;
use std::io::{self, Write};

use cm_scan::{CharSource, Current, Scanner};

/// Defines and imports found at the top of one source unit, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub defines: Vec<String>,
    pub imports: Vec<String>,
}

impl Header {
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty() && self.imports.is_empty()
    }
}

/// Insertion-ordered set of strings.
#[derive(Debug, Clone, Default)]
struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    fn insert(&mut self, item: &str) -> bool {
        if self.seen.contains(item) {
            return false;
        }
        self.seen.insert(item.to_string());
        self.items.push(item.to_string());
        true
    }
}

/// The merged preamble of a run. Each name is kept once, in the order it
/// was first seen.
#[derive(Debug, Clone, Default)]
pub struct PreambleTable {
    defines: OrderedSet,
    imports: OrderedSet,
}

impl PreambleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the define was already present.
    pub fn add_define(&mut self, name: &str) -> bool {
        self.defines.insert(name)
    }

    /// Returns false if the import was already present.
    pub fn add_import(&mut self, path: &str) -> bool {
        self.imports.insert(path)
    }

    pub fn merge(&mut self, header: &Header) {
        for name in &header.defines {
            self.add_define(name);
        }
        for path in &header.imports {
            self.add_import(path);
        }
    }

    pub fn defines(&self) -> &[String] {
        &self.defines.items
    }

    pub fn imports(&self) -> &[String] {
        &self.imports.items
    }

    pub fn is_empty(&self) -> bool {
        self.defines.items.is_empty() && self.imports.items.is_empty()
    }

    /// Write `#define NAME` lines, then `<keyword> PATH;` lines. Returns the
    /// number of characters written.
    pub fn write_to<W: Write>(&self, out: &mut W, import_keyword: &str) -> io::Result<usize> {
        let mut written = 0;
        for name in self.defines() {
            let line = format!("#define {name}\n");
            out.write_all(line.as_bytes())?;
            written += line.chars().count();
        }
        for path in self.imports() {
            let line = format!("{import_keyword} {path};\n");
            out.write_all(line.as_bytes())?;
            written += line.chars().count();
        }
        Ok(written)
    }
}

enum Entry {
    Define(String),
    Import(String),
}

/// Consume the header of a source unit and return what it declares.
///
/// The header is any interleaving of whitespace, ordinary comments,
/// `#define NAME` lines and `<keyword> A.B.C;` directives. Scanning stops
/// before the first construct of another shape, leaving the cursor where
/// that construct starts. Documentation comments are skipped only ahead of
/// the first entry; after it they end the header, as does an unterminated
/// comment or a define with a value.
pub fn scan_header<S: CharSource>(scanner: &mut Scanner<S>, import_keyword: &str) -> Header {
    let mut header = Header::default();
    scanner.ensure_started();
    loop {
        let mark = scanner.mark();
        let entry = if skip_trivia(scanner, header.is_empty()) {
            match scanner.current() {
                Current::Char('#') => read_define(scanner).map(Entry::Define),
                Current::End => None,
                _ => read_import(scanner, import_keyword).map(Entry::Import),
            }
        } else {
            None
        };
        match entry {
            Some(Entry::Define(name)) => header.defines.push(name),
            Some(Entry::Import(path)) => header.imports.push(path),
            None => {
                scanner.rewind(mark);
                tracing::trace!(
                    line = scanner.line(),
                    column = scanner.column(),
                    "header ends"
                );
                break;
            }
        }
        scanner.commit();
    }
    scanner.clear_capture();
    header
}

fn is_doc_comment(text: &str) -> bool {
    text.starts_with("///")
}

/// Skip whitespace and comments. False on an unterminated comment, a `/`
/// that starts no comment, or a documentation comment unless `allow_doc`.
fn skip_trivia<S: CharSource>(scanner: &mut Scanner<S>, allow_doc: bool) -> bool {
    loop {
        scanner.try_skip_whitespace();
        if !scanner.current().is('/') {
            return true;
        }
        scanner.clear_capture();
        if !scanner.try_read_comment() || (!allow_doc && is_doc_comment(scanner.capture())) {
            return false;
        }
    }
}

/// Like [`skip_trivia`] but never crosses a line break outside a comment.
fn skip_inline_trivia<S: CharSource>(scanner: &mut Scanner<S>) -> bool {
    loop {
        scanner.try_skip_inline_whitespace();
        if !scanner.current().is('/') {
            return true;
        }
        scanner.clear_capture();
        if !scanner.try_read_comment() || is_doc_comment(scanner.capture()) {
            return false;
        }
    }
}

fn read_identifier<S: CharSource>(scanner: &mut Scanner<S>) -> Option<String> {
    scanner.clear_capture();
    if scanner.try_read_identifier() {
        Some(scanner.take_capture())
    } else {
        None
    }
}

/// `#` [ws] `define` ws NAME [ws] end-of-line
fn read_define<S: CharSource>(scanner: &mut Scanner<S>) -> Option<String> {
    scanner.advance();
    scanner.try_skip_inline_whitespace();
    if !scanner.try_skip_literal("define", true) || !skip_inline_trivia(scanner) {
        return None;
    }
    let name = read_identifier(scanner)?;
    if !skip_inline_trivia(scanner) {
        return None;
    }
    let current = scanner.current();
    (current.is_end() || current.is_line_terminator()).then_some(name)
}

/// `<keyword> A . B . C ;` with trivia allowed between the parts.
fn read_import<S: CharSource>(scanner: &mut Scanner<S>, keyword: &str) -> Option<String> {
    if !scanner.try_skip_literal(keyword, true) || !skip_trivia(scanner, false) {
        return None;
    }
    let mut path = read_identifier(scanner)?;
    loop {
        if !skip_trivia(scanner, false) {
            return None;
        }
        match scanner.current() {
            Current::Char('.') => {
                scanner.advance();
                if !skip_trivia(scanner, false) {
                    return None;
                }
                path.push('.');
                path.push_str(&read_identifier(scanner)?);
            }
            Current::Char(';') => {
                scanner.advance();
                return Some(path);
            }
            _ => return None,
        }
    }
}
