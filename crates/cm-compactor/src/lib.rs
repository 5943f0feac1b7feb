//! cmerge compactor: merges C-family sources into one minified unit.
//!
//! Two passes over the inputs:
//! 1. Preamble: leading `#define NAME` and import directives from every
//!    source, deduplicated, written once at the top.
//! 2. Body: each source minified in turn, headers dropped, into the same
//!    output. Column and spacing state carry over between sources.

pub mod emitter;
pub mod pipeline;
pub mod preamble;

pub use emitter::{EmissionState, MinifyingEmitter};
pub use pipeline::{BodyStats, MergePipeline, MergeReport};
pub use preamble::{scan_header, Header, PreambleTable};

#[cfg(test)]
mod tests;
