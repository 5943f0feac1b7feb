//! Merge pipeline: preamble pass over every source, then body pass.

use std::fs::File;
use std::io::{self, BufReader, Write};

use cm_core::{MinifyConfig, MinifyError, Result, SourceUnit};
use cm_scan::{CharSource, ReaderSource, Scanner, StrSource};

use crate::emitter::MinifyingEmitter;
use crate::preamble::{scan_header, PreambleTable};

/// Merge result with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub sources: usize,
    pub defines: usize,
    pub imports: usize,
    /// Characters read by the body pass.
    pub original_len: usize,
    /// Characters written, preamble included.
    pub compressed_len: usize,
    pub reduction_pct: f64,
}

impl MergeReport {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.compressed_len as f64 / self.original_len as f64
    }
}

/// Totals of one body pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyStats {
    pub sources: usize,
    pub chars_read: usize,
    pub chars_written: usize,
}

/// Opens a scan session over one source unit.
fn open(unit: &SourceUnit) -> Result<Scanner<Box<dyn CharSource + '_>>> {
    let source: Box<dyn CharSource + '_> = match unit {
        SourceUnit::File(path) => {
            let file = File::open(path).map_err(|source| MinifyError::Open {
                path: unit.name(),
                source,
            })?;
            Box::new(ReaderSource::new(BufReader::new(file)))
        }
        SourceUnit::Memory { text, .. } => Box::new(StrSource::new(text)),
    };
    Ok(Scanner::new(source))
}

fn read_error(unit: &SourceUnit, source: io::Error) -> MinifyError {
    MinifyError::Read {
        path: unit.name(),
        source,
    }
}

/// The merge driver.
pub struct MergePipeline {
    pub config: MinifyConfig,
}

impl MergePipeline {
    pub fn new(config: MinifyConfig) -> Self {
        Self { config }
    }

    /// Scan the header of every source into one table.
    pub fn collect_preamble(&self, sources: &[SourceUnit]) -> Result<PreambleTable> {
        self.config.validate()?;
        let mut table = PreambleTable::new();
        for unit in sources {
            let mut scanner = open(unit)?;
            let header = scan_header(&mut scanner, &self.config.import_keyword);
            scanner.finish().map_err(|e| read_error(unit, e))?;
            tracing::debug!(
                source = %unit.name(),
                defines = header.defines.len(),
                imports = header.imports.len(),
                "scanned header"
            );
            table.merge(&header);
        }
        Ok(table)
    }

    /// Collect the preamble and write it to `out`.
    pub fn merge_preamble<W: Write>(
        &self,
        sources: &[SourceUnit],
        out: &mut W,
    ) -> Result<PreambleTable> {
        let table = self.collect_preamble(sources)?;
        table.write_to(out, &self.config.import_keyword)?;
        Ok(table)
    }

    /// Minify every source body into `out`, in order.
    pub fn merge_body<W: Write>(&self, sources: &[SourceUnit], out: &mut W) -> Result<BodyStats> {
        self.config.validate()?;
        let mut emitter = MinifyingEmitter::new(out, &self.config);
        let mut stats = BodyStats::default();
        for unit in sources {
            let name = unit.name();
            let mut scanner = open(unit)?;
            let emitted = emitter.emit_unit(&mut scanner, &name);
            scanner.check().map_err(|e| read_error(unit, e))?;
            emitted?;
            let read = scanner.cursor().chars_consumed() as usize;
            scanner.finish().map_err(|e| read_error(unit, e))?;
            tracing::debug!(source = %name, chars_read = read, "emitted body");
            stats.sources += 1;
            stats.chars_read += read;
        }
        emitter.finish()?;
        stats.chars_written = emitter.written();
        Ok(stats)
    }

    /// Write the merged preamble followed by every minified body.
    pub fn merge<W: Write>(&self, sources: &[SourceUnit], out: &mut W) -> Result<MergeReport> {
        let table = self.collect_preamble(sources)?;
        let preamble_len = table.write_to(out, &self.config.import_keyword)?;
        let body = self.merge_body(sources, out)?;

        let original_len = body.chars_read;
        let compressed_len = preamble_len + body.chars_written;
        let reduction = if original_len > 0 {
            (original_len as f64 - compressed_len as f64) / original_len as f64 * 100.0
        } else {
            0.0
        };
        let report = MergeReport {
            sources: sources.len(),
            defines: table.defines().len(),
            imports: table.imports().len(),
            original_len,
            compressed_len,
            reduction_pct: reduction,
        };
        tracing::info!(
            sources = report.sources,
            defines = report.defines,
            imports = report.imports,
            original = report.original_len,
            compressed = report.compressed_len,
            "merge complete"
        );
        Ok(report)
    }

    /// [`merge`](Self::merge) into a string.
    pub fn merge_to_string(&self, sources: &[SourceUnit]) -> Result<(String, MergeReport)> {
        let mut buf = Vec::new();
        let report = self.merge(sources, &mut buf)?;
        let text = String::from_utf8(buf)
            .map_err(|e| MinifyError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok((text, report))
    }
}

impl Default for MergePipeline {
    fn default() -> Self {
        Self::new(MinifyConfig::default())
    }
}
