use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::SymbolRecord;
use crate::error::{MsError, Result};
use crate::options::DecodeOptions;
use crate::read::datafile::DataFile;
use crate::repo::SymbolFilter;
use crate::repo_factory::{discover, open_index};
use crate::schema::resolve_schema;
use crate::text::TextWriter;

#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub filter: SymbolFilter,
    pub decode: DecodeOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolStatus {
    Converted,
    /// Output written up to the first bad record.
    Partial,
    /// Nothing written (rejected index record, bad schema, missing or empty
    /// data file).
    Skipped,
}

#[derive(Debug)]
pub struct SymbolReport {
    pub symbol: String,
    pub file_num: u16,
    pub rows: u64,
    pub status: SymbolStatus,
    pub error: Option<MsError>,
}

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub symbols: Vec<SymbolReport>,
}

impl ExtractReport {
    fn count(&self, status: SymbolStatus) -> usize {
        self.symbols.iter().filter(|s| s.status == status).count()
    }

    pub fn converted(&self) -> usize {
        self.count(SymbolStatus::Converted)
    }

    pub fn partial(&self) -> usize {
        self.count(SymbolStatus::Partial)
    }

    pub fn skipped(&self) -> usize {
        self.count(SymbolStatus::Skipped)
    }

    pub fn rows(&self) -> u64 {
        self.symbols.iter().map(|s| s.rows).sum()
    }
}

/// Convert every selected symbol of every archive under `opts.input_dir`.
///
/// Index problems abort the run; anything that goes wrong inside one symbol
/// is logged, recorded in the report and the run moves on.
pub fn extract(opts: &ExtractOptions) -> Result<ExtractReport> {
    let dirs = discover(&opts.input_dir)?;
    fs::create_dir_all(&opts.output_dir)?;

    let mut report = ExtractReport::default();
    for dir in &dirs {
        for &kind in &dir.indexes {
            let mut index = open_index(kind, &dir.path)?;
            info!(
                dir = %dir.path.display(),
                index = %kind,
                symbols = index.symbols().len(),
                rejected = index.rejected().len(),
                "index loaded"
            );
            for rec in index.select(&opts.filter) {
                report.symbols.push(convert_symbol(
                    &dir.path,
                    &opts.output_dir,
                    rec,
                    &opts.decode,
                ));
            }
            // already logged by the index reader
            for rej in index.take_rejected() {
                if opts.filter.matches(&rej.symbol) {
                    report.symbols.push(SymbolReport {
                        symbol: rej.symbol,
                        file_num: rej.file_num,
                        rows: 0,
                        status: SymbolStatus::Skipped,
                        error: Some(rej.error),
                    });
                }
            }
        }
    }
    info!(
        converted = report.converted(),
        partial = report.partial(),
        skipped = report.skipped(),
        rows = report.rows(),
        "extract finished"
    );
    Ok(report)
}

#[derive(Default)]
struct Progress {
    opened: bool,
    rows: u64,
}

/// Decode one symbol from `dir` into `<out_dir>/<SYMBOL>.TXT`. Never fails:
/// errors end up in the returned report.
pub fn convert_symbol(
    dir: &Path,
    out_dir: &Path,
    rec: &SymbolRecord,
    decode: &DecodeOptions,
) -> SymbolReport {
    info!(symbol = %rec.symbol, file_num = rec.file_num, "processing");
    let mut progress = Progress::default();
    let result = write_symbol(dir, out_dir, rec, decode, &mut progress);

    let (status, error) = match result {
        Ok(()) => (SymbolStatus::Converted, None),
        Err(e) => {
            let status = if progress.opened {
                SymbolStatus::Partial
            } else {
                SymbolStatus::Skipped
            };
            warn!(
                symbol = %rec.symbol,
                file_num = rec.file_num,
                rows = progress.rows,
                error = %e,
                "symbol {}",
                if status == SymbolStatus::Partial { "truncated" } else { "skipped" }
            );
            (status, Some(e))
        }
    };
    SymbolReport {
        symbol: rec.symbol.clone(),
        file_num: rec.file_num,
        rows: progress.rows,
        status,
        error,
    }
}

fn write_symbol(
    dir: &Path,
    out_dir: &Path,
    rec: &SymbolRecord,
    decode: &DecodeOptions,
    progress: &mut Progress,
) -> Result<()> {
    let schema = resolve_schema(dir, rec.file_num, rec.num_fields, decode)?;
    let data = DataFile::open(dir, rec, &schema)?;

    let mut out = TextWriter::create(&output_path(out_dir, rec)?)?;
    progress.opened = true;
    out.write_header(&schema.header())?;

    let mut failure = None;
    for row in data {
        match row {
            Ok(row) => {
                out.write_row(&row)?;
                progress.rows += 1;
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    // keep what was decoded before a corrupt record
    out.finish()?;
    failure.map_or(Ok(()), Err)
}

/// `<out_dir>/<SYMBOL>.TXT`, refusing stems that would escape `out_dir`.
pub fn output_path(out_dir: &Path, rec: &SymbolRecord) -> Result<PathBuf> {
    let stem = rec.output_stem();
    if stem.is_empty() || stem == "." || stem == ".." || stem.contains('\\') {
        return Err(MsError::Format(format!(
            "unsafe output name for symbol {:?}",
            rec.symbol
        )));
    }
    Ok(out_dir.join(format!("{stem}.TXT")))
}
