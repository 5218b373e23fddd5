use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use mstk_core::error::{MsError, Result};
use mstk_core::schema::{Column, Decoder};
use mstk_core::text::TextWriter;
use mstk_core::{
    DataFile, DecodeOptions, ExtractOptions, Listed, SymbolFilter, extract, list, locate,
    resolve_schema,
};

fn date_or_dash(d: Option<impl Display>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn find(input: &Path, symbol: &str) -> Result<Listed> {
    locate(input, symbol)?
        .ok_or_else(|| MsError::Format(format!("symbol {symbol:?} not found under {}", input.display())))
}

pub fn handle_list(input: PathBuf) -> Result<()> {
    let listed = list(&input)?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "List of available symbols:")?;
    for l in &listed {
        let r = &l.record;
        writeln!(
            out,
            "symbol: {}, name: {}, file number: {}, frame: {}, first: {}, last: {}, index: {}",
            r.symbol,
            r.name,
            r.file_num,
            r.time_frame,
            date_or_dash(r.first_date),
            date_or_dash(r.last_date),
            r.generation,
        )?;
    }
    Ok(())
}

pub fn handle_extract(
    input: PathBuf,
    symbols: Vec<String>,
    all: bool,
    precision: Option<usize>,
    output: PathBuf,
) -> Result<()> {
    let opts = ExtractOptions {
        input_dir: input,
        output_dir: output,
        filter: SymbolFilter::new(all, symbols),
        decode: DecodeOptions::with_precision(precision),
    };
    let report = extract(&opts)?;
    eprintln!(
        "extract: {} converted, {} partial, {} skipped, {} rows -> {}",
        report.converted(),
        report.partial(),
        report.skipped(),
        report.rows(),
        opts.output_dir.display()
    );
    Ok(())
}

pub fn handle_cat(input: PathBuf, symbol: String, precision: Option<usize>) -> Result<()> {
    let found = find(&input, &symbol)?;
    let rec = &found.record;
    let schema = resolve_schema(
        &found.dir,
        rec.file_num,
        rec.num_fields,
        &DecodeOptions::with_precision(precision),
    )?;
    let data = DataFile::open(&found.dir, rec, &schema)?;

    let mut out = TextWriter::new(std::io::stdout().lock());
    out.write_header(&schema.header())?;
    for row in data {
        out.write_row(&row?)?;
    }
    out.finish()?;
    Ok(())
}

pub fn handle_columns(input: PathBuf, symbol: String) -> Result<()> {
    let found = find(&input, &symbol)?;
    let rec = &found.record;
    let schema = resolve_schema(
        &found.dir,
        rec.file_num,
        rec.num_fields,
        &DecodeOptions::default(),
    )?;
    println!(
        "{} (F{}, {}): {} columns, {} bytes per record",
        rec.symbol,
        rec.file_num,
        rec.data_file_name(),
        schema.len(),
        schema.record_width()
    );
    for (i, col) in schema.columns().iter().enumerate() {
        let decoder = match col {
            Column::Known { decoder, .. } => match decoder {
                Decoder::Date => "date",
                Decoder::Time => "time",
                Decoder::Float { .. } => "float",
                Decoder::Int => "int",
            },
            Column::Unknown { .. } => "skipped",
        };
        println!("#{:<3} {:<10} w={} {}", i, col.label(), col.width(), decoder);
    }
    Ok(())
}
