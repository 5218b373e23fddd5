mod common;

use common::*;
use mstk_core::read::extract::convert_symbol;
use mstk_core::{
    ColumnSchema, DecodeOptions, ExtractOptions, SymbolFilter, SymbolIndex, SymbolStatus,
    decode_symbol, extract, list, locate, resolve_schema,
};
use mstk_core::container::emaster::EMaster;
use mstk_core::container::xmaster::XMaster;
use tempfile::TempDir;

fn abc_archive(dir: &std::path::Path) -> TestResult {
    write_emaster(
        dir,
        &[EMasterEntry {
            file_num: 1,
            num_fields: 7,
            symbol: "ABC",
            name: "ABC Industries",
            first_date: 1230103.0,
            last_date: 1230103.0,
        }],
    )?;
    write_data_file(
        dir,
        "F1.DAT",
        &[ohlcv(1230103.0, 10.5, 11.25, 10.0, 11.0, 15000.0)],
    )
}

#[test]
fn single_symbol_decodes_to_one_row() -> TestResult {
    let tmp = TempDir::new()?;
    abc_archive(tmp.path())?;

    let index = EMaster::open(tmp.path())?;
    let rec = &index.symbols()[0];
    let opts = DecodeOptions::default();
    let schema = resolve_schema(tmp.path(), rec.file_num, rec.num_fields, &opts)?;
    assert_eq!(schema, ColumnSchema::default_layout(&opts));

    let outcome = decode_symbol(tmp.path(), rec, &schema);
    assert!(outcome.is_complete());
    assert_eq!(outcome.rows.len(), 1);
    let fields: Vec<_> = outcome.rows[0].fields().collect();
    assert_eq!(
        fields,
        ["ABC", "20230103", "10.50", "11.25", "10.00", "11.00", "15000", "0"]
    );
    Ok(())
}

#[test]
fn precision_is_per_call() -> TestResult {
    let tmp = TempDir::new()?;
    abc_archive(tmp.path())?;
    let rec = EMaster::open(tmp.path())?.symbols()[0].clone();

    let four = resolve_schema(tmp.path(), 1, Some(7), &DecodeOptions { precision: 4 })?;
    let zero = resolve_schema(tmp.path(), 1, Some(7), &DecodeOptions { precision: 0 })?;
    let a = decode_symbol(tmp.path(), &rec, &four);
    let b = decode_symbol(tmp.path(), &rec, &zero);
    assert_eq!(a.rows[0].cells[1], "10.5000");
    assert_eq!(b.rows[0].cells[2], "11");
    Ok(())
}

#[test]
fn dop_schema_with_time_and_unknown_column() -> TestResult {
    let tmp = TempDir::new()?;
    write_emaster(
        tmp.path(),
        &[EMasterEntry {
            file_num: 7,
            num_fields: 4,
            symbol: "INTRA",
            name: "",
            first_date: 0.0,
            last_date: 0.0,
        }],
    )?;
    std::fs::write(
        tmp.path().join("F7.DOP"),
        "\"DATE\",8,0\n\"TIME\",4,0\n\"XTRA\",1,0\n\"CLOSE\",5,2\n",
    )?;
    write_data_file(
        tmp.path(),
        "F7.DAT",
        &[
            vec![1240315.0, 930.0, 42.0, 99.5],
            vec![1240315.0, 1430.0, 42.0, 101.25],
        ],
    )?;

    let rec = EMaster::open(tmp.path())?.symbols()[0].clone();
    let schema = resolve_schema(tmp.path(), 7, rec.num_fields, &DecodeOptions::default())?;
    assert_eq!(schema.header(), ["Name", "Date", "Time", "Close"]);
    let outcome = decode_symbol(tmp.path(), &rec, &schema);
    assert!(outcome.is_complete());
    assert_eq!(outcome.rows[0].cells, ["20240315", "0930", "99.50"]);
    assert_eq!(outcome.rows[1].cells, ["20240315", "1430", "101.25"]);
    Ok(())
}

#[test]
fn xmaster_symbols_use_mwd_files() -> TestResult {
    let tmp = TempDir::new()?;
    write_xmaster(tmp.path(), &[(300, "EUR/USD", "Euro", 20230102, 20230103)])?;
    write_data_file(
        tmp.path(),
        "F300.MWD",
        &[
            ohlcv(1230102.0, 1.0625, 1.0703125, 1.0546875, 1.0625, 0.0),
            ohlcv(1230103.0, 1.0625, 1.0625, 1.0625, 1.0625, 0.0),
        ],
    )?;
    let out = tmp.path().join("out");

    let report = extract(&ExtractOptions {
        input_dir: tmp.path().to_path_buf(),
        output_dir: out.clone(),
        filter: SymbolFilter::All,
        decode: DecodeOptions::default(),
    })?;
    assert_eq!(report.converted(), 1);
    assert_eq!(report.rows(), 2);

    let text = std::fs::read_to_string(out.join("EUR_USD.TXT"))?;
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines[0],
        "\"Name\",\"Date\",\"Open\",\"High\",\"Low\",\"Close\",\"Volume\",\"OI\""
    );
    assert_eq!(lines[1], "\"EUR/USD\",20230102,1.06,1.07,1.05,1.06,0,0");
    assert_eq!(lines.len(), 3);

    let x = XMaster::open(tmp.path())?;
    assert_eq!(x.symbols()[0].num_fields, None);
    Ok(())
}

#[test]
fn list_and_locate_span_subdirectories() -> TestResult {
    let tmp = TempDir::new()?;
    let a = tmp.path().join("gpw");
    let b = tmp.path().join("nyse");
    std::fs::create_dir_all(&a)?;
    std::fs::create_dir_all(&b)?;
    abc_archive(&a)?;
    write_xmaster(&b, &[(256, "IBM", "IBM", 0, 0), (257, "MSFT", "Microsoft", 0, 0)])?;

    let all = list(tmp.path())?;
    let names: Vec<_> = all.iter().map(|l| l.record.symbol.as_str()).collect();
    assert_eq!(names, ["ABC", "IBM", "MSFT"]);

    let msft = locate(tmp.path(), "MSFT")?.expect("MSFT listed");
    assert_eq!(msft.dir, b);
    assert_eq!(msft.record.file_num, 257);
    assert!(locate(tmp.path(), "NOPE")?.is_none());
    Ok(())
}

#[test]
fn selected_symbols_only() -> TestResult {
    let tmp = TempDir::new()?;
    write_emaster(
        tmp.path(),
        &[
            EMasterEntry {
                file_num: 1,
                num_fields: 7,
                symbol: "A",
                name: "",
                first_date: 0.0,
                last_date: 0.0,
            },
            EMasterEntry {
                file_num: 2,
                num_fields: 7,
                symbol: "B",
                name: "",
                first_date: 0.0,
                last_date: 0.0,
            },
        ],
    )?;
    write_data_file(tmp.path(), "F1.DAT", &[ohlcv(1230103.0, 1.0, 1.0, 1.0, 1.0, 1.0)])?;
    write_data_file(tmp.path(), "F2.DAT", &[ohlcv(1230103.0, 2.0, 2.0, 2.0, 2.0, 2.0)])?;

    let out = tmp.path().join("out");
    let r = convert_symbol(
        tmp.path(),
        &out,
        &EMaster::open(tmp.path())?.symbols()[1],
        &DecodeOptions::default(),
    );
    // convert_symbol does not create the output directory
    assert_eq!(r.status, SymbolStatus::Skipped);
    assert_eq!(r.rows, 0);

    let report = extract(&ExtractOptions {
        input_dir: tmp.path().to_path_buf(),
        output_dir: out.clone(),
        filter: SymbolFilter::Only(vec!["B".into()]),
        decode: DecodeOptions::default(),
    })?;
    assert_eq!(report.symbols.len(), 1);
    assert_eq!(report.symbols[0].symbol, "B");
    assert!(out.join("B.TXT").exists());
    assert!(!out.join("A.TXT").exists());
    Ok(())
}
