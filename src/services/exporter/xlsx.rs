//! Styled spreadsheet snapshots
//!
//! Sheet layout: the first physical row is a single banner cell
//! announcing the latest run, the second holds the column headers,
//! data starts on the third. An existing same-day file is read back
//! and the new batch is appended after its rows.

use crate::types::{NumexError, Record, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{RunStamp, FILE_STEM};

/// Banner row fill
const BANNER_COLOR: u32 = 0x1E3A5F;
/// Header row fill
const HEADER_COLOR: u32 = 0x4A90A4;
/// Zebra fill for odd data rows
const ZEBRA_COLOR: u32 = 0xF5F5F5;

const BANNER_HEIGHT: f64 = 42.0;
const HEADER_HEIGHT: f64 = 36.0;
const DATA_ROW_HEIGHT: f64 = 30.0;
const COLUMN_WIDTH: f64 = 14.0;

/// What a completed export reports back to the operator
pub struct ExportOutcome {
    pub path: PathBuf,
    pub total_rows: usize,
    pub new_rows: usize,
}

/// Per-day snapshot path: same-day runs accumulate into one file
pub fn snapshot_path(dir: &Path, stamp: &RunStamp) -> PathBuf {
    dir.join(format!("{}_{}.xlsx", FILE_STEM, stamp.date))
}

/// Append the merged batch to the day's snapshot, creating the file on
/// the first run of the day, and restyle the whole sheet.
pub fn export(records: &[Record], stamp: &RunStamp, dir: &Path) -> Result<ExportOutcome> {
    let path = snapshot_path(dir, stamp);

    let mut rows = if path.exists() {
        read_existing(&path)?
    } else {
        Vec::new()
    };
    let old_count = rows.len();
    rows.extend(records.iter().map(|r| with_date(r, &stamp.timestamp)));

    let columns = column_order(&rows);
    write_snapshot(&path, &columns, &rows, stamp)?;

    Ok(ExportOutcome {
        path,
        total_rows: rows.len(),
        new_rows: rows.len() - old_count,
    })
}

/// Copy of the record with the batch timestamp as its first field
fn with_date(record: &Record, timestamp: &str) -> Record {
    let mut row = Record::new();
    row.insert("date".to_string(), Value::String(timestamp.to_string()));
    for (key, value) in record {
        if key != "date" {
            row.insert(key.clone(), value.clone());
        }
    }
    row
}

/// `date` first, then every other column in order of first appearance.
/// Old rows precede new ones in `rows`, so surviving snapshot columns
/// keep their position and new-batch columns extend to the right.
fn column_order(rows: &[Record]) -> Vec<String> {
    let mut columns = vec!["date".to_string()];
    for row in rows {
        for key in row.keys() {
            if key != "date" && !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Read back a previous same-day snapshot: banner on the first
/// physical row, headers on the second, data after that. Files written
/// before the date column existed get it backfilled with empty strings.
fn read_existing(path: &Path) -> Result<Vec<Record>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| NumexError::Export(format!("cannot open {}: {}", path.display(), e)))?;
    let sheet_name = match workbook.sheet_names().first() {
        Some(name) => name.to_string(),
        None => return Ok(Vec::new()),
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| NumexError::Export(format!("cannot read {}: {}", path.display(), e)))?;

    let mut rows = range.rows().skip(1);
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(cell_to_header).collect(),
        None => return Ok(Vec::new()),
    };
    let has_date = header.iter().any(|name| name == "date");

    let mut records = Vec::new();
    for cells in rows {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut record = Record::new();
        if !has_date {
            record.insert("date".to_string(), Value::String(String::new()));
        }
        for (i, name) in header.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let cell = cells.get(i).unwrap_or(&Data::Empty);
            record.insert(name.clone(), cell_to_value(cell));
        }
        records.push(record);
    }
    Ok(records)
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::String(String::new()),
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

fn centered(format: Format) -> Format {
    format
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
}

/// Rewrite the whole sheet: banner, headers, data rows, static styling
fn write_snapshot(
    path: &Path,
    columns: &[String],
    rows: &[Record],
    stamp: &RunStamp,
) -> Result<()> {
    let banner_format = centered(
        Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_font_size(12)
            .set_background_color(Color::RGB(BANNER_COLOR)),
    );
    let header_format = centered(
        Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_font_size(10)
            .set_background_color(Color::RGB(HEADER_COLOR)),
    );
    let zebra_format = centered(Format::new().set_background_color(Color::RGB(ZEBRA_COLOR)));
    let plain_format = centered(Format::new().set_background_color(Color::White));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let banner = format!("Date: {}", stamp.timestamp);
    let last_col = columns.len().saturating_sub(1) as u16;
    if columns.len() > 1 {
        worksheet
            .merge_range(0, 0, 0, last_col, &banner, &banner_format)
            .map_err(write_err)?;
    } else {
        worksheet
            .write_string_with_format(0, 0, &banner, &banner_format)
            .map_err(write_err)?;
    }
    worksheet.set_row_height(0, BANNER_HEIGHT).map_err(write_err)?;

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(1, col as u16, name, &header_format)
            .map_err(write_err)?;
    }
    worksheet.set_row_height(1, HEADER_HEIGHT).map_err(write_err)?;

    for (i, record) in rows.iter().enumerate() {
        let row_idx = (i + 2) as u32;
        let format = if i % 2 == 1 {
            &zebra_format
        } else {
            &plain_format
        };
        for (col, name) in columns.iter().enumerate() {
            write_cell(worksheet, row_idx, col as u16, record.get(name), format)?;
        }
        worksheet
            .set_row_height(row_idx, DATA_ROW_HEIGHT)
            .map_err(write_err)?;
    }

    for col in 0..columns.len() {
        worksheet
            .set_column_width(col as u16, COLUMN_WIDTH)
            .map_err(write_err)?;
    }

    workbook.save(path).map_err(write_err)?;
    Ok(())
}

/// One cell; a column missing from this record writes as empty string
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&Value>,
    format: &Format,
) -> Result<()> {
    match value {
        None | Some(Value::Null) => worksheet.write_string_with_format(row, col, "", format),
        Some(Value::String(s)) => worksheet.write_string_with_format(row, col, s, format),
        Some(Value::Number(n)) => {
            worksheet.write_number_with_format(row, col, n.as_f64().unwrap_or(0.0), format)
        }
        Some(Value::Bool(b)) => worksheet.write_boolean_with_format(row, col, *b, format),
        Some(other) => worksheet.write_string_with_format(row, col, other.to_string(), format),
    }
    .map_err(write_err)?;
    Ok(())
}

fn write_err(e: XlsxError) -> NumexError {
    NumexError::Export(format!("spreadsheet write failed: {}", e))
}
