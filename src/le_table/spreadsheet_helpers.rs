use crate::ReadLifeResult;
use calamine::{Data, Range};
use polars::prelude::*;
use spreadsheet_ods::Value;

/// One parsed sheet column: free text (country, gender) or numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetColumn {
    Text(Vec<Option<String>>),
    Number(Vec<Option<f64>>),
}

/// A single parsed cell before it is pushed into its column.
enum SheetCell {
    Text(Option<String>),
    Number(Option<f64>),
}

impl SheetCell {
    fn is_empty(&self) -> bool {
        matches!(self, SheetCell::Text(None) | SheetCell::Number(None))
    }
}

fn empty_columns(headers: &[String], text_columns: &[&str]) -> Vec<SheetColumn> {
    headers
        .iter()
        .map(|h| {
            if text_columns.contains(&h.as_str()) {
                SheetColumn::Text(Vec::new())
            } else {
                SheetColumn::Number(Vec::new())
            }
        })
        .collect()
}

fn push_row(columns: &mut [SheetColumn], row: Vec<SheetCell>) {
    for (column, cell) in columns.iter_mut().zip(row) {
        match (column, cell) {
            (SheetColumn::Text(values), SheetCell::Text(v)) => values.push(v),
            (SheetColumn::Number(values), SheetCell::Number(v)) => values.push(v),
            // Cells are parsed with their column's kind
            _ => unreachable!("cell kind always matches its column"),
        }
    }
}

/// Build a DataFrame from headers and parsed columns.
pub fn sheet_columns_to_df(headers: &[String], columns: Vec<SheetColumn>) -> ReadLifeResult<DataFrame> {
    let is_empty = match columns.first() {
        Some(SheetColumn::Text(v)) => v.is_empty(),
        Some(SheetColumn::Number(v)) => v.is_empty(),
        None => true,
    };
    if is_empty {
        return Err("No data rows found in sheet".into());
    }

    let series: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, column)| match column {
            SheetColumn::Text(values) => Series::new(name.into(), values).into_column(),
            SheetColumn::Number(values) => Series::new(name.into(), values).into_column(),
        })
        .collect();

    DataFrame::new(series).map_err(|e| format!("Failed to create DataFrame: {e}").into())
}

/// Header names are matched trimmed and lowercased. Blank cells give `None`.
fn normalize_header(raw: Option<String>) -> Option<String> {
    raw.map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
}

/// Read header names left to right until the first blank cell.
fn collect_headers(mut cell_text: impl FnMut(usize) -> Option<String>) -> ReadLifeResult<Vec<String>> {
    let headers: Vec<String> = (0..)
        .map_while(|col| normalize_header(cell_text(col)))
        .collect();

    if headers.is_empty() {
        return Err("Header row is empty".into());
    }
    Ok(headers)
}

// ========= ODS Using spreadsheet_ods =========

pub fn parse_ods_headers(
    sheet: &spreadsheet_ods::Sheet,
    header_row: u32, // Base 0
) -> ReadLifeResult<Vec<String>> {
    collect_headers(|col| parse_ods_text_cell(sheet.value(header_row, col as u32)))
}

pub fn parse_ods_data(
    sheet: &spreadsheet_ods::Sheet,
    start_row: u32,
    headers: &[String],
    text_columns: &[&str],
) -> ReadLifeResult<Vec<SheetColumn>> {
    let mut columns = empty_columns(headers, text_columns);
    let mut row_num = start_row;

    loop {
        let mut row = Vec::with_capacity(headers.len());
        for (col, header) in headers.iter().enumerate() {
            let cell_value = sheet.value(row_num, col as u32);
            let cell = if text_columns.contains(&header.as_str()) {
                SheetCell::Text(parse_ods_text_cell(cell_value))
            } else {
                SheetCell::Number(parse_ods_f64_cell(cell_value, row_num + 1, header)?)
            };
            row.push(cell);
        }

        // A fully empty row ends the table
        if row.iter().all(SheetCell::is_empty) {
            break;
        }

        push_row(&mut columns, row);
        row_num += 1;
    }

    Ok(columns)
}

fn parse_ods_text_cell(cell_value: &Value) -> Option<String> {
    match cell_value {
        Value::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(f) => Some(f.to_string()),
        _ => None,
    }
}

/// Parse ODS cell value as f64, empty cells as `None`.
pub fn parse_ods_f64_cell(
    cell_value: &Value,
    row_num: u32,
    col_name: &str,
) -> ReadLifeResult<Option<f64>> {
    match cell_value {
        Value::Number(f) => Ok(Some(*f)),
        Value::Text(s) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim().parse::<f64>().map(Some).map_err(|_| {
                    format!("Cannot parse {col_name} '{s}' at row {row_num} as number").into()
                })
            }
        }
        Value::Empty => Ok(None),
        other => Err(format!("Invalid {col_name} cell type {other:?} at row {row_num}").into()),
    }
}

// ========= XLSX - Using Calamine=========

pub fn parse_excel_headers(
    range: &Range<Data>,
    start_row: usize, // Base 0
) -> ReadLifeResult<Vec<String>> {
    collect_headers(|col| parse_excel_text_cell(range.get((start_row, col))))
}

pub fn parse_excel_data(
    range: &Range<Data>,
    start_row: usize,
    headers: &[String],
    text_columns: &[&str],
) -> ReadLifeResult<Vec<SheetColumn>> {
    let mut columns = empty_columns(headers, text_columns);
    let mut row_num = start_row; // Base 0

    loop {
        let mut row = Vec::with_capacity(headers.len());
        for (col, header) in headers.iter().enumerate() {
            let cell = range.get((row_num, col));
            let cell = if text_columns.contains(&header.as_str()) {
                SheetCell::Text(parse_excel_text_cell(cell))
            } else {
                SheetCell::Number(parse_excel_f64_cell(cell, row_num + 1, header)?)
            };
            row.push(cell);
        }

        // Also reached past the last row of the range, where every cell is None
        if row.iter().all(SheetCell::is_empty) {
            break;
        }

        push_row(&mut columns, row);
        row_num += 1;
    }

    Ok(columns)
}

fn parse_excel_text_cell(cell: Option<&Data>) -> Option<String> {
    match cell {
        Some(Data::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Data::Empty) | Some(Data::String(_)) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

/// Parse calamine::Data cell value as f64, empty or missing cells as `None`.
/// Used for XLS, XLSX and ODS workbooks opened through calamine.
fn parse_excel_f64_cell(
    cell: Option<&Data>,
    row_num: usize,
    col_name: &str,
) -> ReadLifeResult<Option<f64>> {
    match cell {
        Some(Data::Float(f)) => Ok(Some(*f)),
        Some(Data::Int(v)) => Ok(Some(*v as f64)),
        Some(Data::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim().parse::<f64>().map(Some).map_err(|_| {
                    format!("Cannot parse {col_name} '{s}' at row {row_num} as number").into()
                })
            }
        }
        Some(Data::Empty) | None => Ok(None),
        Some(other) => {
            Err(format!("Invalid {col_name} cell type {other:?} at row {row_num}").into())
        }
    }
}
