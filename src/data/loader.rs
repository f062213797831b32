use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::{CatalogError, Result};
use super::model::{CellValue, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a raw catalog table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one event per line (the Kaggle export)
/// * `.parquet` – flat columns of strings / numbers with the same headers
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(CatalogError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every cell is type-guessed; a row whose field count differs from the
/// header is an error.
fn load_csv(path: &Path) -> Result<RawTable> {
    let file = open(path)?;
    read_csv(BufReader::new(file))
}

pub(crate) fn read_csv<R: std::io::Read>(input: R) -> Result<RawTable> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|field| guess_cell_type(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

/// Cell texts read as missing values, besides the empty cell.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() || NA_TOKENS.contains(&trimmed) {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    // "inf" parses as a float but is a place name as far as we care.
    if let Some(f) = trimmed.parse::<f64>().ok().filter(|f| f.is_finite()) {
        return CellValue::Float(f);
    }
    if trimmed == "true" || trimmed == "false" {
        return CellValue::Bool(trimmed == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per source field.
///
/// String, integer, float and boolean columns are understood; any other
/// column type is read as null so an unexpected pass-through column never
/// blocks the load.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let columns = batch.columns();
        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|col| extract_cell(col, row)).collect());
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => {
            log::debug!("reading unsupported column type {other:?} as null");
            CellValue::Null
        }
    }
}
