//! Format detection and row extraction for catalog payloads.
//!
//! Two formats are understood: CSV text and `.xlsx` workbooks. XLSX support
//! depends on the `xlsx` cargo feature.

use super::error::IngestionError;
use super::price_parser::parse_price;

/// Cell as read from the source, before any product validation
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

pub type Row = Vec<CellValue>;

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// Numeric cells are taken as is, text goes through [`parse_price`].
    pub fn price(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => parse_price(s),
            CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        }
    }
}

/// Cell at `index`, or an empty cell when the row is too short.
pub fn cell(row: &Row, index: usize) -> &CellValue {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Csv,
    Xlsx,
}

/// CSV when the declared content type says so or the URL path ends in `.csv`,
/// XLSX otherwise.
pub fn detect_format(content_type: &str, source_url: &str) -> PayloadFormat {
    if content_type.to_ascii_lowercase().contains("text/csv") || has_csv_extension(source_url) {
        PayloadFormat::Csv
    } else {
        PayloadFormat::Xlsx
    }
}

fn has_csv_extension(source_url: &str) -> bool {
    let path = match url::Url::parse(source_url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => source_url
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.to_ascii_lowercase().ends_with(".csv")
}

/// Splits a payload into rows. With `has_header` the first row is dropped.
pub fn extract_rows(
    bytes: &[u8],
    content_type: &str,
    source_url: &str,
    sheet_name: &str,
    has_header: bool,
) -> Result<Vec<Row>, IngestionError> {
    let format = detect_format(content_type, source_url);
    tracing::debug!(
        "Catalog payload: {} bytes, content type '{}', parsed as {:?}",
        bytes.len(),
        content_type,
        format
    );

    let rows = match format {
        PayloadFormat::Csv => read_csv_rows(bytes),
        PayloadFormat::Xlsx => read_xlsx_rows(bytes, content_type, sheet_name)?,
    };

    let skip = usize::from(has_header);
    Ok(rows.into_iter().skip(skip).collect())
}

// ============================================================================
// CSV
// ============================================================================

fn read_csv_rows(bytes: &[u8]) -> Vec<Row> {
    let text = decode_utf8_dropping_invalid(bytes);
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(
                record
                    .iter()
                    .map(|field| CellValue::Text(field.to_string()))
                    .collect(),
            ),
            Err(e) => tracing::warn!("Skipping malformed CSV record: {}", e),
        }
    }
    rows
}

fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

// ============================================================================
// XLSX
// ============================================================================

#[cfg(feature = "xlsx")]
fn read_xlsx_rows(
    bytes: &[u8],
    content_type: &str,
    sheet_name: &str,
) -> Result<Vec<Row>, IngestionError> {
    use calamine::{open_workbook_from_rs, Reader, Xlsx};
    use std::io::Cursor;

    let unreadable = |e: calamine::XlsxError| {
        IngestionError::UnsupportedFormat(format!(
            "could not read workbook (content type '{}'): {}",
            content_type, e
        ))
    };

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(unreadable)?;

    let sheet_names = workbook.sheet_names();
    let selected = match sheet_names.iter().find(|name| name.as_str() == sheet_name) {
        Some(name) => name.clone(),
        None => {
            let first = sheet_names.first().cloned().ok_or_else(|| {
                IngestionError::UnsupportedFormat("workbook contains no sheets".to_string())
            })?;
            tracing::warn!(
                "Sheet '{}' not found (available: {:?}), using '{}'",
                sheet_name,
                sheet_names,
                first
            );
            first
        }
    };

    let range = workbook.worksheet_range(&selected).map_err(unreadable)?;
    let Some((last_row, last_col)) = range.end() else {
        return Ok(Vec::new());
    };

    // Positions are absolute so column 0 is always column A, even when
    // the used range starts further right or lower.
    let rows = (0..=last_row)
        .map(|r| {
            (0..=last_col)
                .map(|c| {
                    range
                        .get_value((r, c))
                        .map(CellValue::from)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect();
    Ok(rows)
}

#[cfg(not(feature = "xlsx"))]
fn read_xlsx_rows(
    _bytes: &[u8],
    content_type: &str,
    _sheet_name: &str,
) -> Result<Vec<Row>, IngestionError> {
    Err(IngestionError::UnsupportedFormat(format!(
        "payload with content type '{}' is not CSV and this server was built without .xlsx support",
        content_type
    )))
}

#[cfg(feature = "xlsx")]
impl From<&calamine::Data> for CellValue {
    fn from(data: &calamine::Data) -> Self {
        use calamine::Data;
        match data {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}
