use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{DataType as XlsxCell, Reader, Xlsx, open_workbook};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::SchemaError;
use super::model::*;

/// Plausible opening years; anything else is a data entry error.
pub const YEAR_RANGE: (i32, i32) = (1800, 2100);

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the station table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx`    – first worksheet, header row followed by one station per row
/// * `.csv`     – header row followed by one station per row
/// * `.json`    – `[{ "Station Name": "...", "Year": 1964, ... }, ...]`
/// * `.parquet` – flat columns named like the spreadsheet headers
///
/// The first row that violates the schema aborts the whole load.
pub fn load_file(path: &Path) -> Result<StationTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let sheet = match ext.as_str() {
        "xlsx" | "xlsm" => read_xlsx(path)?,
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let table = sheet
        .into_table()
        .with_context(|| format!("validating {}", path.display()))?;
    log::info!("Loaded {} stations from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Raw rows, before the schema check
// ---------------------------------------------------------------------------

/// A cell as read from the file, before typing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Empty,
}

impl RawCell {
    fn describe(&self) -> String {
        match self {
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => n.to_string(),
            RawCell::Empty => String::new(),
        }
    }
}

/// Header plus rows of untyped cells.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Position of each required column within a row.
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))?;
        }
        Ok(Self(positions))
    }

    fn cell<'r>(&self, row: &'r [RawCell], column: &'static str) -> &'r RawCell {
        let slot = REQUIRED_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.0[i]);
        slot.and_then(|i| row.get(i)).unwrap_or(&EMPTY_CELL)
    }
}

impl RawSheet {
    /// Check the schema and type every row.
    pub fn into_table(self) -> Result<StationTable, SchemaError> {
        let index = ColumnIndex::resolve(&self.headers)?;
        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| parse_record(i + 1, row, &index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StationTable::new(records))
    }
}

fn parse_record(row_no: usize, row: &[RawCell], index: &ColumnIndex) -> Result<StationRecord, SchemaError> {
    let text = |column| parse_text(row_no, column, index.cell(row, column));
    let number = |column, min, max| parse_bounded(row_no, column, index.cell(row, column), min, max);

    Ok(StationRecord {
        station_name: text(COL_STATION)?,
        prefecture: text(COL_PREFECTURE)?,
        company: text(COL_COMPANY)?,
        line: text(COL_LINE)?,
        year: parse_year(row_no, index.cell(row, COL_YEAR))?,
        longitude: number(COL_LONGITUDE, -180.0, 180.0)?,
        latitude: number(COL_LATITUDE, -90.0, 90.0)?,
        distance_km: number(COL_DISTANCE, 0.0, f64::MAX)?,
    })
}

fn parse_text(row: usize, column: &'static str, cell: &RawCell) -> Result<String, SchemaError> {
    let value = cell.describe();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::EmptyValue { row, column });
    }
    Ok(trimmed.to_string())
}

/// Accept `1964`, `"1964"` or `1964.0`; reject everything that is not a
/// whole 4-digit year inside [`YEAR_RANGE`].
pub(crate) fn parse_year(row: usize, cell: &RawCell) -> Result<i32, SchemaError> {
    let (min, max) = YEAR_RANGE;
    let invalid = || SchemaError::InvalidYear {
        row,
        value: cell.describe(),
        min,
        max,
    };

    let year = match cell {
        RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e5 => *n as i32,
        RawCell::Text(s) => {
            let s = s.trim();
            let digits = s.strip_suffix(".0").unwrap_or(s);
            if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.parse::<i32>().map_err(|_| invalid())?
        }
        _ => return Err(invalid()),
    };

    if !(min..=max).contains(&year) {
        return Err(invalid());
    }
    Ok(year)
}

fn parse_bounded(
    row: usize,
    column: &'static str,
    cell: &RawCell,
    min: f64,
    max: f64,
) -> Result<f64, SchemaError> {
    let value = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(s) => s.trim().parse::<f64>().map_err(|_| SchemaError::InvalidNumber {
            row,
            column,
            value: s.clone(),
        })?,
        RawCell::Empty => return Err(SchemaError::EmptyValue { row, column }),
    };
    if !value.is_finite() || value < min || value > max {
        return Err(SchemaError::OutOfRange {
            row,
            column,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// XLSX reader
// ---------------------------------------------------------------------------

/// Reads the first worksheet; its first row holds the headers.
fn read_xlsx(path: &Path) -> Result<RawSheet> {
    let mut workbook: Xlsx<BufReader<File>> =
        open_workbook(path).context("opening Excel workbook")?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Excel workbook has no worksheets")?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading worksheet '{sheet_name}'"))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .context("worksheet is empty")?
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows = rows
        .filter(|row| !row.iter().all(|c| matches!(c, XlsxCell::Empty)))
        .map(|row| row.iter().map(xlsx_to_raw).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

fn xlsx_to_raw(cell: &XlsxCell) -> RawCell {
    match cell {
        XlsxCell::Int(i) => RawCell::Number(*i as f64),
        XlsxCell::Float(f) => RawCell::Number(*f),
        XlsxCell::String(s) => RawCell::Text(s.clone()),
        XlsxCell::Empty => RawCell::Empty,
        other => RawCell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<RawSheet> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(
            record
                .iter()
                .map(|v| {
                    if v.trim().is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(v.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawSheet { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Station Name": "Tokyo",
///     "Prefecture": "Tokyo",
///     "Company": "JR Central",
///     "Shinkansen_Line": "Tokaido Shinkansen",
///     "Year": 1964,
///     "Longitude": 139.767,
///     "Latitude": 35.681,
///     "Distance from Tokyo Station": 0.0
///   },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<RawSheet> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;
        rows.push(
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_raw).unwrap_or(RawCell::Empty))
                .collect(),
        );
    }

    Ok(RawSheet { headers, rows })
}

fn json_to_raw(val: &JsonValue) -> RawCell {
    match val {
        JsonValue::String(s) => RawCell::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(RawCell::Number)
            .unwrap_or_else(|| RawCell::Text(n.to_string())),
        JsonValue::Null => RawCell::Empty,
        other => RawCell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per spreadsheet header.
///
/// Text columns may be Utf8 or LargeUtf8; numeric columns any of
/// Int32/Int64/Float32/Float64.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawSheet> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| arrow_to_raw(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawSheet { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_to_raw(col: &Arc<dyn Array>, row: usize) -> RawCell {
    if col.is_null(row) {
        return RawCell::Empty;
    }
    match col.data_type() {
        DataType::Utf8 => RawCell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => RawCell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => RawCell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => RawCell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => RawCell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => RawCell::Number(col.as_primitive::<Float64Type>().value(row)),
        other => RawCell::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    const HEADER: &str =
        "Station Name,Prefecture,Company,Shinkansen_Line,Year,Longitude,Latitude,Distance from Tokyo Station";

    fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Two-station parquet file; `station` decides the first column's cells.
    fn write_parquet(dir: &TempDir, station: ArrayRef) -> PathBuf {
        let text = |name: &str| Field::new(name, DataType::Utf8, false);
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_STATION, station.data_type().clone(), true),
            text(COL_PREFECTURE),
            text(COL_COMPANY),
            text(COL_LINE),
            Field::new(COL_YEAR, DataType::Int64, false),
            Field::new(COL_LONGITUDE, DataType::Float64, false),
            Field::new(COL_LATITUDE, DataType::Float64, false),
            Field::new(COL_DISTANCE, DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                station,
                Arc::new(StringArray::from(vec!["Tokyo", "Miyagi"])),
                Arc::new(StringArray::from(vec!["JR Central", "JR East"])),
                Arc::new(StringArray::from(vec!["Tokaido Shinkansen", "Tohoku Shinkansen"])),
                Arc::new(Int64Array::from(vec![1964, 1982])),
                Arc::new(Float64Array::from(vec![139.767, 140.882])),
                Arc::new(Float64Array::from(vec![35.681, 38.260])),
                Arc::new(Float64Array::from(vec![0.0, 351.8])),
            ],
        )
        .unwrap();

        let path = dir.path().join("stations.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn loads_csv_rows_into_typed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "ok.csv",
            &format!(
                "{HEADER}\nTokyo,Tokyo,JR Central,Tokaido Shinkansen,1964,139.767,35.681,0\n\
                 Sendai,Miyagi,JR East,Tohoku Shinkansen,1982,140.882,38.260,351.8\n"
            ),
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].station_name, "Sendai");
        assert_eq!(table.records[1].year, 1982);
        assert!((table.records[1].distance_km - 351.8).abs() < 1e-9);
    }

    #[test]
    fn loads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "ok.json",
            r#"[{"Station Name": "Hakata", "Prefecture": "Fukuoka", "Company": "JR West",
                 "Shinkansen_Line": "Sanyo Shinkansen", "Year": 1975, "Longitude": 130.42,
                 "Latitude": 33.59, "Distance from Tokyo Station": 1174.9}]"#,
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.records[0].prefecture, "Fukuoka");
        assert_eq!(table.records[0].year, 1975);
    }

    #[test]
    fn loads_parquet_written_by_arrow() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, Arc::new(StringArray::from(vec!["Tokyo", "Sendai"])));

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].station_name, "Tokyo");
        assert_eq!(table.records[1].company, "JR East");
        assert_eq!(table.records[1].year, 1982);
        assert!((table.records[1].latitude - 38.260).abs() < 1e-9);
    }

    #[test]
    fn null_parquet_cell_is_an_empty_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, Arc::new(StringArray::from(vec![Some("Tokyo"), None])));

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::EmptyValue {
                row: 2,
                column: COL_STATION
            })
        );
    }

    #[test]
    fn arrow_cells_map_to_raw_cells() {
        let utf8: ArrayRef = Arc::new(StringArray::from(vec![Some("Nagoya"), None]));
        let large: ArrayRef = Arc::new(LargeStringArray::from(vec!["Kyoto"]));
        let int32: ArrayRef = Arc::new(Int32Array::from(vec![1964]));
        let float: ArrayRef = Arc::new(Float64Array::from(vec![35.171]));

        assert_eq!(arrow_to_raw(&utf8, 0), RawCell::Text("Nagoya".into()));
        assert_eq!(arrow_to_raw(&utf8, 1), RawCell::Empty);
        assert_eq!(arrow_to_raw(&large, 0), RawCell::Text("Kyoto".into()));
        assert_eq!(arrow_to_raw(&int32, 0), RawCell::Number(1964.0));
        assert_eq!(arrow_to_raw(&float, 0), RawCell::Number(35.171));
    }

    #[test]
    fn xlsx_cells_map_to_raw_cells() {
        assert_eq!(xlsx_to_raw(&XlsxCell::Int(1982)), RawCell::Number(1982.0));
        assert_eq!(xlsx_to_raw(&XlsxCell::Float(140.882)), RawCell::Number(140.882));
        assert_eq!(
            xlsx_to_raw(&XlsxCell::String("Sendai".into())),
            RawCell::Text("Sendai".into())
        );
        assert_eq!(xlsx_to_raw(&XlsxCell::Empty), RawCell::Empty);
        assert_eq!(xlsx_to_raw(&XlsxCell::Bool(true)), RawCell::Text("true".into()));
    }

    #[test]
    fn corrupt_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "stations.xlsx", "not a zip archive");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn missing_column_fails_the_load() {
        let sheet = RawSheet {
            headers: vec!["Station Name".into(), "Year".into()],
            rows: vec![],
        };
        assert_eq!(
            sheet.into_table(),
            Err(SchemaError::MissingColumn("Prefecture".to_string()))
        );
    }

    #[test]
    fn bad_row_aborts_instead_of_being_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "bad-year.csv",
            &format!(
                "{HEADER}\nTokyo,Tokyo,JR Central,Tokaido Shinkansen,1964,139.767,35.681,0\n\
                 Nagoya,Aichi,JR Central,Tokaido Shinkansen,64,136.882,35.171,366\n"
            ),
        );
        let err = load_file(&path).unwrap_err();
        let schema = err.downcast_ref::<SchemaError>().unwrap();
        assert!(matches!(schema, SchemaError::InvalidYear { row: 2, .. }));
    }

    #[test]
    fn latitude_outside_the_globe_is_rejected() {
        let sheet = RawSheet {
            headers: HEADER.split(',').map(String::from).collect(),
            rows: vec![vec![
                RawCell::Text("Tokyo".into()),
                RawCell::Text("Tokyo".into()),
                RawCell::Text("JR Central".into()),
                RawCell::Text("Tokaido Shinkansen".into()),
                RawCell::Number(1964.0),
                RawCell::Number(139.767),
                RawCell::Number(135.681),
                RawCell::Number(0.0),
            ]],
        };
        assert!(matches!(
            sheet.into_table(),
            Err(SchemaError::OutOfRange { row: 1, column: COL_LATITUDE, .. })
        ));
    }

    #[test]
    fn year_parsing_accepts_whole_four_digit_years_only() {
        assert_eq!(parse_year(1, &RawCell::Number(1964.0)), Ok(1964));
        assert_eq!(parse_year(1, &RawCell::Text(" 2016 ".into())), Ok(2016));
        assert_eq!(parse_year(1, &RawCell::Text("1982.0".into())), Ok(1982));
        assert!(parse_year(1, &RawCell::Number(1964.5)).is_err());
        assert!(parse_year(1, &RawCell::Text("abcd".into())).is_err());
        assert!(parse_year(1, &RawCell::Text("12345".into())).is_err());
        assert!(parse_year(1, &RawCell::Text("1066".into())).is_err());
        assert!(parse_year(1, &RawCell::Empty).is_err());
    }

    #[test]
    fn unknown_extension_is_an_error() {
        assert!(load_file(Path::new("stations.txt")).is_err());
    }
}
