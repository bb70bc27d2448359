//! Reading and writing two-column delimited tables

use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::info;

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use crate::{ColumnError, Dataset, Record, Result, Selection};

/// Position of the identifier column
pub const INDEX_COLUMN: usize = 0;

/// Position of the statistic column the dataset is ranked by
pub const STATISTIC_COLUMN: usize = 1;

/// Number of columns a table must have
pub const COLUMNS: usize = 2;

/// File name exported selections are written to by default
pub const DEFAULT_OUTPUT: &str = "filtered_data.csv";

/// Layout options for reading and writing two-column tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Whether the input starts with a header row
    pub has_headers: bool,
    /// Whether the output starts with a header row
    pub write_headers: bool,
    /// Whether only the index column is exported
    pub indices_only: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            write_headers: true,
            indices_only: false,
        }
    }
}

/// A two-column table parsed into a dataset
///
/// Column names are kept only so they can be written back out; they carry
/// no meaning beyond their position.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Names of the index and statistic columns, if the input had a header
    pub headers: Option<(String, String)>,
    /// The parsed records
    pub dataset: Dataset<String, f64>,
}

/// Reads a comma-separated two-column table
///
/// Every row must hold exactly an index and a statistic. The index is kept
/// verbatim; the statistic must parse as a finite number.
///
/// # Arguments
///
/// * `reader` - Source of the delimited text
/// * `has_headers` - Whether the first row names the columns
///
/// # Returns
///
/// * `Result<Table>` - The table, or
///   - [`Error::InvalidColumn`](crate::Error::InvalidColumn) on a row with the wrong shape
///   - [`Error::MalformedInput`](crate::Error::MalformedInput) if the text cannot be read
///
/// # Examples
///
/// ```
/// use critical_window::read_table;
///
/// let table = read_table("sim,loss\n1,0.5\n2,0.25\n".as_bytes(), true).unwrap();
/// assert_eq!(table.headers, Some(("sim".into(), "loss".into())));
/// assert_eq!(table.dataset.len(), 2);
/// ```
pub fn read_table<R: Read>(reader: R, has_headers: bool) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = if has_headers { rdr.headers()?.clone() } else { StringRecord::new() };
    // An empty source has no header row either
    let headers = if header.is_empty() {
        None
    } else {
        let (index, statistic) = split(&header, 1)?;
        Some((index.to_owned(), statistic.to_owned()))
    };

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map_or(row as u64 + 1, |p| p.line());
        let (index, statistic) = split(&record, line)?;
        let value: f64 = statistic.parse().map_err(|_| ColumnError::NotNumeric {
            line,
            field: statistic.to_owned(),
        })?;
        if !value.is_finite() {
            return Err(ColumnError::NotFiniteField {
                line,
                field: statistic.to_owned(),
            }
            .into());
        }
        records.push(Record::new(index.to_owned(), value));
    }

    info!(rows = records.len(), has_headers, "table loaded");

    Ok(Table {
        headers,
        dataset: Dataset::new(records),
    })
}

/// Reads a two-column table from a file
///
/// # Arguments
///
/// * `path` - The file to read
/// * `has_headers` - Whether the first row names the columns
///
/// # Returns
///
/// * `Result<Table>` - See [`read_table`]
pub fn read_table_path(path: impl AsRef<Path>, has_headers: bool) -> Result<Table> {
    read_table(File::open(path)?, has_headers)
}

/// Writes the rows of a selection as comma-separated text
///
/// Columns are written in input order. The header row is written only when
/// headers are known and `options.write_headers` is set.
///
/// # Arguments
///
/// * `writer` - Destination of the delimited text
/// * `selection` - The window to export
/// * `headers` - Column names from the input table
/// * `options` - Output layout
///
/// # Returns
///
/// * `Result<()>` - Nothing, or [`Error::MalformedInput`](crate::Error::MalformedInput) on write failure
pub fn write_selection<W: Write>(
    writer: W,
    selection: &Selection<String, f64>,
    headers: Option<&(String, String)>,
    options: TableOptions,
) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    if let Some((index, statistic)) = headers.filter(|_| options.write_headers) {
        if options.indices_only {
            wtr.write_record([index])?;
        } else {
            wtr.write_record([index, statistic])?;
        }
    }

    for row in selection.rows() {
        if options.indices_only {
            wtr.write_record([&row.index])?;
        } else {
            let value = row.value.to_string();
            wtr.write_record([row.index.as_str(), value.as_str()])?;
        }
    }
    wtr.flush()?;

    info!(rows = selection.len(), indices_only = options.indices_only, "selection written");
    Ok(())
}

/// Writes the rows of a selection to a file, replacing its contents
///
/// # Arguments
///
/// * `path` - The file to write
/// * `selection` - The window to export
/// * `headers` - Column names from the input table
/// * `options` - Output layout
///
/// # Returns
///
/// * `Result<()>` - See [`write_selection`]
pub fn write_selection_path(
    path: impl AsRef<Path>,
    selection: &Selection<String, f64>,
    headers: Option<&(String, String)>,
    options: TableOptions,
) -> Result<()> {
    write_selection(File::create(path)?, selection, headers, options)
}

// Splits a row into its index and statistic fields
fn split(record: &StringRecord, line: u64) -> Result<(&str, &str)> {
    if record.len() != COLUMNS {
        return Err(ColumnError::FieldCount {
            line,
            found: record.len(),
        }
        .into());
    }
    match (record.get(INDEX_COLUMN), record.get(STATISTIC_COLUMN)) {
        (Some(index), Some(statistic)) => Ok((index, statistic)),
        _ => Err(ColumnError::FieldCount {
            line,
            found: record.len(),
        }
        .into()),
    }
}
