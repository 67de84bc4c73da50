//! CSV input and output for tables.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{CoverageError, CoverageResult};
use crate::mask::YearLike;
use crate::window::YearRange;

use super::{Cell, Table};

const READER_ORIGIN: &str = "<reader>";
const WRITER_ORIGIN: &str = "<writer>";

impl Table {
    /// Reads a headed CSV file into a table.
    ///
    /// Cell types are inferred with [`Cell::parse`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> CoverageResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let file = File::open(path).map_err(|source| CoverageError::Io {
            path: path_str.clone(),
            source,
        })?;
        read_csv(file, &path_str)
    }

    /// Reads headed CSV data from any reader.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> CoverageResult<Self> {
        read_csv(reader, READER_ORIGIN)
    }

    /// Writes the table as headed CSV.
    ///
    /// Null cells are written as empty fields.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> CoverageResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(self.columns())
            .map_err(write_error)?;
        for row in self.rows() {
            csv_writer
                .write_record(row.iter().map(ToString::to_string))
                .map_err(write_error)?;
        }
        csv_writer.flush().map_err(|source| CoverageError::Io {
            path: WRITER_ORIGIN.to_string(),
            source,
        })
    }
}

fn read_csv<R: io::Read>(reader: R, origin: &str) -> CoverageResult<Table> {
    let invalid = |e: csv::Error| CoverageError::InvalidFormat {
        origin: origin.to_string(),
        message: e.to_string(),
    };

    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(invalid)?.clone();
    let mut table = Table::new(headers.iter());

    for record in csv_reader.records() {
        let record = record.map_err(invalid)?;
        table.push_row(record.iter().map(Cell::parse).collect())?;
    }

    Ok(table)
}

/// Copies the header and every in-range record from `reader` to `writer`.
///
/// Kept records are buffered so a bad year cell leaves `writer` untouched.
pub(super) fn filter_csv<R: io::Read, W: io::Write>(
    reader: R,
    writer: W,
    year_column: &str,
    range: YearRange,
) -> CoverageResult<usize> {
    let invalid = |e: csv::Error| CoverageError::InvalidFormat {
        origin: READER_ORIGIN.to_string(),
        message: e.to_string(),
    };

    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(invalid)?.clone();
    let index = headers
        .iter()
        .position(|h| h == year_column)
        .ok_or_else(|| CoverageError::ColumnNotFound {
            column: year_column.to_string(),
        })?;

    let mut kept = Vec::new();
    for (row_number, record) in csv_reader.records().enumerate() {
        let record = record.map_err(invalid)?;
        let year = Cell::parse(&record[index]).to_year(&format!("{year_column}[{row_number}]"))?;
        if range.contains(year) {
            kept.push(record);
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&headers).map_err(write_error)?;
    for record in &kept {
        csv_writer.write_record(record).map_err(write_error)?;
    }
    csv_writer.flush().map_err(|source| CoverageError::Io {
        path: WRITER_ORIGIN.to_string(),
        source,
    })?;
    Ok(kept.len())
}

fn write_error(e: csv::Error) -> CoverageError {
    CoverageError::Io {
        path: WRITER_ORIGIN.to_string(),
        source: e.into(),
    }
}
