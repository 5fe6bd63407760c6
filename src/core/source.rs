use crate::domain::model::TenantRecord;
use crate::utils::error::{AppError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const NAME_COLUMN: &str = "name";

/// Streams tenant rows from a headed CSV in file order.
///
/// The `name` column is located by header, other columns are ignored.
/// Rows may have fewer or more fields than the header; a row without a
/// `name` field yields an empty name.
pub struct TenantReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    name_index: usize,
}

impl TenantReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }
}

impl<R: Read> TenantReader<R> {
    /// `source` names the input in error messages.
    pub fn from_reader(reader: R, source: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let name_index = reader
            .headers()?
            .iter()
            .position(|h| h.trim() == NAME_COLUMN)
            .ok_or_else(|| AppError::MissingColumnError {
                column: NAME_COLUMN.to_string(),
                path: source.to_string(),
            })?;

        tracing::debug!("Found '{}' column at index {} in {}", NAME_COLUMN, name_index, source);

        Ok(Self {
            records: reader.into_records(),
            name_index,
        })
    }
}

impl<R: Read> Iterator for TenantReader<R> {
    type Item = Result<TenantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(AppError::CsvError(e))),
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let name = record.get(self.name_index).unwrap_or_default().to_string();

        Some(Ok(TenantRecord { name, line }))
    }
}
