use std::{io::Read, ops::Index};

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Header of the career name column
pub const CAREER_COLUMN: &str = "Career";
/// Header of the description column
pub const DESCRIPTION_COLUMN: &str = "Description";

/// One catalog entry.
/// Identity is its row in the corpus; duplicate names are distinct rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub name: String,
    pub description: String,
}

impl CareerRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Ordered, immutable collection of career records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    records: Vec<CareerRecord>,
}

impl Corpus {
    /// Wrap records as loaded; order is preserved and nothing is deduplicated
    pub fn from_records(records: Vec<CareerRecord>) -> Self {
        Self { records }
    }

    /// Load a corpus from CSV text.
    /// The first row is the header; column order is free and extra columns are ignored.
    ///
    /// # Errors
    /// * `DataError::MissingColumn` - `Career` or `Description` header absent
    /// * `DataError::MissingField` - a row is too short to reach a required column
    /// * `DataError::Csv` - the input is not valid CSV
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DataError::MissingColumn { column: name })
        };
        let name_col = column(CAREER_COLUMN)?;
        let desc_col = column(DESCRIPTION_COLUMN)?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let field = |col: usize, name: &'static str| {
                record
                    .get(col)
                    .map(str::to_owned)
                    .ok_or(DataError::MissingField { row, column: name })
            };
            records.push(CareerRecord {
                name: field(name_col, CAREER_COLUMN)?,
                description: field(desc_col, DESCRIPTION_COLUMN)?,
            });
        }
        Ok(Self { records })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<&CareerRecord> {
        self.records.get(row)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CareerRecord> {
        self.records.iter()
    }

    #[inline]
    pub fn records(&self) -> &[CareerRecord] {
        &self.records
    }
}

impl Index<usize> for Corpus {
    type Output = CareerRecord;

    fn index(&self, row: usize) -> &CareerRecord {
        &self.records[row]
    }
}

impl FromIterator<CareerRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = CareerRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a CareerRecord;
    type IntoIter = std::slice::Iter<'a, CareerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
