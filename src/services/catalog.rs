use std::path::Path;

use crate::{error::AppResult, models::MovieRecord};

/// Ordered movie catalog as read from the CSV file
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MovieRecord>,
}

impl Catalog {
    /// Reads the whole catalog file.
    ///
    /// The file must have a header row with `movie_title` and `comb` columns;
    /// any other column is ignored.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;
        let records = reader
            .deserialize::<MovieRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            path = %path.display(),
            movies = records.len(),
            "Catalog loaded"
        );

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.records.get(index).map(|record| record.title.as_str())
    }

    /// Row of the first movie whose title equals `title`, ignoring case
    pub fn position(&self, title: &str) -> Option<usize> {
        let needle = title.to_lowercase();
        self.records
            .iter()
            .position(|record| record.title.to_lowercase() == needle)
    }

    /// Autocomplete list: every title, capitalized, in catalog order
    pub fn suggestions(&self) -> Vec<String> {
        self.records.iter().map(MovieRecord::display_title).collect()
    }
}
