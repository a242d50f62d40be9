use serde::{Deserialize, Serialize};

/// One row of the movie catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(rename = "movie_title")]
    pub title: String,
    /// Genre, cast, director and keyword tokens joined by whitespace
    #[serde(rename = "comb")]
    pub combined_features: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, combined_features: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            combined_features: combined_features.into(),
        }
    }

    /// Title as shown in the autocomplete list: first character uppercased,
    /// the rest lowercased.
    pub fn display_title(&self) -> String {
        capitalize(&self.title)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
