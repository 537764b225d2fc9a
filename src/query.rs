use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownSearchMode;

/// Which volume field a search is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    General,
    Title,
    Author,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::General => "general",
            SearchMode::Title => "title",
            SearchMode::Author => "author",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::General => "Search by: All",
            SearchMode::Title => "Search by: Title",
            SearchMode::Author => "Search by: Author",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SearchMode::General => "Book title or author",
            SearchMode::Title => "Search by book title",
            SearchMode::Author => "Search by author name",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = UnknownSearchMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(SearchMode::General),
            "title" => Ok(SearchMode::Title),
            "author" => Ok(SearchMode::Author),
            other => Err(UnknownSearchMode(other.to_string())),
        }
    }
}

/// Turns user input into a catalog query expression. The caller trims and
/// rejects empty input before getting here.
pub fn build_query(raw_query: &str, mode: SearchMode) -> String {
    match mode {
        SearchMode::General => raw_query.to_string(),
        SearchMode::Title => format!("intitle:{}", raw_query),
        SearchMode::Author => format!("inauthor:{}", raw_query),
    }
}
