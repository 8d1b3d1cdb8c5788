use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A category anchor taken from the directory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub href: String,
    pub category_name: String,
}

impl LinkRecord {
    pub fn new<H: Into<String>, N: Into<String>>(href: H, category_name: N) -> Self {
        Self {
            href: href.into(),
            category_name: category_name.into(),
        }
    }
}

impl fmt::Display for LinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category_name, self.href)
    }
}

/// One line of the output file. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub url: String,
    pub category_name: String,
    pub h5_text: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The directory page had no category container, nothing was written.
    NoCategories,
    Written { path: PathBuf, rows: usize },
}
