use std::path::Path;

use crate::error::{Result, SuggestError};

const SYNONYM_ARROW: &str = "=>";

const CATEGORIES: &[&str] = &[
    "Electrician",
    "Plumber",
    "Carpenter",
    "AC Repair",
    "Beauty Parlor",
    "Salon",
    "Grocery",
    "Restaurants",
    "Cake Shop",
    "Street Food",
    "Rentals",
    "Bike Rental",
    "Room Rental",
];

const KEYWORDS: &[&str] = &["Food", "Repair", "Delivery", "Booking"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub word: String,
    pub value: String,
}

/// The names fed to the autocomplete index, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service categories of every marketplace vertical, then the common
    /// search keywords.
    pub fn marketplace() -> Self {
        Self::from_words(CATEGORIES.iter().chain(KEYWORDS).copied())
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::new();
        for word in words {
            set.push(word);
        }
        set
    }

    pub fn push(&mut self, word: &str) {
        self.push_mapped(word, word);
    }

    pub fn push_mapped(&mut self, word: &str, value: &str) {
        self.labels.push(Label {
            word: word.to_string(),
            value: value.to_string(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Parses a label file: one label per line, `#` comments, and
    /// `keyword => Label` for synonyms.
    pub fn parse(text: &str) -> Result<Self> {
        let mut set = Self::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once(SYNONYM_ARROW) {
                Some((word, value)) => {
                    let (word, value) = (word.trim(), value.trim());
                    if word.is_empty() || value.is_empty() {
                        return Err(SuggestError::InvalidLabel {
                            line: idx + 1,
                            reason: format!("both sides of '{}' must be non-empty", SYNONYM_ARROW),
                        });
                    }
                    set.push_mapped(word, value);
                }
                None => set.push(line),
            }
        }

        Ok(set)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SuggestError::io(path, e))?;
        Self::parse(&text).map_err(|e| SuggestError::InLabelFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}
