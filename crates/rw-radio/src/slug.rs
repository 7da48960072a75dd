//! Stable id generation.

use std::collections::HashMap;

/// Generates document-unique slugs, GitHub heading style.
///
/// Repeated slugs get a `-1`, `-2`, ... suffix. A `Slugger` lives for one
/// transform session, so ids are unique within that session only.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Create an empty slugger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `value`, disambiguating against every slug produced so far.
    pub fn slug(&mut self, value: &str) -> String {
        let base = slugify(value);
        let mut result = base.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            result = format!("{base}-{count}");
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }
}

/// Lowercase, drop punctuation, turn spaces into dashes.
///
/// Letters and digits of any script are kept, as are `-` and `_`.
#[must_use]
pub fn slugify(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}
