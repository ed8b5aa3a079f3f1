// src/search.rs

//! Board filtering: case-insensitive name search plus a cycling kind
//! filter. Sits strictly on top of the form manager's public surface;
//! filtered-out pips leave the board, but fields already placed in the
//! form stay put.

use crate::catalog::{FieldDescriptor, FieldKind};

/// The filter currently applied to the board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub query: String,
    pub kind: Option<FieldKind>,
}

impl SearchFilter {
    pub fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        if let Some(kind) = self.kind {
            if descriptor.kind != kind {
                return false;
            }
        }
        if self.query.is_empty() {
            return true;
        }
        descriptor
            .name
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.kind.is_none()
    }
}

const KIND_CYCLE: [FieldKind; 5] = [
    FieldKind::Text,
    FieldKind::Email,
    FieldKind::Date,
    FieldKind::DateRange,
    FieldKind::DateSingle,
];

/// Owns the search input state and produces [`SearchFilter`]s to push
/// through the form manager.
#[derive(Debug, Default)]
pub struct SearchManager {
    query: String,
    kind: Option<FieldKind>,
}

impl SearchManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn kind(&self) -> Option<FieldKind> {
        self.kind
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.kind = None;
    }

    /// Advances the kind filter through every kind and back to "any".
    pub fn cycle_kind(&mut self) {
        self.kind = match self.kind {
            None => Some(KIND_CYCLE[0]),
            Some(current) => KIND_CYCLE
                .iter()
                .position(|k| *k == current)
                .and_then(|i| KIND_CYCLE.get(i + 1))
                .copied(),
        };
    }

    pub fn filter(&self) -> SearchFilter {
        SearchFilter {
            query: self.query.clone(),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_matches_name_substring_case_insensitively() {
        let filter = SearchFilter {
            query: "DATE".to_string(),
            kind: None,
        };
        assert!(filter.matches(&FieldDescriptor::new(
            "Effective Date",
            "effective_date",
            FieldKind::Date
        )));
        assert!(!filter.matches(&FieldDescriptor::new("Region", "region", FieldKind::Text)));
    }

    #[test]
    fn kind_filter_gates_matches() {
        let filter = SearchFilter {
            query: String::new(),
            kind: Some(FieldKind::Email),
        };
        assert!(filter.matches(&FieldDescriptor::new("Email Address", "email", FieldKind::Email)));
        assert!(!filter.matches(&FieldDescriptor::new("City", "city", FieldKind::Text)));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = SearchFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&FieldDescriptor::new("VIN", "vin", FieldKind::Text)));
    }

    #[test]
    fn cycle_kind_wraps_back_to_any() {
        let mut search = SearchManager::new();
        assert_eq!(search.kind(), None);
        let mut seen = Vec::new();
        for _ in 0..KIND_CYCLE.len() {
            search.cycle_kind();
            seen.push(search.kind().unwrap());
        }
        assert_eq!(seen, KIND_CYCLE.to_vec());
        search.cycle_kind();
        assert_eq!(search.kind(), None);
    }

    #[test]
    fn input_editing_updates_the_filter() {
        let mut search = SearchManager::new();
        search.push_char('i');
        search.push_char('d');
        assert_eq!(search.filter().query, "id");
        search.backspace();
        assert_eq!(search.filter().query, "i");
        search.clear();
        assert!(search.filter().is_empty());
    }
}
