//! Shared-string pool and the cell classification entry point.

use std::collections::HashMap;

use crate::spec::EnumCellValue;
use crate::util::{classify_date_literal, classify_number_literal};

/// Insertion-ordered set of distinct cell texts.
///
/// Indices are append-only: once assigned, a text keeps its index for the
/// lifetime of the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    cnt_added: usize,
    l_values: Vec<String>,
    dict_index: HashMap<String, usize>,
}

impl SharedStrings {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a normalized cell text, pooling it when it is not a literal.
    ///
    /// Number literals win over dates, dates over plain text.
    pub fn add(&mut self, text: &str) -> EnumCellValue {
        if let Some(value) = classify_number_literal(text) {
            return EnumCellValue::Number {
                value,
                text: text.to_string(),
            };
        }
        if let Some(serial) = classify_date_literal(text) {
            return EnumCellValue::Date {
                serial,
                text: text.to_string(),
            };
        }
        EnumCellValue::Shared {
            index: self.intern(text),
            text: text.to_string(),
        }
    }

    /// Insert text without classification and return its index.
    pub fn intern(&mut self, text: &str) -> usize {
        self.cnt_added += 1;
        if let Some(idx) = self.dict_index.get(text) {
            return *idx;
        }
        let idx = self.l_values.len();
        self.l_values.push(text.to_string());
        self.dict_index.insert(text.to_string(), idx);
        idx
    }

    /// Text stored at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.l_values.get(index).map(String::as_str)
    }

    /// Index of `text` if pooled.
    pub fn index_of(&self, text: &str) -> Option<usize> {
        self.dict_index.get(text).copied()
    }

    /// Distinct texts in index order.
    pub fn values(&self) -> &[String] {
        &self.l_values
    }

    /// Number of distinct texts.
    pub fn len(&self) -> usize {
        self.l_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l_values.is_empty()
    }

    /// Total insertions, duplicates included.
    pub fn count(&self) -> usize {
        self.cnt_added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_classifies_in_priority_order() {
        let mut shared_strings = SharedStrings::new();
        assert_eq!(
            shared_strings.add("1,000"),
            EnumCellValue::Number {
                value: "1000".to_string(),
                text: "1,000".to_string()
            }
        );
        assert!(matches!(
            shared_strings.add("03/15/2024"),
            EnumCellValue::Date { serial, .. } if serial == 45366.0
        ));
        assert_eq!(
            shared_strings.add("02/30/2024"),
            EnumCellValue::Shared {
                index: 0,
                text: "02/30/2024".to_string()
            }
        );
        assert_eq!(shared_strings.len(), 1);
        assert_eq!(shared_strings.count(), 1);
    }

    #[test]
    fn empty_text_is_pooled() {
        let mut shared_strings = SharedStrings::new();
        let value = shared_strings.add("");
        assert_eq!(
            value,
            EnumCellValue::Shared {
                index: 0,
                text: String::new()
            }
        );
        assert_eq!(shared_strings.get(0), Some(""));
        assert_eq!(shared_strings.count(), 1);
    }

    #[test]
    fn duplicate_text_reuses_index() {
        let mut shared_strings = SharedStrings::new();
        let idx_a = shared_strings.intern("alpha");
        let idx_b = shared_strings.intern("beta");
        assert_eq!(shared_strings.intern("alpha"), idx_a);
        assert_ne!(idx_a, idx_b);
        assert_eq!(shared_strings.values(), ["alpha", "beta"]);
        assert_eq!(shared_strings.count(), 3);
        assert_eq!(shared_strings.index_of("beta"), Some(idx_b));
        assert_eq!(shared_strings.index_of("gamma"), None);
    }

    proptest! {
        #[test]
        fn pool_len_equals_unique_inserts(l_texts in proptest::collection::vec("[a-c]{0,2}", 0..40)) {
            let mut shared_strings = SharedStrings::new();
            let l_idx: Vec<usize> = l_texts.iter().map(|c_text| shared_strings.intern(c_text)).collect();
            let set_unique: std::collections::HashSet<&String> = l_texts.iter().collect();
            prop_assert_eq!(shared_strings.len(), set_unique.len());
            prop_assert_eq!(shared_strings.count(), l_texts.len());
            for (c_text, idx) in l_texts.iter().zip(l_idx) {
                prop_assert_eq!(shared_strings.get(idx), Some(c_text.as_str()));
            }
        }
    }
}
