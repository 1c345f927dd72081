//! In-memory table source, used for callers that already hold cell data.

use crate::reader::{TableCell, TableSource};

/// Cell with pre-extracted text, control value and markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCell {
    /// Rendered text.
    pub text: String,
    /// Embedded control value.
    pub control_value: Option<String>,
    /// Inner markup.
    pub markup: String,
    /// Exclusion predicate result.
    pub if_excluded: bool,
}

impl MemoryCell {
    /// Plain text cell whose markup is its text.
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            markup: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_control_value(mut self, value: &str) -> Self {
        self.control_value = Some(value.to_string());
        self
    }

    pub fn with_markup(mut self, markup: &str) -> Self {
        self.markup = markup.to_string();
        self
    }

    /// Mark as matching the exclusion predicate.
    pub fn excluded(mut self) -> Self {
        self.if_excluded = true;
        self
    }
}

impl TableCell for MemoryCell {
    fn text_content(&self) -> String {
        self.text.clone()
    }

    fn control_value(&self) -> Option<String> {
        self.control_value.clone()
    }

    fn inner_markup(&self) -> String {
        self.markup.clone()
    }
}

/// Table held as cell rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTableSource {
    /// Source resolved to a table.
    pub if_table: bool,
    /// Head section rows.
    pub rows_head: Option<Vec<Vec<MemoryCell>>>,
    /// Body section rows.
    pub rows_body: Option<Vec<Vec<MemoryCell>>>,
    /// Explicit header row.
    pub header_row_override: Option<Vec<MemoryCell>>,
    /// Explicit body rows.
    pub body_rows_override: Option<Vec<Vec<MemoryCell>>>,
}

impl MemoryTableSource {
    /// Table whose rows all sit in the body section.
    pub fn from_cell_rows(rows: Vec<Vec<MemoryCell>>) -> Self {
        Self {
            if_table: true,
            rows_body: Some(rows),
            ..Self::default()
        }
    }

    /// Same as [`Self::from_cell_rows`] with text-only cells.
    pub fn from_rows(rows: Vec<Vec<&str>>) -> Self {
        Self::from_cell_rows(derive_cell_rows(rows))
    }

    /// Source that did not resolve to a table.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_head(mut self, rows: Vec<Vec<&str>>) -> Self {
        self.rows_head = Some(derive_cell_rows(rows));
        self
    }

    pub fn with_header_override(mut self, cells: Vec<&str>) -> Self {
        self.header_row_override = Some(cells.into_iter().map(MemoryCell::text).collect());
        self
    }

    pub fn with_body_override(mut self, rows: Vec<Vec<&str>>) -> Self {
        self.body_rows_override = Some(derive_cell_rows(rows));
        self
    }
}

impl TableSource for MemoryTableSource {
    type Cell = MemoryCell;

    fn is_table(&self) -> bool {
        self.if_table
    }

    fn header_row_override(&self) -> Option<Vec<MemoryCell>> {
        self.header_row_override.clone()
    }

    fn body_rows_override(&self) -> Option<Vec<Vec<MemoryCell>>> {
        self.body_rows_override.clone()
    }

    fn rows_head(&self) -> Option<Vec<Vec<MemoryCell>>> {
        self.rows_head.clone()
    }

    fn rows_body(&self) -> Option<Vec<Vec<MemoryCell>>> {
        self.rows_body.clone()
    }

    fn rows_all(&self) -> Vec<Vec<MemoryCell>> {
        let mut l_rows = self.rows_head.clone().unwrap_or_default();
        l_rows.extend(self.rows_body.clone().unwrap_or_default());
        l_rows
    }

    fn is_excluded(&self, cell: &MemoryCell) -> bool {
        cell.if_excluded
    }
}

fn derive_cell_rows(rows: Vec<Vec<&str>>) -> Vec<Vec<MemoryCell>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(MemoryCell::text).collect())
        .collect()
}
