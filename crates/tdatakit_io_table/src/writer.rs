//! Delimited-text serializer.

use crate::conf::{C_DELIMITED_CELL_SUFFIX, C_DELIMITED_ROW_SEPARATOR};
use crate::spec::{EnumCellValue, SpecSheet};
use crate::util::escape_delimited_text;

/// Render `sheet` as tab-delimited text.
///
/// Every cell is followed by a tab and a space (also the last one in a row);
/// rows are joined by newlines. Number literals render their stripped value,
/// other cells their display text; `"` is doubled.
pub fn generate_delimited_text(sheet: &SpecSheet) -> String {
    sheet
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| {
                    format!(
                        "{}{C_DELIMITED_CELL_SUFFIX}",
                        escape_delimited_text(render_cell_text(value))
                    )
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(C_DELIMITED_ROW_SEPARATOR)
}

fn render_cell_text(value: &EnumCellValue) -> &str {
    match value {
        EnumCellValue::Number { value, .. } => value.as_str(),
        EnumCellValue::Date { text, .. } | EnumCellValue::Shared { text, .. } => text.as_str(),
    }
}
