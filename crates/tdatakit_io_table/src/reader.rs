//! Table source capabilities and the row builder.

use tracing::debug;

use crate::conf::C_COLUMN_PLACEHOLDER_PREFIX;
use crate::pool::SharedStrings;
use crate::spec::{EnumTableStructure, Row, SpecSheet, SpecTableExportOptions};
use crate::util::{is_selection_control_markup, normalize_cell_text};

////////////////////////////////////////////////////////////////////////////////
// #region Capabilities

/// One table cell as seen by the row builder.
pub trait TableCell {
    /// Rendered text content.
    fn text_content(&self) -> String;
    /// Current value of an embedded `select`/`input` control, if any.
    fn control_value(&self) -> Option<String>;
    /// Raw inner markup.
    fn inner_markup(&self) -> String;
}

/// Row access to a table-like source.
///
/// Rows are returned as owned cell lists; cells are usually cheap handles.
pub trait TableSource {
    /// Cell handle type.
    type Cell: TableCell;

    /// `false` when the source could not be resolved to a table.
    fn is_table(&self) -> bool;
    /// Caller-supplied header row.
    fn header_row_override(&self) -> Option<Vec<Self::Cell>>;
    /// Caller-supplied body rows.
    fn body_rows_override(&self) -> Option<Vec<Vec<Self::Cell>>>;
    /// Rows of the table head; `None` when the table has no head section.
    fn rows_head(&self) -> Option<Vec<Vec<Self::Cell>>>;
    /// Rows of the table body; `None` when the table has no body section.
    fn rows_body(&self) -> Option<Vec<Vec<Self::Cell>>>;
    /// Every row of the table in document order.
    fn rows_all(&self) -> Vec<Vec<Self::Cell>>;
    /// `true` when the exclusion predicate matches `cell`.
    fn is_excluded(&self, cell: &Self::Cell) -> bool;
}

/// Text representing the value of a cell: the embedded control value if there
/// is one, else the rendered text; trimmed with space runs collapsed.
pub fn effective_cell_text<C: TableCell + ?Sized>(cell: &C) -> String {
    let c_raw = cell.control_value().unwrap_or_else(|| cell.text_content());
    normalize_cell_text(&c_raw)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowBuilder

/// Read header and body rows of `source` into a sheet and its string pool.
///
/// Never fails: an unresolved source without overrides yields an empty sheet.
pub fn read_table<S: TableSource>(
    source: &S,
    options: &SpecTableExportOptions,
) -> (SpecSheet, SharedStrings) {
    let mut sheet = SpecSheet::default();
    let mut shared_strings = SharedStrings::new();

    let mut l_header = source.header_row_override();
    let mut l_body = source.body_rows_override();

    if source.is_table() {
        let mut if_skip_first = false;
        if l_header.is_none() && options.if_show_header {
            match source.rows_head() {
                Some(rows_head) => l_header = rows_head.into_iter().next(),
                None => {
                    l_header = source.rows_all().into_iter().next();
                    if_skip_first = true;
                }
            }
        }
        if l_body.is_none() {
            let mut rows = source.rows_body().unwrap_or_else(|| source.rows_all());
            if if_skip_first && !rows.is_empty() {
                rows.remove(0);
            }
            l_body = Some(rows);
        }
    } else {
        debug!("table source not resolved; only explicit rows are read");
    }

    if let Some(cells_header) = l_header {
        let row = read_header_row(source, cells_header, options, &mut sheet, &mut shared_strings);
        sheet.n_cols = row.len();
        sheet.rows.push(row);
        sheet.if_has_header = true;
    }

    if let Some(rows_body) = l_body {
        let mut cnt_dropped = 0usize;
        for (idx_row, cells) in rows_body.into_iter().enumerate() {
            let n_cells = cells.len();
            let row = read_body_row(source, cells, &mut shared_strings);
            cnt_dropped += n_cells - row.len();
            if idx_row == 0 && !sheet.if_has_header {
                sheet.n_cols = row.len();
            }
            sheet.rows.push(row);
        }
        if cnt_dropped > 0 {
            debug!(cnt_dropped, "body cells dropped by exclusion or selection-control filter");
        }
    }

    debug!(
        n_rows = sheet.rows.len(),
        n_cols = sheet.n_cols,
        n_shared = shared_strings.len(),
        "table read"
    );
    (sheet, shared_strings)
}

fn read_header_row<S: TableSource>(
    source: &S,
    cells: Vec<S::Cell>,
    options: &SpecTableExportOptions,
    sheet: &mut SpecSheet,
    shared_strings: &mut SharedStrings,
) -> Row {
    let mut row = Vec::with_capacity(cells.len());
    let mut n_col_seq = 1usize;
    for cell in cells {
        if source.is_excluded(&cell) {
            continue;
        }
        let mut c_text = effective_cell_text(&cell);
        if c_text.is_empty() && options.rule_structure == EnumTableStructure::Table {
            c_text = format!("{C_COLUMN_PLACEHOLDER_PREFIX}{n_col_seq}");
        }
        if c_text == options.selection_marker {
            continue;
        }
        let c_header = c_text.replace('<', "");
        row.push(shared_strings.add(&c_header));
        sheet.headers.push(c_header);
        n_col_seq += 1;
    }
    row
}

fn read_body_row<S: TableSource>(
    source: &S,
    cells: Vec<S::Cell>,
    shared_strings: &mut SharedStrings,
) -> Row {
    cells
        .iter()
        .filter(|cell| !source.is_excluded(cell))
        .filter(|cell| !is_selection_control_markup(&cell.inner_markup()))
        .map(|cell| shared_strings.add(&effective_cell_text(cell)))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
