//! Table export constants.

/// Spreadsheet serial of 1970-01-01 (the Unix epoch).
pub const N_DATE_SERIAL_UNIX_EPOCH: f64 = 25569.0;
/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
pub const N_DAYS_CE_TO_UNIX_EPOCH: i32 = 719_163;
/// Smallest year accepted as a date literal.
pub const N_DATE_YEAR_MIN: i32 = 100;

/// Prefix of synthesized header text for empty header cells.
pub const C_COLUMN_PLACEHOLDER_PREFIX: &str = "Column ";
/// Header token marking a selection column; such header cells are dropped.
pub const C_SELECTION_MARKER_DEFAULT: &str = "選取";

/// Text appended after every cell in delimited output.
pub const C_DELIMITED_CELL_SUFFIX: &str = "\t ";
/// Row separator in delimited output.
pub const C_DELIMITED_ROW_SEPARATOR: &str = "\n";

/// Default worksheet name.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet1";
