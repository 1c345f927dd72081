//! Stateless helpers for cell text normalization, classification and escaping.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::conf::{N_DATE_SERIAL_UNIX_EPOCH, N_DATE_YEAR_MIN, N_DAYS_CE_TO_UNIX_EPOCH};

static RE_SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("BUG: space-run regex is statically valid"));

static RE_SELECTION_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<input\b[^>]*\btype\s*=\s*["']?(?:radio|checkbox)\b"#)
        .expect("BUG: selection control regex is statically valid")
});

static RE_NUMBER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+|[0-9]{1,3}(?:,[0-9]{3})+)(?:[.,][0-9]+)?$")
        .expect("BUG: number literal regex is statically valid")
});

static RE_DATE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})[/\-._]([0-9]{1,2})[/\-._]([0-9]{4})$")
        .expect("BUG: date literal regex is statically valid")
});

////////////////////////////////////////////////////////////////////////////////
// #region CellText

/// Trim and collapse interior runs of spaces to one space.
pub fn normalize_cell_text(raw: &str) -> String {
    RE_SPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// `true` when cell markup embeds a radio button or checkbox `input`.
///
/// Text that merely mentions the words (`Radio Shack`) is not a control.
pub fn is_selection_control_markup(markup: &str) -> bool {
    RE_SELECTION_CONTROL.is_match(markup)
}

/// Double embedded `"` for delimited output.
pub fn escape_delimited_text(text: &str) -> String {
    text.replace('"', "\"\"")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Classification

/// Return the text with `,` removed when it is a number literal.
///
/// Accepts an optional leading `-`, plain digits or comma-grouped thousands, and
/// one fractional part introduced by `.` or `,`.
pub fn classify_number_literal(text: &str) -> Option<String> {
    if RE_NUMBER_LITERAL.is_match(text) {
        Some(text.replace(',', ""))
    } else {
        None
    }
}

/// Return the spreadsheet serial when the text is a valid `M/D/YYYY` date.
///
/// Separators may be `/`, `-`, `.` or `_`. Components must form a real
/// calendar date; `02/30/2024` is rejected rather than rolled over. Years
/// below 100 have no spreadsheet serial and stay text.
pub fn classify_date_literal(text: &str) -> Option<f64> {
    let caps = RE_DATE_LITERAL.captures(text)?;
    let n_month: u32 = caps[1].parse().ok()?;
    let n_day: u32 = caps[2].parse().ok()?;
    let n_year: i32 = caps[3].parse().ok()?;
    if n_year < N_DATE_YEAR_MIN {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(n_year, n_month, n_day)?;
    Some(derive_date_serial(date))
}

/// Spreadsheet serial (days since 1899-12-30) of a calendar date.
///
/// The date is taken as local midnight shifted back by its own UTC offset, so
/// the serial is a whole day count independent of the host timezone.
pub fn derive_date_serial(date: NaiveDate) -> f64 {
    let n_days = date.num_days_from_ce() - N_DAYS_CE_TO_UNIX_EPOCH;
    N_DATE_SERIAL_UNIX_EPOCH + f64::from(n_days)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
