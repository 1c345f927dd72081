//! Stateless helper utilities used by the XLSX writer.

use std::collections::BTreeSet;

use tdatakit_io_table::{EnumCellValue, SpecSheet};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumAutofitColumnsRule, SpecAutofitCellsPolicy, XlsxExportError};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Return `name` or the first free `name__N` (N >= 2), registering the result.
pub fn derive_unique_sheet_name(name: &str, set_names_existing: &mut BTreeSet<String>) -> String {
    if set_names_existing.insert(name.to_string()) {
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if set_names_existing.insert(candidate.clone()) {
            return candidate;
        }
        n_idx += 1;
    }
}

/// Reject sheets that do not fit in one worksheet.
pub fn validate_sheet_limits(sheet: &SpecSheet) -> Result<(), XlsxExportError> {
    let n_rows = sheet.rows.len();
    let n_cols = derive_sheet_width(sheet);
    if n_rows > N_NROWS_EXCEL_MAX || n_cols > N_NCOLS_EXCEL_MAX {
        return Err(XlsxExportError::SheetOverflow { n_rows, n_cols });
    }
    Ok(())
}

/// Widest row of the sheet.
pub fn derive_sheet_width(sheet: &SpecSheet) -> usize {
    sheet.rows.iter().map(Vec::len).max().unwrap_or(0)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Estimate displayed width units of a text; non-ASCII counts 1.6 units.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Plan one width per column; `None` when autofit is disabled.
pub fn plan_column_widths(
    sheet: &SpecSheet,
    policy: &SpecAutofitCellsPolicy,
) -> Option<Vec<usize>> {
    let (if_use_header, if_use_body) = match policy.rule_columns {
        EnumAutofitColumnsRule::None => return None,
        EnumAutofitColumnsRule::Header => (true, false),
        EnumAutofitColumnsRule::Body => (false, true),
        EnumAutofitColumnsRule::All => (true, true),
    };

    let mut l_widths = vec![0usize; derive_sheet_width(sheet)];
    for (idx_row, row) in sheet.rows.iter().enumerate() {
        let if_is_header = sheet.if_has_header && idx_row == 0;
        if (if_is_header && !if_use_header) || (!if_is_header && !if_use_body) {
            continue;
        }
        for (idx_col, value) in row.iter().enumerate() {
            let n_width = match value {
                EnumCellValue::Number { value, .. } => value.len(),
                EnumCellValue::Date { text, .. } | EnumCellValue::Shared { text, .. } => {
                    estimate_unicode_string_width(text)
                }
            };
            l_widths[idx_col] = usize::max(l_widths[idx_col], n_width);
        }
    }

    Some(
        l_widths
            .into_iter()
            .map(|n_width| {
                (n_width + policy.width_cell_padding)
                    .clamp(policy.width_cell_min, policy.width_cell_max)
            })
            .collect(),
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use tdatakit_io_table::SharedStrings;

    fn build_sheet(rows: &[&[&str]], if_has_header: bool) -> SpecSheet {
        let mut shared_strings = SharedStrings::new();
        SpecSheet {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c_text| shared_strings.add(c_text)).collect())
                .collect(),
            if_has_header,
            ..SpecSheet::default()
        }
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_derive_unique_sheet_name() {
        let mut set_names = BTreeSet::new();
        assert_eq!(derive_unique_sheet_name("Data", &mut set_names), "Data");
        assert_eq!(derive_unique_sheet_name("Data", &mut set_names), "Data__2");
        assert_eq!(derive_unique_sheet_name("Data", &mut set_names), "Data__3");
    }

    #[test]
    fn test_plan_column_widths_header_rule() {
        let sheet = build_sheet(&[&["Name", "A much longer header"], &["x".repeat(30).as_str()]], true);
        let policy = SpecAutofitCellsPolicy::default();
        assert_eq!(plan_column_widths(&sheet, &policy), Some(vec![8, 22]));

        let policy_all = SpecAutofitCellsPolicy {
            rule_columns: EnumAutofitColumnsRule::All,
            ..SpecAutofitCellsPolicy::default()
        };
        assert_eq!(plan_column_widths(&sheet, &policy_all), Some(vec![32, 22]));

        let policy_none = SpecAutofitCellsPolicy {
            rule_columns: EnumAutofitColumnsRule::None,
            ..SpecAutofitCellsPolicy::default()
        };
        assert_eq!(plan_column_widths(&sheet, &policy_none), None);
    }

    #[test]
    fn test_estimate_unicode_string_width() {
        assert_eq!(estimate_unicode_string_width("abc"), 3);
        assert_eq!(estimate_unicode_string_width("選取"), 3);
    }
}
