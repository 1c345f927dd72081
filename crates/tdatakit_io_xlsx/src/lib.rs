//! `tdatakit_io_xlsx` v1:
//! Workbook serializer for sheets read by `tdatakit_io_table`.
//!
//! - `conf`   : constants and default presets
//! - `spec`   : formats/options/report/errors
//! - `util`   : pure helper functions
//! - `writer` : `rust_xlsxwriter`-backed writer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
pub use spec::{
    EnumAutofitColumnsRule, SpecAutofitCellsPolicy, SpecCellFormat, SpecXlsxReport,
    SpecXlsxWriteOptions, XlsxExportError,
};
pub use util::{plan_column_widths, sanitize_sheet_name};
pub use writer::XlsxWriter;
