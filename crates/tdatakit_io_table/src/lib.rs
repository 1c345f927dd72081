//! `tdatakit_io_table` v1:
//! HTML table extraction, cell classification and delimited-text output.
//!
//! Module layout:
//! - `conf`   : constants
//! - `spec`   : options, cell/sheet models, errors
//! - `util`   : pure text and classification helpers
//! - `pool`   : shared-string pool
//! - `reader` : table source capabilities and row builder
//! - `html`   : `scraper`-backed table source
//! - `memory` : in-memory table source
//! - `writer` : delimited-text serializer
pub mod conf;
pub mod html;
pub mod memory;
pub mod pool;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use html::{HtmlTableCell, HtmlTableSource};
pub use memory::{MemoryCell, MemoryTableSource};
pub use pool::SharedStrings;
pub use reader::{TableCell, TableSource, effective_cell_text, read_table};
pub use spec::{
    EnumCellValue, EnumExportFormat, EnumTableStructure, Row, SpecSheet, SpecTableExportOptions,
    TableExportError,
};
pub use util::{
    classify_date_literal, classify_number_literal, derive_date_serial, normalize_cell_text,
};
pub use writer::generate_delimited_text;
