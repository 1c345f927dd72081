//! Table source over a parsed HTML document.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::reader::{TableCell, TableSource};
use crate::spec::{SpecTableExportOptions, TableExportError};

static SELECTOR_ANY_ID: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[id]").expect("BUG: hardcoded selector '[id]' is statically valid")
});

static SELECTOR_TR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

static SELECTOR_CONTROL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("select, input, textarea")
        .expect("BUG: hardcoded selector 'select, input, textarea' is statically valid")
});

static SELECTOR_OPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("option").expect("BUG: hardcoded selector 'option' is statically valid")
});

////////////////////////////////////////////////////////////////////////////////
// #region Cell

/// `td`/`th` element handle.
#[derive(Debug, Clone, Copy)]
pub struct HtmlTableCell<'a> {
    element: ElementRef<'a>,
}

impl TableCell for HtmlTableCell<'_> {
    fn text_content(&self) -> String {
        self.element.text().collect()
    }

    fn control_value(&self) -> Option<String> {
        let control = self.element.select(&SELECTOR_CONTROL).next()?;
        Some(derive_control_value(control))
    }

    fn inner_markup(&self) -> String {
        self.element.inner_html()
    }
}

fn derive_control_value(control: ElementRef<'_>) -> String {
    match control.value().name() {
        "select" => {
            let l_options: Vec<ElementRef<'_>> = control.select(&SELECTOR_OPTION).collect();
            l_options
                .iter()
                .find(|option| option.value().attr("selected").is_some())
                .or_else(|| l_options.first())
                .map(|option| match option.value().attr("value") {
                    Some(val) => val.to_string(),
                    None => option.text().collect(),
                })
                .unwrap_or_default()
        }
        "textarea" => control.text().collect(),
        _ => control.value().attr("value").unwrap_or_default().to_string(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Source

/// Rows and cells of one `<table>` element in `document`.
pub struct HtmlTableSource<'a> {
    document: &'a Html,
    table: Option<ElementRef<'a>>,
    selector_header_row: Option<Selector>,
    selector_body_rows: Option<Selector>,
    selector_exclude: Option<Selector>,
}

impl<'a> HtmlTableSource<'a> {
    /// Resolve the table named by `options` and compile its selectors.
    ///
    /// An unresolvable table is not an error; only malformed selectors are.
    pub fn new(
        document: &'a Html,
        options: &SpecTableExportOptions,
    ) -> Result<Self, TableExportError> {
        let element = match (options.src_id.as_deref(), options.selector_src.as_deref()) {
            (Some(src_id), _) if !src_id.is_empty() => document
                .select(&SELECTOR_ANY_ID)
                .find(|el| el.value().id() == Some(src_id)),
            (_, Some(selector_src)) if !selector_src.is_empty() => {
                document.select(&compile_selector(selector_src)?).next()
            }
            _ => None,
        };

        let table = match element {
            Some(el) if el.value().name() == "table" => Some(el),
            Some(el) => {
                warn!(tag = el.value().name(), "source element is not a table");
                None
            }
            None => {
                debug!("source table not found");
                None
            }
        };

        Ok(Self {
            document,
            table,
            selector_header_row: compile_optional_selector(options.selector_header_row.as_deref())?,
            selector_body_rows: compile_optional_selector(options.selector_body_rows.as_deref())?,
            selector_exclude: compile_optional_selector(options.selector_exclude.as_deref())?,
        })
    }

    fn rows_in_section(&self, section: &str) -> Option<Vec<Vec<HtmlTableCell<'a>>>> {
        let table = self.table?;
        let if_has_section = table
            .children()
            .filter_map(ElementRef::wrap)
            .any(|el| el.value().name() == section);
        if !if_has_section {
            return None;
        }
        Some(
            self.table_rows()
                .into_iter()
                .filter(|tr| {
                    tr.parent()
                        .and_then(ElementRef::wrap)
                        .is_some_and(|el| el.value().name() == section)
                })
                .map(derive_row_cells)
                .collect(),
        )
    }

    fn table_rows(&self) -> Vec<ElementRef<'a>> {
        let Some(table) = self.table else {
            return Vec::new();
        };
        table
            .select(&SELECTOR_TR)
            .filter(|tr| {
                tr.ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "table")
                    .is_some_and(|el| el.id() == table.id())
            })
            .collect()
    }
}

impl<'a> TableSource for HtmlTableSource<'a> {
    type Cell = HtmlTableCell<'a>;

    fn is_table(&self) -> bool {
        self.table.is_some()
    }

    fn header_row_override(&self) -> Option<Vec<HtmlTableCell<'a>>> {
        let selector = self.selector_header_row.as_ref()?;
        self.document.select(selector).next().map(derive_row_cells)
    }

    fn body_rows_override(&self) -> Option<Vec<Vec<HtmlTableCell<'a>>>> {
        let selector = self.selector_body_rows.as_ref()?;
        Some(self.document.select(selector).map(derive_row_cells).collect())
    }

    fn rows_head(&self) -> Option<Vec<Vec<HtmlTableCell<'a>>>> {
        self.rows_in_section("thead")
    }

    fn rows_body(&self) -> Option<Vec<Vec<HtmlTableCell<'a>>>> {
        self.rows_in_section("tbody")
    }

    fn rows_all(&self) -> Vec<Vec<HtmlTableCell<'a>>> {
        self.table_rows().into_iter().map(derive_row_cells).collect()
    }

    fn is_excluded(&self, cell: &HtmlTableCell<'a>) -> bool {
        self.selector_exclude
            .as_ref()
            .is_some_and(|selector| selector.matches(&cell.element))
    }
}

fn derive_row_cells(row: ElementRef<'_>) -> Vec<HtmlTableCell<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .map(|element| HtmlTableCell { element })
        .collect()
}

fn compile_selector(selector: &str) -> Result<Selector, TableExportError> {
    Selector::parse(selector).map_err(|err| TableExportError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn compile_optional_selector(selector: Option<&str>) -> Result<Option<Selector>, TableExportError> {
    match selector {
        Some(val) if !val.trim().is_empty() => compile_selector(val).map(Some),
        _ => Ok(None),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
