use std::io::{Cursor, Read};

use tdatakit::{EnumExportOutput, TDataGenError, TableDataGen};
use tdatakit::io_table::{EnumExportFormat, SpecTableExportOptions, TableExportError};

const HTML_STOCK: &str = r#"
<table id="stock">
  <thead><tr><th>Item</th><th></th><th>Qty</th></tr></thead>
  <tbody>
    <tr><td>Bolt</td><td>M6</td><td>2,500</td></tr>
    <tr><td>Nut "hex"</td><td>M6</td><td>12</td></tr>
  </tbody>
</table>
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn text_export_from_json_options() {
    init_tracing();
    let gen_data =
        TableDataGen::from_json_options(HTML_STOCK, r#"{"src_id": "stock", "show_header": true}"#)
            .expect("generate");
    assert_eq!(gen_data.headers(), ["Item", "Column 2", "Qty"]);
    assert_eq!(gen_data.col_count(), 3);
    assert_eq!(
        gen_data.generate().expect("serialize"),
        EnumExportOutput::Text(
            "Item\t Column 2\t Qty\t \nBolt\t M6\t 2500\t \nNut \"\"hex\"\"\t M6\t 12\t ".to_string()
        )
    );
    assert_eq!(gen_data.shared_strings().values().len(), 6);
}

#[test]
fn xlsx_export_produces_workbook() {
    init_tracing();
    let spec_options = SpecTableExportOptions {
        src_id: Some("stock".to_string()),
        format: EnumExportFormat::Xlsx,
        if_show_header: true,
        sheet_name: "Stock".to_string(),
        ..SpecTableExportOptions::default()
    };
    let gen_data = TableDataGen::new(HTML_STOCK, spec_options).expect("generate");
    let EnumExportOutput::Xlsx(v_bytes) = gen_data.generate().expect("serialize") else {
        panic!("xlsx format must produce workbook bytes");
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(v_bytes)).expect("open archive");
    let mut c_workbook_xml = String::new();
    archive
        .by_name("xl/workbook.xml")
        .expect("workbook part")
        .read_to_string(&mut c_workbook_xml)
        .expect("read workbook part");
    assert!(c_workbook_xml.contains(r#"name="Stock""#));
}

#[test]
fn missing_table_generates_empty_text() {
    let gen_data = TableDataGen::new(
        HTML_STOCK,
        SpecTableExportOptions {
            src_id: Some("other".to_string()),
            ..SpecTableExportOptions::default()
        },
    )
    .expect("generate");
    assert!(gen_data.sheet().is_empty());
    assert_eq!(gen_data.generate_text(), "");
}

#[test]
fn bad_exclusion_selector_is_reported() {
    let err = TableDataGen::new(
        HTML_STOCK,
        SpecTableExportOptions {
            src_id: Some("stock".to_string()),
            selector_exclude: Some(":::".to_string()),
            ..SpecTableExportOptions::default()
        },
    )
    .expect_err("invalid selector must fail");
    assert!(matches!(
        err,
        TDataGenError::Table(TableExportError::InvalidSelector { .. })
    ));
}
