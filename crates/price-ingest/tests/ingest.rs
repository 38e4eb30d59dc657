//! Integration tests for reading quote rows, previews, lookups and sessions.

use std::fs;
use std::path::{Path, PathBuf};

use price_core::PricingSession;
use price_ingest::{
    IngestError, load_line_items, load_lookup, load_options, load_session, save_session,
};
use price_model::{Method, PricingOptions};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

const QUOTE_ROWS: &str = "\
Item;CATMAT;Nº;Inciso;Fonte;Quantidade;Preço unitário;Data;Compõe
Item 2;123456;1;I;;10;R$ 10,00;01/02/2024;Sim
Item 2;123456;2;IV;Fornecedor X;10;R$ 11,00;;Sim
Item 2;123456;3;II;;10;abc;;Sim
Item 1;654321;1;I;;5;1.234,56;;Sim
Item 1;654321;2;I;;5;999,00;;Não
Item 2;123456;4;I;;10;12,00;;Sim
";

#[test]
fn quote_rows_are_grouped_filtered_and_estimated() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "cotacoes.csv", QUOTE_ROWS);
    let items = load_line_items(&path, &PricingOptions::default()).expect("load csv");

    let ids: Vec<&str> = items.iter().map(|item| item.item_id.as_str()).collect();
    assert_eq!(ids, vec!["Item 1", "Item 2"]);

    let first = &items[0];
    assert_eq!(first.product_code, "654321");
    assert_eq!(first.raw_entries.len(), 1);
    assert_eq!(first.auto_computed_value, Some(1234.56));

    let second = &items[1];
    assert_eq!(second.values(), vec![10.0, 11.0, 12.0]);
    assert_eq!(second.raw_entries[0].source, "Compras.gov.br");
    assert_eq!(second.raw_entries[1].source, "Fornecedor X");
    assert_eq!(second.auto_kept_indices.len(), 3);
    assert_eq!(second.auto_method, Some(Method::Mean));
    assert_eq!(second.auto_computed_value, Some(11.0));
}

#[test]
fn same_item_with_two_codes_gets_distinct_ids() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        dir.path(),
        "dup.csv",
        "Item,CATMAT,Preço unitário\n3,111111,\"5,00\"\n3,222222,\"7,00\"\n",
    );
    let items = load_line_items(&path, &PricingOptions::default()).expect("load csv");
    let ids: Vec<&str> = items.iter().map(|item| item.item_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["Item 3 | CATMAT 111111", "Item 3 | CATMAT 222222"]
    );
}

#[test]
fn missing_price_column_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "bad.csv", "Item,CATMAT\n1,123456\n");
    let err = load_line_items(&path, &PricingOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "Preço unitário"));
}

#[test]
fn preview_json_accepts_upstream_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        dir.path(),
        "preview.json",
        r#"{"items": [{
            "item": "Item 1",
            "catmat": "445566",
            "valor_calculado": 10.5,
            "valores_brutos": [
                {"idx": 0, "valor": 10.0, "fonte": "Compras.gov.br"},
                {"idx": 3, "valor": 11.0, "fonte": "Fornecedor"}
            ]
        }]}"#,
    );
    let items = load_line_items(&path, &PricingOptions::default()).expect("load preview");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_code, "445566");
    assert_eq!(items[0].auto_computed_value, Some(10.5));
    assert!(items[0].has_index(3));
    // Automatic sets are taken as given.
    assert!(items[0].auto_kept_indices.is_empty());
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "report.pdf", "%PDF");
    let err = load_line_items(&path, &PricingOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn lookup_by_catmat_hydrates_session() {
    let dir = TempDir::new().expect("temp dir");
    let rows = write_file(dir.path(), "rows.csv", QUOTE_ROWS);
    let lookup = write_file(
        dir.path(),
        "lookup.json",
        r#"{"by_catmat": {
            "123456": {"catmat": "123456", "status": "ok",
                       "valor_unitario_resultado_num": 10.5,
                       "data_resultado_iso": "2024-03-01"},
            "654321": {"status": "fracassado"}
        }}"#,
    );
    let items = load_line_items(&rows, &PricingOptions::default()).expect("load csv");
    let records = load_lookup(&lookup).expect("load lookup");
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|record| record.catmat == "654321"));

    let mut session = PricingSession::new(items).expect("session");
    assert_eq!(session.hydrate_last_prices(&records), 1);
    assert_eq!(session.last_quoted_price("Item 2"), Some(10.5));
    assert_eq!(session.last_quoted_price("Item 1"), None);
}

#[test]
fn session_file_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let rows = write_file(dir.path(), "rows.csv", QUOTE_ROWS);
    let items = load_line_items(&rows, &PricingOptions::default()).expect("load csv");
    let mut session = PricingSession::new(items).expect("session");
    session
        .set_last_quoted_price("Item 2", "R$ 10,00")
        .expect("set price");

    let path = dir.path().join("state").join("session.json");
    save_session(&path, &session).expect("save");
    let loaded = load_session(&path).expect("load");
    assert_eq!(loaded, session);
}

#[test]
fn options_default_without_file_and_load_from_toml() {
    assert_eq!(load_options(None).expect("defaults"), PricingOptions::default());

    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        dir.path(),
        "pricing.toml",
        "[[justifications]]\ncode = \"outro_motivo\"\ntext = \"Motivo registrado.\"\n",
    );
    let options = load_options(Some(&path)).expect("load options");
    assert_eq!(options.justifications.len(), 1);
    assert_eq!(options.justifications[0].code, "outro_motivo");
}
