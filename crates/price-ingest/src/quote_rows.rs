//! Quote-row CSV ingestion.
//!
//! Reads the detailed table produced by the extraction service (one row per
//! quotation, columns `Item, CATMAT, Nº, Inciso, Fonte, Quantidade,
//! Preço unitário, Data, Compõe`), keeps the rows marked `Compõe = Sim`,
//! groups them into line items and runs the automatic estimate on each.

use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use price_common::parse_localized_amount;
use price_core::apply_estimate;
use price_model::{LineItem, ModelError, PricingOptions, QuoteEntry};

use crate::error::{IngestError, Result};

/// Source label for each legal basis ("inciso") of a quotation.
pub const INCISO_SOURCES: [(&str, &str); 5] = [
    ("I", "Compras.gov.br"),
    ("II", "Contratações similares"),
    ("III", "Mídias Especializadas"),
    ("IV", "Fornecedor"),
    ("V", "Nota Fiscal Eletrônicas"),
];

/// Maps an inciso (`I`..`V`, case-insensitive) to its source label.
pub fn source_for_inciso(inciso: &str) -> Option<&'static str> {
    let key = inciso.trim().to_uppercase();
    INCISO_SOURCES
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, source)| *source)
}

/// One quotation row after cell parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub item: String,
    pub catmat: String,
    pub number: Option<u32>,
    pub inciso: String,
    pub source: String,
    pub quantity: Option<u32>,
    pub unit_price: f64,
    pub date: String,
    /// `Compõe = Sim`: the quote takes part in the price composition.
    pub included: bool,
}

#[derive(Debug, Default)]
struct Columns {
    item: usize,
    catmat: usize,
    unit_price: usize,
    number: Option<usize>,
    inciso: Option<usize>,
    source: Option<usize>,
    quantity: Option<usize>,
    date: Option<usize>,
    included: Option<usize>,
}

/// Lowercases, strips accents and collapses whitespace so header variants
/// (`Preço unitário`, `PRECO UNITARIO`, `Nº`) compare equal.
fn fold_text(raw: &str) -> String {
    let folded: String = raw
        .trim_start_matches('\u{feff}')
        .trim()
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' | 'º' | '°' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| aliases.contains(&header.as_str()))
}

fn locate_columns(headers: &StringRecord, path: &Path) -> Result<Columns> {
    let folded: Vec<String> = headers.iter().map(fold_text).collect();
    let required = |name: &str, aliases: &[&str]| {
        find_column(&folded, aliases).ok_or_else(|| IngestError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    };
    Ok(Columns {
        item: required("Item", &["item"])?,
        catmat: required("CATMAT", &["catmat", "codigo catmat", "catmat/catser"])?,
        unit_price: required(
            "Preço unitário",
            &["preco unitario", "valor unitario", "preco", "valor"],
        )?,
        number: find_column(&folded, &["no", "n", "numero"]),
        inciso: find_column(&folded, &["inciso"]),
        source: find_column(&folded, &["fonte"]),
        quantity: find_column(&folded, &["quantidade", "qtd", "qtde"]),
        date: find_column(&folded, &["data"]),
        included: find_column(&folded, &["compoe"]),
    })
}

/// Picks `;` when the header line uses it more than `,`.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Bare item numbers become `Item <n>`, matching the extraction service.
fn normalize_item(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(number) => format!("Item {number}"),
        Err(_) => trimmed.to_string(),
    }
}

fn cell<'a>(record: &'a StringRecord, column: Option<usize>) -> &'a str {
    column
        .and_then(|index| record.get(index))
        .map(str::trim)
        .unwrap_or_default()
}

/// Parses quote rows from CSV text. `path` is only used in error messages.
///
/// Rows without an item or with an unreadable unit price are skipped with a
/// warning.
pub fn parse_quote_rows(content: &str, path: &Path) -> Result<Vec<QuoteRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(detect_delimiter(content))
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = locate_columns(&headers, path)?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let item = normalize_item(cell(&record, Some(columns.item)));
        if item.is_empty() {
            continue;
        }
        let price_text = cell(&record, Some(columns.unit_price));
        let Some(unit_price) = parse_localized_amount(price_text) else {
            warn!(
                path = %path.display(),
                row = line + 2,
                item = %item,
                "skipping row with unreadable unit price"
            );
            continue;
        };
        let inciso = cell(&record, columns.inciso).to_uppercase();
        let mut source = cell(&record, columns.source).to_string();
        if source.is_empty() {
            source = source_for_inciso(&inciso).unwrap_or_default().to_string();
        }
        let included = columns
            .included
            .is_none_or(|_| fold_text(cell(&record, columns.included)) == "sim");
        rows.push(QuoteRow {
            item,
            catmat: cell(&record, Some(columns.catmat)).to_string(),
            number: cell(&record, columns.number).parse().ok(),
            inciso,
            source,
            quantity: cell(&record, columns.quantity).parse().ok(),
            unit_price,
            date: cell(&record, columns.date).to_string(),
            included,
        });
    }
    Ok(rows)
}

pub fn read_quote_rows(path: &Path) -> Result<Vec<QuoteRow>> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_quote_rows(&content, path)
}

/// Number used to order items: the first run of digits in the item label.
fn item_number(item: &str) -> u64 {
    let digits: String = item
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(u64::MAX)
}

/// Groups included rows by (item, CATMAT) into line items, ordered by item
/// number, and runs the automatic estimate on each.
///
/// Quote indices are the position of the row within its group. When the same
/// item label appears with more than one CATMAT, the ids become
/// `<item> | CATMAT <code>` to stay unique.
pub fn build_line_items(
    rows: &[QuoteRow],
    options: &PricingOptions,
) -> std::result::Result<Vec<LineItem>, ModelError> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: BTreeMap<(String, String), Vec<&QuoteRow>> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.included) {
        let key = (row.item.clone(), row.catmat.clone());
        let group = groups.entry(key.clone()).or_default();
        if group.is_empty() {
            order.push(key);
        }
        group.push(row);
    }
    order.sort_by_key(|(item, catmat)| (item_number(item), catmat.clone()));

    let mut per_item: BTreeMap<&str, usize> = BTreeMap::new();
    for (item, _) in &order {
        *per_item.entry(item.as_str()).or_default() += 1;
    }

    let mut items = Vec::with_capacity(order.len());
    for key in &order {
        let (item, catmat) = key;
        let group = groups.get(key).map(Vec::as_slice).unwrap_or_default();
        let entries = group
            .iter()
            .enumerate()
            .map(|(index, row)| QuoteEntry::new(index as u32, row.unit_price, row.source.clone()))
            .collect();
        let item_id = if per_item.get(item.as_str()).copied().unwrap_or(0) > 1 {
            format!("{item} | CATMAT {catmat}")
        } else {
            item.clone()
        };
        let mut line_item = LineItem::new(item_id, catmat.clone(), entries)?;
        apply_estimate(&mut line_item, options);
        items.push(line_item);
    }
    debug!(rows = rows.len(), items = items.len(), "quote rows grouped");
    Ok(items)
}

/// Reads a quote-row CSV and builds estimated line items from it.
pub fn load_quote_rows(path: &Path, options: &PricingOptions) -> Result<Vec<LineItem>> {
    let rows = read_quote_rows(path)?;
    let excluded = rows.iter().filter(|row| !row.included).count();
    let items = build_line_items(&rows, options).map_err(|source| IngestError::InvalidData {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        rows = rows.len(),
        excluded,
        items = items.len(),
        "quote rows loaded"
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_header_variants() {
        assert_eq!(fold_text("Preço  unitário"), "preco unitario");
        assert_eq!(fold_text("\u{feff}Nº"), "no");
        assert_eq!(fold_text("COMPÕE"), "compoe");
    }

    #[test]
    fn inciso_maps_to_source() {
        assert_eq!(source_for_inciso("iv"), Some("Fornecedor"));
        assert_eq!(source_for_inciso("VI"), None);
    }

    #[test]
    fn item_labels() {
        assert_eq!(normalize_item("007"), "Item 7");
        assert_eq!(normalize_item("0"), "Item 0");
        assert_eq!(normalize_item("Item 12"), "Item 12");
        assert_eq!(item_number("Item 12"), 12);
        assert_eq!(item_number("Lote"), u64::MAX);
    }

    #[test]
    fn semicolon_delimiter_detected() {
        assert_eq!(detect_delimiter("Item;CATMAT;Preço unitário\n"), b';');
        assert_eq!(detect_delimiter("Item,CATMAT,Preço unitário\n"), b',');
    }
}
