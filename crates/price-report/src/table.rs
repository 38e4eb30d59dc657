//! Final price table as `;`-separated CSV with pt-BR number formatting.

use csv::WriterBuilder;

use price_common::format_ptbr;
use price_core::PricingSession;
use price_model::{AdjustState, ComputedRow, LineItem};

use crate::error::{ReportError, Result};

pub const TABLE_HEADERS: [&str; 11] = [
    "Item",
    "CATMAT",
    "Modo",
    "Método",
    "Entradas",
    "Valor automático",
    "Valor final",
    "Último licitado",
    "Diferença",
    "Situação",
    "Justificativa",
];

fn money(value: Option<f64>) -> String {
    value.map(|v| format_ptbr(v, 2)).unwrap_or_default()
}

fn row_record(session: &PricingSession, item: &LineItem, row: &ComputedRow) -> Vec<String> {
    let over = session.overrides().get(&item.item_id);
    let (method, entries, justification) = match over {
        Some(over) => (
            over.method.label(),
            item.values_for(&over.included_set()).len(),
            over.justification.as_str(),
        ),
        None => (
            item.auto_method.map(|m| m.label()).unwrap_or_default(),
            if item.auto_kept_indices.is_empty() {
                item.raw_entries.len()
            } else {
                item.auto_kept_indices.len()
            },
            "",
        ),
    };
    vec![
        item.item_id.clone(),
        item.product_code.clone(),
        row.mode.label().to_string(),
        method.to_string(),
        entries.to_string(),
        money(row.auto_computed_value),
        money(row.final_value),
        money(row.last_quoted_price),
        money(row.difference),
        state_label(row.adjust_state).to_string(),
        justification.to_string(),
    ]
}

fn state_label(state: AdjustState) -> &'static str {
    match state {
        AdjustState::Overridden => "Ajustado manualmente",
        AdjustState::NeedsAttention => "Abaixo do último licitado",
        AdjustState::WithinTolerance => "Dentro da tolerância",
        AdjustState::Locked => "Bloqueado",
    }
}

/// Renders the final table for every item of the session, in item order.
pub fn final_table_csv(session: &PricingSession) -> Result<String> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());
    writer.write_record(TABLE_HEADERS)?;
    for item in session.items() {
        let Some(row) = session.row(&item.item_id) else {
            continue;
        };
        writer.write_record(row_record(session, item, &row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
