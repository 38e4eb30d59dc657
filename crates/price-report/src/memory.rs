//! Calculation memory: a plain-text audit of how every final value was
//! reached.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use price_common::format_ptbr;
use price_core::{PricingSession, coefficient_of_variation, estimate, final_value};
use price_model::{
    AutoEstimate, EstimateRule, Exclusion, LineItem, ListMeta, ManualOverride, PricingOptions,
};

pub const MEMORY_TITLE: &str = "Memória de Cálculo";

fn values_line(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_ptbr(*v, 4))
        .collect::<Vec<_>>()
        .join(", ")
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_ptbr(v, decimals))
}

fn write_header(out: &mut String, meta: &ListMeta) {
    let _ = writeln!(out, "{MEMORY_TITLE}");
    if !meta.numero_lista.trim().is_empty() {
        match meta.nome_lista.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(nome) => {
                let _ = writeln!(out, "Lista: {} - {}", meta.numero_lista.trim(), nome.trim());
            }
            None => {
                let _ = writeln!(out, "Lista: {}", meta.numero_lista.trim());
            }
        }
    }
    if let Some(sei) = meta.processo_sei.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "Processo SEI: {}", sei.trim());
    }
    if let Some(name) = meta.responsavel.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "Responsável: {}", name.trim());
    }
}

/// Exclusions of one pass. Details come from re-running the rule; when the
/// item's own sets disagree with it (estimated upstream with other
/// parameters) only the excluded values are listed.
fn write_exclusions(
    out: &mut String,
    title: &str,
    item: &LineItem,
    given: &BTreeSet<u32>,
    computed: &[Exclusion],
) {
    let _ = writeln!(out, "--- {title} ---");
    let _ = writeln!(out, "Qtde: {}", given.len());
    if &index_set(computed) == given {
        for exclusion in computed {
            let _ = writeln!(
                out,
                "v={} | media_outros={} | ratio={}",
                format_ptbr(exclusion.value, 4),
                format_ptbr(exclusion.mean_of_others, 4),
                format_ptbr(exclusion.ratio, 4)
            );
        }
    } else {
        for value in item.values_for(given) {
            let _ = writeln!(out, "v={}", format_ptbr(value, 4));
        }
    }
}

fn index_set(exclusions: &[Exclusion]) -> BTreeSet<u32> {
    exclusions.iter().map(|e| e.index).collect()
}

/// Whether the item's own automatic result is the one the local rule yields.
fn agrees_with_rule(item: &LineItem, computed: &AutoEstimate) -> bool {
    let kept: BTreeSet<u32> = computed.kept_indices.iter().copied().collect();
    item.auto_kept_indices == kept
        && item.auto_excluded_high_indices == index_set(&computed.excluded_high)
        && item.auto_excluded_low_indices == index_set(&computed.excluded_low)
        && item.auto_method.is_none_or(|m| Some(m) == computed.method)
}

fn write_override(out: &mut String, item: &LineItem, over: &ManualOverride) {
    let included = over.included_set();
    let _ = writeln!(out, "Ajuste manual:");
    let _ = writeln!(
        out,
        "  Valores incluídos: {}",
        values_line(&item.values_for(&included))
    );
    let _ = writeln!(out, "  Método: {}", over.method.label());
    let _ = writeln!(out, "  Justificativa: {}", over.justification);
    let _ = writeln!(
        out,
        "  Valor final ajustado (2 casas): {}",
        optional(final_value(item, Some(over)), 2)
    );
}

fn write_item(out: &mut String, session: &PricingSession, item: &LineItem, options: &PricingOptions) {
    let limits = &options.exclusion;
    let initial = item.values();
    let computed = estimate(&item.raw_entries, limits);

    let _ = writeln!(
        out,
        "{} | CATMAT {} | N inicial = {}",
        item.item_id,
        item.product_code,
        initial.len()
    );
    let rule = computed
        .rule
        .description(limits.min_quotes, limits.high_ratio, limits.low_ratio);
    if agrees_with_rule(item, &computed) {
        let _ = writeln!(out, "Regra: {rule}");
    } else {
        let _ = writeln!(
            out,
            "Regra (recalculada localmente; o valor final veio da origem): {rule}"
        );
    }
    let _ = writeln!(out, "Valores iniciais:");
    let _ = writeln!(out, "{}", values_line(&initial));

    if computed.rule == EstimateRule::OutlierExclusion {
        write_exclusions(
            out,
            &format!(
                "Exclusões: Excessivamente Elevados (v / média_outros > {})",
                format_ptbr(limits.high_ratio, 2)
            ),
            item,
            &item.auto_excluded_high_indices,
            &computed.excluded_high,
        );
        write_exclusions(
            out,
            &format!(
                "Exclusões: Inexequíveis (v / média_outros < {})",
                format_ptbr(limits.low_ratio, 2)
            ),
            item,
            &item.auto_excluded_low_indices,
            &computed.excluded_low,
        );
    }

    let kept = if item.auto_kept_indices.is_empty() {
        initial.clone()
    } else {
        item.values_for(&item.auto_kept_indices)
    };
    let method = item
        .auto_method
        .or(computed.method)
        .map_or("-", |m| m.label());
    let _ = writeln!(out, "Finais:");
    let _ = writeln!(out, "{}", values_line(&kept));
    let _ = writeln!(out, "N final: {}", kept.len());
    let _ = writeln!(out, "CV final: {}", optional(coefficient_of_variation(&kept), 6));
    let _ = writeln!(out, "Preço final escolhido: {method}");
    let _ = writeln!(
        out,
        "Valor final (2 casas): {}",
        optional(item.auto_computed_value, 2)
    );

    if let Some(over) = session.overrides().get(&item.item_id) {
        write_override(out, item, over);
    }
    if let Some(last) = session.last_quoted_price(&item.item_id) {
        let _ = writeln!(out, "Último licitado: {}", format_ptbr(last, 2));
    }
}

/// Renders the calculation memory for every item of the session.
pub fn calculation_memory(session: &PricingSession, options: &PricingOptions) -> String {
    let mut out = String::new();
    write_header(&mut out, &session.lista_meta);
    for item in session.items() {
        out.push('\n');
        write_item(&mut out, session, item, options);
    }
    out
}
