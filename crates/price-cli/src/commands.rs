use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tracing::{info, info_span};

use price_common::parse_localized_amount;
use price_core::PricingSession;
use price_ingest::{load_line_items, load_lookup, load_options, load_session, save_session};
use price_model::{Justification, ListMeta, Method, PricingOptions};
use price_report::{GenerationRequest, GenerationResult, write_outputs};

use crate::cli::{
    AdjustArgs, ClearArgs, GenerateArgs, HydrateArgs, InitArgs, MethodArg, ParseAmountArgs,
    PriceArgs, ShowArgs,
};
use crate::summary::{print_item, print_rows};
use crate::types::{AdjustResult, InitResult, ParsedAmount};

pub fn options(config: Option<&Path>) -> Result<PricingOptions> {
    load_options(config).context("load pricing options")
}

fn open_session(path: &Path) -> Result<PricingSession> {
    load_session(path).with_context(|| format!("open session {}", path.display()))
}

fn store_session(path: &Path, session: &PricingSession) -> Result<()> {
    save_session(path, session).with_context(|| format!("save session {}", path.display()))
}

pub fn run_init(args: &InitArgs, options: &PricingOptions) -> Result<InitResult> {
    let span = info_span!("init", input = %args.input.display());
    let _guard = span.enter();
    let session_path = &args.session.path;
    if session_path.exists() && !args.force {
        bail!(
            "session {} already exists (use --force to replace it)",
            session_path.display()
        );
    }

    let items = load_line_items(&args.input, options)
        .with_context(|| format!("load line items from {}", args.input.display()))?;
    let quotes = items.iter().map(|item| item.raw_entries.len()).sum();
    let unpriced = items
        .iter()
        .filter(|item| item.auto_computed_value.is_none())
        .count();
    let meta = ListMeta {
        numero_lista: args.numero.clone().unwrap_or_default(),
        nome_lista: args.nome.clone(),
        processo_sei: args.sei.clone(),
        responsavel: args.responsavel.clone(),
    };
    let session = PricingSession::new(items)
        .context("build session")?
        .with_list_meta(meta);
    store_session(session_path, &session)?;
    info!(items = session.items().len(), quotes, "session created");
    Ok(InitResult {
        session_path: session_path.clone(),
        items: session.items().len(),
        quotes,
        unpriced,
    })
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let session = open_session(&args.session.path)?;
    match &args.item {
        Some(item_id) => {
            let item = session
                .item(item_id)
                .ok_or_else(|| anyhow!("unknown item: {item_id}"))?;
            print_item(&session, item);
        }
        None => print_rows(&session),
    }
    Ok(())
}

pub fn run_price(args: &PriceArgs) -> Result<Option<f64>> {
    let mut session = open_session(&args.session.path)?;
    let value = session
        .set_last_quoted_price(&args.item, &args.amount)
        .with_context(|| format!("set last quoted price of {}", args.item))?;
    store_session(&args.session.path, &session)?;
    Ok(value)
}

pub fn run_hydrate(args: &HydrateArgs) -> Result<usize> {
    let span = info_span!("hydrate", lookup = %args.lookup.display());
    let _guard = span.enter();
    let mut session = open_session(&args.session.path)?;
    let records = load_lookup(&args.lookup)
        .with_context(|| format!("load lookup {}", args.lookup.display()))?;
    let filled = session.hydrate_last_prices(&records);
    store_session(&args.session.path, &session)?;
    Ok(filled)
}

fn justification_from(args: &AdjustArgs) -> Justification {
    match (&args.justification, &args.other) {
        (Some(code), _) => Justification::Canned(code.clone()),
        (None, Some(text)) => Justification::Custom(text.clone()),
        (None, None) => Justification::Custom(String::new()),
    }
}

pub fn run_adjust(args: &AdjustArgs, options: &PricingOptions) -> Result<AdjustResult> {
    let span = info_span!("adjust", item = %args.item);
    let _guard = span.enter();
    let mut session = open_session(&args.session.path)?;
    let mut draft = session
        .open_adjustment(&args.item)
        .with_context(|| format!("open adjustment of {}", args.item))?;
    if !args.include.is_empty() {
        draft.select(args.include.iter().copied())?;
    }
    for index in &args.toggle {
        draft.toggle(*index)?;
    }
    if let Some(method) = args.method {
        draft.set_method(match method {
            MethodArg::Mean => Method::Mean,
            MethodArg::Median => Method::Median,
        });
    }
    let stats = draft.stats();
    let saved = if args.dry_run {
        None
    } else {
        let over = session
            .save_adjustment(&draft, &justification_from(args), options)
            .with_context(|| format!("save adjustment of {}", args.item))?;
        store_session(&args.session.path, &session)?;
        Some(over)
    };
    Ok(AdjustResult {
        item_id: args.item.clone(),
        method: draft.method(),
        suggested_method: draft.suggested_method(),
        stats,
        saved,
    })
}

pub fn run_clear(args: &ClearArgs) -> Result<bool> {
    let mut session = open_session(&args.session.path)?;
    let removed = session
        .clear_override(&args.item)
        .with_context(|| format!("clear override of {}", args.item))?;
    if removed.is_some() {
        store_session(&args.session.path, &session)?;
    }
    Ok(removed.is_some())
}

pub fn run_generate(args: &GenerateArgs, options: &PricingOptions) -> Result<GenerationResult> {
    let session = open_session(&args.session.path)?;
    let request = GenerationRequest {
        output_dir: &args.output_dir,
        input: args.input.as_deref(),
        generated_at: Utc::now(),
    };
    write_outputs(&session, options, &request)
        .with_context(|| format!("generate into {}", args.output_dir.display()))
}

pub fn run_parse_amount(args: &ParseAmountArgs) -> Vec<ParsedAmount> {
    args.values
        .iter()
        .map(|input| ParsedAmount {
            input: input.clone(),
            value: parse_localized_amount(input),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::cli::SessionArg;

    const ROWS: &str = "\
Item;CATMAT;Nº;Inciso;Fonte;Quantidade;Preço unitário;Data;Compõe
Item 1;123456;1;I;;1;10,00;;Sim
Item 1;123456;2;I;;1;11,00;;Sim
Item 1;123456;3;IV;;1;12,00;;Sim
";

    fn session_arg(path: &Path) -> SessionArg {
        SessionArg {
            path: path.to_path_buf(),
        }
    }

    fn init(dir: &TempDir) -> PathBuf {
        let input = dir.path().join("rows.csv");
        std::fs::write(&input, ROWS).unwrap();
        let session = dir.path().join("session.json");
        let args = InitArgs {
            input,
            session: session_arg(&session),
            numero: Some("7/2026".to_string()),
            nome: None,
            sei: None,
            responsavel: None,
            force: false,
        };
        let result = run_init(&args, &PricingOptions::default()).unwrap();
        assert_eq!(result.items, 1);
        assert_eq!(result.quotes, 3);
        session
    }

    fn adjust_args(session: &Path, dry_run: bool) -> AdjustArgs {
        AdjustArgs {
            session: session_arg(session),
            item: "Item 1".to_string(),
            include: vec![0, 1],
            toggle: vec![2],
            method: Some(MethodArg::Median),
            justification: None,
            other: Some("  Cotação 3 fora do padrão  ".to_string()),
            dry_run,
        }
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let session = init(&dir);
        let args = InitArgs {
            input: dir.path().join("rows.csv"),
            session: session_arg(&session),
            numero: None,
            nome: None,
            sei: None,
            responsavel: None,
            force: false,
        };
        assert!(run_init(&args, &PricingOptions::default()).is_err());
    }

    #[test]
    fn adjust_is_locked_without_last_price() {
        let dir = TempDir::new().unwrap();
        let session = init(&dir);
        let err = run_adjust(&adjust_args(&session, false), &PricingOptions::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("locked"));
    }

    #[test]
    fn price_adjust_and_clear_round_trip_through_session_file() {
        let dir = TempDir::new().unwrap();
        let session = init(&dir);
        let price = PriceArgs {
            session: session_arg(&session),
            item: "Item 1".to_string(),
            amount: "R$ 10,50".to_string(),
        };
        assert_eq!(run_price(&price).unwrap(), Some(10.5));

        let preview = run_adjust(&adjust_args(&session, true), &PricingOptions::default()).unwrap();
        assert!(preview.saved.is_none());
        assert_eq!(preview.stats.included_count, 3);
        assert!(load_session(&session).unwrap().overrides().is_empty());

        let saved = run_adjust(&adjust_args(&session, false), &PricingOptions::default()).unwrap();
        let over = saved.saved.unwrap();
        assert_eq!(over.included_indices, vec![0, 1, 2]);
        assert_eq!(over.justification, "Cotação 3 fora do padrão");
        assert_eq!(saved.stats.final_value, Some(11.0));

        let clear = ClearArgs {
            session: session_arg(&session),
            item: "Item 1".to_string(),
        };
        assert!(run_clear(&clear).unwrap());
        assert!(!run_clear(&clear).unwrap());
    }

    #[test]
    fn parse_amount_reports_invalid_inputs() {
        let parsed = run_parse_amount(&ParseAmountArgs {
            values: vec!["R$ 1.234,56".to_string(), "abc".to_string()],
        });
        assert_eq!(parsed[0].value, Some(1234.56));
        assert_eq!(parsed[1].value, None);
    }
}
