//! Integration tests for the pricing session workflow.

use price_core::PricingSession;
use price_model::{
    AdjustState, Justification, LastPriceRecord, LineItem, LookupStatus, Method, Mode,
    PricingOptions, QuoteEntry, ValidationError,
};

fn quote_item(id: &str, catmat: &str, values: &[f64], kept: &[u32], auto: Option<f64>) -> LineItem {
    let entries = values
        .iter()
        .enumerate()
        .map(|(i, v)| QuoteEntry::new(i as u32, *v, "Compras.gov.br"))
        .collect();
    let mut item = LineItem::new(id, catmat, entries).expect("valid item");
    item.auto_kept_indices = kept.iter().copied().collect();
    item.auto_computed_value = auto;
    item
}

fn sample_session() -> PricingSession {
    PricingSession::new(vec![
        quote_item("Item 1", "455302", &[10.0, 12.0, 11.0, 50.0], &[0, 1, 2], Some(11.0)),
        quote_item("Item 2", "123456", &[100.0, 130.0], &[0, 1], Some(130.0)),
    ])
    .expect("valid session")
}

fn canned() -> Justification {
    Justification::Canned("discrepantes".to_string())
}

#[test]
fn end_to_end_override_matches_last_price() {
    let options = PricingOptions::default();
    let mut session = sample_session();
    assert_eq!(
        session.set_last_quoted_price("Item 1", "11,00"),
        Ok(Some(11.0))
    );

    let draft = session.open_adjustment("Item 1").expect("adjustable");
    assert_eq!(
        draft.included().iter().copied().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    let stats = draft.stats();
    assert_eq!(stats.mean, Some(11.0));
    assert_eq!(stats.median, Some(11.0));
    let cv = stats.cv.expect("cv");
    assert!(cv > 0.07 && cv < 0.08, "population CV was {cv}");
    assert_eq!(draft.suggested_method(), Method::Mean);

    let saved = session
        .save_adjustment(&draft, &canned(), &options)
        .expect("saved");
    assert_eq!(saved.justification_code.as_deref(), Some("discrepantes"));

    let row = session.row("Item 1").expect("row");
    assert_eq!(row.mode, Mode::Manual);
    assert_eq!(row.final_value, Some(11.0));
    assert_eq!(row.difference, Some(0.0));
    assert_eq!(row.adjust_state, AdjustState::Overridden);
}

#[test]
fn save_sorts_indices_and_clear_reverts_to_automatic() {
    let options = PricingOptions::default();
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "R$ 12,00").unwrap();

    let mut draft = session.open_adjustment("Item 1").unwrap();
    draft.select([2, 0, 1]).unwrap();
    let saved = session
        .save_adjustment(&draft, &canned(), &options)
        .unwrap();
    assert_eq!(saved.included_indices, vec![0, 1, 2]);

    let cleared = session.clear_override("Item 1").unwrap();
    assert!(cleared.is_some());
    let row = session.row("Item 1").unwrap();
    assert_eq!(row.mode, Mode::Automatic);
    assert_eq!(row.final_value, Some(11.0));
    assert_eq!(row.adjust_state, AdjustState::NeedsAttention);
}

#[test]
fn re_save_replaces_the_previous_override() {
    let options = PricingOptions::default();
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();

    let draft = session.open_adjustment("Item 1").unwrap();
    session.save_adjustment(&draft, &canned(), &options).unwrap();

    let mut draft = session.open_adjustment("Item 1").unwrap();
    draft.select([3]).unwrap();
    draft.set_method(Method::Median);
    session
        .save_adjustment(&draft, &Justification::Custom("Cotação única".into()), &options)
        .unwrap();

    let over = session.overrides().get("Item 1").unwrap();
    assert_eq!(over.included_indices, vec![3]);
    assert_eq!(over.method, Method::Median);
    assert_eq!(over.justification, "Cotação única");
    assert_eq!(over.justification_code, None);
    assert_eq!(session.overrides().len(), 1);
}

#[test]
fn empty_selection_leaves_overrides_unchanged() {
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();
    let mut draft = session.open_adjustment("Item 1").unwrap();
    draft.select([]).unwrap();
    let err = session
        .save_adjustment(&draft, &canned(), &PricingOptions::default())
        .unwrap_err();
    assert_eq!(err, ValidationError::EmptySelection);
    assert_eq!(err.to_string(), "select at least one value");
    assert!(session.overrides().is_empty());
}

#[test]
fn other_with_blank_text_is_rejected() {
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();
    let draft = session.open_adjustment("Item 1").unwrap();
    let err = session
        .save_adjustment(
            &draft,
            &Justification::Custom("   ".into()),
            &PricingOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingJustification);
    assert!(session.overrides().is_empty());
}

#[test]
fn locked_rows_cannot_be_opened() {
    let mut session = sample_session();
    // no last price yet
    assert_eq!(
        session.open_adjustment("Item 1").unwrap_err(),
        ValidationError::AdjustmentLocked("Item 1".into())
    );
    // 130 > 1.2 * 100
    session.set_last_quoted_price("Item 2", "100,00").unwrap();
    assert_eq!(session.adjust_state("Item 2"), Ok(AdjustState::Locked));
    assert!(session.open_adjustment("Item 2").is_err());
}

#[test]
fn estimate_at_exact_band_limit_can_be_adjusted() {
    let mut session = PricingSession::new(vec![quote_item(
        "Item 1",
        "455302",
        &[3.5, 3.7, 3.6],
        &[0, 1, 2],
        Some(3.6),
    )])
    .expect("valid session");
    session.set_last_quoted_price("Item 1", "3,00").unwrap();
    assert_eq!(session.adjust_state("Item 1"), Ok(AdjustState::WithinTolerance));
    assert!(session.open_adjustment("Item 1").is_ok());
}

#[test]
fn override_survives_loss_of_eligibility() {
    let options = PricingOptions::default();
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();
    let draft = session.open_adjustment("Item 1").unwrap();
    session.save_adjustment(&draft, &canned(), &options).unwrap();

    // 11 > 1.2 * 5: no longer eligible, but the override stays editable
    session.set_last_quoted_price("Item 1", "5,00").unwrap();
    let row = session.row("Item 1").unwrap();
    assert!(!row.eligible_for_override);
    assert_eq!(row.adjust_state, AdjustState::Overridden);
    assert!(session.open_adjustment("Item 1").is_ok());
}

#[test]
fn invalid_amount_keeps_previous_price() {
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();
    assert_eq!(
        session.set_last_quoted_price("Item 1", "abc"),
        Err(ValidationError::InvalidAmount("abc".into()))
    );
    assert_eq!(session.last_quoted_price("Item 1"), Some(11.0));
    assert_eq!(session.set_last_quoted_price("Item 1", "  "), Ok(None));
    assert_eq!(session.last_quoted_price("Item 1"), None);
    assert_eq!(
        session.set_last_quoted_price("Item 9", "1,00"),
        Err(ValidationError::UnknownItem("Item 9".into()))
    );
}

#[test]
fn hydration_fills_only_missing_prices() {
    let mut session = sample_session();
    session.set_last_quoted_price("Item 2", "120,00").unwrap();
    let records = vec![
        LastPriceRecord {
            catmat: "455302".into(),
            status: LookupStatus::Ok,
            value: Some(10.5),
            date: Some("2025-01-10".into()),
        },
        LastPriceRecord {
            catmat: "123456".into(),
            status: LookupStatus::Ok,
            value: Some(99.0),
            date: None,
        },
    ];
    assert_eq!(session.hydrate_last_prices(&records), 1);
    assert_eq!(session.last_quoted_price("Item 1"), Some(10.5));
    assert_eq!(session.last_quoted_price("Item 2"), Some(120.0));
}

#[test]
fn failed_lookups_are_ignored() {
    let mut session = sample_session();
    let records = vec![LastPriceRecord {
        catmat: "455302".into(),
        status: LookupStatus::Failed,
        value: Some(10.5),
        date: None,
    }];
    assert_eq!(session.hydrate_last_prices(&records), 0);
    assert_eq!(session.last_quoted_price("Item 1"), None);
}

#[test]
fn payload_lists_overrides_and_prices() {
    let options = PricingOptions::default();
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();
    session.set_last_quoted_price("Item 2", "200,00").unwrap();
    let draft = session.open_adjustment("Item 1").unwrap();
    session.save_adjustment(&draft, &canned(), &options).unwrap();

    let payload = session.generation_payload();
    assert_eq!(payload.overrides.len(), 1);
    let entry = &payload.overrides["Item 1"];
    assert_eq!(entry.included_indices, vec![0, 1, 2]);
    assert_eq!(entry.method, Method::Mean);
    assert_eq!(entry.justification_code.as_deref(), Some("discrepantes"));
    assert_eq!(payload.last_quoted_prices.len(), 2);
    assert_eq!(payload.last_quoted_prices["Item 2"], 200.0);
}

#[test]
fn session_survives_json_round_trip() {
    let options = PricingOptions::default();
    let mut session = sample_session();
    session.set_last_quoted_price("Item 1", "11,00").unwrap();
    let draft = session.open_adjustment("Item 1").unwrap();
    session.save_adjustment(&draft, &canned(), &options).unwrap();

    let json = serde_json::to_string(&session).expect("serialize session");
    let restored: PricingSession = serde_json::from_str(&json).expect("deserialize session");
    restored.validate().expect("valid");
    assert_eq!(restored, session);
    assert_eq!(restored.rows(), session.rows());
}

#[test]
fn duplicate_item_ids_are_rejected() {
    let result = PricingSession::new(vec![
        quote_item("Item 1", "", &[1.0], &[], None),
        quote_item("Item 1", "", &[2.0], &[], None),
    ]);
    assert!(result.is_err());
}
