use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use price_common::format_ptbr;
use price_core::PricingSession;
use price_model::{AdjustState, CannedJustification, ComputedRow, LineItem, Mode};
use price_report::GenerationResult;

use crate::types::{AdjustResult, InitResult, ParsedAmount};

pub fn print_rows(session: &PricingSession) {
    let meta = &session.lista_meta;
    if !meta.numero_lista.is_empty() {
        println!("List: {}", meta.numero_lista);
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("CATMAT"),
        header_cell("Mode"),
        header_cell("Automatic"),
        header_cell("Final"),
        header_cell("Last quoted"),
        header_cell("Difference"),
        header_cell("Adjust"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);
    let rows = session.rows();
    let mut manual = 0usize;
    let mut attention = 0usize;
    for row in &rows {
        if row.mode == Mode::Manual {
            manual += 1;
        }
        if row.adjust_state == AdjustState::NeedsAttention {
            attention += 1;
        }
        table.add_row(row_cells(row));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} items", rows.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(manual, Color::Magenta),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(attention, Color::Yellow),
    ]);
    println!("{table}");
}

fn row_cells(row: &ComputedRow) -> Vec<Cell> {
    let mode = match row.mode {
        Mode::Manual => Cell::new(row.mode.label())
            .fg(Color::Magenta)
            .add_attribute(Attribute::Bold),
        Mode::Automatic => Cell::new(row.mode.label()),
    };
    vec![
        Cell::new(&row.item_id)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&row.product_code),
        mode,
        amount_cell(row.auto_computed_value),
        amount_cell(row.final_value),
        amount_cell(row.last_quoted_price),
        difference_cell(row.difference),
        state_cell(row.adjust_state),
    ]
}

pub fn print_item(session: &PricingSession, item: &LineItem) {
    println!("{} | CATMAT {}", item.item_id, item.product_code);
    let over = session.overrides().get(&item.item_id);
    let included = over.map(|o| o.included_set());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Value"),
        header_cell("Source"),
        header_cell("Automatic"),
        header_cell("Override"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for entry in &item.raw_entries {
        let automatic = if item.auto_excluded_high_indices.contains(&entry.index) {
            Cell::new("excluded (high)").fg(Color::Red)
        } else if item.auto_excluded_low_indices.contains(&entry.index) {
            Cell::new("excluded (low)").fg(Color::Yellow)
        } else if item.auto_kept_indices.contains(&entry.index) {
            Cell::new("kept").fg(Color::Green)
        } else {
            dim_cell("-")
        };
        let override_cell = match &included {
            Some(set) if set.contains(&entry.index) => Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Some(_) => Cell::new("✗").fg(Color::Red),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(entry.index),
            Cell::new(format_ptbr(entry.value, 2)),
            Cell::new(&entry.source),
            automatic,
            override_cell,
        ]);
    }
    println!("{table}");
    if let Some(over) = over {
        println!("Override: {} ({})", over.method.label(), over.justification);
    }
    if let Some(row) = session.row(&item.item_id) {
        println!("Adjust: {}", row.adjust_state);
    }
}

pub fn print_init(result: &InitResult) {
    println!("Session: {}", result.session_path.display());
    println!(
        "Items: {} ({} quotes, {} without automatic value)",
        result.items, result.quotes, result.unpriced
    );
}

pub fn print_adjust(result: &AdjustResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Included"),
        header_cell("Excluded"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("CV"),
        header_cell("Final"),
    ]);
    apply_table_style(&mut table);
    let stats = &result.stats;
    table.add_row(vec![
        Cell::new(stats.included_count),
        Cell::new(stats.excluded_count),
        amount_cell(stats.mean),
        amount_cell(stats.median),
        match stats.cv {
            Some(cv) => Cell::new(format_ptbr(cv, 4)),
            None => dim_cell("-"),
        },
        amount_cell(stats.final_value).add_attribute(Attribute::Bold),
    ]);
    println!("{}", result.item_id);
    println!(
        "Method: {} (suggested: {})",
        result.method.label(),
        result.suggested_method.label()
    );
    println!("{table}");
    match &result.saved {
        Some(over) => println!(
            "Saved override with indices {:?}: {}",
            over.included_indices, over.justification
        ),
        None => println!("Dry run: nothing saved."),
    }
}

pub fn print_generation(result: &GenerationResult) {
    println!("Run: {}", result.run_id);
    for path in [
        &result.table,
        &result.memory,
        &result.payload,
        &result.manifest,
    ] {
        println!("  {}", path.display());
    }
}

pub fn print_amounts(amounts: &[ParsedAmount]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Input"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for amount in amounts {
        let value = match amount.value {
            Some(value) => Cell::new(value),
            None => Cell::new("invalid").fg(Color::Red),
        };
        table.add_row(vec![Cell::new(&amount.input), value]);
    }
    println!("{table}");
}

pub fn print_justifications(options: &[CannedJustification]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Text")]);
    apply_table_style(&mut table);
    for option in options {
        table.add_row(vec![
            Cell::new(&option.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&option.text),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn state_cell(state: AdjustState) -> Cell {
    match state {
        AdjustState::Overridden => Cell::new("overridden")
            .fg(Color::Magenta)
            .add_attribute(Attribute::Bold),
        AdjustState::NeedsAttention => Cell::new("attention")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        AdjustState::WithinTolerance => Cell::new("ok").fg(Color::Green),
        AdjustState::Locked => dim_cell("locked"),
    }
}

fn amount_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_ptbr(value, 2)),
        None => dim_cell("-"),
    }
}

fn difference_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) if value < 0.0 => Cell::new(format_ptbr(value, 2)).fg(Color::Red),
        Some(value) => Cell::new(format_ptbr(value, 2)),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
