//! Table rendering for command output.
//!
//! Every function here is a pure map from view data to a printable string;
//! the command layer decides what actually reaches stdout.

use crate::model::{date, lookup, MonthRef, Transaction};
use crate::view::{DaySection, MonthItem};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

/// Shown in place of the day tables when the month has no transactions.
pub const EMPTY_MONTH: &str = "Nenhuma transação encontrada.";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// The row amount carries an explicit sign so expenses and income read apart.
fn signed(transaction: &Transaction) -> String {
    if transaction.kind.signs_negative() {
        format!("-{}", transaction.amount)
    } else {
        format!("+{}", transaction.amount)
    }
}

/// Renders the month window on one line with the selected month bracketed.
pub fn month_strip(window: &[MonthItem], selected: MonthRef) -> String {
    window
        .iter()
        .map(|item| {
            if item.month == selected.month && item.year == selected.year {
                format!("[{}]", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Renders one day section: a `dd/mm/yyyy, WEEKDAY` heading, one row per
/// transaction, and a closing `Total do dia` row.
pub fn day_table(section: &DaySection) -> String {
    let mut table = new_table();
    table.set_header(vec!["Descrição", "Categoria", "Conta", "Parcela", "Valor"]);
    for transaction in &section.transactions {
        table.add_row(vec![
            transaction.description.clone(),
            lookup::category_label(transaction.category_id),
            lookup::account_label(transaction.account_id),
            transaction.installment_label(),
            signed(transaction),
        ]);
    }
    table.add_row(vec![
        "Total do dia".to_string(),
        String::new(),
        String::new(),
        String::new(),
        section.daily_total.to_string(),
    ]);
    format!(
        "{}, {}\n{table}",
        date::display_date(section.date),
        date::weekday_label(section.date),
    )
}

/// Renders a whole month of day sections, or the empty-month message.
pub fn month_tables(sections: &[DaySection]) -> String {
    if sections.is_empty() {
        return EMPTY_MONTH.to_string();
    }
    sections
        .iter()
        .map(day_table)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders one transaction as a field/value table. The `Parcela` row only
/// appears for installment purchases.
pub fn transaction_detail(transaction: &Transaction) -> String {
    let mut rows = vec![
        ("Id", transaction.id.to_string()),
        ("Descrição", transaction.description.clone()),
        ("Valor", signed(transaction)),
        ("Tipo", transaction.kind.label().to_string()),
        ("Data", date::display_date(transaction.date)),
        ("Conta", lookup::account_label(transaction.account_id)),
        (
            "Categoria",
            lookup::category_label(transaction.category_id),
        ),
    ];
    if transaction.installment.is_some() {
        rows.push(("Parcela", transaction.installment_label()));
    }
    let mut table = new_table();
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table.to_string()
}
