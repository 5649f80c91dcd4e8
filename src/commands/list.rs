//! List command handler.

use crate::api::{FinanceApi, RejectedRecord};
use crate::args::ListArgs;
use crate::commands::Out;
use crate::model::MonthRef;
use crate::view::{day_sections, render, DaySection};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

/// One month of transactions the way the user sees it: the selected month,
/// the day sections in calendar order, and the records that were skipped
/// because they could not be decoded.
#[derive(Debug, Clone, Serialize)]
pub struct MonthScreen {
    pub selected: MonthRef,
    pub sections: Vec<DaySection>,
    pub skipped: Vec<RejectedRecord>,
}

/// Handles the `grana list` command.
///
/// Fetches the selected month (the current one when `--month` is not given),
/// groups the transactions into day sections, and renders one table per day
/// with a closing daily-total row. Records the server sent in an unusable
/// shape are counted after the tables; `--rejected` prints each one.
///
/// # Errors
/// Returns an error when the request fails. A month where every record was
/// skipped is not an error; it renders as an empty month plus the skip report.
pub async fn list(
    today: NaiveDate,
    api: &mut dyn FinanceApi,
    args: &ListArgs,
) -> Result<Out<MonthScreen>> {
    let selected = args.month().unwrap_or_else(|| MonthRef::from_date(today));
    let batch = api
        .list_transactions(Some(selected))
        .await
        .context("Unable to list transactions")?;
    let screen = MonthScreen {
        selected,
        sections: day_sections(&batch.transactions, selected),
        skipped: batch.rejected,
    };
    let message = screen_message(&screen, args.rejected());
    Ok(Out::new(message, screen))
}

fn screen_message(screen: &MonthScreen, show_skipped: bool) -> String {
    let mut message = format!(
        "Transações de {}\n\n{}",
        screen.selected,
        render::month_tables(&screen.sections)
    );
    if screen.skipped.is_empty() {
        return message;
    }
    let count = screen.skipped.len();
    message.push_str(&format!(
        "\n\nSkipped {count} record{} that could not be decoded",
        if count == 1 { "" } else { "s" }
    ));
    if show_skipped {
        for record in &screen.skipped {
            let id = record
                .id
                .map_or_else(|| "?".to_string(), |id| id.to_string());
            message.push_str(&format!("\n  id {id}: {}", record.reason));
        }
    } else {
        message.push_str(", run with --rejected to see them");
    }
    message
}
