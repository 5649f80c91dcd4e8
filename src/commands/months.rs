//! Months command handler.

use crate::args::MonthsArgs;
use crate::commands::Out;
use crate::model::MonthRef;
use crate::view::{month_window, render, MonthItem};
use crate::Result;
use chrono::NaiveDate;

/// Handles the `grana months` command.
///
/// Builds the window of months around `today` and prints it as one strip,
/// oldest first, with the selected month bracketed. The labels are the values
/// `grana list --month` accepts.
///
/// # Returns
/// On success, returns an `Out` containing the rendered strip and the window
/// itself as structured data.
pub async fn months(today: NaiveDate, args: &MonthsArgs) -> Result<Out<Vec<MonthItem>>> {
    let window = month_window(today, args.past(), args.future());
    let selected = args.selected().unwrap_or_else(|| MonthRef::from_date(today));
    let message = render::month_strip(&window, selected);
    Ok(Out::new(message, window))
}
