//! Edit command handler.

use crate::api::FinanceApi;
use crate::args::EditArgs;
use crate::commands::Out;
use crate::model::{EditForm, Transaction};
use crate::view::render;
use crate::Result;
use anyhow::{bail, Context};

/// Handles the `grana edit` command.
///
/// Fetches the current record, overlays the provided fields onto it, and
/// sends the validated result back as a full update. Fields that were not
/// provided keep their current values; `--installments 0` clears the
/// installment number.
///
/// # Errors
/// Returns an error when no field option was given, when the overlay fails
/// validation, or when the transaction does not exist.
pub async fn edit(api: &mut dyn FinanceApi, args: &EditArgs) -> Result<Out<Transaction>> {
    let form = EditForm {
        amount: args.amount().map(str::to_string),
        kind: args.kind(),
        date: args.date().map(str::to_string),
        description: args.description().map(str::to_string),
        account: args.account(),
        category: args.category(),
        installments: args.installments(),
    };
    if form.is_empty() {
        bail!("Nothing to change, pass at least one field option");
    }
    let current = api
        .get_transaction(args.id())
        .await
        .context("Unable to fetch the transaction")?;
    let draft = form.apply(&current)?;
    let updated = api
        .update_transaction(args.id(), &draft)
        .await
        .context("Unable to update the transaction")?;
    let message = format!(
        "Transação atualizada com sucesso!\n{}",
        render::transaction_detail(&updated)
    );
    Ok(Out::new(message, updated))
}
