//! Add command handler.

use crate::api::FinanceApi;
use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{CreateForm, Transaction};
use crate::view::render;
use crate::Result;
use anyhow::Context;

/// Handles the `grana add` command.
///
/// Runs the create-transaction form over the provided options and, when every
/// field validates, sends the draft to the server and prints the stored
/// record.
///
/// # Errors
/// Returns the collected field messages when the form is invalid. Nothing is
/// sent to the server in that case.
pub async fn add(api: &mut dyn FinanceApi, args: &AddArgs) -> Result<Out<Transaction>> {
    let form = CreateForm {
        amount: args.amount().map(str::to_string),
        kind: args.kind(),
        date: args.date().map(str::to_string),
        description: args.description().map(str::to_string),
        account: args.account(),
        category: args.category(),
        installments: args.installments(),
    };
    let draft = form.validate()?;
    let created = api
        .create_transaction(&draft)
        .await
        .context("Unable to create the transaction")?;
    let message = format!(
        "Transação criada com sucesso! (id {})\n{}",
        created.id,
        render::transaction_detail(&created)
    );
    Ok(Out::new(message, created))
}
