//! Show command handler.

use crate::api::FinanceApi;
use crate::args::ShowArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::view::render;
use crate::Result;
use anyhow::Context;

/// Handles the `grana show` command.
///
/// Fetches one transaction and renders it as a field/value detail table.
pub async fn show(api: &mut dyn FinanceApi, args: &ShowArgs) -> Result<Out<Transaction>> {
    let transaction = api
        .get_transaction(args.id())
        .await
        .context("Unable to fetch the transaction")?;
    let message = render::transaction_detail(&transaction);
    Ok(Out::new(message, transaction))
}
