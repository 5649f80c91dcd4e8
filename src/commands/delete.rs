//! Delete command handler.

use crate::api::FinanceApi;
use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::Result;
use anyhow::{bail, Context};

/// Handles the `grana delete` command.
///
/// Refuses to act until the deletion is confirmed with `--yes`, then removes
/// the transaction on the server.
pub async fn delete(api: &mut dyn FinanceApi, args: &DeleteArgs) -> Result<Out<()>> {
    if !args.yes() {
        bail!(
            "Tem certeza que deseja excluir essa transação? \
            Re-run with --yes to delete transaction {}",
            args.id()
        );
    }
    api.delete_transaction(args.id())
        .await
        .context("Unable to delete the transaction")?;
    Ok("Transação excluida com sucesso!".into())
}
