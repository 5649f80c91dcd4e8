//! The client for the Grana HTTP API.
//!
//! Commands talk to the server through the `FinanceApi` trait so the whole
//! app can run against an in-memory double instead of a live server.

mod http;
mod test_client;
mod token;
pub(crate) mod wire;

use crate::model::{Credentials, MonthRef, Registration, Transaction, TransactionDraft};
use crate::{Config, Result};

pub(crate) use test_client::TestApi;
#[cfg(test)]
pub(crate) use test_client::{TEST_EMAIL, TEST_PASSWORD, TEST_TOKEN};
pub(crate) use token::TokenFile;
pub use wire::RejectedRecord;

/// Decoded transactions from one response, plus the records that had to be
/// dropped on the way in.
#[derive(Debug, Clone, Default)]
pub struct TransactionBatch {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedRecord>,
}

/// The operations the Grana server exposes.
#[async_trait::async_trait]
pub trait FinanceApi {
    /// `GET /transactions`, optionally filtered to one month.
    async fn list_transactions(&mut self, filter: Option<MonthRef>) -> Result<TransactionBatch>;

    /// `GET /transactions/{id}`.
    async fn get_transaction(&mut self, id: u64) -> Result<Transaction>;

    /// `POST /transactions`. Returns the stored transaction with its new id.
    async fn create_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction>;

    /// `PUT /transactions/{id}`. Returns the stored transaction.
    async fn update_transaction(&mut self, id: u64, draft: &TransactionDraft)
        -> Result<Transaction>;

    /// `DELETE /transactions/{id}`.
    async fn delete_transaction(&mut self, id: u64) -> Result<()>;

    /// `POST /auth/login`. Returns the bearer token on success.
    async fn login(&mut self, credentials: &Credentials) -> Result<String>;

    /// `POST /users`.
    async fn register(&mut self, registration: &Registration) -> Result<()>;
}

/// The environment variable that switches the app into test mode.
pub const TEST_MODE_VAR: &str = "GRANA_IN_TEST_MODE";

/// Whether commands talk to the real server or to the in-memory double.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Send requests to the configured server.
    Http,
    /// Serve requests from `TestApi`.
    Test,
}

impl Mode {
    /// `Mode::Test` when `GRANA_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_VAR) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// Create the API client for `mode`. The token, when present, is sent as a
/// bearer credential on every request.
pub fn client(
    config: &Config,
    token: Option<String>,
    mode: Mode,
) -> Result<Box<dyn FinanceApi + Send>> {
    match mode {
        Mode::Http => Ok(Box::new(http::HttpApi::new(config, token)?)),
        Mode::Test => Ok(Box::new(TestApi::signed_in(token))),
    }
}

/// Create the API client with the saved session token attached, when one
/// exists. Commands that talk to the transaction endpoints go through this.
pub async fn authenticated_client(
    config: &Config,
    mode: Mode,
) -> Result<Box<dyn FinanceApi + Send>> {
    let token = TokenFile::load_if_present(&config.token_path())
        .await?
        .map(|t| t.token().to_string());
    client(config, token, mode)
}
