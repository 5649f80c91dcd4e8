//! Implements the `FinanceApi` trait using in-memory data for testing.
//!
//! Note: this is compiled even in the "production" version of this app so that
//! we can run the whole app, top-to-bottom, without a server.

use crate::api::{FinanceApi, TransactionBatch};
use crate::error::ApiError;
use crate::model::{
    Amount, Credentials, MonthRef, Registration, Transaction, TransactionDraft, TransactionKind,
};
use crate::Result;
use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The token `TestApi::login` hands out.
pub(crate) const TEST_TOKEN: &str = "test-token-0001";

/// The user seeded into `TestApi::default`.
pub(crate) const TEST_EMAIL: &str = "maria@example.com";
pub(crate) const TEST_PASSWORD: &str = "senha123";

/// An implementation of the `FinanceApi` trait that does not use a server. It
/// can hold any data in memory and, by default, is seeded with some existing
/// data.
pub(crate) struct TestApi {
    pub(crate) transactions: Vec<Transaction>,
    next_id: u64,
    users: Vec<(String, String)>,
    bearer: Option<String>,
    checks_bearer: bool,
}

impl TestApi {
    /// Create a new `TestApi` holding `transactions` and one known user.
    /// Transaction calls are not authenticated; tests call them directly.
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            transactions,
            next_id,
            users: vec![(TEST_EMAIL.to_string(), TEST_PASSWORD.to_string())],
            bearer: None,
            checks_bearer: false,
        }
    }

    /// Create the `TestApi` used by the whole-app test mode. Transaction
    /// calls fail with `ApiError::Unauthorized` unless `token` is the one
    /// `login` hands out, the same way the server checks its bearer header.
    pub(crate) fn signed_in(token: Option<String>) -> Self {
        Self {
            bearer: token,
            checks_bearer: true,
            ..Self::default()
        }
    }

    fn authorize(&self) -> Result<()> {
        if self.checks_bearer && self.bearer.as_deref() != Some(TEST_TOKEN) {
            return Err(ApiError::Unauthorized.into());
        }
        Ok(())
    }
}

impl Default for TestApi {
    /// Seeds a small March 2024 ledger.
    fn default() -> Self {
        Self::new(seed_transactions())
    }
}

#[async_trait::async_trait]
impl FinanceApi for TestApi {
    async fn list_transactions(&mut self, filter: Option<MonthRef>) -> Result<TransactionBatch> {
        self.authorize()?;
        let transactions = self
            .transactions
            .iter()
            .filter(|t| filter.map_or(true, |selected| selected.contains(t.date)))
            .cloned()
            .collect();
        Ok(TransactionBatch {
            transactions,
            rejected: Vec::new(),
        })
    }

    async fn get_transaction(&mut self, id: u64) -> Result<Transaction> {
        self.authorize()?;
        match self.transactions.iter().find(|t| t.id == id) {
            Some(transaction) => Ok(transaction.clone()),
            None => bail!("Transaction {id} not found"),
        }
    }

    async fn create_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction> {
        self.authorize()?;
        let transaction = Transaction {
            id: self.next_id,
            amount: draft.amount,
            kind: draft.kind,
            date: draft.date,
            description: draft.description.clone(),
            account_id: draft.account_id,
            category_id: draft.category_id,
            installment: draft.installment,
        };
        self.next_id += 1;
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn update_transaction(
        &mut self,
        id: u64,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        self.authorize()?;
        let Some(stored) = self.transactions.iter_mut().find(|t| t.id == id) else {
            bail!("Transaction {id} not found");
        };
        *stored = Transaction {
            id,
            amount: draft.amount,
            kind: draft.kind,
            date: draft.date,
            description: draft.description.clone(),
            account_id: draft.account_id,
            category_id: draft.category_id,
            installment: draft.installment,
        };
        Ok(stored.clone())
    }

    async fn delete_transaction(&mut self, id: u64) -> Result<()> {
        self.authorize()?;
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            bail!("Transaction {id} not found");
        }
        Ok(())
    }

    async fn login(&mut self, credentials: &Credentials) -> Result<String> {
        let known = self.users.iter().any(|(email, password)| {
            email == &credentials.email && password == &credentials.password
        });
        if !known {
            return Err(ApiError::Unauthorized.into());
        }
        Ok(TEST_TOKEN.to_string())
    }

    async fn register(&mut self, registration: &Registration) -> Result<()> {
        if self.users.iter().any(|(email, _)| email == &registration.email) {
            bail!("E-mail já cadastrado");
        }
        self.users
            .push((registration.email.clone(), registration.password.clone()));
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn amount(cents: i64) -> Amount {
    Amount::from(Decimal::new(cents, 2))
}

/// Seed transaction data.
fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            amount: amount(350000),
            kind: TransactionKind::Income,
            date: date(2024, 3, 5),
            description: "Salário".to_string(),
            account_id: 2,
            category_id: 1,
            installment: None,
        },
        Transaction {
            id: 2,
            amount: amount(4350),
            kind: TransactionKind::Expense,
            date: date(2024, 3, 5),
            description: "Mercado".to_string(),
            account_id: 1,
            category_id: 1,
            installment: None,
        },
        Transaction {
            id: 3,
            amount: amount(1890),
            kind: TransactionKind::Expense,
            date: date(2024, 3, 6),
            description: "Padaria".to_string(),
            account_id: 1,
            category_id: 1,
            installment: None,
        },
        Transaction {
            id: 4,
            amount: amount(129990),
            kind: TransactionKind::Expense,
            date: date(2024, 3, 10),
            description: "Celular".to_string(),
            account_id: 3,
            category_id: 2,
            installment: Some(3),
        },
        Transaction {
            id: 5,
            amount: amount(20000),
            kind: TransactionKind::Transfer,
            date: date(2024, 4, 2),
            description: "Poupança".to_string(),
            account_id: 2,
            category_id: 3,
            installment: None,
        },
    ]
}
