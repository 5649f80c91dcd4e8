//! The transaction domain model.
//!
//! Records arrive from the API in wire form (see `api::wire`) and are decoded
//! into these types before any aggregation or rendering happens. From this
//! point on dates are structured values and the kind is a closed enum, so the
//! view layer never touches raw strings or magic numbers.

use crate::model::Amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a transaction, carried on the wire as `type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Receita: money coming in. `type_id = 1`.
    Income,
    /// Despesa: money going out. `type_id = 2`.
    Expense,
    /// Transferência: movement between accounts. `type_id = 3`.
    Transfer,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

impl TransactionKind {
    /// The numeric wire encoding.
    pub fn type_id(self) -> u8 {
        match self {
            TransactionKind::Income => 1,
            TransactionKind::Expense => 2,
            TransactionKind::Transfer => 3,
        }
    }

    /// Decodes the numeric wire encoding. Unknown ids are a record-level
    /// error, handled by the fail-soft decoder.
    pub fn from_type_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(TransactionKind::Income),
            2 => Some(TransactionKind::Expense),
            3 => Some(TransactionKind::Transfer),
            _ => None,
        }
    }

    /// The Portuguese label shown in tables.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Receita",
            TransactionKind::Expense => "Despesa",
            TransactionKind::Transfer => "Transferência",
        }
    }

    /// Whether this kind subtracts from a day's total. Only expenses do;
    /// income and transfers both add.
    pub fn signs_negative(self) -> bool {
        matches!(self, TransactionKind::Expense)
    }
}

/// A single financial transaction.
///
/// Immutable from this program's perspective: the remote store owns the
/// canonical state, and what we hold is a point-in-time copy from the last
/// fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: u64,
    /// Non-negative magnitude; the sign comes from `kind` during aggregation.
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub description: String,
    pub account_id: u32,
    pub category_id: u32,
    /// Position within an installment series, when this transaction is part
    /// of one. `None` for ordinary transactions.
    pub installment: Option<u32>,
}

impl Transaction {
    /// The amount with the aggregation sign applied: negative for expenses,
    /// positive for income and transfers.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.signs_negative() {
            -self.amount.value()
        } else {
            self.amount.value()
        }
    }

    /// `"Parcela N"` when part of an installment series, empty otherwise.
    pub fn installment_label(&self) -> String {
        match self.installment {
            Some(n) => format!("Parcela {n}"),
            None => String::new(),
        }
    }
}
