//! Wire types for the JSON API.
//!
//! Transaction endpoints wrap request and response bodies in a `data`
//! envelope; the auth endpoints use bare objects. Decoding is fail-soft: a
//! record the server sends in a shape we cannot use is dropped and reported,
//! never fatal for the whole response.

use crate::model::{
    date, Amount, Credentials, Registration, Transaction, TransactionDraft, TransactionKind,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// The `{"data": ...}` wrapper used by the transaction endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: T,
}

/// One transaction as the server sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionRecord {
    pub(crate) id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    pub(crate) type_id: u8,
    /// `yyyy-mm-dd`.
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) account_id: u32,
    pub(crate) category_id: u32,
    #[serde(default)]
    pub(crate) installment: bool,
    #[serde(default)]
    pub(crate) installment_number: Option<u32>,
}

/// Why one record was dropped during decoding.
#[derive(Debug, Error)]
pub(crate) enum RecordError {
    #[error("unparseable date '{0}'")]
    BadDate(String),
    #[error("unknown type_id {0}")]
    UnknownKind(u8),
    #[error("negative amount {0}")]
    NegativeAmount(Decimal),
}

impl TransactionRecord {
    /// Converts to the domain type. The installment number only survives when
    /// the flag is set and the number is positive.
    pub(crate) fn into_transaction(self) -> Result<Transaction, RecordError> {
        let date = date::parse_api_date(&self.date)
            .map_err(|_| RecordError::BadDate(self.date.clone()))?;
        let kind = TransactionKind::from_type_id(self.type_id)
            .ok_or(RecordError::UnknownKind(self.type_id))?;
        if self.amount.is_sign_negative() {
            return Err(RecordError::NegativeAmount(self.amount));
        }
        let installment = match (self.installment, self.installment_number) {
            (true, Some(n)) if n > 0 => Some(n),
            _ => None,
        };
        Ok(Transaction {
            id: self.id,
            amount: Amount::from(self.amount),
            kind,
            date,
            description: self.description,
            account_id: self.account_id,
            category_id: self.category_id,
            installment,
        })
    }
}

/// A record the decoder dropped, kept so commands can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    pub id: Option<u64>,
    pub reason: String,
}

/// Decodes a server response array record by record. Bad records are logged,
/// collected, and skipped; good records always survive.
pub(crate) fn decode_records(values: Vec<Value>) -> (Vec<Transaction>, Vec<RejectedRecord>) {
    let mut transactions = Vec::new();
    let mut rejected = Vec::new();
    for value in values {
        let id = value.get("id").and_then(Value::as_u64);
        let record: TransactionRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                warn!("Dropping malformed transaction record (id {id:?}): {e}");
                rejected.push(RejectedRecord {
                    id,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        match record.into_transaction() {
            Ok(transaction) => transactions.push(transaction),
            Err(e) => {
                warn!("Dropping transaction record (id {id:?}): {e}");
                rejected.push(RejectedRecord {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
    (transactions, rejected)
}

/// The request body for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionPayload {
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    pub(crate) type_id: u8,
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) account_id: u32,
    pub(crate) category_id: u32,
    pub(crate) installment: bool,
    pub(crate) installment_number: u32,
}

impl From<&TransactionDraft> for TransactionPayload {
    fn from(draft: &TransactionDraft) -> Self {
        Self {
            amount: draft.amount.value(),
            type_id: draft.kind.type_id(),
            date: date::api_date(draft.date),
            description: draft.description.clone(),
            account_id: draft.account_id,
            category_id: draft.category_id,
            installment: draft.installment.is_some(),
            installment_number: draft.installment.unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl From<&Credentials> for LoginRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub(crate) token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl From<&Registration> for RegisterRequest {
    fn from(registration: &Registration) -> Self {
        Self {
            name: registration.name.clone(),
            email: registration.email.clone(),
            password: registration.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record(type_id: u8) -> TransactionRecord {
        TransactionRecord {
            id: 42,
            amount: Decimal::new(3590, 2),
            type_id,
            date: "2024-03-05".to_string(),
            description: "Pizza".to_string(),
            account_id: 1,
            category_id: 2,
            installment: false,
            installment_number: None,
        }
    }

    #[test]
    fn test_record_converts_to_transaction() {
        let transaction = record(2).into_transaction().unwrap();
        assert_eq!(transaction.id, 42);
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(
            transaction.date,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert_eq!(transaction.amount.to_string(), "R$ 35,90");
        assert_eq!(transaction.installment, None);
    }

    #[test]
    fn test_unknown_type_id_is_rejected() {
        let err = record(9).into_transaction().unwrap_err();
        assert!(matches!(err, RecordError::UnknownKind(9)));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut bad = record(1);
        bad.date = "05/03/2024".to_string();
        let err = bad.into_transaction().unwrap_err();
        assert!(matches!(err, RecordError::BadDate(_)));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut bad = record(1);
        bad.amount = Decimal::new(-100, 2);
        let err = bad.into_transaction().unwrap_err();
        assert!(matches!(err, RecordError::NegativeAmount(_)));
    }

    #[test]
    fn test_installment_number_requires_the_flag() {
        let mut record = record(2);
        record.installment = false;
        record.installment_number = Some(3);
        assert_eq!(record.clone().into_transaction().unwrap().installment, None);

        record.installment = true;
        assert_eq!(record.clone().into_transaction().unwrap().installment, Some(3));

        record.installment_number = Some(0);
        assert_eq!(record.clone().into_transaction().unwrap().installment, None);

        record.installment_number = None;
        assert_eq!(record.into_transaction().unwrap().installment, None);
    }

    #[test]
    fn test_decode_keeps_good_records_and_reports_bad_ones() {
        let values = vec![
            json!({
                "id": 1, "amount": 100.0, "type_id": 1, "date": "2024-03-05",
                "description": "Salário", "account_id": 2, "category_id": 1,
                "installment": false, "installment_number": 0
            }),
            json!({
                "id": 2, "amount": 40.0, "type_id": 7, "date": "2024-03-05",
                "description": "???", "account_id": 1, "category_id": 1
            }),
            json!({ "id": 3, "description": "missing everything" }),
            json!({
                "id": 4, "amount": 20.0, "type_id": 2, "date": "2024-03-06",
                "description": "Mercado", "account_id": 1, "category_id": 1
            }),
        ];
        let (transactions, rejected) = decode_records(values);
        let ids: Vec<u64> = transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].id, Some(2));
        assert!(rejected[0].reason.contains("type_id"));
        assert_eq!(rejected[1].id, Some(3));
    }

    #[test]
    fn test_payload_from_draft() {
        let draft = TransactionDraft {
            amount: Amount::from(Decimal::new(12050, 2)),
            kind: TransactionKind::Expense,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            description: "Notebook".to_string(),
            account_id: 3,
            category_id: 3,
            installment: Some(5),
        };
        let payload = TransactionPayload::from(&draft);
        assert_eq!(payload.type_id, 2);
        assert_eq!(payload.date, "2024-03-05");
        assert!(payload.installment);
        assert_eq!(payload.installment_number, 5);

        let cash = TransactionDraft {
            installment: None,
            ..draft
        };
        let payload = TransactionPayload::from(&cash);
        assert!(!payload.installment);
        assert_eq!(payload.installment_number, 0);
    }

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(Envelope {
            data: TransactionPayload::from(&TransactionDraft {
                amount: Amount::from(Decimal::new(1000, 2)),
                kind: TransactionKind::Income,
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                description: "Venda".to_string(),
                account_id: 1,
                category_id: 2,
                installment: None,
            }),
        })
        .unwrap();
        assert_eq!(body["data"]["type_id"], 1);
        assert_eq!(body["data"]["amount"], 10.0);
        assert_eq!(body["data"]["date"], "2024-03-05");
    }
}
