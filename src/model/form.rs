//! Typed form records for the create, edit, login, and register flows.
//!
//! Raw CLI input is validated field by field; every problem is collected into
//! one `FieldErrors` value so the user sees all messages at once, and no
//! request is built until validation passes. Field messages are the product's
//! Portuguese strings.

use crate::model::{date, Amount, Transaction, TransactionKind};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// One failed field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every validation problem found in a form, one entry per field.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns `value` when no field failed, otherwise `self` as the error.
    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "the form has {} invalid field{}:",
            self.0.len(),
            if self.0.len() == 1 { "" } else { "s" }
        )?;
        for e in &self.0 {
            writeln!(f, "  {}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A fully validated transaction form, ready to become a wire payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub description: String,
    pub account_id: u32,
    pub category_id: u32,
    pub installment: Option<u32>,
}

/// Raw input for the create-transaction form. Every field optional at the CLI
/// so that missing ones surface as form messages rather than argument errors.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    pub amount: Option<String>,
    pub kind: Option<TransactionKind>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub account: Option<u32>,
    pub category: Option<u32>,
    pub installments: Option<u32>,
}

impl CreateForm {
    pub fn validate(&self) -> Result<TransactionDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let amount = match self.amount.as_deref() {
            None => {
                errors.push("amount", "O valor é obrigatório");
                None
            }
            Some(raw) => match Amount::from_str(raw) {
                Ok(a) if a.is_negative() || a.is_zero() => {
                    errors.push("amount", "O valor deve ser maior que zero");
                    None
                }
                Ok(a) => Some(a),
                Err(_) => {
                    errors.push("amount", "Valor inválido");
                    None
                }
            },
        };

        if self.kind.is_none() {
            errors.push("kind", "O tipo é obrigatório");
        }

        let parsed_date = match self.date.as_deref() {
            None => {
                errors.push("date", "A data é obrigatória");
                None
            }
            Some(raw) => match date::parse_date_input(raw) {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push("date", "Data inválida");
                    None
                }
            },
        };

        let description = match self.description.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("description", "A descrição é obrigatória");
                None
            }
            Some(d) => Some(d.to_string()),
        };

        if self.account.is_none() {
            errors.push("account", "A conta é obrigatória");
        }
        if self.category.is_none() {
            errors.push("category", "A categoria é obrigatória");
        }
        if self.installments == Some(0) {
            errors.push("installments", "O número da parcela deve ser maior que zero");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Unwraps cannot fire: each None was recorded above.
        Ok(TransactionDraft {
            amount: amount.unwrap(),
            kind: self.kind.unwrap(),
            date: parsed_date.unwrap(),
            description: description.unwrap(),
            account_id: self.account.unwrap(),
            category_id: self.category.unwrap(),
            installment: self.installments,
        })
    }
}

/// Raw input for the edit-transaction form. Provided fields replace the
/// current record's values; everything else is carried over unchanged.
/// `installments: Some(0)` clears an installment series.
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub amount: Option<String>,
    pub kind: Option<TransactionKind>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub account: Option<u32>,
    pub category: Option<u32>,
    pub installments: Option<u32>,
}

impl EditForm {
    /// True when no field was provided, i.e. there is nothing to change.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.kind.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.account.is_none()
            && self.category.is_none()
            && self.installments.is_none()
    }

    /// Overlays the provided fields onto `current` and validates the result.
    pub fn apply(&self, current: &Transaction) -> Result<TransactionDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let amount = match self.amount.as_deref() {
            None => current.amount,
            Some(raw) => match Amount::from_str(raw) {
                Ok(a) if a.is_negative() || a.is_zero() => {
                    errors.push("amount", "O valor deve ser maior que zero");
                    current.amount
                }
                Ok(a) => a,
                Err(_) => {
                    errors.push("amount", "Valor inválido");
                    current.amount
                }
            },
        };

        let parsed_date = match self.date.as_deref() {
            None => current.date,
            Some(raw) => match date::parse_date_input(raw) {
                Ok(d) => d,
                Err(_) => {
                    errors.push("date", "Data inválida");
                    current.date
                }
            },
        };

        let description = match self.description.as_deref().map(str::trim) {
            None => current.description.clone(),
            Some("") => {
                errors.push("description", "A descrição é obrigatória");
                current.description.clone()
            }
            Some(d) => d.to_string(),
        };

        let installment = match self.installments {
            None => current.installment,
            Some(0) => None,
            Some(n) => Some(n),
        };

        let draft = TransactionDraft {
            amount,
            kind: self.kind.unwrap_or(current.kind),
            date: parsed_date,
            description,
            account_id: self.account.unwrap_or(current.account_id),
            category_id: self.category.unwrap_or(current.category_id),
            installment,
        };
        errors.into_result(draft)
    }
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Raw input for the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = match self.email.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("email", "O e-mail é obrigatório");
                String::new()
            }
            Some(e) if !is_valid_email(e) => {
                errors.push("email", "E-mail inválido");
                String::new()
            }
            Some(e) => e.to_string(),
        };

        let password = match self.password.as_deref() {
            None | Some("") => {
                errors.push("password", "A senha é obrigatória");
                String::new()
            }
            Some(p) => p.to_string(),
        };

        errors.into_result(Credentials { email, password })
    }
}

/// Validated registration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Raw input for the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = match self.name.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("name", "O nome é obrigatório");
                String::new()
            }
            Some(n) if n.chars().count() < 3 => {
                errors.push("name", "O nome deve ter pelo menos 3 caracteres");
                String::new()
            }
            Some(n) => n.to_string(),
        };

        let email = match self.email.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("email", "O e-mail é obrigatório");
                String::new()
            }
            Some(e) if !is_valid_email(e) => {
                errors.push("email", "E-mail inválido");
                String::new()
            }
            Some(e) => e.to_string(),
        };

        let password = match self.password.as_deref() {
            None | Some("") => {
                errors.push("password", "A senha é obrigatória");
                String::new()
            }
            Some(p) if p.chars().count() < 6 => {
                errors.push("password", "A senha deve ter pelo menos 6 caracteres");
                String::new()
            }
            Some(p) => p.to_string(),
        };

        errors.into_result(Registration {
            name,
            email,
            password,
        })
    }
}

/// A deliberately small well-formedness check: one `@`, a dot somewhere in
/// the domain, no whitespace. The server does the authoritative validation.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
