//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
pub mod date;
mod form;
pub mod lookup;
mod transaction;

pub use amount::{Amount, AmountError};
pub use date::MonthRef;
pub use form::{
    CreateForm, Credentials, EditForm, FieldError, FieldErrors, LoginForm, RegisterForm,
    Registration, TransactionDraft,
};
pub use transaction::{Transaction, TransactionKind};
