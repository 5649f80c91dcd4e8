//! Static display labels for account and category ids.
//!
//! The product ships a fixed set of accounts and categories; the API refers to
//! them by id only. Unknown ids fall back to a generic numbered label so a
//! record added by a newer backend still renders.

/// The display label for an account id.
pub fn account_label(id: u32) -> String {
    match id {
        1 => "Carteira".to_string(),
        2 => "Conta Corrente".to_string(),
        3 => "Cartão de Crédito".to_string(),
        other => format!("Conta {other}"),
    }
}

/// The display label for a category id.
pub fn category_label(id: u32) -> String {
    match id {
        1 => "Alimentação".to_string(),
        2 => "Lazer".to_string(),
        3 => "Moto".to_string(),
        other => format!("Categoria {other}"),
    }
}
