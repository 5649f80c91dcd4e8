//! Day-section aggregation for the monthly transaction list.

use crate::model::{Amount, MonthRef, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One calendar day's transactions plus their net total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySection {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
    /// Income and transfers add, expenses subtract.
    pub daily_total: Amount,
}

/// Groups one month's transactions into day sections, earliest day first.
///
/// Records outside `selected` are excluded. Within a day, input order is
/// preserved. Always total: an empty result means an empty month, not a
/// failure.
pub fn day_sections(transactions: &[Transaction], selected: MonthRef) -> Vec<DaySection> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions.iter().filter(|t| selected.contains(t.date)) {
        buckets
            .entry(transaction.date)
            .or_default()
            .push(transaction.clone());
    }
    buckets
        .into_iter()
        .map(|(date, transactions)| {
            let total: Decimal = transactions.iter().map(Transaction::signed_amount).sum();
            DaySection {
                date,
                transactions,
                daily_total: Amount::from(total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionKind;
    use chrono::Datelike;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn transaction(id: u64, day: NaiveDate, kind: TransactionKind, amount: &str) -> Transaction {
        Transaction {
            id,
            amount: Amount::from_str(amount).unwrap(),
            kind,
            date: day,
            description: format!("transaction {id}"),
            account_id: 1,
            category_id: 1,
            installment: None,
        }
    }

    fn march() -> MonthRef {
        MonthRef::new(3, 2024).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(day_sections(&[], march()).is_empty());
    }

    #[test]
    fn test_daily_totals_net_income_against_expense() {
        let transactions = vec![
            transaction(1, date(2024, 3, 5), TransactionKind::Income, "100,00"),
            transaction(2, date(2024, 3, 5), TransactionKind::Expense, "40,00"),
            transaction(3, date(2024, 3, 6), TransactionKind::Expense, "20,00"),
        ];
        let sections = day_sections(&transactions, march());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].date, date(2024, 3, 5));
        assert_eq!(sections[0].daily_total.to_string(), "R$ 60,00");
        assert_eq!(sections[1].date, date(2024, 3, 6));
        assert_eq!(sections[1].daily_total.to_string(), "-R$ 20,00");
    }

    #[test]
    fn test_transfers_add_to_the_total() {
        let transactions = vec![
            transaction(1, date(2024, 3, 10), TransactionKind::Transfer, "30,00"),
            transaction(2, date(2024, 3, 10), TransactionKind::Expense, "10,00"),
        ];
        let sections = day_sections(&transactions, march());
        assert_eq!(sections[0].daily_total.to_string(), "R$ 20,00");
    }

    #[test]
    fn test_records_outside_the_month_are_excluded() {
        let transactions = vec![
            transaction(1, date(2024, 2, 28), TransactionKind::Expense, "5,00"),
            transaction(2, date(2024, 3, 15), TransactionKind::Income, "50,00"),
            transaction(3, date(2024, 4, 1), TransactionKind::Expense, "7,00"),
            transaction(4, date(2023, 3, 15), TransactionKind::Income, "9,00"),
        ];
        let sections = day_sections(&transactions, march());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].transactions.len(), 1);
        assert_eq!(sections[0].transactions[0].id, 2);
    }

    #[test]
    fn test_sections_are_ascending_even_when_input_is_not() {
        let transactions = vec![
            transaction(1, date(2024, 3, 20), TransactionKind::Expense, "1,00"),
            transaction(2, date(2024, 3, 3), TransactionKind::Expense, "2,00"),
            transaction(3, date(2024, 3, 11), TransactionKind::Expense, "3,00"),
        ];
        let sections = day_sections(&transactions, march());
        let days: Vec<u32> = sections.iter().map(|s| s.date.day()).collect();
        assert_eq!(days, vec![3, 11, 20]);
    }

    #[test]
    fn test_input_order_is_kept_within_a_day() {
        let transactions = vec![
            transaction(7, date(2024, 3, 5), TransactionKind::Expense, "1,00"),
            transaction(3, date(2024, 3, 5), TransactionKind::Expense, "2,00"),
            transaction(9, date(2024, 3, 5), TransactionKind::Expense, "3,00"),
        ];
        let sections = day_sections(&transactions, march());
        let ids: Vec<u64> = sections[0].transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }

    #[test]
    fn test_totals_are_per_day_not_cumulative() {
        let transactions = vec![
            transaction(1, date(2024, 3, 1), TransactionKind::Income, "10,00"),
            transaction(2, date(2024, 3, 2), TransactionKind::Income, "10,00"),
        ];
        let sections = day_sections(&transactions, march());
        assert_eq!(sections[0].daily_total.to_string(), "R$ 10,00");
        assert_eq!(sections[1].daily_total.to_string(), "R$ 10,00");
    }
}
