use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use o2c_accounting::{Account, JournalEntry};
use o2c_catalog::OrderTerms;

/// Days between issue and due date.
pub const PAYMENT_TERMS_DAYS: i64 = 30;

/// Commercial invoice for the shipped order.
///
/// The amount is always the full order value; partial shipments are not
/// reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: u32,
    pub sales_order_number: String,
    pub bill_to: String,
    pub bill_to_address: String,
    pub amount: u64,
    pub currency: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub terms: String,
}

impl Invoice {
    pub fn issue(terms: &OrderTerms, at: DateTime<Utc>) -> Self {
        Self {
            number: 505,
            sales_order_number: terms.sales_order_number.to_string(),
            bill_to: terms.customer.name.to_string(),
            bill_to_address: terms.customer.address.to_string(),
            amount: terms.order_value(),
            currency: terms.currency.to_string(),
            issue_date: at.date_naive(),
            due_date: (at + Duration::days(PAYMENT_TERMS_DAYS)).date_naive(),
            terms: format!("Net {PAYMENT_TERMS_DAYS}"),
        }
    }

    pub fn label(&self) -> String {
        format!("Inv #{}", self.number)
    }

    /// Dr Accounts Receivable / Cr Sales Revenue for the invoice amount.
    pub fn receivable_entry(&self) -> JournalEntry {
        JournalEntry::pair(
            format!("Invoice #{} posted to Accounts Receivable", self.number),
            Account::accounts_receivable(),
            Account::sales_revenue(),
            self.amount,
            self.label(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use o2c_accounting::PostingSide;

    #[test]
    fn due_date_is_thirty_days_after_issue() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let invoice = Invoice::issue(&OrderTerms::standard(), at);
        assert_eq!(invoice.issue_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(invoice.terms, "Net 30");
    }

    #[test]
    fn amount_is_the_order_value() {
        let invoice = Invoice::issue(&OrderTerms::standard(), Utc::now());
        assert_eq!(invoice.amount, 150_000);
    }

    #[test]
    fn receivable_entry_debits_ar_and_credits_revenue() {
        let entry = Invoice::issue(&OrderTerms::standard(), Utc::now()).receivable_entry();
        entry.validate().unwrap();

        assert_eq!(entry.postings[0].account, Account::accounts_receivable());
        assert_eq!(entry.postings[0].side, PostingSide::Debit);
        assert_eq!(entry.postings[1].account, Account::sales_revenue());
        assert_eq!(entry.postings[1].side, PostingSide::Credit);
        assert!(entry.postings.iter().all(|p| p.amount == 150_000 && p.label == "Inv #505"));
    }
}
