use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use o2c_accounting::{Account, JournalEntry};
use o2c_catalog::OrderTerms;

/// Bank reference quoted on the customer's wire transfer.
pub const WIRE_REFERENCE: &str = "TRN-88776655";

const INVOICE_NUMBER: u32 = 505;

/// Customer's remittance advice for invoice #505.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemittanceAdvice {
    pub payer: String,
    pub payer_address: String,
    pub payee: String,
    pub invoice_number: u32,
    pub date: NaiveDate,
    pub amount: u64,
    pub discount: u64,
    pub net_pay: u64,
    pub method: String,
    pub reference: String,
}

impl RemittanceAdvice {
    pub fn issue(terms: &OrderTerms, at: DateTime<Utc>) -> Self {
        let amount = terms.order_value();
        Self {
            payer: terms.customer.name.to_string(),
            payer_address: terms.customer.address.to_string(),
            payee: terms.vendor.name.to_string(),
            invoice_number: INVOICE_NUMBER,
            date: at.date_naive(),
            amount,
            discount: 0,
            net_pay: amount,
            method: "Electronic Wire Transfer".to_string(),
            reference: WIRE_REFERENCE.to_string(),
        }
    }

    /// Dr Bank Cash / Cr Accounts Receivable for the net amount received.
    pub fn clearing_entry(&self) -> JournalEntry {
        JournalEntry::pair(
            format!("Wire transfer {} cleared against invoice #{}", self.reference, self.invoice_number),
            Account::bank_cash(),
            Account::accounts_receivable(),
            self.net_pay,
            "Transfer",
        )
    }
}
