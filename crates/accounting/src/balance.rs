//! T-account view over recorded postings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::{Account, LedgerPosting, PostingSide};

/// Per-account totals. Balances are signed (debit-positive convention).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: Account,
    pub debit_total: u64,
    pub credit_total: u64,
}

impl AccountBalance {
    pub fn balance(&self) -> i128 {
        i128::from(self.debit_total) - i128::from(self.credit_total)
    }
}

/// Balances of every touched account, ordered by account code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub accounts: Vec<AccountBalance>,
    pub total_debits: u64,
    pub total_credits: u64,
}

impl TrialBalance {
    pub fn from_postings<'a>(postings: impl IntoIterator<Item = &'a LedgerPosting>) -> Self {
        let mut by_code: BTreeMap<String, AccountBalance> = BTreeMap::new();
        let mut total_debits = 0u64;
        let mut total_credits = 0u64;

        for posting in postings {
            let row = by_code
                .entry(posting.account.code.clone())
                .or_insert_with(|| AccountBalance {
                    account: posting.account.clone(),
                    debit_total: 0,
                    credit_total: 0,
                });
            match posting.side {
                PostingSide::Debit => {
                    row.debit_total += posting.amount;
                    total_debits += posting.amount;
                }
                PostingSide::Credit => {
                    row.credit_total += posting.amount;
                    total_credits += posting.amount;
                }
            }
        }

        Self {
            accounts: by_code.into_values().collect(),
            total_debits,
            total_credits,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debits == self.total_credits
    }

    pub fn account(&self, code: &str) -> Option<&AccountBalance> {
        self.accounts.iter().find(|a| a.account.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::JournalEntry;

    #[test]
    fn receivable_nets_to_zero_after_collection() {
        let billing = JournalEntry::pair(
            "Invoice posted",
            Account::accounts_receivable(),
            Account::sales_revenue(),
            150_000,
            "Inv #505",
        );
        let collection = JournalEntry::pair(
            "Transfer cleared",
            Account::bank_cash(),
            Account::accounts_receivable(),
            150_000,
            "Transfer",
        );

        let tb = TrialBalance::from_postings(
            billing.postings.iter().chain(collection.postings.iter()),
        );

        assert!(tb.is_balanced());
        assert_eq!(tb.total_debits, 300_000);
        assert_eq!(tb.account("1000").unwrap().balance(), 150_000);
        assert_eq!(tb.account("1200").unwrap().balance(), 0);
        assert_eq!(tb.account("4000").unwrap().balance(), -150_000);
        let codes: Vec<&str> = tb.accounts.iter().map(|a| a.account.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "1200", "4000"]);
    }
}
