use serde::{Deserialize, Serialize};

use o2c_catalog::OrderTerms;

/// Credit figures shown to the operator during the credit check.
///
/// Advisory only: the approve/reject decision is supplied from outside and
/// nothing here gates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAssessment {
    pub credit_limit: u64,
    pub current_exposure: u64,
    pub order_value: u64,
    pub new_exposure: u64,
    pub exceeds_limit: bool,
}

impl CreditAssessment {
    pub fn for_order(terms: &OrderTerms) -> Self {
        let new_exposure = terms.current_exposure + terms.order_value();
        Self {
            credit_limit: terms.credit_limit,
            current_exposure: terms.current_exposure,
            order_value: terms.order_value(),
            new_exposure,
            exceeds_limit: new_exposure > terms.credit_limit,
        }
    }

    /// Credit left after accepting the order (zero when over the limit).
    pub fn headroom(&self) -> u64 {
        self.credit_limit.saturating_sub(self.new_exposure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order_stays_within_limit() {
        let a = CreditAssessment::for_order(&OrderTerms::standard());
        assert_eq!(a.new_exposure, 195_000);
        assert!(!a.exceeds_limit);
        assert_eq!(a.headroom(), 55_000);
    }

    #[test]
    fn over_limit_is_flagged_not_enforced() {
        let mut terms = OrderTerms::standard();
        terms.current_exposure = 200_000;
        let a = CreditAssessment::for_order(&terms);
        assert!(a.exceeds_limit);
        assert_eq!(a.headroom(), 0);
    }
}
