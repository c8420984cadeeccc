use serde::Serialize;

use o2c_accounting::{JournalEntry, LedgerPosting, TrialBalance};
use o2c_catalog::Scenario;
use o2c_inventory::Inventory;

use crate::SimulationRun;

/// Cost of goods sold as a share of revenue (a flat 50% margin).
const COGS_PERCENT: u64 = 50;

/// Financial results of a completed run.
///
/// COGS is a teaching constant; it does not follow the inventory movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scenario: Scenario,
    pub revenue: u64,
    pub cost_of_goods_sold: u64,
    pub net_profit: u64,
    pub final_inventory: Inventory,
    pub entries: Vec<JournalEntry>,
    pub postings: Vec<LedgerPosting>,
    pub balances: TrialBalance,
}

impl RunSummary {
    /// `None` until the run reaches Complete.
    pub fn of(run: &SimulationRun) -> Option<Self> {
        if !run.is_complete() {
            return None;
        }
        let revenue = run.terms().order_value();
        let cost_of_goods_sold = revenue * COGS_PERCENT / 100;
        let postings: Vec<LedgerPosting> = run.ledger().postings().cloned().collect();
        Some(Self {
            scenario: run.scenario(),
            revenue,
            cost_of_goods_sold,
            net_profit: revenue - cost_of_goods_sold,
            final_inventory: run.inventory(),
            entries: run.ledger().entries().to_vec(),
            balances: TrialBalance::from_postings(&postings),
            postings,
        })
    }
}
