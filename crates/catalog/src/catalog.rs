use serde::Serialize;

use o2c_inventory::Inventory;

use crate::{OrderTerms, Scenario};

/// Everything a run starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub scenario: Scenario,
    pub inventory: Inventory,
    pub order: OrderTerms,
}

/// Immutable lookup from scenario to its starting conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioCatalog;

impl ScenarioCatalog {
    pub fn entry(&self, scenario: Scenario) -> CatalogEntry {
        CatalogEntry {
            scenario,
            inventory: scenario.initial_inventory(),
            order: OrderTerms::standard(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        Scenario::ALL.into_iter().map(|s| self.entry(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_value_is_identical_across_scenarios() {
        for entry in ScenarioCatalog.entries() {
            assert_eq!(entry.order.order_value(), 150_000, "{}", entry.scenario);
            assert_eq!(entry.order.quantity, 50);
        }
    }

    #[test]
    fn entry_carries_scenario_inventory() {
        let entry = ScenarioCatalog.entry(Scenario::Stockout);
        assert_eq!(entry.inventory, Inventory::new(0, 100));
    }
}
