use serde::{Deserialize, Serialize};

use o2c_inventory::Inventory;

/// How the order will be sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fulfilment {
    /// Finished goods on hand cover the order.
    FromStock,
    /// Frames on hand: assemble the shortfall.
    Production,
    /// Nothing usable on hand: buy frames, then assemble.
    Procurement,
}

/// Result of the inventory availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAssessment {
    pub required: u32,
    pub finished_goods: u32,
    pub raw_materials: u32,
}

impl StockAssessment {
    pub fn evaluate(inventory: &Inventory, required: u32) -> Self {
        Self {
            required,
            finished_goods: inventory.finished_goods,
            raw_materials: inventory.raw_materials,
        }
    }

    pub fn is_stock_sufficient(&self) -> bool {
        self.finished_goods >= self.required
    }

    pub fn is_raw_material_sufficient(&self) -> bool {
        self.raw_materials >= self.required
    }

    pub fn fulfilment(&self) -> Fulfilment {
        if self.is_stock_sufficient() {
            Fulfilment::FromStock
        } else if self.is_raw_material_sufficient() {
            Fulfilment::Production
        } else {
            Fulfilment::Procurement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scenario_inventories_route_as_expected() {
        let route = |fg, rm| StockAssessment::evaluate(&Inventory::new(fg, rm), 50).fulfilment();
        assert_eq!(route(100, 100), Fulfilment::FromStock);
        assert_eq!(route(0, 100), Fulfilment::Production);
        assert_eq!(route(0, 0), Fulfilment::Procurement);
        assert_eq!(route(50, 0), Fulfilment::FromStock);
        assert_eq!(route(49, 50), Fulfilment::Production);
    }

    proptest! {
        /// Property: stock on hand always wins over the raw-material branch.
        #[test]
        fn sufficient_stock_never_triggers_sourcing(fg in 50u32..10_000, rm in 0u32..10_000) {
            let a = StockAssessment::evaluate(&Inventory::new(fg, rm), 50);
            prop_assert_eq!(a.fulfilment(), Fulfilment::FromStock);
        }
    }
}
