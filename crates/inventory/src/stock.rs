use serde::{Deserialize, Serialize};

use o2c_core::ValueObject;

/// Which counter a change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockItem {
    FinishedGoods,
    RawMaterials,
}

impl core::fmt::Display for StockItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockItem::FinishedGoods => f.write_str("finished goods"),
            StockItem::RawMaterials => f.write_str("raw materials"),
        }
    }
}

/// Sets a counter to an absolute level.
///
/// Production and procurement overwrite the counter rather than adding to it,
/// and production leaves raw materials untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub item: StockItem,
    pub level: u32,
}

impl StockChange {
    pub fn finished_goods(level: u32) -> Self {
        Self {
            item: StockItem::FinishedGoods,
            level,
        }
    }

    pub fn raw_materials(level: u32) -> Self {
        Self {
            item: StockItem::RawMaterials,
            level,
        }
    }
}

/// Stock on hand. Unsigned counters, so never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    pub finished_goods: u32,
    pub raw_materials: u32,
}

impl ValueObject for Inventory {}

impl Inventory {
    pub fn new(finished_goods: u32, raw_materials: u32) -> Self {
        Self {
            finished_goods,
            raw_materials,
        }
    }

    pub fn level(&self, item: StockItem) -> u32 {
        match item {
            StockItem::FinishedGoods => self.finished_goods,
            StockItem::RawMaterials => self.raw_materials,
        }
    }

    /// Whether finished goods on hand cover `required`.
    pub fn covers_finished_goods(&self, required: u32) -> bool {
        self.finished_goods >= required
    }

    /// Whether raw materials on hand cover `required`.
    pub fn covers_raw_materials(&self, required: u32) -> bool {
        self.raw_materials >= required
    }

    pub fn with_finished_goods(self, level: u32) -> Self {
        Self {
            finished_goods: level,
            ..self
        }
    }

    pub fn with_raw_materials(self, level: u32) -> Self {
        Self {
            raw_materials: level,
            ..self
        }
    }

    /// Return the inventory after `change`.
    pub fn apply(self, change: StockChange) -> Self {
        match change.item {
            StockItem::FinishedGoods => self.with_finished_goods(change.level),
            StockItem::RawMaterials => self.with_raw_materials(change.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn coverage_is_inclusive() {
        let inv = Inventory::new(50, 49);
        assert!(inv.covers_finished_goods(50));
        assert!(!inv.covers_raw_materials(50));
    }

    #[test]
    fn finished_goods_change_leaves_raw_materials_alone() {
        let inv = Inventory::new(0, 100).apply(StockChange::finished_goods(50));
        assert_eq!(inv, Inventory::new(50, 100));
    }

    #[test]
    fn raw_materials_change_overwrites_level() {
        let inv = Inventory::new(0, 7).apply(StockChange::raw_materials(50));
        assert_eq!(inv.level(StockItem::RawMaterials), 50);
        assert_eq!(inv.level(StockItem::FinishedGoods), 0);
    }

    proptest! {
        /// Property: a change only ever touches the counter it names.
        #[test]
        fn change_touches_only_its_counter(fg in 0u32..1_000, rm in 0u32..1_000, level in 0u32..1_000) {
            let inv = Inventory::new(fg, rm);

            let after = inv.apply(StockChange::finished_goods(level));
            prop_assert_eq!(after.finished_goods, level);
            prop_assert_eq!(after.raw_materials, rm);

            let after = inv.apply(StockChange::raw_materials(level));
            prop_assert_eq!(after.raw_materials, level);
            prop_assert_eq!(after.finished_goods, fg);
        }
    }
}
