use serde::Serialize;

/// Catalog material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub sku: &'static str,
    pub name: &'static str,
    /// Sales price (finished goods) or purchase cost (raw materials), in whole
    /// currency units.
    pub unit_amount: u64,
}

impl Product {
    /// The finished good being sold.
    pub fn touring_bike() -> Self {
        Self {
            sku: "DXTR1000",
            name: "Deluxe Touring Bike (Black)",
            unit_amount: 3000,
        }
    }

    /// The raw material consumed by production.
    pub fn touring_frame() -> Self {
        Self {
            sku: "TRFR1000",
            name: "Touring Frame",
            unit_amount: 500,
        }
    }
}
