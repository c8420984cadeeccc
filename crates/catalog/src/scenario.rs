use core::str::FromStr;

use serde::{Deserialize, Serialize};

use o2c_core::DomainError;
use o2c_inventory::Inventory;

/// Named starting condition selectable by the learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Happy path: stock on hand.
    #[default]
    Standard,
    /// No finished goods, frames available: production required.
    Stockout,
    /// Nothing on hand: procurement then production required.
    SupplyChainCrisis,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Standard,
        Scenario::Stockout,
        Scenario::SupplyChainCrisis,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Scenario::Standard => "Scenario A: Standard Order (Happy Path)",
            Scenario::Stockout => "Scenario B: The Stockout (Production Required)",
            Scenario::SupplyChainCrisis => "Scenario C: Supply Chain Crisis (Procurement Required)",
        }
    }

    /// Opening stock for a fresh run.
    pub fn initial_inventory(self) -> Inventory {
        match self {
            Scenario::Standard => Inventory::new(100, 100),
            Scenario::Stockout => Inventory::new(0, 100),
            Scenario::SupplyChainCrisis => Inventory::new(0, 0),
        }
    }
}

impl core::fmt::Display for Scenario {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Scenario {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "a" | "standard" => Ok(Scenario::Standard),
            "b" | "stockout" => Ok(Scenario::Stockout),
            "c" | "supply-chain-crisis" | "crisis" => Ok(Scenario::SupplyChainCrisis),
            _ => Err(DomainError::validation(format!(
                "unknown scenario '{s}': expected one of standard, stockout, supply-chain-crisis"
            ))),
        }
    }
}
