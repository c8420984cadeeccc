use serde::{Deserialize, Serialize};

/// Role a party plays in the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Vendor,
    Customer,
    Carrier,
}

/// A fixed business partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub kind: PartyKind,
    /// External reference (e.g. customer number), when the role has one.
    pub reference: Option<&'static str>,
    pub name: &'static str,
    pub address: &'static str,
}

impl Party {
    pub fn vendor() -> Self {
        Self {
            kind: PartyKind::Vendor,
            reference: None,
            name: "Global Bike International (GBI)",
            address: "45 Thames Road, Woolwich Industrial Estate, Woolwich, London SE18 5NU",
        }
    }

    pub fn customer() -> Self {
        Self {
            kind: PartyKind::Customer,
            reference: Some("20050"),
            name: "Kigali Velo Ltd",
            address: "78 Avenue du Commerce, Kigali, Rwanda",
        }
    }

    pub fn carrier() -> Self {
        Self {
            kind: PartyKind::Carrier,
            reference: None,
            name: "Freight Ltd",
            address: "100 Logistics Park, Woolwich, London SE18 5NU",
        }
    }
}
