//! Shipping documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use o2c_catalog::OrderTerms;

const UNIT_WEIGHT_KG: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingTicket {
    pub sales_order_number: String,
    pub sku: String,
    pub description: String,
    pub bin: String,
    pub quantity_to_pick: u32,
    pub quantity_picked: u32,
    pub fully_picked: bool,
}

impl PickingTicket {
    pub fn picked(terms: &OrderTerms, quantity_picked: u32) -> Self {
        Self {
            sales_order_number: terms.sales_order_number.to_string(),
            sku: terms.product.sku.to_string(),
            description: terms.product.name.to_string(),
            bin: "A-42-01".to_string(),
            quantity_to_pick: terms.quantity,
            quantity_picked,
            fully_picked: quantity_picked == terms.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSlip {
    pub sales_order_number: String,
    pub ship_to: String,
    pub ship_to_address: String,
    pub contents: Vec<String>,
    pub total_weight_kg: u32,
}

impl PackingSlip {
    pub fn for_order(terms: &OrderTerms) -> Self {
        let qty = terms.quantity;
        Self {
            sales_order_number: terms.sales_order_number.to_string(),
            ship_to: terms.customer.name.to_string(),
            ship_to_address: terms.customer.address.to_string(),
            contents: vec![
                format!("{} {} x{qty}", terms.product.sku, terms.product.name),
                format!("Accessories Kit x{qty}"),
                format!("Warranty Card x{qty}"),
            ],
            total_weight_kg: qty * UNIT_WEIGHT_KG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOfLading {
    pub carrier: String,
    pub carrier_address: String,
    pub shipper: String,
    pub consignee: String,
    pub tracking_number: String,
    pub freight_class: String,
    pub terms: String,
    pub quantity_shipped: u32,
    pub weight_kg: u32,
    pub shipped_on: NaiveDate,
}

impl BillOfLading {
    pub fn issue(terms: &OrderTerms, at: DateTime<Utc>) -> Self {
        Self {
            carrier: terms.carrier.name.to_string(),
            carrier_address: terms.carrier.address.to_string(),
            shipper: terms.vendor.name.to_string(),
            consignee: terms.customer.name.to_string(),
            tracking_number: "1Z9992839283".to_string(),
            freight_class: "92.5".to_string(),
            terms: "FOB Shipping Point".to_string(),
            quantity_shipped: terms.quantity,
            weight_kg: terms.quantity * UNIT_WEIGHT_KG,
            shipped_on: at.date_naive(),
        }
    }
}
