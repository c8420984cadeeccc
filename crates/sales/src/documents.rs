//! Business documents issued during the Sales Order stage.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use o2c_catalog::OrderTerms;

/// The customer's purchase order that opens every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_number: String,
    pub vendor: String,
    pub ship_to: String,
    pub item: u32,
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total: u64,
    pub currency: String,
}

impl PurchaseOrder {
    pub fn from_terms(terms: &OrderTerms) -> Self {
        Self {
            po_number: terms.po_number.to_string(),
            vendor: terms.vendor.name.to_string(),
            ship_to: terms.customer.name.to_string(),
            item: 10,
            sku: terms.product.sku.to_string(),
            description: terms.product.name.to_string(),
            quantity: terms.quantity,
            unit_price: terms.unit_price(),
            total: terms.order_value(),
            currency: terms.currency.to_string(),
        }
    }
}

/// Confirmation sent to the customer once credit is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAcknowledgement {
    pub sales_order_number: String,
    pub po_number: String,
    pub customer: String,
    pub issued_on: NaiveDate,
    pub estimated_ship_date: NaiveDate,
}

impl OrderAcknowledgement {
    pub fn issue(terms: &OrderTerms, at: DateTime<Utc>) -> Self {
        Self {
            sales_order_number: terms.sales_order_number.to_string(),
            po_number: terms.po_number.to_string(),
            customer: terms.customer.name.to_string(),
            issued_on: at.date_naive(),
            estimated_ship_date: (at + Duration::days(1)).date_naive(),
        }
    }
}

/// Internal standard order created from the acknowledged PO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardOrder {
    pub sales_order_number: String,
    pub sales_org: String,
    pub distribution_channel: String,
    pub division: String,
    pub sold_to: String,
    pub reference_po: String,
    pub doc_date: NaiveDate,
    pub sku: String,
    pub quantity: u32,
    pub plant: String,
    pub shipping_point: String,
    pub incoterms: String,
    pub net_value: u64,
}

impl StandardOrder {
    pub fn issue(terms: &OrderTerms, at: DateTime<Utc>) -> Self {
        Self {
            sales_order_number: terms.sales_order_number.to_string(),
            sales_org: "UE00 (UK West)".to_string(),
            distribution_channel: "WH (Wholesale)".to_string(),
            division: "BI (Bicycles)".to_string(),
            sold_to: terms.customer.reference.unwrap_or(terms.customer.name).to_string(),
            reference_po: terms.po_number.to_string(),
            doc_date: at.date_naive(),
            sku: terms.product.sku.to_string(),
            quantity: terms.quantity,
            plant: "DL00".to_string(),
            shipping_point: "DL00 (London)".to_string(),
            incoterms: "FOB (Free on Board)".to_string(),
            net_value: terms.order_value(),
        }
    }
}
