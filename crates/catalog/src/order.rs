use serde::Serialize;

use o2c_core::ValueObject;

use crate::{Party, Product};

/// Fixed commercial dataset of the purchase order driven through the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTerms {
    pub vendor: Party,
    pub customer: Party,
    pub carrier: Party,
    pub product: Product,
    pub raw_material: Product,
    pub quantity: u32,
    pub credit_limit: u64,
    pub current_exposure: u64,
    pub currency: &'static str,
    pub po_number: &'static str,
    pub sales_order_number: &'static str,
}

impl ValueObject for OrderTerms {}

impl OrderTerms {
    /// The single order every scenario shares.
    pub fn standard() -> Self {
        Self {
            vendor: Party::vendor(),
            customer: Party::customer(),
            carrier: Party::carrier(),
            product: Product::touring_bike(),
            raw_material: Product::touring_frame(),
            quantity: 50,
            credit_limit: 250_000,
            current_exposure: 45_000,
            currency: "GBP",
            po_number: "998877",
            sales_order_number: "SO-100025",
        }
    }

    pub fn unit_price(&self) -> u64 {
        self.product.unit_amount
    }

    /// Price × quantity.
    pub fn order_value(&self) -> u64 {
        self.unit_price() * u64::from(self.quantity)
    }

    /// Exposure if this order is accepted on credit.
    pub fn new_exposure(&self) -> u64 {
        self.current_exposure + self.order_value()
    }
}
