//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new value (see `Inventory::with_finished_goods`).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Inventory { finished_goods: u32, raw_materials: u32 }
///
/// impl ValueObject for Inventory {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
