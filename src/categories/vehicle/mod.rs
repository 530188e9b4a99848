//! Vehicle blocks: specification tables, pricing and inventory grids

pub mod inventory;
pub mod price;
pub mod specs;

pub use inventory::InventoryProps;
pub use price::PriceProps;
pub use specs::{SpecItem, SpecsProps};
