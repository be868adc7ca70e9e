//! ORM entities for the store schema.
//!
//! Every resource table uses a UUID primary key generated in
//! `ActiveModelBehavior::before_save`, and every parent table declares its
//! deletion contract in `before_delete` so dependent rows leave in the same
//! transaction as the parent.

use sea_orm::{ActiveValue, DbErr};
use uuid::Uuid;

pub mod component;
pub mod component_order;
pub mod customer;
pub mod laptop;
pub mod laptop_component;
pub mod laptop_order;
pub mod order;
pub mod shipment;

pub use order::OrderStatus;
pub use shipment::ShipmentStatus;

/// Reads the primary key out of an active model that is about to be deleted.
pub(crate) fn key_of(value: &ActiveValue<Uuid>, column: &str) -> Result<Uuid, DbErr> {
    match value {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Ok(*id),
        ActiveValue::NotSet => Err(DbErr::Custom(format!(
            "cannot delete without a value for {column}"
        ))),
    }
}
