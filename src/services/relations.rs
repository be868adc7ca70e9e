//! Loadable relations, one closed enum per entity.
//!
//! The `Display` form of each variant is the relation name used in URLs and
//! as the key of the loaded data in responses.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use strum::{Display, EnumIter};
use uuid::Uuid;

use crate::entities::{
    component, component_order, customer, laptop, laptop_component, laptop_order, order, shipment,
};
use crate::services::crud::EagerLoad;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CustomerRelation {
    Orders,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerRelated {
    Orders(Vec<order::Model>),
}

#[async_trait]
impl EagerLoad for CustomerRelation {
    type Entity = customer::Entity;
    type Related = CustomerRelated;

    async fn load<C>(self, db: &C, rows: &[customer::Model]) -> Result<Vec<CustomerRelated>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(match self {
            CustomerRelation::Orders => rows
                .load_many(order::Entity, db)
                .await?
                .into_iter()
                .map(CustomerRelated::Orders)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ShipmentRelation {
    Orders,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentRelated {
    Orders(Vec<order::Model>),
}

#[async_trait]
impl EagerLoad for ShipmentRelation {
    type Entity = shipment::Entity;
    type Related = ShipmentRelated;

    async fn load<C>(self, db: &C, rows: &[shipment::Model]) -> Result<Vec<ShipmentRelated>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(match self {
            ShipmentRelation::Orders => rows
                .load_many(order::Entity, db)
                .await?
                .into_iter()
                .map(ShipmentRelated::Orders)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum OrderRelation {
    Customer,
    Shipment,
    Laptops,
    Components,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderRelated {
    Customer(Option<customer::Model>),
    Shipment(Option<shipment::Model>),
    Laptops(Vec<laptop::Model>),
    Components(Vec<component::Model>),
}

#[async_trait]
impl EagerLoad for OrderRelation {
    type Entity = order::Entity;
    type Related = OrderRelated;

    async fn load<C>(self, db: &C, rows: &[order::Model]) -> Result<Vec<OrderRelated>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(match self {
            OrderRelation::Customer => rows
                .load_one(customer::Entity, db)
                .await?
                .into_iter()
                .map(OrderRelated::Customer)
                .collect(),
            OrderRelation::Shipment => load_shipments(db, rows)
                .await?
                .into_iter()
                .map(OrderRelated::Shipment)
                .collect(),
            OrderRelation::Laptops => rows
                .load_many_to_many(laptop::Entity, laptop_order::Entity, db)
                .await?
                .into_iter()
                .map(OrderRelated::Laptops)
                .collect(),
            OrderRelation::Components => rows
                .load_many_to_many(component::Entity, component_order::Entity, db)
                .await?
                .into_iter()
                .map(OrderRelated::Components)
                .collect(),
        })
    }
}

/// Shipment of each order; orders without one get `None`.
async fn load_shipments<C>(db: &C, rows: &[order::Model]) -> Result<Vec<Option<shipment::Model>>, DbErr>
where
    C: ConnectionTrait,
{
    let ids: Vec<Uuid> = rows.iter().filter_map(|o| o.shipment_id).collect();
    if ids.is_empty() {
        return Ok(vec![None; rows.len()]);
    }

    let by_id: HashMap<Uuid, shipment::Model> = shipment::Entity::find()
        .filter(shipment::Column::ShipmentId.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.shipment_id, s))
        .collect();

    Ok(rows
        .iter()
        .map(|o| o.shipment_id.and_then(|id| by_id.get(&id).cloned()))
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum LaptopRelation {
    Components,
    Orders,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaptopRelated {
    Components(Vec<component::Model>),
    Orders(Vec<order::Model>),
}

#[async_trait]
impl EagerLoad for LaptopRelation {
    type Entity = laptop::Entity;
    type Related = LaptopRelated;

    async fn load<C>(self, db: &C, rows: &[laptop::Model]) -> Result<Vec<LaptopRelated>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(match self {
            LaptopRelation::Components => rows
                .load_many_to_many(component::Entity, laptop_component::Entity, db)
                .await?
                .into_iter()
                .map(LaptopRelated::Components)
                .collect(),
            LaptopRelation::Orders => rows
                .load_many_to_many(order::Entity, laptop_order::Entity, db)
                .await?
                .into_iter()
                .map(LaptopRelated::Orders)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ComponentRelation {
    Laptops,
    Orders,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentRelated {
    Laptops(Vec<laptop::Model>),
    Orders(Vec<order::Model>),
}

#[async_trait]
impl EagerLoad for ComponentRelation {
    type Entity = component::Entity;
    type Related = ComponentRelated;

    async fn load<C>(self, db: &C, rows: &[component::Model]) -> Result<Vec<ComponentRelated>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(match self {
            ComponentRelation::Laptops => rows
                .load_many_to_many(laptop::Entity, laptop_component::Entity, db)
                .await?
                .into_iter()
                .map(ComponentRelated::Laptops)
                .collect(),
            ComponentRelation::Orders => rows
                .load_many_to_many(order::Entity, component_order::Entity, db)
                .await?
                .into_iter()
                .map(ComponentRelated::Orders)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::crud::WithRelated;
    use chrono::NaiveDate;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn relation_names_are_snake_case() {
        let names: Vec<String> = OrderRelation::iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["customer", "shipment", "laptops", "components"]);
        assert_eq!(LaptopRelation::Components.to_string(), "components");
        assert_eq!(ComponentRelation::Laptops.to_string(), "laptops");
    }

    #[test]
    fn extended_record_serialises_flat() {
        let order_id = Uuid::new_v4();
        let customer_id = Uuid::new_v4();
        let record = WithRelated {
            record: order::Model {
                order_id,
                order_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                order_status: order::OrderStatus::InProgress,
                customer_id,
                shipment_id: None,
            },
            related: OrderRelated::Shipment(None),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "order_id": order_id,
                "order_date": "2024-03-01",
                "order_status": "in progress",
                "customer_id": customer_id,
                "shipment_id": null,
                "shipment": null,
            })
        );
    }
}
