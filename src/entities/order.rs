use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use sea_orm::sea_query::IntoCondition;
use sea_orm::QuerySelect;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// Fulfilment state of an order. Transitions are not constrained.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(rename = "pending")]
    Pending,
    #[sea_orm(string_value = "in progress")]
    #[serde(rename = "in progress")]
    InProgress,
    #[sea_orm(string_value = "finished")]
    #[serde(rename = "finished")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "orders")]
#[schema(as = Order)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: Uuid,
    pub order_date: NaiveDate,
    pub order_status: OrderStatus,
    pub customer_id: Uuid,
    pub shipment_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::shipment::Entity",
        from = "Column::ShipmentId",
        to = "super::shipment::Column::ShipmentId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Shipment,
    #[sea_orm(has_many = "super::laptop_order::Entity")]
    LaptopOrder,
    #[sea_orm(has_many = "super::component_order::Entity")]
    ComponentOrder,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipment.def()
    }
}

impl Related<super::laptop_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaptopOrder.def()
    }
}

impl Related<super::component_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComponentOrder.def()
    }
}

impl Related<super::laptop::Entity> for Entity {
    fn to() -> RelationDef {
        super::laptop_order::Relation::Laptop.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::laptop_order::Relation::Order.def().rev())
    }
}

impl Related<super::component::Entity> for Entity {
    fn to() -> RelationDef {
        super::component_order::Relation::Component.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::component_order::Relation::Order.def().rev())
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.order_id.is_not_set() {
            self.order_id = Set(Uuid::new_v4());
        }
        Ok(self)
    }

    /// Line rows of the order go first.
    async fn before_delete<C>(self, db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let id = super::key_of(&self.order_id, "order_id")?;
        delete_lines(db, vec![id]).await?;
        Ok(self)
    }
}

/// Removes every order matching `condition` together with its laptop and
/// component lines. Used by the deletion contracts of customers and shipments.
pub(crate) async fn delete_where<C, F>(db: &C, condition: F) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
    F: IntoCondition,
{
    let ids: Vec<Uuid> = Entity::find()
        .select_only()
        .column(Column::OrderId)
        .filter(condition)
        .into_tuple()
        .all(db)
        .await?;

    if ids.is_empty() {
        return Ok(0);
    }

    delete_lines(db, ids.clone()).await?;
    let result = Entity::delete_many()
        .filter(Column::OrderId.is_in(ids))
        .exec(db)
        .await?;

    debug!(orders = result.rows_affected, "cascaded order delete");
    Ok(result.rows_affected)
}

async fn delete_lines<C>(db: &C, order_ids: Vec<Uuid>) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    super::laptop_order::Entity::delete_many()
        .filter(super::laptop_order::Column::OrderId.is_in(order_ids.clone()))
        .exec(db)
        .await?;
    super::component_order::Entity::delete_many()
        .filter(super::component_order::Column::OrderId.is_in(order_ids))
        .exec(db)
        .await?;
    Ok(())
}
