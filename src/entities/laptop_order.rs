use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "laptop_order")]
#[schema(as = LaptopOrder)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub laptop_order_id: Uuid,
    pub order_id: Uuid,
    pub laptop_id: Uuid,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::OrderId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::laptop::Entity",
        from = "Column::LaptopId",
        to = "super::laptop::Column::LaptopId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Laptop,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::laptop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Laptop.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.laptop_order_id.is_not_set() {
            self.laptop_order_id = Set(Uuid::new_v4());
        }
        Ok(self)
    }
}
