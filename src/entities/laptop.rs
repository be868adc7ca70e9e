use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "laptops")]
#[schema(as = Laptop)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub laptop_id: Uuid,
    pub manufacturer: String,
    pub model: String,
    pub make_year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::laptop_component::Entity")]
    LaptopComponent,
    #[sea_orm(has_many = "super::laptop_order::Entity")]
    LaptopOrder,
}

impl Related<super::laptop_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaptopComponent.def()
    }
}

impl Related<super::laptop_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaptopOrder.def()
    }
}

impl Related<super::component::Entity> for Entity {
    fn to() -> RelationDef {
        super::laptop_component::Relation::Component.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::laptop_component::Relation::Laptop.def().rev())
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::laptop_order::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::laptop_order::Relation::Laptop.def().rev())
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.laptop_id.is_not_set() {
            self.laptop_id = Set(Uuid::new_v4());
        }
        Ok(self)
    }

    /// Detaches the laptop from its components and order lines.
    async fn before_delete<C>(self, db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let id = super::key_of(&self.laptop_id, "laptop_id")?;
        super::laptop_component::Entity::delete_many()
            .filter(super::laptop_component::Column::LaptopId.eq(id))
            .exec(db)
            .await?;
        super::laptop_order::Entity::delete_many()
            .filter(super::laptop_order::Column::LaptopId.eq(id))
            .exec(db)
            .await?;
        Ok(self)
    }
}
