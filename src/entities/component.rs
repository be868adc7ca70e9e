use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "components")]
#[schema(as = Component)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub component_id: Uuid,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub component_type: String,
    pub description: Option<String>,
    pub make_year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::laptop_component::Entity")]
    LaptopComponent,
    #[sea_orm(has_many = "super::component_order::Entity")]
    ComponentOrder,
}

impl Related<super::laptop_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaptopComponent.def()
    }
}

impl Related<super::component_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComponentOrder.def()
    }
}

impl Related<super::laptop::Entity> for Entity {
    fn to() -> RelationDef {
        super::laptop_component::Relation::Laptop.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::laptop_component::Relation::Component.def().rev())
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::component_order::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::component_order::Relation::Component.def().rev())
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.component_id.is_not_set() {
            self.component_id = Set(Uuid::new_v4());
        }
        Ok(self)
    }

    async fn before_delete<C>(self, db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let id = super::key_of(&self.component_id, "component_id")?;
        super::laptop_component::Entity::delete_many()
            .filter(super::laptop_component::Column::ComponentId.eq(id))
            .exec(db)
            .await?;
        super::component_order::Entity::delete_many()
            .filter(super::component_order::Column::ComponentId.eq(id))
            .exec(db)
            .await?;
        Ok(self)
    }
}
