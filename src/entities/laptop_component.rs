use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "laptops_components")]
#[schema(as = LaptopComponent)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub laptop_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub component_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::laptop::Entity",
        from = "Column::LaptopId",
        to = "super::laptop::Column::LaptopId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Laptop,
    #[sea_orm(
        belongs_to = "super::component::Entity",
        from = "Column::ComponentId",
        to = "super::component::Column::ComponentId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Component,
}

impl Related<super::laptop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Laptop.def()
    }
}

impl Related<super::component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Component.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
