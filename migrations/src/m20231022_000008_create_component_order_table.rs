use sea_orm_migration::prelude::*;

use super::m20231021_000004_create_components_table::Components;
use super::m20231021_000005_create_orders_table::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComponentOrder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComponentOrder::ComponentOrderId)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComponentOrder::OrderId).uuid().not_null())
                    .col(ColumnDef::new(ComponentOrder::ComponentId).uuid().not_null())
                    .col(
                        ColumnDef::new(ComponentOrder::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_component_order_order_id")
                            .from(ComponentOrder::Table, ComponentOrder::OrderId)
                            .to(Orders::Table, Orders::OrderId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_component_order_component_id")
                            .from(ComponentOrder::Table, ComponentOrder::ComponentId)
                            .to(Components::Table, Components::ComponentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComponentOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComponentOrder {
    Table,
    ComponentOrderId,
    OrderId,
    ComponentId,
    Quantity,
}
