use sea_orm_migration::prelude::*;

use super::m20231020_000003_create_laptops_table::Laptops;
use super::m20231021_000005_create_orders_table::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LaptopOrder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LaptopOrder::LaptopOrderId)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LaptopOrder::OrderId).uuid().not_null())
                    .col(ColumnDef::new(LaptopOrder::LaptopId).uuid().not_null())
                    .col(
                        ColumnDef::new(LaptopOrder::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laptop_order_order_id")
                            .from(LaptopOrder::Table, LaptopOrder::OrderId)
                            .to(Orders::Table, Orders::OrderId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laptop_order_laptop_id")
                            .from(LaptopOrder::Table, LaptopOrder::LaptopId)
                            .to(Laptops::Table, Laptops::LaptopId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LaptopOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LaptopOrder {
    Table,
    LaptopOrderId,
    OrderId,
    LaptopId,
    Quantity,
}
