use sea_orm_migration::prelude::*;

use super::m20231020_000003_create_laptops_table::Laptops;
use super::m20231021_000004_create_components_table::Components;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LaptopsComponents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LaptopsComponents::LaptopId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LaptopsComponents::ComponentId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_laptops_components")
                            .col(LaptopsComponents::LaptopId)
                            .col(LaptopsComponents::ComponentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laptops_components_laptop_id")
                            .from(LaptopsComponents::Table, LaptopsComponents::LaptopId)
                            .to(Laptops::Table, Laptops::LaptopId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_laptops_components_component_id")
                            .from(LaptopsComponents::Table, LaptopsComponents::ComponentId)
                            .to(Components::Table, Components::ComponentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LaptopsComponents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LaptopsComponents {
    Table,
    LaptopId,
    ComponentId,
}
