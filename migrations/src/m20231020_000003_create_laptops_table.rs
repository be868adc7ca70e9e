use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Laptops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Laptops::LaptopId)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Laptops::Manufacturer)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Laptops::Model).string_len(20).not_null())
                    .col(ColumnDef::new(Laptops::MakeYear).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Laptops::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Laptops {
    Table,
    LaptopId,
    Manufacturer,
    Model,
    MakeYear,
}
