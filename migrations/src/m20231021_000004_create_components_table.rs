use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Components::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Components::ComponentId)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Components::Type).string_len(20).not_null())
                    .col(ColumnDef::new(Components::Description).string_len(150).null())
                    .col(ColumnDef::new(Components::MakeYear).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Components::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Components {
    Table,
    ComponentId,
    Type,
    Description,
    MakeYear,
}
