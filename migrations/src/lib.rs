pub use sea_orm_migration::prelude::*;

mod m20231020_000001_create_customers_table;
mod m20231020_000002_create_shipments_table;
mod m20231020_000003_create_laptops_table;
mod m20231021_000004_create_components_table;
mod m20231021_000005_create_orders_table;
mod m20231022_000006_create_laptops_components_table;
mod m20231022_000007_create_laptop_order_table;
mod m20231022_000008_create_component_order_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20231020_000001_create_customers_table::Migration),
            Box::new(m20231020_000002_create_shipments_table::Migration),
            Box::new(m20231020_000003_create_laptops_table::Migration),
            Box::new(m20231021_000004_create_components_table::Migration),
            Box::new(m20231021_000005_create_orders_table::Migration),
            Box::new(m20231022_000006_create_laptops_components_table::Migration),
            Box::new(m20231022_000007_create_laptop_order_table::Migration),
            Box::new(m20231022_000008_create_component_order_table::Migration),
        ]
    }
}
