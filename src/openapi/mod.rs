use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{components, customers, health, laptops, orders, shipments};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Modulaptop Store API",
        description = r#"
# Modulaptop Store API

CRUD API for a laptop store: customers, laptops, components, orders and shipments.

## Responses

Successful responses use one envelope:

```json
{ "status": 200, "message": "Customer retrieved", "data": { } }
```

`data` is omitted on deletes. An update without any recognised field answers HTTP 200
with `{"status": 400, "message": "No data to update, please check your data."}`.

## Relations

Every resource exposes its relations as extra routes, both for the whole collection
(`GET /api/orders/customer`) and for one record (`GET /api/orders/{id}/customer`).
The loaded relation appears as one extra key named after the relation.

## Errors

Validation failures answer 422 with a `detail` list of field errors
(`loc`, `msg`, `type`, optional `ctx`).
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:9030", description = "Local development")
    ),
    tags(
        (name = "customers", description = "Customer endpoints"),
        (name = "shipments", description = "Shipment endpoints"),
        (name = "orders", description = "Order endpoints"),
        (name = "laptops", description = "Laptop endpoints"),
        (name = "components", description = "Component endpoints"),
        (name = "healthcheck", description = "Database healthcheck")
    ),
    paths(
        // Customers
        customers::create_customer,
        customers::list_customers,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,

        // Shipments
        shipments::create_shipment,
        shipments::list_shipments,
        shipments::filter_shipments_by_status,
        shipments::get_shipment,
        shipments::update_shipment,
        shipments::delete_shipment,

        // Orders
        orders::create_order,
        orders::add_laptop_to_order,
        orders::add_component_to_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::delete_order,

        // Laptops
        laptops::create_laptop,
        laptops::list_laptops,
        laptops::get_laptop,
        laptops::attach_component,
        laptops::update_laptop,
        laptops::delete_laptop,

        // Components
        components::create_component,
        components::list_components,
        components::get_component,
        components::update_component,
        components::delete_component,

        // Health
        health::healthcheck,
    ),
    components(
        schemas(
            crate::errors::ErrorResponse,
            crate::errors::FieldError,
            crate::entities::OrderStatus,
            crate::entities::ShipmentStatus,
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_resource() {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("Modulaptop Store API"));
        for path in [
            "/api/customers",
            "/api/shipments/status/{status}",
            "/api/orders/laptop",
            "/api/laptops/{id}/components/{component_id}",
            "/api/components/{id}",
            "/api/healthcheck",
        ] {
            assert!(json.contains(path), "missing {path}");
        }
    }
}
