use super::common::{
    created_response, message_response, nothing_to_update_response, success_response, ApiPath,
    ValidatedJson,
};
use crate::common::{non_null, nullable};
use crate::db::request_scope;
use crate::entities::{
    component, component_order, customer, laptop, laptop_order,
    order::{self, OrderStatus},
    shipment,
};
use crate::errors::ServiceError;
use crate::services::crud::{self, Patch};
use crate::services::relations::OrderRelation;
use crate::AppState;
use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub order_date: NaiveDate,
    pub order_status: OrderStatus,
    pub customer_id: Uuid,
    #[serde(default)]
    pub shipment_id: Option<Uuid>,
}

impl IntoActiveModel<order::ActiveModel> for CreateOrderRequest {
    fn into_active_model(self) -> order::ActiveModel {
        order::ActiveModel {
            order_date: Set(self.order_date),
            order_status: Set(self.order_status),
            customer_id: Set(self.customer_id),
            shipment_id: Set(self.shipment_id),
            ..Default::default()
        }
    }
}

/// Partial order update. The owning customer cannot change; `shipment_id:
/// null` detaches the shipment.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub order_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub order_status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub shipment_id: Option<Option<Uuid>>,
}

impl Patch<order::ActiveModel> for UpdateOrderRequest {
    fn is_empty(&self) -> bool {
        self.order_date.is_none() && self.order_status.is_none() && self.shipment_id.is_none()
    }

    fn apply(self, model: &mut order::ActiveModel) {
        if let Some(date) = self.order_date {
            model.order_date = Set(date);
        }
        if let Some(status) = self.order_status {
            model.order_status = Set(status);
        }
        if let Some(shipment_id) = self.shipment_id {
            model.shipment_id = Set(shipment_id);
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddLaptopToOrderRequest {
    pub order_id: Uuid,
    pub laptop_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl IntoActiveModel<laptop_order::ActiveModel> for AddLaptopToOrderRequest {
    fn into_active_model(self) -> laptop_order::ActiveModel {
        laptop_order::ActiveModel {
            order_id: Set(self.order_id),
            laptop_id: Set(self.laptop_id),
            quantity: Set(self.quantity),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddComponentToOrderRequest {
    pub order_id: Uuid,
    pub component_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl IntoActiveModel<component_order::ActiveModel> for AddComponentToOrderRequest {
    fn into_active_model(self) -> component_order::ActiveModel {
        component_order::ActiveModel {
            order_id: Set(self.order_id),
            component_id: Set(self.component_id),
            quantity: Set(self.quantity),
            ..Default::default()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = crate::ApiResponse<order::Model>),
        (status = 404, description = "Customer or shipment not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> Result<Response, ServiceError> {
    let order = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::select_specific::<customer::Entity, _>(txn, payload.customer_id).await?;
            if let Some(shipment_id) = payload.shipment_id {
                crud::select_specific::<shipment::Entity, _>(txn, shipment_id).await?;
            }
            crud::insert_into::<order::ActiveModel, _, _>(txn, payload).await
        })
    })
    .await?;

    info!(
        order_id = %order.order_id,
        customer_id = %order.customer_id,
        "Order created"
    );
    Ok(created_response("Order created successfully", order))
}

#[utoipa::path(
    post,
    path = "/api/orders/laptop",
    tag = "orders",
    request_body = AddLaptopToOrderRequest,
    responses(
        (status = 201, description = "Laptop added to order", body = crate::ApiResponse<laptop_order::Model>),
        (status = 404, description = "Order or laptop not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn add_laptop_to_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddLaptopToOrderRequest>,
) -> Result<Response, ServiceError> {
    let line = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::select_specific::<order::Entity, _>(txn, payload.order_id).await?;
            crud::select_specific::<laptop::Entity, _>(txn, payload.laptop_id).await?;
            crud::insert_into::<laptop_order::ActiveModel, _, _>(txn, payload).await
        })
    })
    .await?;

    info!(
        order_id = %line.order_id,
        laptop_id = %line.laptop_id,
        quantity = line.quantity,
        "Laptop added to order"
    );
    Ok(created_response("Laptop order created successfully", line))
}

#[utoipa::path(
    post,
    path = "/api/orders/component",
    tag = "orders",
    request_body = AddComponentToOrderRequest,
    responses(
        (status = 201, description = "Component added to order", body = crate::ApiResponse<component_order::Model>),
        (status = 404, description = "Order or component not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn add_component_to_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddComponentToOrderRequest>,
) -> Result<Response, ServiceError> {
    let line = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::select_specific::<order::Entity, _>(txn, payload.order_id).await?;
            crud::select_specific::<component::Entity, _>(txn, payload.component_id).await?;
            crud::insert_into::<component_order::ActiveModel, _, _>(txn, payload).await
        })
    })
    .await?;

    info!(
        order_id = %line.order_id,
        component_id = %line.component_id,
        quantity = line.quantity,
        "Component added to order"
    );
    Ok(created_response("Component order created successfully", line))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    responses(
        (status = 200, description = "Orders retrieved", body = crate::ApiResponse<Vec<order::Model>>),
    )
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let orders = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all::<order::Entity, _>(txn).await })
    })
    .await?;

    Ok(success_response("Orders retrieved", orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order retrieved", body = crate::ApiResponse<order::Model>),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    let order = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific::<order::Entity, _>(txn, id).await })
    })
    .await?;

    Ok(success_response("Order retrieved", order))
}

async fn list_orders_with(state: AppState, relation: OrderRelation) -> Result<Response, ServiceError> {
    let orders = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all_extended(txn, relation).await })
    })
    .await?;

    Ok(success_response("Orders retrieved", orders))
}

async fn get_order_with(
    state: AppState,
    id: Uuid,
    relation: OrderRelation,
) -> Result<Response, ServiceError> {
    let order = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific_extended(txn, id, relation).await })
    })
    .await?;

    Ok(success_response("Order retrieved", order))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated, or nothing to update", body = crate::ApiResponse<order::Model>),
        (status = 404, description = "Order or shipment not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> Result<Response, ServiceError> {
    let is_empty = payload.is_empty();
    let order = request_scope(&state.db, |txn| {
        Box::pin(async move {
            if let Some(Some(shipment_id)) = payload.shipment_id {
                crud::select_specific::<order::Entity, _>(txn, id).await?;
                crud::select_specific::<shipment::Entity, _>(txn, shipment_id).await?;
            }
            crud::update_record::<order::ActiveModel, _, _>(txn, id, payload).await
        })
    })
    .await?;

    if is_empty {
        return Ok(nothing_to_update_response());
    }

    info!(order_id = %id, "Order updated");
    Ok(success_response("Order updated successfully", order))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order and its lines deleted"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    request_scope(&state.db, |txn| {
        Box::pin(async move { crud::delete_record::<order::ActiveModel, _>(txn, id).await })
    })
    .await?;

    info!(order_id = %id, "Order deleted");
    Ok(message_response("Order deleted successfully"))
}

pub fn order_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/laptop", post(add_laptop_to_order))
        .route("/component", post(add_component_to_order))
        .route(
            "/:id",
            get(get_order).patch(update_order).delete(delete_order),
        );

    for relation in OrderRelation::iter() {
        router = router
            .route(
                &format!("/{relation}"),
                get(move |State(state): State<AppState>| list_orders_with(state, relation)),
            )
            .route(
                &format!("/:id/{relation}"),
                get(
                    move |State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>| {
                        get_order_with(state, id, relation)
                    },
                ),
            );
    }

    router
}
