use super::common::{
    created_response, message_response, nothing_to_update_response, success_response, ApiPath,
    ValidatedJson,
};
use crate::common::non_null;
use crate::db::request_scope;
use crate::entities::shipment::{self, ShipmentStatus};
use crate::errors::ServiceError;
use crate::services::crud::{self, Patch};
use crate::services::relations::ShipmentRelation;
use crate::AppState;
use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, IntoActiveModel, Set};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShipmentRequest {
    pub shipment_date: NaiveDate,
    pub shipment_status: ShipmentStatus,
    #[validate(length(max = 100))]
    pub shipment_address: String,
}

impl IntoActiveModel<shipment::ActiveModel> for CreateShipmentRequest {
    fn into_active_model(self) -> shipment::ActiveModel {
        shipment::ActiveModel {
            shipment_date: Set(self.shipment_date),
            shipment_status: Set(self.shipment_status),
            shipment_address: Set(self.shipment_address),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShipmentRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub shipment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub shipment_status: Option<ShipmentStatus>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 100))]
    pub shipment_address: Option<String>,
}

impl Patch<shipment::ActiveModel> for UpdateShipmentRequest {
    fn is_empty(&self) -> bool {
        self.shipment_date.is_none()
            && self.shipment_status.is_none()
            && self.shipment_address.is_none()
    }

    fn apply(self, model: &mut shipment::ActiveModel) {
        if let Some(date) = self.shipment_date {
            model.shipment_date = Set(date);
        }
        if let Some(status) = self.shipment_status {
            model.shipment_status = Set(status);
        }
        if let Some(address) = self.shipment_address {
            model.shipment_address = Set(address);
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/shipments",
    tag = "shipments",
    request_body = CreateShipmentRequest,
    responses(
        (status = 201, description = "Shipment created", body = crate::ApiResponse<shipment::Model>),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateShipmentRequest>,
) -> Result<Response, ServiceError> {
    let shipment = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::insert_into::<shipment::ActiveModel, _, _>(txn, payload).await })
    })
    .await?;

    info!(shipment_id = %shipment.shipment_id, "Shipment created");
    Ok(created_response("Shipment created successfully", shipment))
}

#[utoipa::path(
    get,
    path = "/api/shipments",
    tag = "shipments",
    responses(
        (status = 200, description = "Shipments retrieved", body = crate::ApiResponse<Vec<shipment::Model>>),
    )
)]
pub async fn list_shipments(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let shipments = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all::<shipment::Entity, _>(txn).await })
    })
    .await?;

    Ok(success_response("Shipments retrieved", shipments))
}

#[utoipa::path(
    get,
    path = "/api/shipments/status/{status}",
    tag = "shipments",
    params(("status" = ShipmentStatus, Path, description = "Shipment status")),
    responses(
        (status = 200, description = "Shipments with that status", body = crate::ApiResponse<Vec<shipment::Model>>),
        (status = 422, description = "Unknown status", body = crate::errors::ErrorResponse),
    )
)]
pub async fn filter_shipments_by_status(
    State(state): State<AppState>,
    ApiPath(status): ApiPath<ShipmentStatus>,
) -> Result<Response, ServiceError> {
    let shipments = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::select_where::<shipment::Entity, _, _>(
                txn,
                shipment::Column::ShipmentStatus.eq(status),
            )
            .await
        })
    })
    .await?;

    Ok(success_response("Shipments filtered successfully", shipments))
}

#[utoipa::path(
    get,
    path = "/api/shipments/{id}",
    tag = "shipments",
    params(("id" = Uuid, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment retrieved", body = crate::ApiResponse<shipment::Model>),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    let shipment = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific::<shipment::Entity, _>(txn, id).await })
    })
    .await?;

    Ok(success_response("Shipment retrieved", shipment))
}

async fn list_shipments_with(
    state: AppState,
    relation: ShipmentRelation,
) -> Result<Response, ServiceError> {
    let shipments = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all_extended(txn, relation).await })
    })
    .await?;

    Ok(success_response("Shipments retrieved", shipments))
}

async fn get_shipment_with(
    state: AppState,
    id: Uuid,
    relation: ShipmentRelation,
) -> Result<Response, ServiceError> {
    let shipment = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific_extended(txn, id, relation).await })
    })
    .await?;

    Ok(success_response("Shipment retrieved", shipment))
}

#[utoipa::path(
    patch,
    path = "/api/shipments/{id}",
    tag = "shipments",
    params(("id" = Uuid, Path, description = "Shipment ID")),
    request_body = UpdateShipmentRequest,
    responses(
        (status = 200, description = "Shipment updated, or nothing to update", body = crate::ApiResponse<shipment::Model>),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_shipment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateShipmentRequest>,
) -> Result<Response, ServiceError> {
    let is_empty = payload.is_empty();
    let shipment = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::update_record::<shipment::ActiveModel, _, _>(txn, id, payload).await
        })
    })
    .await?;

    if is_empty {
        return Ok(nothing_to_update_response());
    }

    info!(shipment_id = %id, "Shipment updated");
    Ok(success_response("Shipment updated successfully", shipment))
}

#[utoipa::path(
    delete,
    path = "/api/shipments/{id}",
    tag = "shipments",
    params(("id" = Uuid, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment and its orders deleted"),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_shipment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    request_scope(&state.db, |txn| {
        Box::pin(async move { crud::delete_record::<shipment::ActiveModel, _>(txn, id).await })
    })
    .await?;

    info!(shipment_id = %id, "Shipment deleted");
    Ok(message_response("Shipment deleted successfully"))
}

pub fn shipment_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", post(create_shipment).get(list_shipments))
        .route("/status/:status", get(filter_shipments_by_status))
        .route(
            "/:id",
            get(get_shipment).patch(update_shipment).delete(delete_shipment),
        );

    for relation in ShipmentRelation::iter() {
        router = router
            .route(
                &format!("/{relation}"),
                get(move |State(state): State<AppState>| list_shipments_with(state, relation)),
            )
            .route(
                &format!("/:id/{relation}"),
                get(
                    move |State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>| {
                        get_shipment_with(state, id, relation)
                    },
                ),
            );
    }

    router
}
