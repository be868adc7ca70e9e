use super::common::{
    created_response, message_response, nothing_to_update_response, success_response, ApiPath,
    ValidatedJson,
};
use crate::common::{non_null, nullable};
use crate::db::request_scope;
use crate::entities::customer;
use crate::errors::ServiceError;
use crate::services::crud::{self, Patch};
use crate::services::relations::CustomerRelation;
use crate::AppState;
use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub last_name: String,
    #[validate(email, length(max = 50))]
    pub email: Option<String>,
}

impl IntoActiveModel<customer::ActiveModel> for CreateCustomerRequest {
    fn into_active_model(self) -> customer::ActiveModel {
        customer::ActiveModel {
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            ..Default::default()
        }
    }
}

/// Partial customer update. `email: null` clears the address.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(email, length(max = 50))]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
}

impl Patch<customer::ActiveModel> for UpdateCustomerRequest {
    fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    fn apply(self, model: &mut customer::ActiveModel) {
        if let Some(first_name) = self.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = self.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = self.email {
            model.email = Set(email);
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = crate::ApiResponse<customer::Model>),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> Result<Response, ServiceError> {
    let customer = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::insert_into::<customer::ActiveModel, _, _>(txn, payload).await })
    })
    .await?;

    info!(customer_id = %customer.customer_id, "Customer created");
    Ok(created_response("Customer created successfully", customer))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "customers",
    responses(
        (status = 200, description = "Customers retrieved", body = crate::ApiResponse<Vec<customer::Model>>),
    )
)]
pub async fn list_customers(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let customers = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all::<customer::Entity, _>(txn).await })
    })
    .await?;

    Ok(success_response("Customers retrieved", customers))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer retrieved", body = crate::ApiResponse<customer::Model>),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    let customer = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific::<customer::Entity, _>(txn, id).await })
    })
    .await?;

    Ok(success_response("Customer retrieved", customer))
}

async fn list_customers_with(
    state: AppState,
    relation: CustomerRelation,
) -> Result<Response, ServiceError> {
    let customers = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all_extended(txn, relation).await })
    })
    .await?;

    Ok(success_response("Customers retrieved", customers))
}

async fn get_customer_with(
    state: AppState,
    id: Uuid,
    relation: CustomerRelation,
) -> Result<Response, ServiceError> {
    let customer = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific_extended(txn, id, relation).await })
    })
    .await?;

    Ok(success_response("Customer retrieved", customer))
}

#[utoipa::path(
    patch,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated, or nothing to update", body = crate::ApiResponse<customer::Model>),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Response, ServiceError> {
    let is_empty = payload.is_empty();
    let customer = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::update_record::<customer::ActiveModel, _, _>(txn, id, payload).await
        })
    })
    .await?;

    if is_empty {
        return Ok(nothing_to_update_response());
    }

    info!(customer_id = %id, "Customer updated");
    Ok(success_response("Customer updated successfully", customer))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer and its orders deleted"),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    request_scope(&state.db, |txn| {
        Box::pin(async move { crud::delete_record::<customer::ActiveModel, _>(txn, id).await })
    })
    .await?;

    info!(customer_id = %id, "Customer deleted");
    Ok(message_response("Customer deleted successfully"))
}

pub fn customer_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).patch(update_customer).delete(delete_customer),
        );

    for relation in CustomerRelation::iter() {
        router = router
            .route(
                &format!("/{relation}"),
                get(move |State(state): State<AppState>| list_customers_with(state, relation)),
            )
            .route(
                &format!("/:id/{relation}"),
                get(
                    move |State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>| {
                        get_customer_with(state, id, relation)
                    },
                ),
            );
    }

    router
}
