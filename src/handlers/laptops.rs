use super::common::{
    created_response, message_response, nothing_to_update_response, success_response, ApiPath,
    ValidatedJson,
};
use crate::common::non_null;
use crate::db::request_scope;
use crate::entities::{component, laptop, laptop_component};
use crate::errors::ServiceError;
use crate::services::crud::{self, Patch};
use crate::services::relations::LaptopRelation;
use crate::AppState;
use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use sea_orm::{EntityTrait, IntoActiveModel, Set};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLaptopRequest {
    #[validate(length(max = 20))]
    pub manufacturer: String,
    #[validate(length(max = 20))]
    pub model: String,
    pub make_year: i32,
}

impl IntoActiveModel<laptop::ActiveModel> for CreateLaptopRequest {
    fn into_active_model(self) -> laptop::ActiveModel {
        laptop::ActiveModel {
            manufacturer: Set(self.manufacturer),
            model: Set(self.model),
            make_year: Set(self.make_year),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLaptopRequest {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 20))]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(max = 20))]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub make_year: Option<i32>,
}

impl Patch<laptop::ActiveModel> for UpdateLaptopRequest {
    fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.model.is_none() && self.make_year.is_none()
    }

    fn apply(self, model: &mut laptop::ActiveModel) {
        if let Some(manufacturer) = self.manufacturer {
            model.manufacturer = Set(manufacturer);
        }
        if let Some(laptop_model) = self.model {
            model.model = Set(laptop_model);
        }
        if let Some(make_year) = self.make_year {
            model.make_year = Set(make_year);
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/laptops",
    tag = "laptops",
    request_body = CreateLaptopRequest,
    responses(
        (status = 201, description = "Laptop created", body = crate::ApiResponse<laptop::Model>),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_laptop(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLaptopRequest>,
) -> Result<Response, ServiceError> {
    let laptop = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::insert_into::<laptop::ActiveModel, _, _>(txn, payload).await })
    })
    .await?;

    info!(laptop_id = %laptop.laptop_id, "Laptop created");
    Ok(created_response("Laptop created successfully", laptop))
}

#[utoipa::path(
    get,
    path = "/api/laptops",
    tag = "laptops",
    responses(
        (status = 200, description = "Laptops retrieved", body = crate::ApiResponse<Vec<laptop::Model>>),
    )
)]
pub async fn list_laptops(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let laptops = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all::<laptop::Entity, _>(txn).await })
    })
    .await?;

    Ok(success_response("Laptops retrieved", laptops))
}

#[utoipa::path(
    get,
    path = "/api/laptops/{id}",
    tag = "laptops",
    params(("id" = Uuid, Path, description = "Laptop ID")),
    responses(
        (status = 200, description = "Laptop retrieved", body = crate::ApiResponse<laptop::Model>),
        (status = 404, description = "Laptop not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_laptop(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    let laptop = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific::<laptop::Entity, _>(txn, id).await })
    })
    .await?;

    Ok(success_response("Laptop retrieved", laptop))
}

async fn list_laptops_with(state: AppState, relation: LaptopRelation) -> Result<Response, ServiceError> {
    let laptops = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all_extended(txn, relation).await })
    })
    .await?;

    Ok(success_response("Laptops retrieved", laptops))
}

async fn get_laptop_with(
    state: AppState,
    id: Uuid,
    relation: LaptopRelation,
) -> Result<Response, ServiceError> {
    let laptop = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific_extended(txn, id, relation).await })
    })
    .await?;

    Ok(success_response("Laptop retrieved", laptop))
}

#[utoipa::path(
    post,
    path = "/api/laptops/{id}/components/{component_id}",
    tag = "laptops",
    params(
        ("id" = Uuid, Path, description = "Laptop ID"),
        ("component_id" = Uuid, Path, description = "Component ID"),
    ),
    responses(
        (status = 201, description = "Component attached; the laptop with its components"),
        (status = 404, description = "Laptop or component not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Component already attached", body = crate::errors::ErrorResponse),
    )
)]
pub async fn attach_component(
    State(state): State<AppState>,
    ApiPath((id, component_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Response, ServiceError> {
    let laptop = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::select_specific::<laptop::Entity, _>(txn, id).await?;
            crud::select_specific::<component::Entity, _>(txn, component_id).await?;

            let attached = laptop_component::Entity::find_by_id((id, component_id))
                .one(txn)
                .await?;
            if attached.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "component {component_id} is already attached to laptop {id}"
                )));
            }

            let link = laptop_component::ActiveModel {
                laptop_id: Set(id),
                component_id: Set(component_id),
            };
            crud::insert_into::<laptop_component::ActiveModel, _, _>(txn, link).await?;
            crud::select_specific_extended(txn, id, LaptopRelation::Components).await
        })
    })
    .await?;

    info!(laptop_id = %id, component_id = %component_id, "Component attached to laptop");
    Ok(created_response("Laptop's component created successfully", laptop))
}

#[utoipa::path(
    patch,
    path = "/api/laptops/{id}",
    tag = "laptops",
    params(("id" = Uuid, Path, description = "Laptop ID")),
    request_body = UpdateLaptopRequest,
    responses(
        (status = 200, description = "Laptop updated, or nothing to update", body = crate::ApiResponse<laptop::Model>),
        (status = 404, description = "Laptop not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_laptop(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateLaptopRequest>,
) -> Result<Response, ServiceError> {
    let is_empty = payload.is_empty();
    let laptop = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::update_record::<laptop::ActiveModel, _, _>(txn, id, payload).await })
    })
    .await?;

    if is_empty {
        return Ok(nothing_to_update_response());
    }

    info!(laptop_id = %id, "Laptop updated");
    Ok(success_response("Laptop updated successfully", laptop))
}

#[utoipa::path(
    delete,
    path = "/api/laptops/{id}",
    tag = "laptops",
    params(("id" = Uuid, Path, description = "Laptop ID")),
    responses(
        (status = 200, description = "Laptop deleted"),
        (status = 404, description = "Laptop not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_laptop(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    request_scope(&state.db, |txn| {
        Box::pin(async move { crud::delete_record::<laptop::ActiveModel, _>(txn, id).await })
    })
    .await?;

    info!(laptop_id = %id, "Laptop deleted");
    Ok(message_response("Laptop deleted successfully"))
}

pub fn laptop_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", post(create_laptop).get(list_laptops))
        .route(
            "/:id",
            get(get_laptop).patch(update_laptop).delete(delete_laptop),
        )
        .route("/:id/components/:component_id", post(attach_component));

    for relation in LaptopRelation::iter() {
        router = router
            .route(
                &format!("/{relation}"),
                get(move |State(state): State<AppState>| list_laptops_with(state, relation)),
            )
            .route(
                &format!("/:id/{relation}"),
                get(
                    move |State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>| {
                        get_laptop_with(state, id, relation)
                    },
                ),
            );
    }

    router
}
