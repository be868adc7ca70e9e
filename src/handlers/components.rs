use super::common::{
    created_response, message_response, nothing_to_update_response, success_response, ApiPath,
    ValidatedJson,
};
use crate::common::{non_null, nullable};
use crate::db::request_scope;
use crate::entities::component;
use crate::errors::ServiceError;
use crate::services::crud::{self, Patch};
use crate::services::relations::ComponentRelation;
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
pub struct CreateComponentRequest {
    #[serde(rename = "type")]
    #[validate(length(max = 20))]
    pub component_type: String,
    #[validate(length(max = 150))]
    pub description: Option<String>,
    pub make_year: i32,
}

impl IntoActiveModel<component::ActiveModel> for CreateComponentRequest {
    fn into_active_model(self) -> component::ActiveModel {
        component::ActiveModel {
            component_type: Set(self.component_type),
            description: Set(self.description),
            make_year: Set(self.make_year),
            ..Default::default()
        }
    }
}

/// Partial component update. `description: null` clears the description.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateComponentRequest {
    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[validate(length(max = 20))]
    pub component_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 150))]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub make_year: Option<i32>,
}

impl Patch<component::ActiveModel> for UpdateComponentRequest {
    fn is_empty(&self) -> bool {
        self.component_type.is_none() && self.description.is_none() && self.make_year.is_none()
    }

    fn apply(self, model: &mut component::ActiveModel) {
        if let Some(component_type) = self.component_type {
            model.component_type = Set(component_type);
        }
        if let Some(description) = self.description {
            model.description = Set(description);
        }
        if let Some(make_year) = self.make_year {
            model.make_year = Set(make_year);
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/components",
    tag = "components",
    request_body = CreateComponentRequest,
    responses(
        (status = 201, description = "Component created", body = crate::ApiResponse<component::Model>),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_component(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateComponentRequest>,
) -> Result<Response, ServiceError> {
    let component = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::insert_into::<component::ActiveModel, _, _>(txn, payload).await
        })
    })
    .await?;

    info!(component_id = %component.component_id, "Component created");
    Ok(created_response("Component created successfully", component))
}

#[utoipa::path(
    get,
    path = "/api/components",
    tag = "components",
    responses(
        (status = 200, description = "Components retrieved", body = crate::ApiResponse<Vec<component::Model>>),
    )
)]
pub async fn list_components(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let components = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all::<component::Entity, _>(txn).await })
    })
    .await?;

    Ok(success_response("Components retrieved", components))
}

#[utoipa::path(
    get,
    path = "/api/components/{id}",
    tag = "components",
    params(("id" = Uuid, Path, description = "Component ID")),
    responses(
        (status = 200, description = "Component retrieved", body = crate::ApiResponse<component::Model>),
        (status = 404, description = "Component not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_component(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    let component = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific::<component::Entity, _>(txn, id).await })
    })
    .await?;

    Ok(success_response("Component retrieved", component))
}

async fn list_components_with(
    state: AppState,
    relation: ComponentRelation,
) -> Result<Response, ServiceError> {
    let components = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_all_extended(txn, relation).await })
    })
    .await?;

    Ok(success_response("Components retrieved", components))
}

async fn get_component_with(
    state: AppState,
    id: Uuid,
    relation: ComponentRelation,
) -> Result<Response, ServiceError> {
    let component = request_scope(&state.db, |txn| {
        Box::pin(async move { crud::select_specific_extended(txn, id, relation).await })
    })
    .await?;

    Ok(success_response("Component retrieved", component))
}

#[utoipa::path(
    patch,
    path = "/api/components/{id}",
    tag = "components",
    params(("id" = Uuid, Path, description = "Component ID")),
    request_body = UpdateComponentRequest,
    responses(
        (status = 200, description = "Component updated, or nothing to update", body = crate::ApiResponse<component::Model>),
        (status = 404, description = "Component not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_component(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateComponentRequest>,
) -> Result<Response, ServiceError> {
    let is_empty = payload.is_empty();
    let component = request_scope(&state.db, |txn| {
        Box::pin(async move {
            crud::update_record::<component::ActiveModel, _, _>(txn, id, payload).await
        })
    })
    .await?;

    if is_empty {
        return Ok(nothing_to_update_response());
    }

    info!(component_id = %id, "Component updated");
    Ok(success_response("Component updated successfully", component))
}

#[utoipa::path(
    delete,
    path = "/api/components/{id}",
    tag = "components",
    params(("id" = Uuid, Path, description = "Component ID")),
    responses(
        (status = 200, description = "Component deleted"),
        (status = 404, description = "Component not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_component(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ServiceError> {
    request_scope(&state.db, |txn| {
        Box::pin(async move { crud::delete_record::<component::ActiveModel, _>(txn, id).await })
    })
    .await?;

    info!(component_id = %id, "Component deleted");
    Ok(message_response("Component deleted successfully"))
}

pub fn component_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", post(create_component).get(list_components))
        .route(
            "/:id",
            get(get_component)
                .patch(update_component)
                .delete(delete_component),
        );

    for relation in ComponentRelation::iter() {
        router = router
            .route(
                &format!("/{relation}"),
                get(move |State(state): State<AppState>| list_components_with(state, relation)),
            )
            .route(
                &format!("/:id/{relation}"),
                get(
                    move |State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>| {
                        get_component_with(state, id, relation)
                    },
                ),
            );
    }

    router
}
