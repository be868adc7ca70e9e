//! Generic data-access helpers shared by every resource.
//!
//! All helpers take the request transaction (or any other connection) and are
//! parametrised by the sea-orm entity or active model they operate on.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityName, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter,
};
use sea_orm::sea_query::IntoCondition;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Model type behind an active model.
pub type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

/// A partial update: only the fields the client sent.
pub trait Patch<A: ActiveModelTrait> {
    /// `true` when no recognised field was sent.
    fn is_empty(&self) -> bool;

    /// Writes the present fields into `model`, leaving the rest untouched.
    fn apply(self, model: &mut A);
}

/// One loadable relation of an entity.
///
/// Implemented by closed per-entity enums; each variant maps to one batched
/// eager-load query.
#[async_trait]
pub trait EagerLoad: Copy + Send + Sync + 'static {
    type Entity: EntityTrait;
    type Related: Serialize + Send;

    /// Loads the relation for every row, keeping the order of `rows`.
    async fn load<C>(
        self,
        db: &C,
        rows: &[<Self::Entity as EntityTrait>::Model],
    ) -> Result<Vec<Self::Related>, DbErr>
    where
        C: ConnectionTrait;
}

/// A row plus one eagerly loaded relation, serialised flat:
/// `{"order_id": ..., "customer": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct WithRelated<M, R> {
    #[serde(flatten)]
    pub record: M,
    #[serde(flatten)]
    pub related: R,
}

fn table_of<E: EntityTrait>() -> String {
    E::default().table_name().to_string()
}

/// Every row of `E`. An empty table is not an error.
pub async fn select_all<E, C>(db: &C) -> Result<Vec<E::Model>, ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let rows = E::find().all(db).await?;
    debug!(table = %table_of::<E>(), count = rows.len(), "selected rows");
    Ok(rows)
}

/// Rows of `E` matching `condition`.
pub async fn select_where<E, C, F>(db: &C, condition: F) -> Result<Vec<E::Model>, ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    F: IntoCondition,
{
    let rows = E::find().filter(condition).all(db).await?;
    debug!(table = %table_of::<E>(), count = rows.len(), "selected filtered rows");
    Ok(rows)
}

/// Every row of the relation's entity with that relation loaded.
pub async fn select_all_extended<R, C>(
    db: &C,
    relation: R,
) -> Result<Vec<WithRelated<<R::Entity as EntityTrait>::Model, R::Related>>, ServiceError>
where
    R: EagerLoad,
    C: ConnectionTrait,
{
    let rows = select_all::<R::Entity, C>(db).await?;
    let related = relation.load(db, &rows).await?;

    Ok(rows
        .into_iter()
        .zip(related)
        .map(|(record, related)| WithRelated { record, related })
        .collect())
}

/// One row by primary key.
///
/// # Errors
/// `ServiceError::NotFound` when no row has that key.
pub async fn select_specific<E, C>(db: &C, id: Uuid) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(&table_of::<E>(), id))
}

/// One row by primary key with one relation loaded.
pub async fn select_specific_extended<R, C>(
    db: &C,
    id: Uuid,
    relation: R,
) -> Result<WithRelated<<R::Entity as EntityTrait>::Model, R::Related>, ServiceError>
where
    R: EagerLoad,
    <R::Entity as EntityTrait>::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    let record = select_specific::<R::Entity, C>(db, id).await?;
    let related = relation
        .load(db, std::slice::from_ref(&record))
        .await?
        .pop()
        .ok_or_else(|| {
            ServiceError::InternalError(format!(
                "relation loader returned nothing for {}",
                id
            ))
        })?;

    Ok(WithRelated { record, related })
}

/// Inserts a new row built from `data`.
///
/// Fields the payload leaves unset stay `NotSet`, so model defaults (the
/// generated primary key) apply. Returns the persisted row.
pub async fn insert_into<A, D, C>(db: &C, data: D) -> Result<ModelOf<A>, ServiceError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    ModelOf<A>: IntoActiveModel<A>,
    D: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let active: A = data.into_active_model();
    let model = active.insert(db).await?;
    debug!(table = %table_of::<A::Entity>(), "inserted row");
    Ok(model)
}

/// Applies a partial update to the row with primary key `id`.
///
/// An empty patch returns the current row without writing.
///
/// # Errors
/// `ServiceError::NotFound` when no row has that key.
pub async fn update_record<A, P, C>(db: &C, id: Uuid, patch: P) -> Result<ModelOf<A>, ServiceError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    ModelOf<A>: IntoActiveModel<A>,
    <A::Entity as EntityTrait>::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    P: Patch<A>,
    C: ConnectionTrait,
{
    let current = select_specific::<A::Entity, C>(db, id).await?;
    if patch.is_empty() {
        return Ok(current);
    }

    let mut active: A = current.into_active_model();
    patch.apply(&mut active);
    let updated = active.update(db).await?;
    debug!(table = %table_of::<A::Entity>(), %id, "updated row");
    Ok(updated)
}

/// Deletes the row with primary key `id`.
///
/// Dependent rows go with it through the entity's `before_delete` hook, in
/// the same transaction.
///
/// # Errors
/// `ServiceError::NotFound` when no row has that key.
pub async fn delete_record<A, C>(db: &C, id: Uuid) -> Result<(), ServiceError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    ModelOf<A>: IntoActiveModel<A>,
    <A::Entity as EntityTrait>::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    let current: A = select_specific::<A::Entity, C>(db, id)
        .await?
        .into_active_model();
    let result = current.delete(db).await?;
    debug!(
        table = %table_of::<A::Entity>(),
        %id,
        rows = result.rows_affected,
        "deleted row"
    );
    Ok(())
}
