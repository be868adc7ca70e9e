/*!
 * Request-scoped transactions
 *
 * Every handler runs its data access through [`request_scope`]: one
 * transaction per request, committed when the work succeeds and rolled back
 * when it fails, unless the error maps to a 2xx/3xx status.
 */

use crate::errors::ServiceError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Type alias for boxed future used in transactions
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Execute `f` inside a fresh transaction and settle it.
///
/// # Example
///
/// ```rust,ignore
/// let customer = request_scope(&state.db, |txn| {
///     Box::pin(async move { crud::insert_into(txn, payload).await })
/// })
/// .await?;
/// ```
pub async fn request_scope<F, T>(db: &DatabaseConnection, f: F) -> Result<T, ServiceError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<T, ServiceError>>,
{
    let txn = db.begin().await?;
    let result = f(&txn).await;

    match &result {
        Ok(_) => {
            txn.commit().await?;
            debug!("Transaction committed");
        }
        Err(err) if err.can_commit() => {
            txn.commit().await?;
            warn!(error = %err, "Transaction committed despite error");
        }
        Err(err) => {
            txn.rollback().await?;
            warn!(error = %err, "Transaction rolled back");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::customer;
    use sea_orm::{
        ConnectOptions, ConnectionTrait, Database, DbBackend, EntityTrait, PaginatorTrait,
        Schema, Set,
    };
    use uuid::Uuid;

    async fn setup() -> DatabaseConnection {
        // a single connection keeps the in-memory database alive and shared
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        let schema = Schema::new(DbBackend::Sqlite);
        let create = schema.create_table_from_entity(customer::Entity);
        db.execute(db.get_database_backend().build(&create))
            .await
            .unwrap();
        db
    }

    fn new_customer() -> customer::ActiveModel {
        customer::ActiveModel {
            customer_id: Set(Uuid::new_v4()),
            first_name: Set("Ada".into()),
            last_name: Set("Lovelace".into()),
            email: Set(None),
        }
    }

    #[tokio::test]
    async fn commits_on_success() {
        let db = setup().await;

        request_scope(&db, |txn| {
            Box::pin(async move {
                customer::Entity::insert(new_customer()).exec(txn).await?;
                Ok(())
            })
        })
        .await
        .unwrap();

        assert_eq!(customer::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rolls_back_on_error() {
        let db = setup().await;

        let result: Result<(), ServiceError> = request_scope(&db, |txn| {
            Box::pin(async move {
                customer::Entity::insert(new_customer()).exec(txn).await?;
                Err(ServiceError::BadRequest("nope".into()))
            })
        })
        .await;

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
        assert_eq!(customer::Entity::find().count(&db).await.unwrap(), 0);
    }
}
