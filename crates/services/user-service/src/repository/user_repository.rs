//! User repository port and its PostgreSQL implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::AppError;
use domain::{DomainError, DomainResult, UpdateUserInput, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `Ok(None)` for a missing user; callers must also accept
/// `Err(DomainError::NotFound)` from implementations that signal it that way.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: &User) -> DomainResult<()>;

    /// Find user by ID
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find user by email address
    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// List users; no ordering is promised to callers
    async fn list(&self, limit: i64, offset: i64) -> DomainResult<Vec<User>>;

    /// Merge present fields into the stored user and return the result
    async fn update(&self, id: &str, input: &UpdateUserInput) -> DomainResult<User>;

    /// Delete user by ID; deleting a missing user is not an error
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Concrete implementation of UserRepository backed by PostgreSQL
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> DomainResult<()> {
        // Unique violations (id or email) surface as Internal like any other DbErr.
        ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let result = UserEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(User::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> DomainResult<Vec<User>> {
        let limit = u64::try_from(limit)
            .map_err(|_| DomainError::invalid_input("limit must not be negative"))?;
        let offset = u64::try_from(offset)
            .map_err(|_| DomainError::invalid_input("offset must not be negative"))?;

        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: &str, input: &UpdateUserInput) -> DomainResult<User> {
        // Re-read current values so absent fields keep what is stored
        let mut current = UserEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(User::from)
            .ok_or(DomainError::NotFound)?;

        current.apply(input);

        let active = ActiveModel {
            id: Set(current.id.clone()),
            email: Set(current.email.clone()),
            name: Set(current.name.clone()),
            updated_at: Set(current.updated_at),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound,
            other => db_error(other),
        })?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        UserEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

/// Convert a SeaORM error into the domain taxonomy.
fn db_error(e: DbErr) -> DomainError {
    DomainError::from(AppError::from(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    fn stored(id: &str, email: &str, name: &str) -> user::Model {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        user::Model {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn mock() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    /// Debug rendering of the statements executed against the mock.
    fn logged(db: DatabaseConnection) -> (usize, String) {
        let log: Vec<Transaction> = db.into_transaction_log();
        (log.len(), format!("{:?}", log))
    }

    #[tokio::test]
    async fn test_create_inserts_all_columns() {
        let db = mock()
            .append_query_results([vec![stored("user-1", "a@x.com", "A")]])
            .into_connection();
        let store = UserStore::new(db.clone());

        let user = User::from(stored("user-1", "a@x.com", "A"));
        store.create(&user).await.unwrap();

        let (count, sql) = logged(db);
        assert_eq!(count, 1);
        assert!(sql.contains(r#"INSERT INTO \"users\""#));
        assert!(sql.contains(r#""a@x.com""#));
    }

    #[tokio::test]
    async fn test_get_by_id_absent_is_none() {
        let db = mock()
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = UserStore::new(db).get_by_id("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_email_filters_on_email() {
        let db = mock()
            .append_query_results([vec![stored("user-1", "a@x.com", "A")]])
            .into_connection();
        let store = UserStore::new(db.clone());

        let user = store.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");

        let (_, sql) = logged(db);
        assert!(sql.contains(r#"WHERE \"users\".\"email\" = $1"#));
    }

    #[tokio::test]
    async fn test_list_orders_by_creation_then_id() {
        let db = mock()
            .append_query_results([vec![
                stored("user-1", "a@x.com", "A"),
                stored("user-2", "b@x.com", "B"),
            ]])
            .into_connection();
        let store = UserStore::new(db.clone());

        let users = store.list(2, 4).await.unwrap();
        assert_eq!(users.len(), 2);

        let (count, sql) = logged(db);
        assert_eq!(count, 1);
        assert!(sql.contains(r#"ORDER BY \"users\".\"created_at\" ASC, \"users\".\"id\" ASC"#));
        assert!(sql.contains("LIMIT $1 OFFSET $2"));
    }

    #[tokio::test]
    async fn test_list_rejects_negative_bounds_without_querying() {
        let db = mock().into_connection();
        let store = UserStore::new(db.clone());

        let result = store.list(-1, 0).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));

        let result = store.list(10, -5).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));

        let (count, _) = logged(db);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_update_merges_present_fields_into_stored_row() {
        let db = mock()
            // Re-read of the current row
            .append_query_results([vec![stored("user-1", "a@x.com", "A")]])
            // UPDATE ... RETURNING
            .append_query_results([vec![stored("user-1", "a@x.com", "B")]])
            .into_connection();
        let store = UserStore::new(db.clone());

        let input = UpdateUserInput {
            name: Some("B".to_string()),
            ..Default::default()
        };
        let user = store.update("user-1", &input).await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "B");

        let (count, sql) = logged(db);
        assert_eq!(count, 2);
        assert!(sql.contains(r#"UPDATE \"users\" SET"#));
        // Stored email is written back alongside the new name
        assert!(sql.contains(r#"String(Some("a@x.com"))"#));
        assert!(sql.contains(r#"String(Some("B"))"#));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = mock()
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(db.clone());

        let result = store.update("missing", &UpdateUserInput::default()).await;
        assert_eq!(result.unwrap_err(), DomainError::NotFound);

        let (count, _) = logged(db);
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_update_row_vanishing_mid_update_is_not_found() {
        let db = mock()
            .append_query_results([vec![stored("user-1", "a@x.com", "A")]])
            // RETURNING yields nothing: the row was deleted concurrently
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let input = UpdateUserInput {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        let result = UserStore::new(db).update("user-1", &input).await;

        assert_eq!(result.unwrap_err(), DomainError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_an_error() {
        let db = mock()
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        assert!(UserStore::new(db).delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_database_errors_surface_as_internal() {
        let db = mock()
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let result = UserStore::new(db).get_by_id("user-1").await;
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}
