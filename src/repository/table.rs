//! Table handlers for the subscriber backend.

use chrono::NaiveDate;
use diesel::ExpressionMethods;
use diesel::OptionalExtension;
use diesel::QueryDsl;
use diesel::SelectableHelper;
use diesel_async::AsyncPgConnection;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::pooled_connection::deadpool::Pool;

use crate::model::SubscriberModel;
use crate::model::UserModel;
use crate::repository::error::RepositoryError;
use crate::repository::schema::subscribers;
use crate::repository::schema::users;

pub type DbPool = Pool<AsyncPgConnection>;

/// Base table struct providing database pool access.
#[derive(Clone)]
pub struct BaseTable {
    pub pool: DbPool,
}

impl BaseTable {
    /// Creates a new base table with the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, RepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|e| RepositoryError::ConnectionError {
                message: e.to_string(),
            })
    }
}

/// `subscribers` table.
pub struct SubscriberTable {
    base: BaseTable,
}

impl SubscriberTable {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    pub async fn select_all_active(&self) -> Result<Vec<SubscriberModel>, RepositoryError> {
        let mut conn = self.base.conn().await?;
        let rows = subscribers::table
            .filter(subscribers::is_active.eq(true))
            .select(SubscriberModel::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    /// Returns the number of rows touched.
    pub async fn update_last_push_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<usize, RepositoryError> {
        let mut conn = self.base.conn().await?;
        let affected = diesel::update(subscribers::table.filter(subscribers::user_id.eq(user_id)))
            .set(subscribers::last_push_date.eq(Some(date)))
            .execute(&mut conn)
            .await?;
        Ok(affected)
    }
}

/// `users` table.
pub struct UserTable {
    base: BaseTable,
}

impl UserTable {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    pub async fn select_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.base.conn().await?;
        let user = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserModel::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }
}
