//! Subscriber backend on Postgres (Supabase) with diesel-async.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::deadpool::Pool;
use log::debug;
use log::info;
use log::warn;
#[cfg(test)]
use mockall::automock;

use crate::model::SubscriberModel;
use crate::repository::error::RepositoryError;
use crate::repository::table::SubscriberTable;
use crate::repository::table::UserTable;

pub mod error;
pub mod schema;
pub mod table;

/// What the push cycle needs from storage.
///
/// Every operation reports failure explicitly. Whether a failure skips the
/// cycle or degrades to a default is decided by the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// All subscribers with `is_active = true`.
    async fn get_active_subscribers(&self) -> Result<Vec<SubscriberModel>, RepositoryError>;

    /// The user's preferred city. `None` when there is no row or the city is
    /// null or blank.
    async fn get_user_city(&self, user_id: &str) -> Result<Option<String>, RepositoryError>;

    /// Records `date` as the subscriber's last delivered push.
    async fn update_last_push(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<(), RepositoryError>;
}

/// Main database struct containing all table handlers.
pub struct Repository {
    pub subscriber: SubscriberTable,
    pub user: UserTable,
}

impl Repository {
    /// Builds a connection pool for `db_url`.
    ///
    /// Connections are opened lazily, so an unreachable database surfaces on
    /// the first query rather than here.
    pub fn new(db_url: &str) -> Result<Self, RepositoryError> {
        debug!("Creating db connection pool...");
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
        let pool = Pool::builder(manager)
            .build()
            .map_err(|e| RepositoryError::ConnectionError {
                message: e.to_string(),
            })?;
        info!("Database pool ready.");

        Ok(Self {
            subscriber: SubscriberTable::new(pool.clone()),
            user: UserTable::new(pool),
        })
    }
}

#[async_trait]
impl SubscriberStore for Repository {
    async fn get_active_subscribers(&self) -> Result<Vec<SubscriberModel>, RepositoryError> {
        self.subscriber.select_all_active().await
    }

    async fn get_user_city(&self, user_id: &str) -> Result<Option<String>, RepositoryError> {
        let user = self.user.select_by_user_id(user_id).await?;
        Ok(user.and_then(|u| u.preferred_city().map(str::to_string)))
    }

    async fn update_last_push(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<(), RepositoryError> {
        let affected = self.subscriber.update_last_push_date(user_id, date).await?;
        if affected == 0 {
            warn!("No subscriber row updated for {user_id}.");
        }
        Ok(())
    }
}
