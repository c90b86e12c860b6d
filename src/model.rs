use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

use crate::repository::schema::subscribers;
use crate::repository::schema::users;

/// A push recipient.
///
/// Rows are created outside this service. The push cycle only reads them
/// and moves `last_push_date` forward after a delivered message.
#[derive(Queryable, Selectable, Serialize, Default, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriberModel {
    /// LINE user id, used as the push target.
    pub user_id: String,
    pub is_active: bool,
    /// UTC date of the last delivered push.
    pub last_push_date: Option<NaiveDate>,
}

impl SubscriberModel {
    pub fn pushed_on(&self, date: NaiveDate) -> bool {
        self.last_push_date == Some(date)
    }
}

/// User preferences. Read-only from this service.
#[derive(Queryable, Selectable, Serialize, Default, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub user_id: String,
    pub city: Option<String>,
}

impl UserModel {
    /// The stored city, or `None` when it is null or blank.
    pub fn preferred_city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}
