//! Common test utilities and mock implementations.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use fernbrom::model::SubscriberModel;
use fernbrom::repository::SubscriberStore;
use fernbrom::repository::error::RepositoryError;
use serde_json::Value;
use serde_json::json;

// IN-MEMORY STORE

#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MemoryStore {
    pub state: Arc<RwLock<MemoryStoreState>>,
}

#[derive(Default, Clone)]
#[allow(dead_code)]
pub struct MemoryStoreState {
    pub subscribers: Vec<SubscriberModel>,
    pub cities: HashMap<String, String>,
    pub updates: Vec<(String, NaiveDate)>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subscriber(&self, user_id: &str, last_push_date: Option<NaiveDate>) {
        self.state.write().unwrap().subscribers.push(SubscriberModel {
            user_id: user_id.to_string(),
            is_active: true,
            last_push_date,
        });
    }

    pub fn set_city(&self, user_id: &str, city: &str) {
        self.state
            .write()
            .unwrap()
            .cities
            .insert(user_id.to_string(), city.to_string());
    }

    pub fn last_push_date(&self, user_id: &str) -> Option<NaiveDate> {
        self.state
            .read()
            .unwrap()
            .subscribers
            .iter()
            .find(|s| s.user_id == user_id)
            .and_then(|s| s.last_push_date)
    }

    pub fn updates(&self) -> Vec<(String, NaiveDate)> {
        self.state.read().unwrap().updates.clone()
    }
}

#[async_trait]
impl SubscriberStore for MemoryStore {
    async fn get_active_subscribers(&self) -> Result<Vec<SubscriberModel>, RepositoryError> {
        let state = self.state.read().unwrap();
        Ok(state
            .subscribers
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect())
    }

    async fn get_user_city(&self, user_id: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.state.read().unwrap().cities.get(user_id).cloned())
    }

    async fn update_last_push(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        if let Some(sub) = state.subscribers.iter_mut().find(|s| s.user_id == user_id) {
            sub.last_push_date = Some(date);
        }
        state.updates.push((user_id.to_string(), date));
        Ok(())
    }
}

// CWA PAYLOADS

#[allow(dead_code)]
pub const FORECAST_PATH: &str = "/api/v1/rest/datastore/F-C0032-001";

#[allow(dead_code)]
pub fn forecast_body(location: &str, wx: &str, pop: &str, min_t: &str, max_t: &str) -> Value {
    let element = |name: &str, value: &str| {
        json!({
            "elementName": name,
            "time": [ { "parameter": { "parameterName": value } } ]
        })
    };
    json!({
        "success": "true",
        "records": {
            "location": [
                {
                    "locationName": location,
                    "weatherElement": [
                        element("Wx", wx),
                        element("PoP", pop),
                        element("MinT", min_t),
                        element("CI", "舒適"),
                        element("MaxT", max_t),
                    ]
                }
            ]
        }
    })
}
