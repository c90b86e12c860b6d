//! Application services and their wiring from configuration.

use std::sync::Arc;

use log::info;
use log::warn;

use crate::carbon::CarbonAdvisor;
use crate::config::Config;
use crate::messenger::Messenger;
use crate::messenger::line_messenger::LineMessenger;
use crate::repository::Repository;
use crate::repository::SubscriberStore;
use crate::service::daily_push_service::DailyPushService;
use crate::service::error::ServiceError;
use crate::weather::cwa_platform::CwaWeatherClient;

pub mod daily_push_service;
pub mod error;

/// Container for all application services.
pub struct Services {
    pub daily_push: Arc<DailyPushService>,
    pub carbon: Arc<CarbonAdvisor>,
}

impl Services {
    /// Builds every service. Missing credentials leave the matching
    /// collaborator unset instead of failing.
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let messenger: Option<Arc<dyn Messenger>> = match &config.line_channel_access_token {
            Some(token) => Some(Arc::new(LineMessenger::new(&config.line_api_url, token)?)),
            None => {
                warn!("LINE_CHANNEL_ACCESS_TOKEN not set. Daily push is disabled.");
                None
            }
        };

        let store: Option<Arc<dyn SubscriberStore>> = match &config.db_url {
            Some(db_url) => Some(Arc::new(Repository::new(db_url)?)),
            None => {
                warn!("DB_URL not set. Daily push is disabled.");
                None
            }
        };

        if config.cwa_api_key.is_none() {
            warn!("CWA_API_KEY not set. Pushes will omit the weather section.");
        }
        let weather = Arc::new(CwaWeatherClient::new(
            &config.cwa_api_url,
            config.cwa_api_key.clone(),
        )?);

        let daily_push = Arc::new(DailyPushService::new(
            messenger,
            store,
            weather,
            &config.fallback_city,
        ));

        if config.deepseek_api_key.is_none() {
            warn!("DEEPSEEK_API_KEY not set. Carbon advice will report the missing key.");
        }
        let carbon = Arc::new(CarbonAdvisor::new(
            &config.deepseek_api_url,
            config.deepseek_api_key.clone(),
        )?);

        info!("Services initialized.");
        Ok(Self { daily_push, carbon })
    }
}
