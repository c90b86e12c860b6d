//! Daily push composition and delivery.

use std::sync::Arc;
use std::sync::Mutex;

use chrono::NaiveDate;
use chrono::Utc;
use log::debug;
use log::error;
use log::info;
use log::warn;

use crate::messenger::Messenger;
use crate::plant_fact::PlantFactPicker;
use crate::repository::SubscriberStore;
use crate::weather::WeatherProvider;
use crate::weather::WeatherSnapshot;

/// Counters for one push cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushReport {
    pub delivered: usize,
    /// Already pushed today.
    pub skipped: usize,
    /// Delivery rejected or errored.
    pub failed: usize,
    /// Delivered, but the date could not be written back.
    pub record_failures: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PushOutcome {
    Completed(PushReport),
    /// Messenger or store is missing; nothing was attempted.
    NotConfigured,
    /// Another cycle holds the guard.
    AlreadyRunning,
    /// Listing subscribers failed; nothing was sent.
    StoreUnavailable { message: String },
}

enum Delivery {
    Delivered,
    DeliveredUnrecorded,
    Failed,
}

/// Builds the daily message. The weather line is left out when no forecast
/// is available.
pub fn compose_message(fact: &str, weather: Option<&WeatherSnapshot>) -> String {
    let weather_text = weather.map_or_else(String::new, |w| {
        format!(
            "\n今日天氣（{}）：{}，最高{}°C，最低{}°C，降雨機率{}%\n澆水建議：{}",
            w.city,
            w.status,
            w.max_temp,
            w.min_temp,
            w.rain_prob,
            w.watering_advice()
        )
    });
    format!("🌱 蕨積早安！\n\n今日植物小知識：{fact}{weather_text}")
}

/// Runs push cycles. Only one cycle runs at a time.
pub struct DailyPushService {
    messenger: Option<Arc<dyn Messenger>>,
    store: Option<Arc<dyn SubscriberStore>>,
    weather: Arc<dyn WeatherProvider>,
    facts: Mutex<PlantFactPicker>,
    fallback_city: String,
    running: tokio::sync::Mutex<()>,
}

impl DailyPushService {
    pub fn new(
        messenger: Option<Arc<dyn Messenger>>,
        store: Option<Arc<dyn SubscriberStore>>,
        weather: Arc<dyn WeatherProvider>,
        fallback_city: impl Into<String>,
    ) -> Self {
        Self {
            messenger,
            store,
            weather,
            facts: Mutex::new(PlantFactPicker::new()),
            fallback_city: fallback_city.into(),
            running: tokio::sync::Mutex::new(()),
        }
    }

    /// Replaces the fact picker, e.g. with a seeded one.
    pub fn with_fact_picker(mut self, picker: PlantFactPicker) -> Self {
        self.facts = Mutex::new(picker);
        self
    }

    /// Runs one cycle for today's UTC date.
    pub async fn run_daily_push(&self) -> PushOutcome {
        self.run_for_date(Utc::now().date_naive()).await
    }

    /// Runs one cycle treating `today` as the current date.
    pub async fn run_for_date(&self, today: NaiveDate) -> PushOutcome {
        let (Some(messenger), Some(store)) = (&self.messenger, &self.store) else {
            warn!("LINE or database not configured. Skipping daily push.");
            return PushOutcome::NotConfigured;
        };

        let Ok(_guard) = self.running.try_lock() else {
            warn!("Daily push already running. Ignoring trigger.");
            return PushOutcome::AlreadyRunning;
        };

        let subscribers = match store.get_active_subscribers().await {
            Ok(subscribers) => subscribers,
            Err(e) => {
                error!("Failed to fetch subscribers, skipping this cycle: {e}");
                return PushOutcome::StoreUnavailable {
                    message: e.to_string(),
                };
            }
        };
        info!(
            "Starting daily push for {today} with {} active subscribers.",
            subscribers.len()
        );

        let mut report = PushReport::default();
        for sub in subscribers {
            if sub.pushed_on(today) {
                debug!("Subscriber {} already pushed on {today}.", sub.user_id);
                report.skipped += 1;
                continue;
            }

            match self
                .push_subscriber(messenger.as_ref(), store.as_ref(), &sub.user_id, today)
                .await
            {
                Delivery::Delivered => report.delivered += 1,
                Delivery::DeliveredUnrecorded => {
                    report.delivered += 1;
                    report.record_failures += 1;
                }
                Delivery::Failed => report.failed += 1,
            }
        }

        info!(
            "Daily push finished: {} delivered, {} skipped, {} failed.",
            report.delivered, report.skipped, report.failed
        );
        PushOutcome::Completed(report)
    }

    async fn push_subscriber(
        &self,
        messenger: &dyn Messenger,
        store: &dyn SubscriberStore,
        user_id: &str,
        today: NaiveDate,
    ) -> Delivery {
        let city = self.resolve_city(store, user_id).await;
        let weather = match self.weather.get_weather(&city).await {
            Ok(weather) => Some(weather),
            Err(e) => {
                warn!("Weather unavailable for {user_id} ({city}): {e}");
                None
            }
        };

        let text = compose_message(self.next_fact(), weather.as_ref());

        if let Err(e) = messenger.push_text(user_id, &text).await {
            error!("Push failed for {user_id}: {e}");
            return Delivery::Failed;
        }
        info!("Push delivered to {user_id}.");

        if let Err(e) = store.update_last_push(user_id, today).await {
            error!("Delivered to {user_id} but failed to record push date: {e}");
            return Delivery::DeliveredUnrecorded;
        }
        Delivery::Delivered
    }

    /// Falls back to the default city when there is no preference or the
    /// lookup fails.
    async fn resolve_city(&self, store: &dyn SubscriberStore, user_id: &str) -> String {
        match store.get_user_city(user_id).await {
            Ok(Some(city)) => city,
            Ok(None) => self.fallback_city.clone(),
            Err(e) => {
                warn!(
                    "City lookup failed for {user_id}, using {}: {e}",
                    self.fallback_city
                );
                self.fallback_city.clone()
            }
        }
    }

    fn next_fact(&self) -> &'static str {
        self.facts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .next_fact()
    }
}
