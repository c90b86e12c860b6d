//! fernbrom - daily plant-care push service for LINE subscribers.
//!
//! This crate provides:
//! - CWA weather forecasts and watering advice
//! - A cron-driven daily push with per-subscriber idempotency
//! - A DeepSeek-backed carbon-accounting advisor

pub mod carbon;
pub mod config;
pub mod error;
pub mod logging;
pub mod messenger;
pub mod model;
pub mod plant_fact;
pub mod repository;
pub mod server;
pub mod service;
pub mod task;
pub mod weather;
