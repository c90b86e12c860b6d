//! Background tasks.

pub mod daily_push_scheduler;
