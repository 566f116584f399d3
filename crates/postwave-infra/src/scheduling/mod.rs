//! Deferred dispatch of scheduled posts.

mod cron;

pub use cron::CronPostScheduler;
