use chrono::{DateTime, Local};

#[cfg(test)]
use mockall::automock;

/// Represents an entity responsible for providing dates across application. This allows trackers
/// to be tested against a fixed moment.
#[cfg_attr(test, automock)]
pub trait Clock {
    fn time(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}
