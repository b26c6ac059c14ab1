// Clock service
// Wall-clock source for "today" and the current-time marker

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the current wall-clock time
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock, in the local zone or a configured IANA zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: Option<Tz>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { zone: None }
    }

    pub fn in_zone(zone: Tz) -> Self {
        Self { zone: Some(zone) }
    }

    /// Build from an optional zone name such as `Europe/Lisbon`
    pub fn from_zone_name(name: Option<&str>) -> Result<Self> {
        match name {
            None => Ok(Self::local()),
            Some(name) => {
                let zone: Tz = name
                    .parse()
                    .map_err(|e| anyhow!("Unknown time zone '{}': {}", name, e))?;
                Ok(Self::in_zone(zone))
            }
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.zone {
            Some(zone) => Utc::now().with_timezone(&zone).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
