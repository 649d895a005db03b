//! Clock sources for key generation.

use chrono::NaiveDateTime;

/// Supplies the instant a key is generated at.
pub trait Clock: Send + Sync {
    /// Returns the current instant as a wall-clock reading.
    fn now(&self) -> NaiveDateTime;
}

/// The system wall clock, read in local time or UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SystemClock {
    /// Local time of the running process.
    #[default]
    Local,
    Utc,
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self {
            SystemClock::Local => chrono::Local::now().naive_local(),
            SystemClock::Utc => chrono::Utc::now().naive_utc(),
        }
    }
}

impl std::str::FromStr for SystemClock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(SystemClock::Local),
            "utc" => Ok(SystemClock::Utc),
            other => Err(format!("unknown clock '{other}', expected 'local' or 'utc'")),
        }
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_milli_opt(22, 33, 44, 422)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_from_str() {
        assert_eq!("local".parse::<SystemClock>().unwrap(), SystemClock::Local);
        assert_eq!("UTC".parse::<SystemClock>().unwrap(), SystemClock::Utc);
        assert!("mars".parse::<SystemClock>().is_err());
    }
}
