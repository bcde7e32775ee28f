//! Server settings and their validation.

use std::time::Duration;

use crate::{Error, timezone::get_local_offset, transaction::UserId};

/// The backend used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost/budget-tracker_backend/Backend/api";

/// The settings the server runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The port to serve the web app from.
    pub port: u16,
    /// The base URL of the transactions backend.
    pub api_base_url: String,
    /// How often the server fetches the transactions from the backend.
    pub poll_interval: Duration,
    /// How often the browser re-requests each view.
    pub refresh_interval: Duration,
    /// How long a backend request may take before it fails.
    pub request_timeout: Duration,
    /// The user new transactions are recorded for.
    pub user_id: UserId,
    /// The canonical timezone name used for today's date, e.g. "Asia/Manila".
    pub timezone: String,
    /// Serve transactions from memory instead of the backend.
    pub in_memory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            poll_interval: Duration::from_millis(2000),
            refresh_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(10),
            user_id: 1,
            timezone: "Etc/UTC".to_owned(),
            in_memory: false,
        }
    }
}

impl Config {
    /// Check that every setting is usable.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] for an unknown timezone and
    /// [Error::InvalidConfig] for any other invalid setting.
    pub fn validate(&self) -> Result<(), Error> {
        if get_local_offset(&self.timezone).is_none() {
            return Err(Error::InvalidTimezoneError(self.timezone.clone()));
        }

        if !self.in_memory
            && !(self.api_base_url.starts_with("http://")
                || self.api_base_url.starts_with("https://"))
        {
            return Err(Error::InvalidConfig(format!(
                "the API base URL \"{}\" must start with http:// or https://",
                self.api_base_url
            )));
        }

        for (name, interval) in [
            ("poll interval", self.poll_interval),
            ("refresh interval", self.refresh_interval),
            ("request timeout", self.request_timeout),
        ] {
            if interval.is_zero() {
                return Err(Error::InvalidConfig(format!("the {name} must be positive")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::Error;

    use super::Config;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = Config {
            timezone: "Mars/Olympus_Mons".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn rejects_zero_intervals() {
        let config = Config {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn base_url_is_ignored_in_memory() {
        let config = Config {
            api_base_url: "localhost".to_owned(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = Config {
            in_memory: true,
            ..config
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
