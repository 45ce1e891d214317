use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_AUTO_CLICK_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub auto_click_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auto_click_interval: DEFAULT_AUTO_CLICK_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let auto_click_interval = lookup("AUTO_CLICK_INTERVAL_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTO_CLICK_INTERVAL);

        Self {
            port,
            auto_click_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn reads_port_and_interval() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("9001".into()),
            "AUTO_CLICK_INTERVAL_MS" => Some(" 250 ".into()),
            _ => None,
        });
        assert_eq!(config.port, 9001);
        assert_eq!(config.auto_click_interval, Duration::from_millis(250));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("not-a-port".into()),
            "AUTO_CLICK_INTERVAL_MS" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config, Config::default());
    }
}
