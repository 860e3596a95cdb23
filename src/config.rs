use std::time::Duration;

use crate::logging::LogLevel;

const DEFAULT_REVEAL_TICK_MS: u64 = 30;
const DEFAULT_REPLY_DELAY_MS: u64 = 600;
const DEFAULT_CLOSING_DELAY_MS: u64 = 1_000;
const DEFAULT_CONTACT_DELAY_MS: u64 = 1_500;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const REVEAL_TICK_MS_BOUNDS: (u64, u64) = (1, 1_000);
const REPLY_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const CLOSING_DELAY_MS_BOUNDS: (u64, u64) = (0, 30_000);
const CONTACT_DELAY_MS_BOUNDS: (u64, u64) = (0, 30_000);

/// Timing knobs for the interactive widgets, fixed at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub reveal_tick_ms: u64,
    pub reply_delay_ms: u64,
    pub closing_delay_ms: u64,
    pub contact_delay: Duration,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_tick_ms: DEFAULT_REVEAL_TICK_MS,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            closing_delay_ms: DEFAULT_CLOSING_DELAY_MS,
            contact_delay: Duration::from_millis(DEFAULT_CONTACT_DELAY_MS),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    /// Reads overrides baked in by `trunk build` through `option_env!`.
    pub fn from_build_env() -> Self {
        Self::from_raw(
            option_env!("FOLIO_REVEAL_TICK_MS"),
            option_env!("FOLIO_REPLY_DELAY_MS"),
            option_env!("FOLIO_CLOSING_DELAY_MS"),
            option_env!("FOLIO_CONTACT_DELAY_MS"),
            option_env!("FOLIO_LOG_LEVEL"),
        )
    }

    fn from_raw(
        reveal_tick_ms: Option<&str>,
        reply_delay_ms: Option<&str>,
        closing_delay_ms: Option<&str>,
        contact_delay_ms: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let contact_delay_ms = parse_u64_with_bounds(
            contact_delay_ms,
            DEFAULT_CONTACT_DELAY_MS,
            CONTACT_DELAY_MS_BOUNDS,
        );

        Self {
            reveal_tick_ms: parse_u64_with_bounds(
                reveal_tick_ms,
                DEFAULT_REVEAL_TICK_MS,
                REVEAL_TICK_MS_BOUNDS,
            ),
            reply_delay_ms: parse_u64_with_bounds(
                reply_delay_ms,
                DEFAULT_REPLY_DELAY_MS,
                REPLY_DELAY_MS_BOUNDS,
            ),
            closing_delay_ms: parse_u64_with_bounds(
                closing_delay_ms,
                DEFAULT_CLOSING_DELAY_MS,
                CLOSING_DELAY_MS_BOUNDS,
            ),
            contact_delay: Duration::from_millis(contact_delay_ms),
            log_level: parse_log_level(log_level, DEFAULT_LOG_LEVEL),
        }
    }
}

pub fn parse_u64_with_bounds(raw: Option<&str>, default: u64, bounds: (u64, u64)) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_log_level(raw: Option<&str>, default: LogLevel) -> LogLevel {
    match raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = SiteConfig::from_raw(None, None, None, None, None);
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.reveal_tick_ms, 30);
    }

    #[test]
    fn out_of_bounds_values_are_ignored() {
        assert_eq!(parse_u64_with_bounds(Some("0"), 30, REVEAL_TICK_MS_BOUNDS), 30);
        assert_eq!(parse_u64_with_bounds(Some("5000"), 30, REVEAL_TICK_MS_BOUNDS), 30);
        assert_eq!(parse_u64_with_bounds(Some(" 45 "), 30, REVEAL_TICK_MS_BOUNDS), 45);
        assert_eq!(parse_u64_with_bounds(Some("fast"), 30, REVEAL_TICK_MS_BOUNDS), 30);
    }

    #[test]
    fn overrides_are_applied_per_field() {
        let config = SiteConfig::from_raw(Some("10"), Some("0"), None, Some("250"), Some("DEBUG"));

        assert_eq!(config.reveal_tick_ms, 10);
        assert_eq!(config.reply_delay_ms, 0);
        assert_eq!(config.closing_delay_ms, DEFAULT_CLOSING_DELAY_MS);
        assert_eq!(config.contact_delay, Duration::from_millis(250));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn unknown_log_level_keeps_default() {
        assert_eq!(parse_log_level(Some("trace"), LogLevel::Info), LogLevel::Info);
        assert_eq!(parse_log_level(Some(""), LogLevel::Debug), LogLevel::Debug);
    }
}
