//! Library configuration that callers can serialize/deserialize.
//!
//! Only the collections read these knobs today; sequences themselves are
//! configuration-free.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on up-front reservation; collections still grow past it.
pub const MAX_COLLECTION_CAPACITY: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Initial slots reserved by priority queues, linked-list arenas and queues.
    pub collection_capacity: usize,

    /// Release arena memory back to the allocator when a list is cleared.
    pub shrink_on_clear: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            collection_capacity: 16,
            shrink_on_clear: false,
        }
    }
}

impl QueryConfig {
    /// Defaults overlaid with `LAZYQ_*` environment variables.
    ///
    /// Unparseable values, and capacities above [`MAX_COLLECTION_CAPACITY`],
    /// are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYQ_COLLECTION_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                if v <= MAX_COLLECTION_CAPACITY {
                    cfg.collection_capacity = v;
                }
            }
        }

        if let Ok(s) = std::env::var("LAZYQ_SHRINK_ON_CLEAR") {
            if let Some(v) = parse_flag(&s) {
                cfg.shrink_on_clear = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Slots to reserve up front, never more than [`MAX_COLLECTION_CAPACITY`]
    /// even for a config that skipped [`validate`](Self::validate).
    pub fn initial_capacity(&self) -> usize {
        self.collection_capacity.min(MAX_COLLECTION_CAPACITY)
    }

    pub fn validate(&self) -> Result<()> {
        if self.collection_capacity > MAX_COLLECTION_CAPACITY {
            return Err(Error::Config(format!(
                "collection_capacity {} exceeds the preallocation limit {}",
                self.collection_capacity, MAX_COLLECTION_CAPACITY
            )));
        }
        Ok(())
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_json_defaults_missing_fields() {
        let cfg = QueryConfig::from_json(r#"{"shrink_on_clear": true}"#).unwrap();
        assert_eq!(cfg.collection_capacity, 16);
        assert!(cfg.shrink_on_clear);
    }

    #[test]
    fn test_initial_capacity_is_clamped() {
        let cfg = QueryConfig {
            collection_capacity: usize::MAX,
            ..QueryConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert_eq!(cfg.initial_capacity(), MAX_COLLECTION_CAPACITY);
        assert_eq!(QueryConfig::default().initial_capacity(), 16);
    }

    #[test]
    fn test_validate_rejects_huge_capacity() {
        let json = format!(r#"{{"collection_capacity": {}}}"#, MAX_COLLECTION_CAPACITY + 1);
        assert!(matches!(QueryConfig::from_json(&json), Err(Error::Config(_))));
    }
}
