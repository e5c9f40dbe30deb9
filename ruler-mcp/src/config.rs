//! Server configuration, read from the environment at start-up

use std::env;
use ruler_units::ParsePolicy;

/// Default parse policy for `convert` calls: `lenient` or `strict`
pub const PARSE_MODE_VAR: &str = "RULER_PARSE_MODE";

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerConfig {
    pub parse_policy: ParsePolicy,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values are logged and replaced
    /// by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_policy = match lookup(PARSE_MODE_VAR) {
            None => ParsePolicy::default(),
            Some(raw) => ParsePolicy::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    var = PARSE_MODE_VAR,
                    value = %raw,
                    "invalid parse mode, expected lenient or strict; using lenient"
                );
                ParsePolicy::default()
            }),
        };

        Self { parse_policy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_lenient() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
    }

    #[test]
    fn test_strict_mode() {
        let config = ServerConfig::from_lookup(lookup(&[(PARSE_MODE_VAR, "STRICT")]));
        assert_eq!(config.parse_policy, ParsePolicy::Strict);
    }

    #[test]
    fn test_invalid_mode_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[(PARSE_MODE_VAR, "pedantic")]));
        assert_eq!(config, ServerConfig::default());
    }
}
