//! Backing key/value source abstraction.
//!
//! Production code typically uses [`Env::process()`] which delegates to
//! [`std::env::var`]. Hosts that own their configuration (and tests) use
//! [`Env::from_map`] backed by explicit key-value pairs, eliminating the
//! need for `unsafe` calls to [`std::env::set_var`] /
//! [`std::env::remove_var`].

use std::collections::HashMap;

/// Key/value source for configuration lookups.
///
/// Wraps lookups so that the accessor can read either the real process
/// environment or a caller-supplied map, without knowing which.
#[derive(Clone, Debug)]
pub struct Env {
    entries: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn process() -> Self {
        Self { entries: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn from_map(
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            entries: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a key, returning its value if present.
    ///
    /// An empty string counts as present; absence is `None`.
    pub fn var(&self, key: &str) -> Option<String> {
        match &self.entries {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }

    /// Returns `true` if the key is present in the source.
    pub fn contains(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::process()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_env_reads_cargo_manifest_dir() {
        let env = Env::process();
        assert!(env.var("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn map_env_returns_set_values() {
        let env = Env::from_map([("FOO", "bar"), ("BAZ", "qux")]);
        assert_eq!(env.var("FOO").as_deref(), Some("bar"));
        assert_eq!(env.var("BAZ").as_deref(), Some("qux"));
    }

    #[test]
    fn map_env_returns_none_for_missing() {
        let env = Env::from_map(Vec::<(&str, &str)>::new());
        assert!(env.var("NONEXISTENT").is_none());
    }

    #[test]
    fn empty_string_counts_as_present() {
        let env = Env::from_map([("EMPTY", "")]);
        assert_eq!(env.var("EMPTY").as_deref(), Some(""));
        assert!(env.contains("EMPTY"));
    }

    #[test]
    fn contains_checks_presence() {
        let env = Env::from_map([("PRESENT", "value")]);
        assert!(env.contains("PRESENT"));
        assert!(!env.contains("ABSENT"));
    }
}
