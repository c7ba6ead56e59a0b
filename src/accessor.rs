//! The configuration accessor: decoration rules, candidate-key resolution,
//! and typed lookup.
//!
//! Key resolution builds an ordered candidate list, most specific first,
//! and reads the first candidate the backing source defines:
//!
//! 1. With an exact `prefix`/`suffix` configured, the sole candidate is
//!    `prefix + name + suffix`, with no fallback to the bare name.
//! 2. Otherwise optional decoration is tried in order: both, prefix only,
//!    suffix only, bare name.
//! 3. With no decoration, the bare name.
//!
//! Exact decoration wins over optional decoration on the same axis; the
//! optional value is ignored for that axis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::Env;
use crate::transform::{Transform, TransformError, Value};

/// Errors during lookup.
#[derive(Error, Debug)]
pub enum EnvconfigError {
    /// A required lookup found no present value under any candidate key.
    ///
    /// For the lenient transforms (`number`, `boolean`) a present but
    /// unparsable value also counts as missing.
    #[error("cannot find config {}", .candidates.join(" or "))]
    MissingRequired {
        /// The logical name that was requested.
        name: String,
        /// Every key that was tried, most specific first.
        candidates: Vec<String>,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Decoration rules applied around a logical config name.
///
/// `prefix`/`suffix` are exact: the decorated key is the only one tried.
/// `optional_prefix`/`optional_suffix` are fallbacks: decorated candidates
/// are preferred but the bare name still matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub optional_prefix: Option<String>,
    pub optional_suffix: Option<String>,
}

/// Per-lookup options: the transform to apply and the presence policy.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    pub transform: Transform,
    pub required: bool,
}

impl GetOptions {
    /// Lookup with the given transform, not required.
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            required: false,
        }
    }

    /// Mark the lookup as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Configuration-value accessor over an injected [`Env`] source.
///
/// Stateless apart from the configuration captured at construction; clones
/// share nothing mutable and instances may be used from multiple threads.
#[derive(Debug, Clone)]
pub struct Envconfig {
    env: Env,
    options: Options,
}

impl Envconfig {
    /// Create an accessor over an explicit backing source.
    pub fn new(env: Env, options: Options) -> Self {
        Self { env, options }
    }

    /// Create an accessor over the process environment with no decoration.
    pub fn from_process_env() -> Self {
        Self::new(Env::process(), Options::default())
    }

    /// Ordered candidate keys for a logical name, most specific first.
    fn candidates(&self, name: &str) -> Vec<String> {
        let opts = &self.options;

        // Exact decoration is exclusive: one candidate, no bare fallback.
        if opts.prefix.is_some() || opts.suffix.is_some() {
            let prefix = opts.prefix.as_deref().unwrap_or("");
            let suffix = opts.suffix.as_deref().unwrap_or("");
            return vec![format!("{prefix}{name}{suffix}")];
        }

        let mut keys = Vec::new();
        if let (Some(prefix), Some(suffix)) = (&opts.optional_prefix, &opts.optional_suffix) {
            keys.push(format!("{prefix}{name}{suffix}"));
        }
        if let Some(prefix) = &opts.optional_prefix {
            keys.push(format!("{prefix}{name}"));
        }
        if let Some(suffix) = &opts.optional_suffix {
            keys.push(format!("{name}{suffix}"));
        }
        keys.push(name.to_string());
        keys
    }

    /// Resolve the first present candidate to its raw string value.
    fn find_value(&self, candidates: &[String]) -> Option<String> {
        candidates.iter().find_map(|key| self.env.var(key))
    }

    /// Look up `name`, apply the transform, and enforce the presence policy.
    ///
    /// The required check runs against the coerced value, so a present value
    /// that a lenient transform rejects counts as missing. A strict
    /// transform (`bigint`, custom) errors before the policy applies.
    pub fn get(&self, name: &str, options: GetOptions) -> Result<Option<Value>, EnvconfigError> {
        let candidates = self.candidates(name);
        let value = match self.find_value(&candidates) {
            Some(raw) => options.transform.apply(&raw)?,
            None => None,
        };

        if options.required && value.is_none() {
            return Err(EnvconfigError::MissingRequired {
                name: name.to_string(),
                candidates,
            });
        }

        Ok(value)
    }

    /// Look up `name` as a raw string, without a presence requirement.
    pub fn get_raw(&self, name: &str) -> Option<String> {
        self.find_value(&self.candidates(name))
    }

    /// Look up `name` as a raw string, erroring when absent.
    pub fn require_raw(&self, name: &str) -> Result<String, EnvconfigError> {
        let candidates = self.candidates(name);
        self.find_value(&candidates)
            .ok_or_else(|| EnvconfigError::MissingRequired {
                name: name.to_string(),
                candidates,
            })
    }

    /// Look up `name` and pass the raw value through a caller-supplied
    /// transform with an arbitrary result type.
    ///
    /// The transform's error propagates as [`TransformError::Custom`].
    pub fn get_with<T, E, F>(&self, name: &str, transform: F) -> Result<Option<T>, EnvconfigError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match self.get_raw(name) {
            Some(raw) => match transform(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => Err(EnvconfigError::Transform(TransformError::Custom(e.into()))),
            },
            None => Ok(None),
        }
    }

    /// Like [`Envconfig::get_with`], erroring when the name is absent.
    pub fn require_with<T, E, F>(&self, name: &str, transform: F) -> Result<T, EnvconfigError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let raw = self.require_raw(name)?;
        transform(&raw).map_err(|e| EnvconfigError::Transform(TransformError::Custom(e.into())))
    }
}

/// Construct an accessor in one call, mirroring bound-function usage.
pub fn envconfig(env: Env, options: Options) -> Envconfig {
    Envconfig::new(env, options)
}
