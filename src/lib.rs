//! envconfig: typed accessor for environment-style key/value configuration.
//!
//! Resolves a logical config name against an injected key/value source,
//! applying prefix/suffix decoration rules, coerces the raw string through
//! a [`Transform`], and enforces a required/optional presence policy.
//!
//! ```
//! use envconfig::{Env, Envconfig, GetOptions, Options, Transform, Value};
//!
//! let env = Env::from_map([("APP_PORT", "8080")]);
//! let config = Envconfig::new(
//!     env,
//!     Options {
//!         optional_prefix: Some("APP_".to_string()),
//!         ..Default::default()
//!     },
//! );
//!
//! let port = config.get("PORT", GetOptions::new(Transform::Number)).unwrap();
//! assert_eq!(port, Some(Value::Number(8080.0)));
//! ```

pub mod accessor;
pub mod env;
pub mod transform;

pub use accessor::{envconfig, Envconfig, EnvconfigError, GetOptions, Options};
pub use env::Env;
pub use transform::{CustomFn, Transform, TransformError, Value};
