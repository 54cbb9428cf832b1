//! Tuning parameters that can be set from environment variables.
//!
//! A [`Param`] holds the name of an environment variable and the textual form of its default
//! value. It is read once, on first access, and the value is cached for the rest of the process.
//!
//! ```
//! use value_sets::params::Param;
//! static LIMIT: Param<u32> = Param::new("MY_VALUE_SETS_LIMIT", "7");
//! // the environment variable is not set, the default is used
//! assert_eq!(LIMIT.get(), 7);
//! ```

use once_cell::sync::OnceCell;
use std::str::FromStr;

/// Runs the interval representation checks even when `debug_assertions` are disabled.
pub static CHECK_INVARIANTS: Param<bool> = Param::new("VALUE_SETS_CHECK_INVARIANTS", "false");

/// Depth above which a type-union expression tree is reported as suspiciously large.
pub static TYPE_UNION_DEPTH_WARNING: Param<usize> = Param::new("VALUE_SETS_TYPE_UNION_DEPTH_WARNING", "64");

/// Seed of the random generators used in randomized tests.
pub static FUZZ_SEED: Param<u64> = Param::new("VALUE_SETS_FUZZ_SEED", "0");

/// Number of iterations of randomized tests.
pub static FUZZ_ROUNDS: Param<usize> = Param::new("VALUE_SETS_FUZZ_ROUNDS", "100");

pub struct Param<T> {
    value: OnceCell<T>,
    env: &'static str,
    default: &'static str,
}

impl<T> Param<T> {
    pub const fn new(env: &'static str, default: &'static str) -> Param<T> {
        Param {
            value: OnceCell::new(),
            env,
            default,
        }
    }

    /// Name of the environment variable backing this parameter.
    pub fn env(&self) -> &'static str {
        self.env
    }
}

impl<T: FromStr> Param<T> {
    fn parse_default(&self) -> T {
        match T::from_str(self.default) {
            Ok(v) => v,
            Err(_) => panic!("[value_sets] {}: invalid default value \"{}\".", self.env, self.default),
        }
    }

    fn read(&self) -> T {
        match std::env::var(self.env) {
            Ok(raw) => match T::from_str(&raw) {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(
                        "could not parse \"{}\" for parameter {}, using default \"{}\"",
                        raw,
                        self.env,
                        self.default
                    );
                    self.parse_default()
                }
            },
            Err(std::env::VarError::NotPresent) => self.parse_default(),
            Err(err) => {
                tracing::warn!("parameter {}: {}, using default \"{}\"", self.env, err, self.default);
                self.parse_default()
            }
        }
    }

    pub fn get_ref(&self) -> &T {
        self.value.get_or_init(|| self.read())
    }

    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.get_ref()
    }

    /// Forces the value of the parameter.
    ///
    /// # Panic
    /// Panics if the parameter was already read or set.
    pub fn set(&self, value: T) {
        if self.value.set(value).is_err() {
            panic!("Parameter {} is already initialized.", self.env);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        static UNSET: Param<usize> = Param::new("VALUE_SETS_TEST_UNSET_PARAM", "12");
        assert_eq!(UNSET.get(), 12);

        static FORCED: Param<bool> = Param::new("VALUE_SETS_TEST_FORCED_PARAM", "false");
        FORCED.set(true);
        assert!(FORCED.get());
        assert_eq!(FORCED.env(), "VALUE_SETS_TEST_FORCED_PARAM");
    }

    #[test]
    fn shipped_defaults_parse() {
        assert!(TYPE_UNION_DEPTH_WARNING.get() > 0);
        let _ = CHECK_INVARIANTS.get();
    }
}
