//! Configuration of the request handler.
//!
//! # Environment variables
//!
//! - `TABLE_NAME`: name of the DynamoDB table where greetings are recorded.
//!   Recording is disabled if it is unset or empty.
//! - `ENVIRONMENT`: label echoed in every greeting.
//!   [`DEFAULT_ENVIRONMENT`] if unset.

use std::env::{self, VarError};

use crate::error::Error;

/// Environment variable that names the table.
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Environment variable that labels the environment.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Environment label used when `ENVIRONMENT` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "unknown";

/// Configuration resolved for a single invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    table_name: Option<String>,
    environment: Option<String>,
}

impl Config {
    /// Creates a configuration.
    ///
    /// An empty `table_name` is treated as no table.
    pub fn new(
        table_name: Option<String>,
        environment: Option<String>,
    ) -> Self {
        Self {
            table_name: table_name.filter(|name| !name.is_empty()),
            environment,
        }
    }

    /// Resolves the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Resolves the configuration through a given variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let table_name = optional_var(&lookup, TABLE_NAME_VAR)?;
        let environment = optional_var(&lookup, ENVIRONMENT_VAR)?;
        Ok(Self::new(table_name, environment))
    }

    /// Returns the name of the table to record greetings in, if any.
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Returns the environment label.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }
}

fn optional_var<F>(lookup: &F, name: &str) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(Error::InvalidConfig(
            format!("{} is not valid unicode", name),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::ffi::OsString;

    fn lookup_in(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn from_lookup_reads_both_variables() {
        let config = Config::from_lookup(lookup_in(&[
            ("TABLE_NAME", "orders"),
            ("ENVIRONMENT", "prod"),
        ])).unwrap();
        assert_eq!(config.table_name(), Some("orders"));
        assert_eq!(config.environment(), "prod");
    }

    #[test]
    fn from_lookup_falls_back_to_unknown_environment() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.table_name(), None);
        assert_eq!(config.environment(), "unknown");
    }

    #[test]
    fn empty_table_name_disables_recording() {
        let config = Config::from_lookup(lookup_in(&[("TABLE_NAME", "")]))
            .unwrap();
        assert_eq!(config.table_name(), None);
    }

    #[test]
    fn empty_environment_is_echoed_as_is() {
        let config = Config::new(None, Some(String::new()));
        assert_eq!(config.environment(), "");
    }

    #[test]
    fn non_unicode_variable_is_invalid_config() {
        let err = Config::from_lookup(|name| {
            if name == ENVIRONMENT_VAR {
                Err(VarError::NotUnicode(OsString::from("x")))
            } else {
                Err(VarError::NotPresent)
            }
        }).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            "Invalid config: ENVIRONMENT is not valid unicode",
        );
    }
}
