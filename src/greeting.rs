//! Greetings and their records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Message of every greeting.
pub const GREETING_MESSAGE: &str = "Hello from Serverless Application!";

/// Greeting returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Greeting {
    /// Message.
    pub message: String,
    /// When the greeting was made.
    ///
    /// ISO-8601 (RFC 3339) in UTC with microseconds.
    pub timestamp: String,
    /// Environment label.
    pub environment: String,
}

impl Greeting {
    /// Makes a greeting at a given time.
    pub fn new(now: DateTime<Utc>, environment: impl Into<String>) -> Self {
        Self {
            message: GREETING_MESSAGE.to_string(),
            timestamp: format_timestamp(now),
            environment: environment.into(),
        }
    }
}

/// Record of a greeting persisted in a store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GreetingRecord {
    /// Request ID of the invocation that made the greeting.
    pub id: String,
    /// Timestamp of the greeting.
    pub timestamp: String,
    /// Message of the greeting.
    pub message: String,
}

impl GreetingRecord {
    /// Derives a record from a greeting.
    pub fn from_greeting(id: impl Into<String>, greeting: &Greeting) -> Self {
        Self {
            id: id.into(),
            timestamp: greeting.timestamp.clone(),
            message: greeting.message.clone(),
        }
    }
}

/// Formats a time as an ISO-8601 string.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}
