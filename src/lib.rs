//! Serverless greeting endpoint.
//!
//! [`handler::handle`] answers every invocation with a greeting and
//! optionally records it in a [`store::RecordStore`].

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod greeting;
pub mod handler;
pub mod response;
pub mod store;
