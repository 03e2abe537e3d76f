//! Invocation context.

use crate::error::Error;

/// Platform-supplied metadata of a single invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationContext {
    request_id: String,
}

impl InvocationContext {
    /// Creates a context for a given request ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

/// Validates an optional context and returns its request ID.
///
/// Fails if the context is absent or its request ID is empty.
pub fn require_request_id(
    context: Option<&InvocationContext>,
) -> Result<&str, Error> {
    let context = context
        .ok_or(Error::InvalidContext(format!("no invocation context")))?;
    if context.request_id.is_empty() {
        return Err(Error::InvalidContext(format!("empty request ID")));
    }
    Ok(&context.request_id)
}
