use std::borrow::Cow;

use thiserror::Error;

/// Error type returned by generated data-access, model, repository and mock code.
///
/// `Clone` so mock expectations can pin an error as their return value.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A mock was called with arguments no expectation accepts.
    #[error("no matching mock expectation for {method}({args})")]
    NoMatchingExpectation { method: String, args: String },

    /// A mock expectation was called more often than it allows.
    #[error("{method}: expected {expected} call(s) but got {actual}")]
    InvalidCallTimes {
        method: String,
        expected: usize,
        actual: usize,
    },

    /// A mock expectation matched but never had a return value pinned.
    #[error("{method}: expectation matched but has no return value")]
    MissingReturnValue { method: String },

    /// `verify` found an expectation that was not called often enough.
    #[error("{method}: expected {expected} call(s) but got {actual} before verify")]
    UnsatisfiedExpectation {
        method: String,
        expected: usize,
        actual: usize,
    },

    /// The SQL executor reported a failure.
    #[error("query failed: {message}")]
    Query { message: Cow<'static, str> },

    /// A column or key value could not be converted to the requested type.
    #[error("conversion failed: {message}")]
    Conversion { message: String },

    /// A request-scoped value was not present in the context.
    #[error("context value '{key}' is not set")]
    MissingContextValue { key: String },

    /// A relation accessor was read before the repository assigned it.
    #[error("relation '{relation}' of '{model}' is not resolved")]
    UnresolvedRelation { model: String, relation: String },

    /// A model lifecycle method was called on a model built without a data-access handle.
    #[error("'{model}' has no data-access handle")]
    Detached { model: String },

    /// `create` was called on a model that is already stored.
    #[error("'{model}' is already created")]
    AlreadyCreated { model: String },

    /// Producing JSON or map output failed.
    #[error("render failed: {message}")]
    Render { message: String },

    /// An API request could not be built from the raw request.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// An error with added context.
    #[error("{message}: {source}")]
    Wrapped {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn query(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn conversion(err: impl std::fmt::Display) -> Self {
        Self::Conversion {
            message: err.to_string(),
        }
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn unresolved(model: impl Into<String>, relation: impl Into<String>) -> Self {
        Self::UnresolvedRelation {
            model: model.into(),
            relation: relation.into(),
        }
    }

    pub fn detached(model: impl Into<String>) -> Self {
        Self::Detached { model: model.into() }
    }

    pub fn already_created(model: impl Into<String>) -> Self {
        Self::AlreadyCreated { model: model.into() }
    }

    /// Attach context, keeping the original error as the source.
    pub fn wrap(self, message: impl Into<String>) -> Self {
        Self::Wrapped {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error behind any [`Error::Wrapped`] layers.
    pub fn root(&self) -> &Error {
        match self {
            Self::Wrapped { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_no_matching_expectation(&self) -> bool {
        matches!(self.root(), Self::NoMatchingExpectation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_root() {
        let err = Error::NoMatchingExpectation {
            method: "UserRepository::find_by_id".into(),
            args: "1".into(),
        }
        .wrap("failed to load user");
        assert!(err.is_no_matching_expectation());
        assert!(err.to_string().starts_with("failed to load user: no matching mock expectation"));
    }
}
