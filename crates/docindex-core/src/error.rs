use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// Store adapters build these for their own failures; the index engine
/// propagates them untouched.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a configuration error (unusable input, never retried).
    pub fn configuration(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Configuration, origin, message)
    }

    /// Construct an index-origin invariant violation.
    pub(crate) fn index_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Index, message)
    }

    /// Construct a serialize-origin corruption error.
    pub(crate) fn serialize_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Serialize, message)
    }

    /// Construct a serialize-origin internal error.
    pub(crate) fn serialize_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Serialize, message)
    }

    /// Construct a store-origin internal error.
    pub fn store_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Store, message)
    }

    /// Construct the distinguished store miss.
    pub fn store_not_found(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Store,
            message: format!("no such entity: {key}"),
            detail: Some(ErrorDetail::Store(StoreError::NotFound { key })),
        }
    }

    /// Construct the store rejection for an insert onto an occupied key.
    pub fn store_already_exists(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::Conflict,
            origin: ErrorOrigin::Store,
            message: format!("entity already exists: {key}"),
            detail: Some(ErrorDetail::Store(StoreError::AlreadyExists { key })),
        }
    }

    /// Construct a transaction abort caused by a concurrent writer.
    pub fn store_aborted(message: impl Into<String>) -> Self {
        let message = message.into();

        Self {
            class: ErrorClass::Conflict,
            origin: ErrorOrigin::Store,
            message: format!("transaction aborted: {message}"),
            detail: Some(ErrorDetail::Store(StoreError::Aborted { message })),
        }
    }

    /// Construct a constraint violation for `field` on entities of `kind`.
    pub(crate) fn constraint_violation(
        constraint: ConstraintKind,
        field: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        let violation = ConstraintViolation {
            constraint,
            field: field.into(),
            kind: kind.into(),
        };

        Self {
            class: ErrorClass::Conflict,
            origin: ErrorOrigin::Unique,
            message: violation.to_string(),
            detail: Some(ErrorDetail::Constraint(violation)),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self.detail,
            Some(ErrorDetail::Store(StoreError::NotFound { .. }))
        )
    }

    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(
            self.detail,
            Some(ErrorDetail::Store(StoreError::AlreadyExists { .. }))
        )
    }

    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(
            self.detail,
            Some(ErrorDetail::Store(StoreError::Aborted { .. }))
        )
    }

    /// Structured constraint detail, when this error is a violation.
    #[must_use]
    pub const fn constraint(&self) -> Option<&ConstraintViolation> {
        match &self.detail {
            Some(ErrorDetail::Constraint(violation)) => Some(violation),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Store(StoreError),

    #[error("{0}")]
    Constraint(ConstraintViolation),
}

///
/// StoreError
///
/// Store-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Store`].
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("key already exists: {key}")]
    AlreadyExists { key: String },

    #[error("transaction aborted: {message}")]
    Aborted { message: String },
}

///
/// ConstraintKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConstraintKind {
    Primary,
    Unique,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Primary => "primary",
            Self::Unique => "unique",
        };
        write!(f, "{label}")
    }
}

///
/// ConstraintViolation
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error(
    "violation of {constraint} key constraint '{field}'. cannot insert duplicate key in kind '{kind}'"
)]
pub struct ConstraintViolation {
    pub constraint: ConstraintKind,
    pub field: String,
    pub kind: String,
}

///
/// ErrorClass
/// Runtime error taxonomy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Conflict,
    Corruption,
    Internal,
    InvariantViolation,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Conflict => "conflict",
            Self::Corruption => "corruption",
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Index,
    Query,
    Schema,
    Serialize,
    Store,
    Unique,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Index => "index",
            Self::Query => "query",
            Self::Schema => "schema",
            Self::Serialize => "serialize",
            Self::Store => "store",
            Self::Unique => "unique",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
