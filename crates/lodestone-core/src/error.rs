use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

///
/// RegistryError
///
/// Metadata misconfiguration surfaces here, loud and fail-fast, as opposed
/// to the silent runtime-absence case during extraction.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("model '{path}' is not registered as indexable")]
    UnknownModel { path: String },

    #[error("registry validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// SyncError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SyncError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

///
/// StoreError
///
/// Failures from the external object store. These happen on the primary
/// data path (the on-save existence check) and are propagated, unlike
/// backend failures.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("store query failed for '{path}': {message}")]
    QueryFailed { path: String, message: String },
}

impl StoreError {
    pub fn query_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}

///
/// ErrorTree
/// Accumulates validation errors so a misdeclared registry reports every
/// defect at once instead of the first one found.
///

#[derive(Clone, Debug, Default)]
pub struct ErrorTree {
    errors: Vec<String>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate the accumulated error messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(String::as_str)
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl std::error::Error for ErrorTree {}

// err
#[macro_export]
macro_rules! err {
    ( $errs:expr, $( $arg:tt )* ) => {
        $errs.add(format!( $( $arg )* ))
    };
}
