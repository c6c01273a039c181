use std::sync::Arc;

use pathobject_syntax::ModuleError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The path module lacks a function that the operation needs.
    #[error("path module `{module}` does not provide `{function}`")]
    Configuration {
        module: String,
        function: &'static str,
    },
    #[error("cannot use {value:?} as a path: expected {expected}")]
    TypeMismatch {
        value: String,
        expected: &'static str,
    },
    #[error("path dialect mismatch: expected a `{expected}` path, found {found}")]
    DialectMismatch { expected: String, found: String },
    /// Error reported by the path module itself, passed through unchanged.
    #[error(transparent)]
    Backend(ModuleError),
    #[error(transparent)]
    Io(#[from] Arc<std::io::Error>),
    #[error(transparent)]
    Glob(Arc<globset::Error>),
    #[error("unknown path dialect: {0}")]
    UnknownDialect(String),
}

impl Error {
    /// Attribute a module error to the module that raised it.
    pub(crate) fn from_module(module: &str, err: ModuleError) -> Self {
        match err {
            ModuleError::Unsupported { function } => Self::Configuration {
                module: module.to_owned(),
                function,
            },
            err @ ModuleError::Invalid { .. } => Self::Backend(err),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<globset::Error> for Error {
    #[inline]
    fn from(err: globset::Error) -> Self {
        Self::Glob(Arc::new(err))
    }
}
