use std::error::Error as StdError;
use std::fmt;

/// Which tier an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration. Aborts the whole run.
    Config,
    /// Bad user input (empty identifier list, missing token).
    Validation,
    /// Transport, status or decoding failure of a single request.
    Request,
}

#[derive(Debug)]
pub struct CanvasError {
    pub message: String,
    pub kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CanvasError {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        CanvasError {
            message: message.to_string(),
            kind,
            source: None,
        }
    }

    pub fn config(message: &str) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn validation(message: &str) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn request(message: &str) -> Self {
        Self::new(ErrorKind::Request, message)
    }

    /// The wrapped error, if this one was converted from another.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = match self.kind {
            ErrorKind::Config => "configuración",
            ErrorKind::Validation => "validación",
            ErrorKind::Request => "petición",
        };
        write!(f, "error de {}: {}", tier, self.message)
    }
}

// Any std error becomes a request-tier error so `?` works on reqwest,
// reqwest-middleware, serde_json and io results.
impl<E: StdError + Send + Sync + 'static> From<E> for CanvasError {
    fn from(err: E) -> Self {
        CanvasError {
            message: err.to_string(),
            kind: ErrorKind::Request,
            source: Some(Box::new(err)),
        }
    }
}

// Keeps the wrapped cause so anyhow's `Caused by:` chain still shows it.
impl From<CanvasError> for anyhow::Error {
    fn from(err: CanvasError) -> Self {
        let context = err.to_string();
        match err.source {
            Some(source) => anyhow::anyhow!(source).context(context),
            None => anyhow::Error::msg(context),
        }
    }
}
