use thiserror::Error;

/// Error types for XML-RPC value encoding.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// A serializer was invoked on a value of a shape it does not encode.
    #[error("{expected} serializer cannot encode a {found} value")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The primitive-array write path received something outside the
    /// enumerated element kinds.
    #[error("array of element type {0} not handled")]
    UnsupportedArrayKind(&'static str),

    /// Failure from the underlying output sink, propagated unchanged.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EncodeError>;
