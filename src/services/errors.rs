// src/services/errors.rs

use thiserror::Error;

/// Structural failures raised by the strict hello decoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlsParserError {
    #[error("Not handshake data: content type 0x{0:02X}")]
    NotHandshakeData(u8),
    #[error("Incorrect handshake length: record declares {declared} bytes, buffer holds {actual}")]
    IncorrectHandshakeLength { declared: usize, actual: usize },
    #[error("Not a Client Hello: handshake type 0x{0:02X}")]
    NotClientHello(u8),
    #[error("Not a Server Hello: handshake type 0x{0:02X}")]
    NotServerHello(u8),
    #[error("Not enough data in hello message: handshake declares {declared} bytes, record holds {actual}")]
    InsufficientClientHelloData { declared: usize, actual: usize },
    #[error("Trailing handshake data: {trailing} of {declared} declared bytes left after the hello")]
    TrailingHandshakeData { declared: usize, trailing: usize },
    #[error("Incomplete data: expected {expected} bytes, got {actual}")]
    Incomplete { expected: usize, actual: usize },
}

/// Failures surfaced by the operation layer to its callers.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Data is not a valid TLS Client Hello. QUIC is not yet supported.\n{0}")]
    NotClientHello(#[source] TlsParserError),
    #[error("Data is not a valid TLS Server Hello. QUIC is not yet supported.\n{0}")]
    NotServerHello(#[source] TlsParserError),
}

impl From<hex::FromHexError> for OperationError {
    fn from(err: hex::FromHexError) -> Self {
        OperationError::InvalidInput(format!("hex decoding failed: {}", err))
    }
}

impl From<base64::DecodeError> for OperationError {
    fn from(err: base64::DecodeError) -> Self {
        OperationError::InvalidInput(format!("base64 decoding failed: {}", err))
    }
}
