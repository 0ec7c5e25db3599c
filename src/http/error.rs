//! # Errores del Codec
//! src/http/error.rs
//!
//! El camino tolerante (`parse`) nunca falla: toda entrada malformada se
//! convierte en un valor por defecto. Estos errores solo los reporta el
//! camino estricto (`try_parse`), para quien necesite distinguir un valor
//! degenerado de uno legítimo.

use thiserror::Error;

/// Errores de decodificación del camino estricto
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No llegó ningún byte
    #[error("empty input")]
    EmptyInput,

    /// Menos de dos líneas: no hay bloque de headers
    #[error("message has fewer than two lines")]
    MissingHeaderLines,

    /// La request line no tiene comando y recurso
    #[error("invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// Comando fuera de GET, PUT, POST, DELETE, HEAD
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// La reply line no tiene versión y status
    #[error("invalid reply line: {0:?}")]
    InvalidReplyLine(String),

    /// El status no es un entero
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),

    /// Endpoint sin `:` o con puerto no numérico
    #[error("invalid endpoint: {0:?}")]
    InvalidEndPoint(String),

    /// `content-length` no es un entero
    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),
}

/// Errores de acceso al body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BodyError {
    /// Índice fuera del tamaño actual del body
    #[error("index {index} out of range for body of size {size}")]
    OutOfRange { index: usize, size: usize },
}
