//! # Reply Line
//!
//! Primera línea de un mensaje reply.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK
//! HTTP/1.1 404 not found
//! HTTP/1.1 418
//! ```
//!
//! La razón sale de la tabla de [`StatusCode`]; para códigos fuera de la
//! tabla queda vacía.

use super::message::FirstLine;
use super::request::HTTP_VERSION;
use super::status::reason_for;
use super::{DecodeError, StatusCode};
use serde::Serialize;
use std::fmt;

/// Status de una reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplyLine {
    status: u16,
}

impl ReplyLine {
    pub fn new(status: impl Into<u16>) -> Self {
        Self {
            status: status.into(),
        }
    }

    /// Parsea la reply line de forma tolerante
    ///
    /// Requiere al menos tres tokens (`HTTP/1.1`, status, razón). Con menos
    /// tokens, o con un status no numérico, retorna status 400.
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::ReplyLine;
    ///
    /// assert_eq!(ReplyLine::parse("HTTP/1.1 404 not found").status(), 404);
    /// assert_eq!(ReplyLine::parse("HTTP/1.1").status(), 400);
    /// ```
    pub fn parse(line: &str) -> Self {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Self::new(StatusCode::BadRequest);
        }

        let status = parts[1]
            .parse()
            .unwrap_or(StatusCode::BadRequest.as_u16());
        Self { status }
    }

    /// Parsea la reply line reportando cualquier defecto
    ///
    /// Acepta dos tokens, para códigos sin razón conocida.
    pub fn try_parse(line: &str) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 || !parts[0].starts_with("HTTP/") {
            return Err(DecodeError::InvalidReplyLine(line.to_string()));
        }

        let status = parts[1]
            .parse()
            .map_err(|_| DecodeError::InvalidStatus(parts[1].to_string()))?;
        Ok(Self { status })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: impl Into<u16>) {
        self.status = status.into();
    }

    /// Razón asociada al status; vacía si el código es desconocido
    pub fn reason(&self) -> &'static str {
        reason_for(self.status)
    }
}

impl Default for ReplyLine {
    fn default() -> Self {
        Self::new(StatusCode::Ok)
    }
}

impl fmt::Display for ReplyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", HTTP_VERSION, self.status, self.reason())
    }
}

impl FirstLine for ReplyLine {
    fn serialize(&self) -> String {
        self.to_string()
    }

    fn parse(line: &str) -> Self {
        ReplyLine::parse(line)
    }

    fn try_parse(line: &str) -> Result<Self, DecodeError> {
        ReplyLine::try_parse(line)
    }

    /// Dentro de un mensaje el status se toma del segundo token aunque
    /// falte la razón, así los códigos fuera de la tabla sobreviven.
    fn from_header_line(line: &str) -> Self {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.get(1).and_then(|s| s.parse().ok()) {
            Some(status) => Self { status },
            None => Self::parse(line),
        }
    }
}
