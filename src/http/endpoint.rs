//! # EndPoint
//! src/http/endpoint.rs
//!
//! Identifica el origen o destino de un mensaje. Se serializa como
//! `address:port` y viaja en los atributos `to` y `from`.

use super::DecodeError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Dirección + puerto de un peer
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct EndPoint {
    pub address: String,
    pub port: u16,
}

impl EndPoint {
    /// Crea un endpoint
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::EndPoint;
    ///
    /// let ep = EndPoint::new("localhost", 8080);
    /// assert_eq!(ep.to_string(), "localhost:8080");
    /// ```
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Parsea `address:port` de forma tolerante
    ///
    /// Sin `:` retorna el endpoint vacío. Un puerto no numérico
    /// conserva la dirección con puerto 0.
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::EndPoint;
    ///
    /// assert_eq!(EndPoint::parse("localhost:8080"), EndPoint::new("localhost", 8080));
    /// assert_eq!(EndPoint::parse("localhost"), EndPoint::default());
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((address, port)) => Self {
                address: address.to_string(),
                port: port.trim().parse().unwrap_or(0),
            },
            None => Self::default(),
        }
    }

    /// Verifica si es el endpoint vacío (resultado degenerado)
    pub fn is_empty(&self) -> bool {
        self.address.is_empty() && self.port == 0
    }
}

impl FromStr for EndPoint {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, port) = s
            .split_once(':')
            .ok_or_else(|| DecodeError::InvalidEndPoint(s.to_string()))?;
        let port = port
            .trim()
            .parse()
            .map_err(|_| DecodeError::InvalidEndPoint(s.to_string()))?;

        Ok(Self {
            address: address.to_string(),
            port,
        })
    }
}

impl fmt::Display for EndPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}
