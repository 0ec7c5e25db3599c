//! # Capa de Transporte
//! src/transport/mod.rs
//!
//! Lee y escribe mensajes completos sobre una [`Connection`].
//!
//! ## Recepción
//!
//! 1. Lee líneas terminadas en `\n` hasta que llega una de menos de 3
//!    bytes (la línea vacía, con o sin `\r`), la lectura llega a EOF o la
//!    conexión deja de ser usable
//! 2. Parsea el header acumulado con el codec
//! 3. Si `content-length > 0`, hace una sola lectura de ese largo exacto
//!
//! El body nunca se lee por líneas, así que puede contener cualquier byte.
//! Un `content-length` enorme no reserva memoria por adelantado: el body
//! crece solo con los bytes que realmente llegan.
//!
//! Un EOF de lectura no cierra la escritura, así que después de recibir un
//! request truncado todavía se puede enviar la reply.
//!
//! ## Envío
//!
//! Header, luego `content-length` bytes del body, luego un `\n` final.
//! No espera respuesta.

pub mod connection;

pub use connection::{Connection, MemoryConnection, TcpConnection};

use crate::http::{FirstLine, Message};
use thiserror::Error;
use tracing::{debug, warn};

/// Una línea más corta que esto cierra el bloque de header
const HEADER_TERMINATOR_MAX_LEN: usize = 3;

/// Fallas de conexión reportadas al llamador inmediato
#[derive(Debug, Error)]
pub enum TransportError {
    /// No hay conexión abierta, o ya fue cerrada
    #[error("not connected")]
    NotConnected,

    /// `content-length` pide más bytes de los que tiene el body
    #[error("content-length {declared} exceeds body size {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Envía y recibe mensajes sobre una conexión que le pertenece
#[derive(Debug)]
pub struct Transport<C> {
    conn: C,
}

impl<C: Connection> Transport<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    pub fn is_usable(&self) -> bool {
        self.conn.is_usable()
    }

    pub fn shutdown(&mut self) {
        self.conn.shutdown();
    }

    /// Recibe un mensaje completo
    ///
    /// Nunca falla: si la conexión muere a mitad de camino retorna lo que se
    /// pudo parsear. Un body truncado queda vacío mientras `content-length`
    /// conserva el valor anunciado, así el llamador puede detectarlo.
    pub fn receive<L: FirstLine>(&mut self) -> Message<L> {
        let mut header = String::new();

        while self.conn.is_usable() && !self.conn.at_eof() {
            match self.conn.read_line_until(b'\n') {
                Ok(line) => {
                    header.push_str(&String::from_utf8_lossy(&line));
                    if line.len() < HEADER_TERMINATOR_MAX_LEN || self.conn.at_eof() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "conexión perdida leyendo el header");
                    break;
                }
            }
        }

        debug!(bytes = header.len(), "header recibido");
        let mut msg = Message::<L>::parse(&header);

        let length = msg.content_length();
        if length > 0 && self.conn.is_usable() {
            match self.conn.read_exactly(length) {
                Ok(bytes) => msg.body_mut().load(&bytes),
                Err(e) => {
                    warn!(error = %e, expected = length, "conexión perdida leyendo el body");
                    msg.clear_body();
                }
            }
        }

        msg
    }

    /// Envía un mensaje completo
    ///
    /// Escribe exactamente `content-length` bytes del body. Si el body es
    /// más corto que lo anunciado no se escribe nada.
    pub fn send<L: FirstLine>(&mut self, msg: &Message<L>) -> Result<(), TransportError> {
        if !self.conn.is_usable() {
            return Err(TransportError::NotConnected);
        }

        let length = msg.content_length();
        let body = msg.body().as_bytes();
        if length > body.len() {
            return Err(TransportError::LengthMismatch {
                declared: length,
                actual: body.len(),
            });
        }

        let header = msg.serialize_header();
        self.conn.write_exactly(header.as_bytes())?;
        if length > 0 {
            self.conn.write_exactly(&body[..length])?;
        }
        self.conn.write_exactly(b"\n")?;

        debug!(header_bytes = header.len(), body_bytes = length, "mensaje enviado");
        Ok(())
    }
}
