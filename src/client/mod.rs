//! # Cliente
//! src/client/mod.rs
//!
//! Flujo del lado cliente: conectar, enviar un request y esperar la reply.
//!
//! Cada conexión transporta un solo intercambio. Después de `post_message`
//! la conexión se cierra y hay que volver a llamar a `connect`.

use crate::http::{Reply, Request};
use crate::transport::{TcpConnection, Transport, TransportError};
use tracing::{debug, warn};

/// Cliente de un intercambio por conexión
#[derive(Debug, Default)]
pub struct Client {
    transport: Option<Transport<TcpConnection>>,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abre una conexión a `address:port`
    ///
    /// Si ya había una conexión abierta la cierra primero. Retorna `false`
    /// si no se pudo conectar.
    pub fn connect(&mut self, address: &str, port: u16) -> bool {
        if let Some(mut old) = self.transport.take() {
            old.shutdown();
        }

        match TcpConnection::connect(address, port) {
            Ok(conn) => {
                debug!(address, port, "conectado");
                self.transport = Some(Transport::new(conn));
                true
            }
            Err(e) => {
                warn!(address, port, error = %e, "no se pudo conectar");
                false
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.as_ref().is_some_and(Transport::is_usable)
    }

    /// Envía `request` y bloquea hasta recibir la reply
    ///
    /// La conexión se consume: al terminar queda cerrada aunque haya fallado.
    ///
    /// # Errores
    /// - [`TransportError::NotConnected`] si no hubo un `connect` exitoso
    /// - Cualquier error de envío
    pub fn post_message(&mut self, request: &Request) -> Result<Reply, TransportError> {
        let mut transport = self.transport.take().ok_or(TransportError::NotConnected)?;

        if let Err(e) = transport.send(request) {
            transport.shutdown();
            return Err(e);
        }

        let reply: Reply = transport.receive();
        transport.shutdown();
        Ok(reply)
    }
}
