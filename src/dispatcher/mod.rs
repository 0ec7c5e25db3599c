//! # Despachador
//! src/dispatcher/mod.rs
//!
//! Mapea una clave de despacho a un handler.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Dispatcher → Handler → Reply
//! ```
//!
//! La clave se elige así:
//! 1. Si el request trae el atributo `command`, su valor (comandos no-HTTP)
//! 2. Si no, la forma corta de la request line (`GET`, `POST`, ...)
//!
//! Si no hay handler para la clave, retorna status 400 sin body.
//!
//! ## Concurrencia
//!
//! La tabla se llena en el setup, antes de aceptar conexiones. Después el
//! servidor la comparte en un `Arc<Dispatcher>`, que solo expone `&self`,
//! así ningún thread de conexión puede modificarla.

use crate::http::message::COMMAND;
use crate::http::{Reply, Request, StatusCode};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Tipo de función handler
///
/// Un handler recibe un Request y retorna una Reply
pub type Handler = Box<dyn Fn(&Request) -> Reply + Send + Sync>;

/// Tabla clave → handler
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    /// Crea un despachador vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un handler bajo `key`
    ///
    /// Si la clave ya existe no hace nada: gana el primer registro.
    /// Retorna si el handler quedó registrado.
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::dispatcher::Dispatcher;
    /// use http_comm::http::{Reply, Request, StatusCode};
    ///
    /// fn hello_handler(_req: &Request) -> Reply {
    ///     Reply::reply(StatusCode::Ok).with_body("hello")
    /// }
    ///
    /// let mut dispatcher = Dispatcher::new();
    /// assert!(dispatcher.add_handler("GET", hello_handler));
    /// assert!(!dispatcher.add_handler("GET", hello_handler));
    /// ```
    pub fn add_handler<F>(&mut self, key: &str, handler: F) -> bool
    where
        F: Fn(&Request) -> Reply + Send + Sync + 'static,
    {
        if self.handlers.contains_key(key) {
            debug!(key, "handler duplicado ignorado");
            return false;
        }
        self.handlers.insert(key.to_string(), Box::new(handler));
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Clave con la que se despacharía `request`
    pub fn dispatch_key(request: &Request) -> String {
        match request.attribute(COMMAND) {
            Some(command) => command.to_string(),
            None => request.line().to_short_string(),
        }
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si no encuentra handler retorna 400 con body vacío.
    pub fn dispatch(&self, request: &Request) -> Reply {
        let key = Self::dispatch_key(request);

        match self.handlers.get(&key) {
            Some(handler) => handler(request),
            None => {
                warn!(key = %key, "sin handler para la clave");
                Reply::reply(StatusCode::BadRequest)
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("Dispatcher").field("keys", &keys).finish()
    }
}
