//! # Comandos del Servidor
//!
//! Handlers que el servidor registra en su despachador.
//!
//! ## Categorías de comandos
//!
//! - **files**: `GET` sirve archivos bajo el directorio raíz
//! - **basic**: `POST` (stub) y el comando no-HTTP `echo`
//!
//! Cada comando es una función handler que recibe un Request
//! y retorna una Reply.

pub mod basic;
pub mod files;

pub use basic::*;
pub use files::*;

use crate::dispatcher::Dispatcher;
use std::path::Path;

/// Clave del comando `echo`
pub const ECHO_COMMAND: &str = "echo";

/// Registra los handlers por defecto: `GET`, `POST` y `echo`
pub fn register_defaults(dispatcher: &mut Dispatcher, root: &Path) {
    dispatcher.add_handler("GET", get_file_handler(root));
    dispatcher.add_handler("POST", post_stub_handler);
    dispatcher.add_handler(ECHO_COMMAND, echo_handler);
}
