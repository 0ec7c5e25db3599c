//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, cada una en su propio thread
//! 3. Recibe un único request por conexión
//! 4. Lo despacha, envía la reply y cierra la conexión

pub mod tcp;

pub use tcp::Server;
