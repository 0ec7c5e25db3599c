//! # HTTP Comm
//! src/lib.rs
//!
//! Mensajería estilo HTTP sobre TCP: un request y una reply por conexión.
//!
//! ## Arquitectura
//!
//! El crate está dividido en módulos especializados:
//! - `http`: codec de texto (request line, reply line, atributos, body)
//! - `transport`: envío y recepción de mensajes completos sobre una conexión
//! - `dispatcher`: tabla clave → handler
//! - `commands`: handlers por defecto (`GET`, `POST`, `echo`)
//! - `client`: conectar y enviar un request esperando la reply
//! - `server`: listener TCP con un thread por conexión
//! - `config`: argumentos CLI y variables de entorno
//! - `logging`: inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_comm::client::Client;
//! use http_comm::http::{Command, Request};
//!
//! let mut client = Client::new();
//! if client.connect("localhost", 8080) {
//!     let reply = client
//!         .post_message(&Request::request(Command::GET, "/debug/Hello1.html"))
//!         .expect("error de transporte");
//!     println!("{}", reply.status());
//! }
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod http;
pub mod logging;
pub mod server;
pub mod transport;
