//! # Módulo HTTP (codec de mensajes)
//!
//! Este módulo implementa el formato de mensajes desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Endpoints `address:port`
//! - Request line y reply line
//! - Tabla de códigos de estado
//! - Body binario con acceso verificado
//! - Mensaje genérico con atributos
//!
//! ## Formato
//!
//! Parecido a HTTP/1.1 pero más simple:
//! - Líneas terminadas en `\n` (un `\r` extra se tolera al leer)
//! - Atributos `key:value` sin espacio
//! - Body de largo fijo, indicado por `content-length`
//! - Un solo request por conexión
//!
//! ### Request
//!
//! ```text
//! GET /debug/Hello1.html HTTP/1.1\n
//! name:msg#1\n
//! \n
//! ```
//!
//! ### Reply
//!
//! ```text
//! HTTP/1.1 200 OK\n
//! content-length:17\n
//! \n
//! POST message stub\n
//! ```

pub mod body;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod request;
pub mod response;
pub mod status;

pub use body::Body;
pub use endpoint::EndPoint;
pub use error::{BodyError, DecodeError};
pub use message::{FirstLine, Message, Reply, Request};
pub use request::{Command, RequestLine};
pub use response::ReplyLine;
pub use status::StatusCode;
