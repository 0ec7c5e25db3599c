//! # Request Line
//! src/http/request.rs
//!
//! Primera línea de un mensaje request.
//!
//! ## Formato
//!
//! ```text
//! GET /debug/Hello1.html HTTP/1.1
//! ```
//!
//! 1. **Comando**: uno de `GET`, `PUT`, `POST`, `DELETE`, `HEAD`
//! 2. **Recurso**: path del recurso, sin espacios
//! 3. **Versión**: siempre `HTTP/1.1` al serializar, ignorada al parsear

use super::message::FirstLine;
use super::DecodeError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Recurso por defecto de un request recién creado
pub const PLACEHOLDER_RESOURCE: &str = "foobar.htm";

/// Versión que se escribe en las primeras líneas
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Comandos soportados
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// GET - Obtener un recurso
    #[default]
    GET,

    /// PUT - Reemplazar un recurso
    PUT,

    /// POST - Enviar datos a un recurso
    POST,

    /// DELETE - Eliminar un recurso
    DELETE,

    /// HEAD - Como GET pero sin body
    HEAD,
}

impl Command {
    /// Todos los comandos, en orden de declaración
    pub const ALL: [Command; 5] = [
        Command::GET,
        Command::PUT,
        Command::POST,
        Command::DELETE,
        Command::HEAD,
    ];

    /// Convierte el comando a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::GET => "GET",
            Command::PUT => "PUT",
            Command::POST => "POST",
            Command::DELETE => "DELETE",
            Command::HEAD => "HEAD",
        }
    }
}

impl FromStr for Command {
    type Err = DecodeError;

    /// Reconoce los cinco tokens, sensible a mayúsculas
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Command::GET),
            "PUT" => Ok(Command::PUT),
            "POST" => Ok(Command::POST),
            "DELETE" => Ok(Command::DELETE),
            "HEAD" => Ok(Command::HEAD),
            _ => Err(DecodeError::UnknownCommand(s.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comando + recurso de un request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLine {
    command: Command,
    resource: String,
}

impl RequestLine {
    pub fn new(command: Command, resource: impl Into<String>) -> Self {
        Self {
            command,
            resource: resource.into(),
        }
    }

    /// Valor degenerado: `GET` sin recurso
    pub fn degenerate() -> Self {
        Self::new(Command::GET, "")
    }

    /// Parsea la request line de forma tolerante
    ///
    /// Con menos de dos tokens retorna `{GET, ""}`. Un comando
    /// desconocido se lee como `GET` y conserva el recurso.
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::{Command, RequestLine};
    ///
    /// let line = RequestLine::parse("POST /foobar.html HTTP/1.1");
    /// assert_eq!(line.command(), Command::POST);
    /// assert_eq!(line.resource(), "/foobar.html");
    ///
    /// assert_eq!(RequestLine::parse("GET"), RequestLine::degenerate());
    /// ```
    pub fn parse(line: &str) -> Self {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return Self::degenerate();
        }

        let command = parts[0].parse().unwrap_or_default();
        Self::new(command, parts[1])
    }

    /// Parsea la request line reportando cualquier defecto
    pub fn try_parse(line: &str) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(DecodeError::InvalidRequestLine(line.to_string()));
        }

        let command = parts[0].parse()?;
        Ok(Self::new(command, parts[1]))
    }

    /// Forma corta: solo el comando (la clave de despacho)
    pub fn to_short_string(&self) -> String {
        self.command.as_str().to_string()
    }

    // === Accessors ===

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn set_command(&mut self, command: Command) {
        self.command = command;
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn set_resource(&mut self, resource: impl Into<String>) {
        self.resource = resource.into();
    }
}

impl Default for RequestLine {
    fn default() -> Self {
        Self::new(Command::GET, PLACEHOLDER_RESOURCE)
    }
}

impl fmt::Display for RequestLine {
    /// Forma completa: `GET /recurso HTTP/1.1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.command, self.resource, HTTP_VERSION)
    }
}

impl FirstLine for RequestLine {
    fn serialize(&self) -> String {
        self.to_string()
    }

    fn parse(line: &str) -> Self {
        RequestLine::parse(line)
    }

    fn try_parse(line: &str) -> Result<Self, DecodeError> {
        RequestLine::try_parse(line)
    }
}
