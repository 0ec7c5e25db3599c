//! # Mensajes
//! src/http/message.rs
//!
//! Un mensaje combina una primera línea tipada, un mapa de atributos
//! `key:value` y un body binario.
//!
//! ## Formato en el cable
//!
//! ```text
//! POST /foobar.html HTTP/1.1\n
//! action:demo\n
//! content-length:11\n
//! \n
//! hello world\n
//! ```
//!
//! El header termina en una línea vacía. El body que le sigue mide
//! exactamente `content-length` bytes; ese es el framing autoritativo y es
//! el que usa la capa de transporte.
//!
//! [`Message::parse`] además acepta un camino heredado para emisores que no
//! mandan `content-length` (navegadores, texto pegado a mano): una línea sin
//! `:` se toma como body. Una línea de body que contenga `:` se confunde con
//! un atributo; para bodies arbitrarios hay que pasar por el transporte.

use super::{Body, DecodeError, EndPoint, ReplyLine, RequestLine};
use std::collections::HashMap;
use std::fmt;

/// Atributo con el largo del body en bytes
pub const CONTENT_LENGTH: &str = "content-length";
pub const NAME: &str = "name";
pub const ACTION: &str = "action";
pub const TO: &str = "to";
pub const FROM: &str = "from";
/// Atributo con un comando no-HTTP; tiene prioridad en el despacho
pub const COMMAND: &str = "command";

/// Primera línea de un mensaje (request o reply)
pub trait FirstLine: Default + Clone + fmt::Debug {
    /// Forma completa de la línea
    fn serialize(&self) -> String;

    /// Parse tolerante: nunca falla
    fn parse(line: &str) -> Self;

    /// Parse estricto
    fn try_parse(line: &str) -> Result<Self, DecodeError>;

    /// Decodifica la primera línea de un bloque de header
    fn from_header_line(line: &str) -> Self {
        Self::parse(line)
    }
}

/// Mensaje genérico sobre el tipo de su primera línea
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message<L> {
    line: L,
    attributes: HashMap<String, String>,
    body: Body,
}

/// Mensaje enviado por el cliente
pub type Request = Message<RequestLine>;

/// Mensaje enviado por el servidor
pub type Reply = Message<ReplyLine>;

impl<L: FirstLine> Message<L> {
    pub fn new(line: L) -> Self {
        Self {
            line,
            attributes: HashMap::new(),
            body: Body::new(),
        }
    }

    // === Primera línea ===

    pub fn line(&self) -> &L {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut L {
        &mut self.line
    }

    pub fn set_line(&mut self, line: L) {
        self.line = line;
    }

    // === Atributos ===

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }

    /// Agrega o reemplaza un atributo
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Versión builder de [`Message::set_attribute`]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Claves presentes, sin orden definido
    pub fn keys(&self) -> Vec<&str> {
        self.attributes.keys().map(|k| k.as_str()).collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Valor de `content-length`; 0 si falta o no es numérico
    pub fn content_length(&self) -> usize {
        self.attribute(CONTENT_LENGTH)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_content_length(&mut self, length: usize) {
        self.set_attribute(CONTENT_LENGTH, length.to_string());
    }

    /// Iguala `content-length` al tamaño actual del body
    pub fn sync_content_length(&mut self) {
        let length = self.body.size();
        self.set_content_length(length);
    }

    // === Atributos semánticos ===

    pub fn name(&self) -> &str {
        self.attribute(NAME).unwrap_or("")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_attribute(NAME, name);
    }

    pub fn action(&self) -> &str {
        self.attribute(ACTION).unwrap_or("")
    }

    pub fn set_action(&mut self, action: impl Into<String>) {
        self.set_attribute(ACTION, action);
    }

    /// Destino; endpoint vacío si falta
    pub fn to(&self) -> EndPoint {
        self.attribute(TO).map(EndPoint::parse).unwrap_or_default()
    }

    pub fn set_to(&mut self, endpoint: &EndPoint) {
        self.set_attribute(TO, endpoint.to_string());
    }

    /// Origen; endpoint vacío si falta
    pub fn from(&self) -> EndPoint {
        self.attribute(FROM).map(EndPoint::parse).unwrap_or_default()
    }

    pub fn set_from(&mut self, endpoint: &EndPoint) {
        self.set_attribute(FROM, endpoint.to_string());
    }

    // === Body ===

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Acceso mutable al body
    ///
    /// No toca `content-length`: quien cambie el body debe llamar a
    /// [`Message::sync_content_length`] antes de enviar.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Reemplaza el body y sincroniza `content-length`
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::{Command, Request};
    ///
    /// let request = Request::request(Command::POST, "/foobar.html")
    ///     .with_body("hello world");
    /// assert_eq!(request.content_length(), 11);
    /// ```
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self.sync_content_length();
        self
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn clear_body(&mut self) {
        self.body.clear();
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// Limpia atributos y body; conserva la primera línea
    pub fn clear(&mut self) {
        self.clear_attributes();
        self.clear_body();
    }

    // === Serialización ===

    /// Bloque de header: primera línea, un atributo por línea y línea vacía
    pub fn serialize_header(&self) -> String {
        let mut header = self.line.serialize();
        header.push('\n');
        for (key, value) in &self.attributes {
            header.push_str(key);
            header.push(':');
            header.push_str(value);
            header.push('\n');
        }
        header.push('\n');
        header
    }

    /// Header seguido del body y un `\n` final (solo si hay body)
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = self.serialize_header().into_bytes();
        if !self.body.is_empty() {
            bytes.extend_from_slice(self.body.as_bytes());
            bytes.push(b'\n');
        }
        bytes
    }

    /// Parsea un mensaje de forma tolerante
    ///
    /// Con menos de dos líneas retorna el mensaje por defecto. La primera
    /// línea y los atributos se recortan, así que los `\r` de un navegador
    /// no molestan; una línea de body solo pierde el `\r` final.
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::{Command, Request};
    ///
    /// let request = Request::parse("POST /foobar.html HTTP/1.1\naction:demo\n\nhello world\n");
    /// assert_eq!(request.line().command(), Command::POST);
    /// assert_eq!(request.action(), "demo");
    /// assert_eq!(request.body().as_bytes(), b"hello world");
    /// assert_eq!(request.content_length(), 11);
    /// ```
    pub fn parse(src: &str) -> Self {
        let lines: Vec<&str> = src.split('\n').collect();
        if lines.len() < 2 {
            return Self::default();
        }

        let mut message = Self::new(L::from_header_line(lines[0].trim()));
        message.absorb_lines(&lines[1..]);
        message
    }

    /// Parsea un mensaje reportando cualquier defecto
    pub fn try_parse(src: &str) -> Result<Self, DecodeError> {
        if src.trim().is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let lines: Vec<&str> = src.split('\n').collect();
        if lines.len() < 2 {
            return Err(DecodeError::MissingHeaderLines);
        }

        let mut message = Self::new(L::try_parse(lines[0].trim())?);
        message.absorb_lines(&lines[1..]);

        if let Some(length) = message.attribute(CONTENT_LENGTH) {
            if length.trim().parse::<usize>().is_err() {
                return Err(DecodeError::InvalidContentLength(length.to_string()));
            }
        }

        Ok(message)
    }

    /// Clasifica las líneas que siguen a la primera
    ///
    /// `key:value` con key no vacía es un atributo; cualquier otra línea no
    /// vacía es body y reescribe `content-length`.
    fn absorb_lines(&mut self, lines: &[&str]) {
        for &raw in lines {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() {
                continue;
            }

            match line.split_once(':') {
                Some((key, value)) if !key.trim().is_empty() => {
                    self.set_attribute(key.trim(), value.trim());
                }
                _ => {
                    self.body = Body::from(line);
                    self.set_content_length(line.len());
                }
            }
        }
    }
}

impl Message<RequestLine> {
    /// Crea un request con comando y recurso
    pub fn request(command: super::Command, resource: impl Into<String>) -> Self {
        Self::new(RequestLine::new(command, resource))
    }
}

impl Message<ReplyLine> {
    /// Crea una reply con el status dado y sin body
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::{Reply, StatusCode};
    ///
    /// let reply = Reply::reply(StatusCode::NotFound);
    /// assert_eq!(reply.status(), 404);
    /// ```
    pub fn reply(status: impl Into<u16>) -> Self {
        Self::new(ReplyLine::new(status))
    }

    pub fn status(&self) -> u16 {
        self.line.status()
    }
}

impl<L: FirstLine> fmt::Display for Message<L> {
    /// Texto del mensaje recortado, para mostrar en logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = String::from_utf8_lossy(&self.serialize()).into_owned();
        f.write_str(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Command, StatusCode};

    fn sample_request() -> Request {
        let mut msg = Request::request(Command::POST, "feebar.html");
        msg.set_name("msg#1");
        msg.set_to(&EndPoint::new("localhost", 8080));
        msg.set_from(&EndPoint::new("localhost", 8081));
        msg.set_action("doIt");
        msg.with_body("abc123")
    }

    #[test]
    fn test_default_request() {
        let msg = Request::default();
        assert_eq!(msg.line(), &RequestLine::default());
        assert!(msg.attributes().is_empty());
        assert!(msg.body().is_empty());
        assert_eq!(msg.content_length(), 0);
    }

    #[test]
    fn test_semantic_attributes() {
        let msg = sample_request();
        assert_eq!(msg.name(), "msg#1");
        assert_eq!(msg.action(), "doIt");
        assert_eq!(msg.to(), EndPoint::new("localhost", 8080));
        assert_eq!(msg.from(), EndPoint::new("localhost", 8081));
        assert_eq!(msg.attribute(TO), Some("localhost:8080"));
        assert_eq!(msg.content_length(), 6);
    }

    #[test]
    fn test_missing_semantic_attributes() {
        let msg = Request::default();
        assert_eq!(msg.name(), "");
        assert_eq!(msg.action(), "");
        assert!(msg.to().is_empty());
        assert!(msg.from().is_empty());
    }

    #[test]
    fn test_serialize_header_layout() {
        let msg = Request::request(Command::GET, "/a.html").with_attribute("name", "x");
        assert_eq!(msg.serialize_header(), "GET /a.html HTTP/1.1\nname:x\n\n");

        let bare = Request::request(Command::HEAD, "/");
        assert_eq!(bare.serialize_header(), "HEAD / HTTP/1.1\n\n");
    }

    #[test]
    fn test_serialize_appends_body_only_when_present() {
        let reply = Reply::reply(StatusCode::NotFound);
        assert_eq!(reply.serialize(), b"HTTP/1.1 404 not found\n\n");

        let reply = Reply::reply(StatusCode::Ok).with_body("hi");
        let text = String::from_utf8(reply.serialize()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\n"));
        assert!(text.contains("content-length:2\n"));
        assert!(text.ends_with("\n\nhi\n"));
    }

    #[test]
    fn test_round_trip() {
        let msg = sample_request();
        let text = String::from_utf8(msg.serialize()).unwrap();
        let parsed = Request::parse(&text);

        assert_eq!(parsed, msg);
        assert_eq!(Request::try_parse(&text), Ok(msg));
    }

    #[test]
    fn test_reply_round_trip_unknown_status() {
        let reply = Reply::reply(418u16).with_attribute("name", "teapot");
        let text = String::from_utf8(reply.serialize()).unwrap();
        let parsed = Reply::parse(&text);

        assert_eq!(parsed.status(), 418);
        assert_eq!(parsed.name(), "teapot");
    }

    #[test]
    fn test_body_line_rewrites_content_length() {
        let parsed = Request::parse("PUT /x HTTP/1.1\ncontent-length:99\n\nsome text\n");
        assert_eq!(parsed.body().as_bytes(), b"some text");
        assert_eq!(parsed.content_length(), 9);
    }

    #[test]
    fn test_body_line_keeps_inner_whitespace() {
        let parsed = Request::parse("PUT /x HTTP/1.1\n hi \n");
        assert_eq!(parsed.body().as_bytes(), b" hi ");
        assert_eq!(parsed.content_length(), 4);

        let parsed = Request::parse("PUT /x HTTP/1.1\r\n\r\n hi \r\n");
        assert_eq!(parsed.body().as_bytes(), b" hi ");
        assert_eq!(parsed.content_length(), 4);
    }

    #[test]
    fn test_leading_colon_is_body() {
        let parsed = Request::parse("PUT /x HTTP/1.1\n:smile\n");
        assert_eq!(parsed.body().as_bytes(), b":smile");
        assert!(parsed.attributes().len() == 1);
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let parsed = Request::parse("GET / HTTP/1.1\nto:localhost:8080\n\n");
        assert_eq!(parsed.to(), EndPoint::new("localhost", 8080));
    }

    #[test]
    fn test_fewer_than_two_lines_is_default() {
        assert_eq!(Request::parse(""), Request::default());
        assert_eq!(Request::parse("GET /x HTTP/1.1"), Request::default());
        assert_eq!(Request::try_parse(""), Err(DecodeError::EmptyInput));
        assert_eq!(
            Request::try_parse("GET /x HTTP/1.1"),
            Err(DecodeError::MissingHeaderLines)
        );
    }

    #[test]
    fn test_degenerate_first_line() {
        let parsed = Request::parse("garbage\n\n");
        assert_eq!(parsed.line(), &RequestLine::degenerate());
        assert!(Request::try_parse("garbage\n\n").is_err());
    }

    #[test]
    fn test_strict_rejects_bad_content_length() {
        let result = Request::try_parse("GET / HTTP/1.1\ncontent-length:lots\n\n");
        assert_eq!(
            result,
            Err(DecodeError::InvalidContentLength("lots".to_string()))
        );
        // El camino tolerante lo lee como 0
        assert_eq!(Request::parse("GET / HTTP/1.1\ncontent-length:lots\n\n").content_length(), 0);
    }

    #[test]
    fn test_browser_request() {
        let chrome = "GET /foobar.htm?name=value HTTP/1.1\r\n\
            Host: localhost:36895\r\n\
            Connection: keep-alive\r\n\
            Cache-Control: max-age=0\r\n\
            Accept-Encoding: gzip, deflate, br\r\n\r\n";

        let parsed = Request::try_parse(chrome).unwrap();
        assert_eq!(parsed.line().command(), Command::GET);
        assert_eq!(parsed.line().resource(), "/foobar.htm?name=value");
        assert_eq!(parsed.attribute("Host"), Some("localhost:36895"));
        assert_eq!(parsed.attribute("Connection"), Some("keep-alive"));
        assert_eq!(parsed.content_length(), 0);
    }

    #[test]
    fn test_clear_keeps_line() {
        let mut msg = sample_request();
        msg.clear();
        assert!(msg.attributes().is_empty());
        assert!(msg.body().is_empty());
        assert_eq!(msg.line().resource(), "feebar.html");
    }

    #[test]
    fn test_body_mut_does_not_sync() {
        let mut msg = Request::default().with_body("abc");
        msg.body_mut().load(b"abcdef");
        assert_eq!(msg.content_length(), 3);

        msg.sync_content_length();
        assert_eq!(msg.content_length(), 6);
    }

    #[test]
    fn test_display_is_trimmed() {
        let msg = Request::request(Command::GET, "/x");
        assert_eq!(msg.to_string(), "GET /x HTTP/1.1");
    }
}
