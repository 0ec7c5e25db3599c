//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! - `POST`: stub que ignora el body y responde un texto fijo
//! - `echo`: comando no-HTTP (atributo `command:echo`) que describe el
//!   request recibido en JSON

use crate::http::{RequestLine, Reply, Request, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

/// Body fijo del stub de POST
pub const POST_STUB_BODY: &str = "POST message stub";

/// Handler para `POST`
///
/// Ignora el body recibido.
pub fn post_stub_handler(_req: &Request) -> Reply {
    Reply::reply(StatusCode::Ok).with_body(POST_STUB_BODY)
}

/// Descripción de un request, tal como la devuelve `echo`
#[derive(Debug, Serialize)]
struct EchoReport<'a> {
    line: &'a RequestLine,
    attributes: BTreeMap<&'a str, &'a str>,
    body_length: usize,
}

/// Handler para el comando `echo`
///
/// # Ejemplo de body
/// ```json
/// {
///   "line": {"command": "GET", "resource": "/x"},
///   "attributes": {"command": "echo", "name": "n"},
///   "body_length": 0
/// }
/// ```
pub fn echo_handler(req: &Request) -> Reply {
    let report = EchoReport {
        line: req.line(),
        attributes: req
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect(),
        body_length: req.body().size(),
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => Reply::reply(StatusCode::Ok)
            .with_attribute("content-type", "application/json")
            .with_body(json),
        Err(e) => {
            error!(error = %e, "no se pudo serializar el echo");
            Reply::reply(StatusCode::ServerError)
        }
    }
}
