//! # Cliente de Demostración
//! src/bin/http_client.rs
//!
//! Pide un recurso con `GET` varias veces (reconectando cada vez) y luego
//! envía un `POST` de prueba.

use http_comm::client::Client;
use http_comm::config::ClientConfig;
use http_comm::http::message::ACTION;
use http_comm::http::{Command, Request};
use http_comm::logging;
use tracing::{error, info, warn};

fn main() {
    let config = ClientConfig::new();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("no se pudo inicializar el logging: {}", e);
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "configuración inválida");
        std::process::exit(1);
    }

    let mut client = Client::new();
    let get = Request::request(Command::GET, config.resource.as_str());

    for attempt in 1..=config.retries {
        if !client.connect(&config.host, config.port) {
            warn!(attempt, "conexión fallida");
            continue;
        }

        match client.post_message(&get) {
            Ok(reply) => info!(
                attempt,
                status = reply.status(),
                body = %reply.body().to_string_lossy(),
                "reply al GET"
            ),
            Err(e) => warn!(attempt, error = %e, "GET fallido"),
        }
    }

    let post = Request::request(Command::POST, "/foobar.html")
        .with_attribute(ACTION, "demo")
        .with_body("hello world");

    if !client.connect(&config.host, config.port) {
        error!(host = %config.host, port = config.port, "no se pudo conectar para el POST");
        std::process::exit(1);
    }

    match client.post_message(&post) {
        Ok(reply) => info!(status = reply.status(), reply = %reply, "reply al POST"),
        Err(e) => {
            error!(error = %e, "POST fallido");
            std::process::exit(1);
        }
    }
}
