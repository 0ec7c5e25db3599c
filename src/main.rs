//! # HTTP Comm - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor.

use http_comm::commands;
use http_comm::config::Config;
use http_comm::dispatcher::Dispatcher;
use http_comm::logging;
use http_comm::server::Server;
use tracing::{error, info};

fn main() {
    let config = Config::new();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("no se pudo inicializar el logging: {}", e);
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "configuración inválida");
        std::process::exit(1);
    }
    config.log_summary();

    // La tabla queda completa antes de aceptar conexiones
    let mut dispatcher = Dispatcher::new();
    commands::register_defaults(&mut dispatcher, &config.root_dir);
    info!(handlers = ?dispatcher, "despachador listo");

    let mut server = Server::new(config, dispatcher);
    if let Err(e) = server.run() {
        error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}
