//! # Configuración
//! src/config.rs
//!
//! Configuración del servidor y del cliente con soporte para argumentos
//! CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_comm --port 8080 --root-dir ./public --log-level debug
//! ./http_client --host localhost --port 8080 --resource /debug/Hello1.html
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ROOT_DIR=./public ./http_comm
//! ```

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("host must not be empty")]
    EmptyHost,

    #[error("root dir {0:?} is not a directory")]
    RootDirMissing(PathBuf),

    #[error("retries must be >= 1")]
    NoRetries,
}

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "http_comm")]
#[command(about = "Servidor de mensajes estilo HTTP, un request por conexión")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = efímero)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se sirven los GET
    #[arg(long = "root-dir", default_value = ".", env = "ROOT_DIR")]
    pub root_dir: PathBuf,

    /// Filtro de logs cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_comm::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if !self.root_dir.is_dir() {
            return Err(ConfigError::RootDirMissing(self.root_dir.clone()));
        }
        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            root_dir = %self.root_dir.display(),
            log_level = %self.log_level,
            "configuración del servidor"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            root_dir: PathBuf::from("."),
            log_level: "info".to_string(),
        }
    }
}

/// Configuración del cliente de demostración
#[derive(Debug, Clone, Parser)]
#[command(name = "http_client")]
#[command(about = "Cliente de demostración: GET de un recurso y POST de prueba")]
#[command(version = "0.1.0")]
pub struct ClientConfig {
    /// Host del servidor
    #[arg(long, default_value = "localhost", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto del servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Recurso a pedir con GET
    #[arg(long, default_value = "/debug/Hello1.html")]
    pub resource: String,

    /// Cuántas veces repetir el GET
    #[arg(long, default_value = "3")]
    pub retries: u32,

    /// Filtro de logs cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl ClientConfig {
    /// Crea la configuración parseando argumentos CLI
    pub fn new() -> Self {
        ClientConfig::parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.retries == 0 {
            return Err(ConfigError::NoRetries);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            resource: "/debug/Hello1.html".to_string(),
            retries: 3,
            log_level: "info".to_string(),
        }
    }
}
