//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing` para los binarios. `RUST_LOG` tiene prioridad;
//! si no está definido se usa el nivel de la configuración.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Instala el subscriber global
///
/// Falla si ya había uno instalado.
pub fn init(default_level: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
