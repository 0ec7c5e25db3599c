//! # Servir Archivos
//! src/commands/files.rs
//!
//! Handler de `GET`: lee el recurso pedido desde un directorio raíz.
//!
//! - `/debug/Hello1.html` se resuelve como `<root>/debug/Hello1.html`
//! - Archivo presente: 200 con los bytes y `content-length`
//! - Ausente, ilegible o fuera de la raíz: 404 sin body

use crate::http::{Reply, Request, StatusCode};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Crea el handler de `GET` para la raíz dada
///
/// # Ejemplo
/// ```
/// use http_comm::commands::get_file_handler;
/// use http_comm::dispatcher::Dispatcher;
///
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.add_handler("GET", get_file_handler("./public"));
/// ```
pub fn get_file_handler(root: impl Into<PathBuf>) -> impl Fn(&Request) -> Reply + Send + Sync + 'static {
    let root = root.into();
    move |request: &Request| get_file(&root, request)
}

/// Lee el recurso de `request` bajo `root`
pub fn get_file(root: &Path, request: &Request) -> Reply {
    let resource = request.line().resource();

    let Some(path) = resolve(root, resource) else {
        debug!(resource, "recurso fuera de la raíz");
        return Reply::reply(StatusCode::NotFound);
    };

    match fs::read(&path) {
        Ok(bytes) => {
            info!(path = %path.display(), bytes = bytes.len(), "sirviendo archivo");
            Reply::reply(StatusCode::Ok).with_body(bytes)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "archivo no disponible");
            Reply::reply(StatusCode::NotFound)
        }
    }
}

/// Une `resource` a `root` rechazando `..` y rutas absolutas
///
/// Un `/` inicial se interpreta relativo a la raíz.
fn resolve(root: &Path, resource: &str) -> Option<PathBuf> {
    let relative = Path::new(resource.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }

    let mut path = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}
