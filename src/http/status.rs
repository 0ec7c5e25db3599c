//! # Códigos de Estado
//!
//! Tabla fija de códigos conocidos por el protocolo. Cualquier otro código
//! se acepta en una reply, pero se serializa con razón vacía.
//!
//! | Código | Razón          |
//! |--------|----------------|
//! | 100    | `info`         |
//! | 200    | `OK`           |
//! | 300    | `redirect`     |
//! | 400    | `error`        |
//! | 404    | `not found`    |
//! | 500    | `server error` |

/// Códigos de estado con razón conocida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 100 - Informativo
    Info = 100,

    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 300 - Redirección
    Redirect = 300,

    /// 400 - Error del cliente, o comando sin handler
    BadRequest = 400,

    /// 404 - Recurso no encontrado
    NotFound = 404,

    /// 500 - Error interno del servidor
    ServerError = 500,
}

impl StatusCode {
    /// Todos los códigos de la tabla
    pub const ALL: [StatusCode; 6] = [
        StatusCode::Info,
        StatusCode::Ok,
        StatusCode::Redirect,
        StatusCode::BadRequest,
        StatusCode::NotFound,
        StatusCode::ServerError,
    ];

    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Busca el código en la tabla
    pub fn from_u16(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_u16() == code)
    }

    /// Texto de razón asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "not found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Info => "info",
            StatusCode::Ok => "OK",
            StatusCode::Redirect => "redirect",
            StatusCode::BadRequest => "error",
            StatusCode::NotFound => "not found",
            StatusCode::ServerError => "server error",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

/// Razón para un código cualquiera; vacía si no está en la tabla
///
/// # Ejemplo
/// ```
/// use http_comm::http::status::reason_for;
/// assert_eq!(reason_for(500), "server error");
/// assert_eq!(reason_for(418), "");
/// ```
pub fn reason_for(code: u16) -> &'static str {
    StatusCode::from_u16(code)
        .map(|s| s.reason_phrase())
        .unwrap_or("")
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.as_u16()
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
