//! # Body
//! src/http/body.rs
//!
//! Secuencia de bytes crudos de un mensaje. Tiene semántica de valor:
//! clonar un `Body` copia sus bytes.
//!
//! El acceso por índice tiene dos formas:
//! - [`Body::at`] / [`Body::at_mut`] retornan `BodyError::OutOfRange`
//! - `body[i]` hace panic fuera de rango

use super::BodyError;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    bytes: Vec<u8>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un body de `size` bytes en cero
    pub fn with_size(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Reemplaza el contenido con una copia de `buffer`
    ///
    /// # Ejemplo
    /// ```
    /// use http_comm::http::Body;
    ///
    /// let mut body = Body::new();
    /// body.load(b"hello world");
    /// assert_eq!(body.size(), 11);
    /// ```
    pub fn load(&mut self, buffer: &[u8]) {
        self.bytes.clear();
        self.bytes.extend_from_slice(buffer);
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Cambia el tamaño; los bytes nuevos quedan en cero
    pub fn resize(&mut self, size: usize) {
        self.bytes.resize(size, 0);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Byte en la posición `index`
    pub fn at(&self, index: usize) -> Result<u8, BodyError> {
        self.bytes.get(index).copied().ok_or(BodyError::OutOfRange {
            index,
            size: self.bytes.len(),
        })
    }

    /// Referencia mutable al byte en la posición `index`
    pub fn at_mut(&mut self, index: usize) -> Result<&mut u8, BodyError> {
        let size = self.bytes.len();
        self.bytes
            .get_mut(index)
            .ok_or(BodyError::OutOfRange { index, size })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.bytes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, u8> {
        self.bytes.iter_mut()
    }

    /// Bytes interpretados como texto (UTF-8 con reemplazo)
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Index<usize> for Body {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        match self.bytes.get(index) {
            Some(byte) => byte,
            None => panic!("{}", BodyError::OutOfRange { index, size: self.bytes.len() }),
        }
    }
}

impl IndexMut<usize> for Body {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        let size = self.bytes.len();
        match self.bytes.get_mut(index) {
            Some(byte) => byte,
            None => panic!("{}", BodyError::OutOfRange { index, size }),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self {
            bytes: text.into_bytes(),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes.iter()
    }
}

impl<'a> IntoIterator for &'a mut Body {
    type Item = &'a mut u8;
    type IntoIter = std::slice::IterMut<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes.iter_mut()
    }
}
