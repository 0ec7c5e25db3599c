//! # Conexiones
//! src/transport/connection.rs
//!
//! Abstracción mínima de un canal de bytes bidireccional. El transporte
//! solo necesita leer hasta un delimitador, leer N bytes, escribir N bytes
//! y saber si el canal sigue usable.
//!
//! Leer y escribir tienen estados separados: un EOF de lectura (el peer
//! cerró su lado de escritura) no impide seguir escribiendo la reply.
//!
//! Implementaciones:
//! - [`TcpConnection`]: sobre `std::net::TcpStream`
//! - [`MemoryConnection`]: buffers en memoria, para tests

use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;
use tracing::debug;

/// Cuánto esperar el cierre del peer al descartar bytes pendientes
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Canal de bytes usado por el transporte
pub trait Connection {
    /// Lee hasta `delimiter` inclusive; un vector vacío significa EOF
    fn read_line_until(&mut self, delimiter: u8) -> io::Result<Vec<u8>>;

    /// Lee exactamente `n` bytes
    ///
    /// La memoria crece a medida que llegan bytes, no según `n`. Si el
    /// stream termina antes retorna `UnexpectedEof`.
    fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>>;

    /// Escribe todos los bytes
    fn write_exactly(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// `true` cuando la lectura llegó al final del stream
    fn at_eof(&self) -> bool;

    /// `false` después de un error de I/O o un shutdown
    fn is_usable(&self) -> bool;

    /// Cierra ambos sentidos del canal
    fn shutdown(&mut self);
}

/// Conexión TCP con lectura bufferizada
///
/// Las escrituras van directo al socket; el `BufReader` solo se usa para
/// leer líneas.
#[derive(Debug)]
pub struct TcpConnection {
    reader: BufReader<TcpStream>,
    eof: bool,
    usable: bool,
}

impl TcpConnection {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            reader: BufReader::new(stream),
            eof: false,
            usable: true,
        }
    }

    /// Abre una conexión a `address:port`
    pub fn connect(address: &str, port: u16) -> io::Result<Self> {
        let stream = TcpStream::connect((address, port))?;
        Ok(Self::new(stream))
    }

    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.reader.get_ref().peer_addr()
    }

    /// Marca la conexión como inusable si `result` es un error
    fn track<T>(&mut self, result: io::Result<T>) -> io::Result<T> {
        if result.is_err() {
            self.usable = false;
        }
        result
    }
}

impl Connection for TcpConnection {
    fn read_line_until(&mut self, delimiter: u8) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        let read = self.reader.read_until(delimiter, &mut line);
        let n = self.track(read)?;
        if n == 0 {
            self.eof = true;
        }
        Ok(line)
    }

    fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let read = (&mut self.reader).take(n as u64).read_to_end(&mut buffer);
        self.track(read)?;
        if buffer.len() < n {
            self.eof = true;
            return Err(short_read(n, buffer.len()));
        }
        Ok(buffer)
    }

    fn write_exactly(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.reader.get_mut();
        let written = stream.write_all(bytes).and_then(|_| stream.flush());
        self.track(written)
    }

    fn at_eof(&self) -> bool {
        self.eof
    }

    fn is_usable(&self) -> bool {
        self.usable
    }

    /// Cierra la escritura, descarta lo que quede por leer y cierra todo
    ///
    /// El `\n` final de un mensaje nunca se lee; cerrar con bytes sin leer
    /// haría que el kernel mande RST y el peer podría perder la reply.
    fn shutdown(&mut self) {
        let stream = self.reader.get_ref();
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            // El peer pudo haber cerrado primero
            debug!(error = %e, "shutdown de socket ya cerrado");
        }

        if stream.set_read_timeout(Some(DRAIN_TIMEOUT)).is_ok() {
            let mut sink = [0u8; 512];
            while let Ok(n) = self.reader.read(&mut sink) {
                if n == 0 {
                    break;
                }
            }
        }

        if let Err(e) = self.reader.get_ref().shutdown(Shutdown::Both) {
            debug!(error = %e, "shutdown final fallido");
        }
        self.eof = true;
        self.usable = false;
    }
}

/// Error de un `read_exactly` que encontró el final del stream
fn short_read(expected: usize, got: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("expected {} bytes, stream ended after {}", expected, got),
    )
}

/// Conexión en memoria: lee de `input` y acumula lo escrito en `output`
#[derive(Debug)]
pub struct MemoryConnection {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
    eof: bool,
    usable: bool,
}

impl MemoryConnection {
    /// Crea una conexión cuya lectura entrega `input`
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: Cursor::new(input.into()),
            output: Vec::new(),
            eof: false,
            usable: true,
        }
    }

    /// Bytes escritos hasta ahora
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl Connection for MemoryConnection {
    fn read_line_until(&mut self, delimiter: u8) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        if self.input.read_until(delimiter, &mut line)? == 0 {
            self.eof = true;
        }
        Ok(line)
    }

    fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        (&mut self.input).take(n as u64).read_to_end(&mut buffer)?;
        if buffer.len() < n {
            self.eof = true;
            return Err(short_read(n, buffer.len()));
        }
        Ok(buffer)
    }

    fn write_exactly(&mut self, bytes: &[u8]) -> io::Result<()> {
        if !self.usable {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "connection shut down"));
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn at_eof(&self) -> bool {
        self.eof
    }

    fn is_usable(&self) -> bool {
        self.usable
    }

    fn shutdown(&mut self) {
        self.eof = true;
        self.usable = false;
    }
}
