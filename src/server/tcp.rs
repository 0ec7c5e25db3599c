//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementacion del servidor TCP que maneja multiples conexiones simultaneas
//! usando threads. Cada conexión se procesa en su propio thread y atiende
//! exactamente un request:
//!
//! ```text
//! accept → receive → dispatch → send → shutdown
//! ```

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::http::Request;
use crate::transport::{TcpConnection, Transport, TransportError};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{error, info, info_span, warn};

/// Servidor de un request por conexión
pub struct Server {
    config: Config,
    dispatcher: Arc<Dispatcher>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor a partir de un despachador ya poblado
    ///
    /// El despachador pasa a ser de solo lectura: el servidor no expone
    /// ninguna forma de modificarlo.
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher: Arc::new(dispatcher),
            listener: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Abre el listener si todavía no existe y retorna la dirección real
    ///
    /// Con puerto 0 el sistema elige uno libre.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        if let Some(listener) = &self.listener {
            return listener.local_addr();
        }

        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        info!(%addr, "servidor escuchando");
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Acepta conexiones para siempre, un thread por conexión
    pub fn run(&mut self) -> io::Result<()> {
        self.bind()?;
        let Some(listener) = self.listener.as_ref() else {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "listener not bound"));
        };
        info!("modo concurrente: un thread por conexión");

        let mut accepted: u64 = 0;
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    accepted += 1;
                    let dispatcher = Arc::clone(&self.dispatcher);
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    thread::spawn(move || {
                        let span = info_span!("conn", id = accepted, %peer);
                        let _guard = span.enter();

                        if let Err(e) = Self::handle_connection(stream, &dispatcher) {
                            warn!(error = %e, "error en la conexión");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "error al aceptar conexión");
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión: un request, una reply, y cierre
    pub fn handle_connection(stream: TcpStream, dispatcher: &Dispatcher) -> Result<(), TransportError> {
        let start = Instant::now();
        let mut transport = Transport::new(TcpConnection::new(stream));

        let request: Request = transport.receive();
        info!(
            line = %request.line(),
            key = %Dispatcher::dispatch_key(&request),
            body_bytes = request.body().size(),
            "request recibido"
        );

        let reply = dispatcher.dispatch(&request);
        let sent = transport.send(&reply);
        transport.shutdown();
        sent?;

        info!(
            status = reply.status(),
            body_bytes = reply.body().size(),
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "reply enviada"
        );
        Ok(())
    }
}

#[cfg(test)]
mod more_server_tests {
    use super::*;
    use crate::commands;
    use crate::http::{Reply, StatusCode};
    use std::io::{Read, Write};
    use std::net::Shutdown;
    use tracing_test::traced_test;

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    /// Acepta una conexión, la atiende con `dispatcher` y retorna lo que
    /// recibió el cliente
    fn exchange(dispatcher: Dispatcher, raw_request: &[u8]) -> String {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let dispatcher = Arc::new(dispatcher);

        let t = thread::spawn({
            let dispatcher = Arc::clone(&dispatcher);
            move || {
                let (stream, _) = listener.accept().unwrap();
                Server::handle_connection(stream, &dispatcher).unwrap();
            }
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw_request).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_handle_connection_post_stub() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_handler("POST", commands::post_stub_handler);

        let text = exchange(
            dispatcher,
            b"POST /foobar.html HTTP/1.1\naction:demo\ncontent-length:11\n\nhello world\n",
        );

        assert!(text.starts_with("HTTP/1.1 200 OK\n"));
        assert!(text.contains("content-length:17\n"));
        assert!(text.ends_with("\n\nPOST message stub\n"));
    }

    #[test]
    fn test_handle_connection_unknown_verb() {
        let text = exchange(Dispatcher::new(), b"DELETE /x HTTP/1.1\n\n");
        assert_eq!(text, "HTTP/1.1 400 error\n\n\n");
    }

    #[test]
    fn test_handle_connection_garbage() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_handler("GET", |_req: &Request| Reply::reply(StatusCode::Ok));

        // Sin líneas suficientes: request por defecto, despachado como GET
        let text = exchange(dispatcher, b"\x00\x01\x02\x03garbage");
        assert!(text.starts_with("HTTP/1.1 200 OK"));
    }

    #[test]
    fn test_handle_connection_header_without_blank_line() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_handler("GET", |req: &Request| {
            Reply::reply(StatusCode::Ok).with_body(req.line().resource().to_string())
        });

        // El cliente cierra su escritura sin mandar la línea vacía
        let text = exchange(dispatcher, b"GET /x HTTP/1.1\n");
        assert_eq!(text, "HTTP/1.1 200 OK\ncontent-length:2\n\n/x\n");
    }

    #[test]
    fn test_handle_connection_oversized_content_length() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_handler("POST", commands::post_stub_handler);

        let text = exchange(
            dispatcher,
            b"POST /x HTTP/1.1\ncontent-length:4611686018427387903\n\nabc\n",
        );
        assert!(text.starts_with("HTTP/1.1 200 OK\n"));
        assert!(text.ends_with("POST message stub\n"));
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            // Recibe un mensaje vacío; el envío de la reply puede fallar
            let _ = Server::handle_connection(stream, &Dispatcher::new());
        });

        drop(TcpStream::connect(addr).unwrap());
        t.join().unwrap();
    }

    #[test]
    #[traced_test]
    fn test_run_serves_many_connections() {
        let mut config = Config::default();
        config.port = 0;
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_handler("POST", commands::post_stub_handler);

        let mut server = Server::new(config, dispatcher);
        let addr = server.bind().unwrap();
        thread::spawn(move || server.run());

        for _ in 0..3 {
            let mut client = TcpStream::connect(addr).unwrap();
            client.write_all(b"POST / HTTP/1.1\n\n\n").unwrap();
            client.shutdown(Shutdown::Write).unwrap();
            let mut text = String::new();
            client.read_to_string(&mut text).unwrap();
            assert!(text.contains("POST message stub"));
        }

        assert!(logs_contain("servidor escuchando"));
    }
}
