//! Tests de integración: servidor y cliente reales sobre TCP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, con un
//! directorio raíz temporal que contiene `debug/Hello1.html`.

use http_comm::client::Client;
use http_comm::commands::{self, POST_STUB_BODY};
use http_comm::config::Config;
use http_comm::dispatcher::Dispatcher;
use http_comm::http::message::{ACTION, COMMAND};
use http_comm::http::{Command, Reply, Request, StatusCode};
use http_comm::server::Server;
use http_comm::transport::TransportError;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

const HELLO: &str = "<html><body>Hello 1</body></html>";

/// Crea un directorio raíz temporal único para el test
fn scratch_root(tag: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let root = std::env::temp_dir().join(format!(
        "http_comm_it_{}_{}_{}",
        tag,
        std::process::id(),
        n
    ));
    fs::create_dir_all(root.join("debug")).unwrap();
    fs::write(root.join("debug/Hello1.html"), HELLO).unwrap();
    root
}

/// Levanta un servidor con los handlers por defecto y retorna su puerto
fn start_server(tag: &str) -> u16 {
    let root = scratch_root(tag);
    let mut config = Config::default();
    config.port = 0;
    config.root_dir = root.clone();

    let mut dispatcher = Dispatcher::new();
    commands::register_defaults(&mut dispatcher, &root);

    let mut server = Server::new(config, dispatcher);
    let port = server.bind().unwrap().port();
    thread::spawn(move || server.run());
    port
}

/// Un intercambio completo en una conexión nueva
fn exchange(port: u16, request: &Request) -> Reply {
    let mut client = Client::new();
    assert!(client.connect("127.0.0.1", port), "connect failed");
    client.post_message(request).unwrap()
}

#[test]
fn test_get_existing_file() {
    let port = start_server("get");

    let reply = exchange(port, &Request::request(Command::GET, "/debug/Hello1.html"));

    assert_eq!(reply.status(), 200);
    assert_eq!(reply.line().reason(), "OK");
    assert_eq!(reply.body().as_bytes(), HELLO.as_bytes());
    assert_eq!(reply.content_length(), HELLO.len());
}

#[test]
fn test_get_missing_file() {
    let port = start_server("missing");

    let reply = exchange(port, &Request::request(Command::GET, "/debug/nope.html"));
    assert_eq!(reply.status(), 404);
    assert!(reply.body().is_empty());

    let reply = exchange(port, &Request::request(Command::GET, "/../etc/passwd"));
    assert_eq!(reply.status(), 404);
}

#[test]
fn test_post_stub() {
    let port = start_server("post");

    let request = Request::request(Command::POST, "/foobar.html")
        .with_attribute(ACTION, "demo")
        .with_body("hello world");
    let reply = exchange(port, &request);

    assert_eq!(reply.status(), 200);
    assert_eq!(reply.body().as_bytes(), POST_STUB_BODY.as_bytes());
    assert_eq!(reply.content_length(), 17);
}

#[test]
fn test_unregistered_command() {
    let port = start_server("command");

    let request = Request::request(Command::GET, "/debug/Hello1.html").with_attribute(COMMAND, "doIt");
    let reply = exchange(port, &request);

    assert_eq!(reply.status(), StatusCode::BadRequest.as_u16());
    assert!(reply.body().is_empty());
}

#[test]
fn test_unregistered_verb() {
    let port = start_server("verb");

    let reply = exchange(port, &Request::request(Command::DELETE, "/x"));
    assert_eq!(reply.status(), 400);
}

#[test]
fn test_echo_command() {
    let port = start_server("echo");

    let request = Request::request(Command::PUT, "/thing")
        .with_attribute(COMMAND, commands::ECHO_COMMAND)
        .with_body(vec![0u8, 1, 2, b'\n', 255]);
    let reply = exchange(port, &request);

    assert_eq!(reply.status(), 200);
    let json: serde_json::Value = serde_json::from_slice(reply.body().as_bytes()).unwrap();
    assert_eq!(json["line"]["command"], "PUT");
    assert_eq!(json["body_length"], 5);
}

#[test]
fn test_concurrent_clients() {
    let port = start_server("concurrent");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let request = if i % 2 == 0 {
                    Request::request(Command::GET, "/debug/Hello1.html")
                } else {
                    Request::request(Command::POST, "/foobar.html").with_body("x")
                };
                exchange(port, &request)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let reply = handle.join().unwrap();
        assert_eq!(reply.status(), 200);
        let expected = if i % 2 == 0 { HELLO } else { POST_STUB_BODY };
        assert_eq!(reply.body().as_bytes(), expected.as_bytes());
    }
}

#[test]
fn test_failed_connect() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut client = Client::new();
    assert!(!client.connect("127.0.0.1", port));
    assert!(matches!(
        client.post_message(&Request::default()),
        Err(TransportError::NotConnected)
    ));
}

#[test]
fn test_reconnect_between_exchanges() {
    let port = start_server("reconnect");
    let mut client = Client::new();

    for _ in 0..3 {
        assert!(client.connect("127.0.0.1", port));
        let reply = client
            .post_message(&Request::request(Command::GET, "/debug/Hello1.html"))
            .unwrap();
        assert_eq!(reply.status(), 200);
        assert!(!client.is_connected());
    }
}
