//! Real sockets: bind on port 0, talk raw HTTP/1.1 over `TcpStream`.

mod common;

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use solace_server::{HttpServer, RunningServer};

use common::{SAMPLE_BODY, basic_config, service};

fn start() -> (RunningServer, u16) {
    let server = HttpServer::bind("127.0.0.1:0").expect("bind");
    let port = server.local_addr().expect("ip address").port();
    let running = server.start(Arc::new(service(&basic_config())), 2);
    (running, port)
}

fn exchange(port: u16, request: &str) -> String {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{port}")).expect("TCP connect failed");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set_read_timeout failed");
    stream.write_all(request.as_bytes()).expect("write failed");
    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read failed");
    String::from_utf8_lossy(&response).into_owned()
}

fn post_json(port: u16, path: &str, body: &str) -> String {
    exchange(
        port,
        &format!(
            "POST {path} HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
}

fn body_of(response: &str) -> &str {
    response.split_once("\r\n\r\n").map_or("", |(_, body)| body)
}

#[test]
fn predict_over_http() {
    let (running, port) = start();

    let response = post_json(port, "/predict", SAMPLE_BODY);
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("Content-Type: application/json"));
    let json: serde_json::Value = serde_json::from_str(body_of(&response)).expect("JSON body");
    let prediction = json["prediction"].as_u64().expect("integer prediction");
    assert!(prediction == 0 || prediction == 1);

    running.stop();
}

#[test]
fn validation_and_routing_errors_over_http() {
    let (running, port) = start();

    let response = post_json(port, "/predict", r#"{"Age": 30}"#);
    assert!(response.starts_with("HTTP/1.1 422"), "got: {response}");
    assert!(body_of(&response).contains("\"loc\":[\"body\",\"Gender\"]"));

    let response = exchange(
        port,
        &format!("GET /missing HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n"),
    );
    assert!(response.starts_with("HTTP/1.1 404"), "got: {response}");

    running.stop();
}

#[test]
fn health_and_form_over_http() {
    let (running, port) = start();

    let health = exchange(
        port,
        &format!("GET /health HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n"),
    );
    assert_eq!(body_of(&health), r#"{"status":"ok"}"#);

    let form = exchange(
        port,
        &format!("GET / HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n"),
    );
    assert!(form.contains("text/html"));
    assert!(form.contains("<form method=\"post\" action=\"/form\">"));

    running.stop();
}

#[test]
fn shutdown_releases_every_worker() {
    let server = HttpServer::bind("127.0.0.1:0").expect("bind");
    let running = server.start(Arc::new(service(&basic_config())), 4);
    let handle = running.shutdown_handle();

    let waiter = std::thread::spawn(move || running.join());
    handle.shutdown();
    waiter.join().expect("workers exit without panicking");
}
