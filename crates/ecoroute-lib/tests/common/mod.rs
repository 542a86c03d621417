#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use ecoroute_lib::{FuelType, Location, ProviderSettings, RetryPolicy, Vehicle};

/// Canned HTTP answer served by [`StubServer`].
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Minimal HTTP/1.1 server answering a fixed sequence of requests.
///
/// Each accepted connection receives the next canned response; the request
/// line (method and path with query) is reported through `requests`.
pub struct StubServer {
    pub base_url: String,
    pub requests: Receiver<String>,
}

impl StubServer {
    pub fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let port = listener.local_addr().expect("local addr").port();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request_line = read_request_line(&mut stream);
                let _ = tx.send(request_line);
                let reply = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    response.body.len(),
                    response.body
                );
                let _ = stream.write_all(reply.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests: rx,
        }
    }

    /// Request lines received so far.
    pub fn received(&self) -> Vec<String> {
        self.requests.try_iter().collect()
    }
}

fn read_request_line(stream: &mut TcpStream) -> String {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set read timeout");
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buffer)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Server that accepts connections but never answers them.
///
/// One `()` is sent on `connections` per accepted connection. Sockets are
/// held open so clients observe a timeout rather than a reset.
pub struct SilentServer {
    pub base_url: String,
    pub connections: Receiver<()>,
}

impl SilentServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent server");
        let port = listener.local_addr().expect("local addr").port();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    return;
                };
                held.push(stream);
                let _ = tx.send(());
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            connections: rx,
        }
    }

    pub fn accepted(&self) -> usize {
        self.connections.try_iter().count()
    }
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Provider settings with short timeouts and instant retries.
pub fn fast_settings(max_retries: u32) -> ProviderSettings {
    ProviderSettings {
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        retry: RetryPolicy {
            max_retries,
            backoff_base: Duration::ZERO,
            ..RetryPolicy::default()
        },
        use_system_proxy: false,
    }
}

pub fn diesel_truck(capacity: f64, load: f64) -> Vehicle {
    Vehicle {
        id: "TRK-100".to_string(),
        vehicle_type: "box_truck".to_string(),
        fuel_type: FuelType::Diesel,
        fuel_efficiency: 4.2,
        cargo_capacity: capacity,
        current_load: load,
    }
}

pub fn berlin() -> Location {
    Location::new(52.52, 13.405, "Alexanderplatz, Berlin")
}

pub fn potsdam() -> Location {
    Location::new(52.3906, 13.0645, "Potsdam Hbf")
}

pub fn leipzig() -> Location {
    Location::new(51.3397, 12.3731, "Leipzig Markt")
}
