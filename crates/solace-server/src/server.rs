//! tiny_http transport: a fixed pool of worker threads sharing one listener.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::error::ServerError;
use crate::routes::{ApiRequest, ApiResponse, Method, handle};
use crate::service::PredictionService;

/// Request bodies above this size are refused with 413.
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

/// A bound listener, not yet serving.
pub struct HttpServer {
    inner: Arc<tiny_http::Server>,
    shutdown: Arc<AtomicBool>,
}

/// Stops a running [`HttpServer`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    inner: Arc<tiny_http::Server>,
    shutdown: Arc<AtomicBool>,
    workers: usize,
}

impl ShutdownHandle {
    /// Wake every worker and let it exit after its current request.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Each unblock call releases exactly one waiting worker.
        for _ in 0..self.workers {
            self.inner.unblock();
        }
    }
}

/// Worker threads of a running server.
pub struct RunningServer {
    handle: ShutdownHandle,
    workers: Vec<JoinHandle<()>>,
}

impl RunningServer {
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    /// Block until every worker has exited.
    pub fn join(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }

    /// Shut down and wait for the workers.
    pub fn stop(self) {
        self.handle.shutdown();
        self.join();
    }
}

impl HttpServer {
    /// Bind to `address` (`host:port`; port 0 picks a free port).
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address is unavailable.
    pub fn bind(address: &str) -> Result<Self, ServerError> {
        let server = tiny_http::Server::http(address).map_err(|e| ServerError::Bind {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            inner: Arc::new(server),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The bound address, useful after binding to port 0.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.inner.server_addr().to_ip()
    }

    /// Start `workers` threads answering requests with `service`.
    #[must_use]
    pub fn start(self, service: Arc<PredictionService>, workers: usize) -> RunningServer {
        let workers = workers.max(1);
        if let Some(addr) = self.local_addr() {
            tracing::info!(%addr, workers, "listening");
        }

        let handles = (0..workers)
            .map(|id| {
                let server = Arc::clone(&self.inner);
                let shutdown = Arc::clone(&self.shutdown);
                let service = Arc::clone(&service);
                std::thread::spawn(move || worker_loop(id, &server, &shutdown, &service))
            })
            .collect();

        RunningServer {
            handle: ShutdownHandle {
                inner: self.inner,
                shutdown: self.shutdown,
                workers,
            },
            workers: handles,
        }
    }
}

fn worker_loop(
    id: usize,
    server: &tiny_http::Server,
    shutdown: &AtomicBool,
    service: &PredictionService,
) {
    loop {
        match server.recv() {
            Ok(request) => serve(service, request),
            Err(error) => {
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                tracing::warn!(worker = id, %error, "failed to receive request");
            }
        }
    }
    tracing::debug!(worker = id, "worker stopped");
}

fn serve(service: &PredictionService, mut request: tiny_http::Request) {
    let method = match request.method() {
        tiny_http::Method::Get => Method::Get,
        tiny_http::Method::Post => Method::Post,
        _ => Method::Other,
    };
    let url = request.url().to_string();

    let response = if request
        .body_length()
        .is_some_and(|len| len as u64 > MAX_BODY_BYTES)
    {
        too_large()
    } else {
        let mut body = Vec::new();
        match request
            .as_reader()
            .take(MAX_BODY_BYTES + 1)
            .read_to_end(&mut body)
        {
            Ok(_) if body.len() as u64 > MAX_BODY_BYTES => too_large(),
            Ok(_) => handle(service, &ApiRequest::new(method, &url, body)),
            Err(error) => {
                tracing::warn!(%error, "failed to read request body");
                return;
            }
        }
    };

    tracing::debug!(method = %request.method(), %url, status = response.status, "request");
    respond(request, response);
}

fn too_large() -> ApiResponse {
    ApiResponse {
        status: 413,
        content_type: "application/json",
        body: br#"{"detail":"Request Entity Too Large"}"#.to_vec(),
    }
}

fn respond(request: tiny_http::Request, response: ApiResponse) {
    let mut reply =
        tiny_http::Response::from_data(response.body).with_status_code(response.status);
    if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", response.content_type) {
        reply = reply.with_header(header);
    }
    if let Err(error) = request.respond(reply) {
        tracing::warn!(%error, "failed to send response");
    }
}
