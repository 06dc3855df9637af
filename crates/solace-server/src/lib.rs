//! # solace-server
//!
//! The [`PredictionService`] (encoder, feature list and model, loaded once)
//! and the HTTP surface in front of it.
//!
//! | Route           | Response                                        |
//! |-----------------|-------------------------------------------------|
//! | `POST /predict` | `{"prediction": 0 \| 1}` or `422` / `500` detail |
//! | `GET /`         | HTML form                                       |
//! | `POST /form`    | HTML result with banner and PDF link            |
//! | `GET /schema`   | active encoding schema                          |
//! | `GET /health`   | `{"status": "ok"}`                              |
//!
//! Routing ([`handle`]) is a pure function of the service and a fully read
//! request; [`HttpServer`] only moves bytes between it and tiny_http.

pub mod error;
pub mod html;
mod routes;
mod server;
mod service;

pub use error::{PredictError, ServerError};
pub use routes::{ApiRequest, ApiResponse, Method, handle};
pub use server::{HttpServer, MAX_BODY_BYTES, RunningServer, ShutdownHandle};
pub use service::PredictionService;
