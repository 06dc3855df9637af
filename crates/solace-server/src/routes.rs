//! Request routing, independent of the transport.

use serde::Serialize;
use serde_json::{Value, json};
use solace_core::responses::{HealthResponse, PredictResponse, ValidationIssue};
use solace_core::{Label, Prediction, RawInput};
use solace_encoder::FieldIssue;
use solace_report::{Report, banner, format_percent, recommendation};

use crate::error::PredictError;
use crate::html::{self, ResultDetails};
use crate::service::PredictionService;

const JSON: &str = "application/json";
const HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other,
}

/// A fully read request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    pub body: Vec<u8>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: &str, body: impl Into<Vec<u8>>) -> Self {
        let path = url.split('?').next().unwrap_or(url).to_string();
        Self {
            method,
            path,
            body: body.into(),
        }
    }
}

/// Status, content type and body to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: JSON,
                body,
            },
            Err(error) => {
                tracing::error!(%error, "failed to serialize response");
                Self {
                    status: 500,
                    content_type: JSON,
                    body: br#"{"detail":"Internal Server Error"}"#.to_vec(),
                }
            }
        }
    }

    fn detail(status: u16, detail: impl Into<Value>) -> Self {
        Self::json(status, &json!({ "detail": detail.into() }))
    }

    fn html(status: u16, page: String) -> Self {
        Self {
            status,
            content_type: HTML,
            body: page.into_bytes(),
        }
    }

    /// Body as text, for logging and tests.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

const ROUTES: &[&str] = &["/", "/form", "/predict", "/schema", "/health"];

/// Dispatch one request.
#[must_use]
pub fn handle(service: &PredictionService, request: &ApiRequest) -> ApiResponse {
    match (request.method, request.path.as_str()) {
        (Method::Post, "/predict") => predict(service, &request.body),
        (Method::Get, "/") => ApiResponse::html(200, html::form_page(&service.schema().inputs, None, &[])),
        (Method::Post, "/form") => submit_form(service, &request.body),
        (Method::Get, "/schema") => ApiResponse::json(200, service.schema()),
        (Method::Get, "/health") => ApiResponse::json(
            200,
            &HealthResponse {
                status: "ok".into(),
            },
        ),
        (_, path) if ROUTES.contains(&path) => ApiResponse::detail(405, "Method Not Allowed"),
        _ => ApiResponse::detail(404, "Not Found"),
    }
}

fn body_issue(msg: &str, kind: &str) -> Vec<ValidationIssue> {
    vec![ValidationIssue {
        loc: vec!["body".into()],
        msg: msg.into(),
        kind: kind.into(),
    }]
}

fn validation_failure(issues: &[ValidationIssue]) -> ApiResponse {
    ApiResponse::json(422, &json!({ "detail": issues }))
}

fn predict(service: &PredictionService, body: &[u8]) -> ApiResponse {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(error) => {
            return validation_failure(&body_issue(
                &format!("invalid JSON: {error}"),
                "value_error.jsondecode",
            ));
        }
    };
    let Value::Object(object) = value else {
        return validation_failure(&body_issue(
            "value is not a valid dict",
            "type_error.dict",
        ));
    };

    let input = match service.schema().inputs.parse_json(&object) {
        Ok(input) => input,
        Err(issues) => {
            let issues: Vec<_> = issues
                .into_iter()
                .map(|issue| issue.into_validation_issue("body"))
                .collect();
            return validation_failure(&issues);
        }
    };

    match service.predict(&input) {
        Ok(prediction) => ApiResponse::json(
            200,
            &PredictResponse {
                prediction: prediction.label.as_class(),
            },
        ),
        Err(PredictError::Encode(error)) => {
            tracing::debug!(%error, "prediction request rejected");
            ApiResponse::detail(422, error.to_string())
        }
        Err(PredictError::Model(error)) => {
            tracing::error!(%error, "inference failed");
            ApiResponse::detail(500, error.to_string())
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` body into ordered pairs.
fn parse_form(body: &[u8]) -> Result<Vec<(String, String)>, String> {
    let text = std::str::from_utf8(body).map_err(|e| format!("form body is not UTF-8: {e}"))?;
    text.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Result<String, String> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| format!("URL decode: {e}"))
}

fn issue_messages(issues: &[FieldIssue]) -> Vec<String> {
    issues.iter().map(ToString::to_string).collect()
}

fn submit_form(service: &PredictionService, body: &[u8]) -> ApiResponse {
    let inputs = &service.schema().inputs;
    let pairs = match parse_form(body) {
        Ok(pairs) => pairs,
        Err(message) => {
            return ApiResponse::html(422, html::form_page(inputs, None, &[message]));
        }
    };

    let input = match inputs.parse_pairs(&pairs) {
        Ok(input) => input,
        Err(issues) => {
            let partial: RawInput = pairs.into_iter().collect();
            return ApiResponse::html(
                422,
                html::form_page(inputs, Some(&partial), &issue_messages(&issues)),
            );
        }
    };

    let out_of_range = inputs.check_bounds(&input);
    if !out_of_range.is_empty() {
        return ApiResponse::html(
            422,
            html::form_page(inputs, Some(&input), &issue_messages(&out_of_range)),
        );
    }

    match service.predict(&input) {
        Ok(prediction) => ApiResponse::html(200, render_result(service, &input, &prediction)),
        Err(PredictError::Encode(error)) => ApiResponse::html(
            422,
            html::form_page(inputs, Some(&input), &[error.to_string()]),
        ),
        Err(PredictError::Model(error)) => {
            tracing::error!(%error, "inference failed");
            ApiResponse::html(500, html::error_page(&error.to_string()))
        }
    }
}

fn render_result(service: &PredictionService, input: &RawInput, prediction: &Prediction) -> String {
    let presentation = service.presentation();
    let mut details = ResultDetails::default();

    if presentation.detailed {
        details.probability = Some(format_percent(prediction));
        details.recommendation = Some(recommendation(prediction.tier()).to_string());
    }

    if presentation.report {
        match Report::new(&service.schema().inputs, input, prediction) {
            Ok(report) => {
                tracing::debug!(id = %report.id, "report generated");
                details.report = Some((report.data_uri(), presentation.report_filename.clone()));
            }
            Err(error) => tracing::warn!(%error, "report unavailable"),
        }
    }

    html::result_page(
        banner(prediction.label),
        prediction.label == Label::Likely,
        &details,
    )
}
