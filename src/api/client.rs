use reqwest::{Method, StatusCode};
use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use super::gateway::GatewayError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Status and decoded body of a completed request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Render the request as the equivalent curl command line.
pub fn curl_line(method: &Method, url: &str, api_token: &str, body: Option<&Value>) -> String {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

    if !api_token.is_empty() {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Authorization: Bearer ***'").fg(yansi::Color::Magenta)
        ));
    }
    if let Some(d) = body {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    parts.join(" ")
}

/// Core HTTP call used by the gateway.
/// Echoes the request and response to the terminal unless silenced.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    method: Method,
    endpoint: &str,
    body: Option<&Value>,
) -> Result<ApiResponse, GatewayError> {
    let url = format!("{}{}", api_base_url, endpoint);
    log_output(format!("Request:\n{}", curl_line(&method, &url, api_token, body)));
    tracing::debug!(%method, %url, "Sending request");

    let mut req = client.request(method, &url);
    if !api_token.is_empty() {
        req = req.bearer_auth(api_token);
    }
    if let Some(b) = body {
        req = req.json(b);
    }

    let resp = req.send().await.map_err(|e| {
        tracing::error!(%e, %url, "Request failed");
        GatewayError::Network(e.to_string())
    })?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    let json_str = serde_json::to_string(&body).unwrap_or_else(|_| format!("{:?}", body));
    let response_str = Paint::new(format!("{} {}", status.as_u16(), json_str)).rgb(100, 100, 100).to_string();
    log_output(format!("Response:\n{}", response_str));

    Ok(ApiResponse { status, body })
}

/// Pull the human-readable message out of an error body.
///
/// Servers answer with `{"message": ...}`; a bare string body is used as is.
pub fn error_message(body: &Value, status: StatusCode) -> String {
    body.get("message")
        .or_else(|| body.get("detail"))
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .or_else(|| body.as_str().filter(|s| !s.is_empty()).map(|s| s.to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string())
}
