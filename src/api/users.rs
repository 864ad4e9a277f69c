use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::config::Settings;
use crate::models::UserRecord;
use super::client::{api_call, error_message, ApiResponse};
use super::gateway::{GatewayError, MutationOutcome, UsersGateway};

/// Users gateway speaking JSON over HTTP to a REST collection resource.
#[derive(Clone)]
pub struct HttpUsersGateway {
    client: reqwest::Client,
    api_base_url: String,
    api_token: String,
    endpoint: String,
}

impl HttpUsersGateway {
    pub fn new(client: reqwest::Client, api_base_url: &str, api_token: &str, endpoint: &str) -> Self {
        Self {
            client,
            api_base_url: api_base_url.to_string(),
            api_token: api_token.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn from_settings(client: reqwest::Client, settings: &Settings) -> Self {
        Self::new(client, &settings.api_base_url, &settings.api_token, &settings.users_endpoint)
    }

    fn item_endpoint(&self, id: i64) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    async fn call(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<ApiResponse, GatewayError> {
        api_call(&self.client, &self.api_base_url, &self.api_token, method, endpoint, body).await
    }

    async fn mutate(&self, method: Method, endpoint: &str, record: &UserRecord) -> Result<MutationOutcome, GatewayError> {
        let body = serde_json::to_value(record).map_err(|e| GatewayError::Decode(e.to_string()))?;
        let resp = self.call(method, endpoint, Some(&body)).await?;
        if resp.status == StatusCode::CONFLICT {
            let message = error_message(&resp.body, resp.status);
            tracing::warn!(%message, "Users API reported a conflict");
            return Ok(MutationOutcome::Conflict(message));
        }
        let payload = ensure_success(resp)?;
        // Some servers answer 204 with no body; the submitted record stands in.
        if payload.is_null() {
            return Ok(MutationOutcome::Saved(record.clone()));
        }
        let saved = serde_json::from_value::<UserRecord>(payload)
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(MutationOutcome::Saved(saved))
    }
}

/// Reject non-2xx responses and unwrap an optional `{"data": ...}` envelope.
fn ensure_success(resp: ApiResponse) -> Result<Value, GatewayError> {
    if !resp.status.is_success() {
        let message = error_message(&resp.body, resp.status);
        tracing::error!(status = resp.status.as_u16(), %message, "Users API returned error");
        return Err(GatewayError::Status { status: resp.status.as_u16(), message });
    }
    let body = resp.body;
    match body {
        Value::Object(mut obj) if obj.contains_key("data") => Ok(obj.remove("data").unwrap_or(Value::Null)),
        other => Ok(other),
    }
}

#[async_trait]
impl UsersGateway for HttpUsersGateway {
    async fn list(&self) -> Result<Vec<UserRecord>, GatewayError> {
        let resp = self.call(Method::GET, &self.endpoint, None).await?;
        let payload = ensure_success(resp)?;
        if !payload.is_array() {
            return Err(GatewayError::Decode("expected a list of users".into()));
        }
        serde_json::from_value(payload).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn create(&self, record: &UserRecord) -> Result<MutationOutcome, GatewayError> {
        tracing::info!(username = %record.username, "Creating user");
        self.mutate(Method::POST, &self.endpoint, record).await
    }

    async fn update(&self, id: i64, record: &UserRecord) -> Result<MutationOutcome, GatewayError> {
        tracing::info!(id, username = %record.username, "Updating user");
        let endpoint = self.item_endpoint(id);
        self.mutate(Method::PUT, &endpoint, record).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), GatewayError> {
        tracing::info!(id, "Deleting user");
        let endpoint = self.item_endpoint(id);
        let resp = self.call(Method::DELETE, &endpoint, None).await?;
        ensure_success(resp).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ensure_success_unwraps_data_envelope() {
        let resp = ApiResponse { status: StatusCode::OK, body: json!({"data": [1, 2]}) };
        assert_eq!(ensure_success(resp).unwrap(), json!([1, 2]));
    }

    #[test]
    fn ensure_success_maps_error_status() {
        let resp = ApiResponse { status: StatusCode::INTERNAL_SERVER_ERROR, body: json!({"message": "db down"}) };
        match ensure_success(resp) {
            Err(GatewayError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn item_endpoint_appends_id() {
        let gw = HttpUsersGateway::new(reqwest::Client::new(), "http://h", "", "/api/users");
        assert_eq!(gw.item_endpoint(5), "/api/users/5");
    }
}
