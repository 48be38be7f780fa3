use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::envelope::{check_status, unwrap_payload};
use super::error::ApiError;
use super::types::*;

/// Typed client for the wiki backend's admin REST API.
///
/// One instance per invocation; the bearer token comes from the config
/// written by `kbctl login`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    pub fn new(base: &str, token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("kbctl/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, format!("{}{}", self.base, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Execute a request and return the response body as JSON, mapping
    /// transport failures and non-2xx statuses onto [`ApiError`].
    async fn send(&self, req: RequestBuilder) -> Result<Value, ApiError> {
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Error responses usually still carry the envelope's message
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(ApiError::Api {
                    message: parsed.message,
                });
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // --- guest users ---------------------------------------------------

    pub async fn list_guest_users(&self) -> Result<Vec<UserListItem>, ApiError> {
        let body = self
            .send(self.request(Method::GET, "/api/v1/user/guest/list"))
            .await?;
        let resp: UserListResp = unwrap_payload(body)?;
        Ok(resp.users)
    }

    pub async fn create_guest_user(&self, req: &CreateUserReq) -> Result<CreateUserResp, ApiError> {
        let body = self
            .send(self.request(Method::POST, "/api/v1/user/guest/create").json(req))
            .await?;
        unwrap_payload(body)
    }

    pub async fn update_guest_user(&self, id: &str, req: &CreateUserReq) -> Result<(), ApiError> {
        let body = self
            .send(
                self.request(Method::PUT, &format!("/api/v1/user/guest/{id}"))
                    .json(req),
            )
            .await?;
        check_status(body)
    }

    pub async fn delete_guest_user(&self, id: &str) -> Result<(), ApiError> {
        let body = self
            .send(self.request(Method::DELETE, &format!("/api/v1/user/guest/{id}")))
            .await?;
        check_status(body)
    }

    // --- auth groups ---------------------------------------------------

    pub async fn list_auth_groups(&self, kb_id: &str) -> Result<Vec<AuthGroup>, ApiError> {
        let body = self
            .send(
                self.request(Method::GET, "/api/v1/user/auth_group/list")
                    .query(&[("kb_id", kb_id)]),
            )
            .await?;
        let resp: AuthGroupListResp = unwrap_payload(body)?;
        Ok(resp.groups)
    }

    pub async fn create_auth_group(
        &self,
        req: &CreateAuthGroupReq,
    ) -> Result<CreateAuthGroupResp, ApiError> {
        let body = self
            .send(
                self.request(Method::POST, "/api/v1/user/auth_group/create")
                    .json(req),
            )
            .await?;
        unwrap_payload(body)
    }

    pub async fn update_auth_group(
        &self,
        id: u64,
        req: &UpdateAuthGroupReq,
    ) -> Result<(), ApiError> {
        let body = self
            .send(
                self.request(Method::PUT, &format!("/api/v1/user/auth_group/{id}"))
                    .json(req),
            )
            .await?;
        check_status(body)
    }

    pub async fn delete_auth_group(&self, id: u64) -> Result<(), ApiError> {
        let body = self
            .send(self.request(Method::DELETE, &format!("/api/v1/user/auth_group/{id}")))
            .await?;
        check_status(body)
    }

    // --- user group membership -----------------------------------------

    pub async fn user_groups(&self, user_id: &str) -> Result<Vec<AuthGroup>, ApiError> {
        let body = self
            .send(
                self.request(Method::GET, "/api/v1/user/groups")
                    .query(&[("user_id", user_id)]),
            )
            .await?;
        let resp: UserGroupsResp = unwrap_payload(body)?;
        Ok(resp.groups)
    }

    pub async fn set_user_groups(&self, req: &UpdateUserGroupsReq) -> Result<(), ApiError> {
        let body = self
            .send(self.request(Method::PUT, "/api/v1/user/groups").json(req))
            .await?;
        check_status(body)
    }

    // --- session --------------------------------------------------------

    pub async fn login(&self, account: &str, password: &str) -> Result<String, ApiError> {
        let req = LoginReq {
            account: account.to_string(),
            password: password.to_string(),
        };
        let body = self
            .send(self.request(Method::POST, "/api/v1/user/login").json(&req))
            .await?;
        let resp: LoginResp = unwrap_payload(body)?;
        Ok(resp.token)
    }
}
