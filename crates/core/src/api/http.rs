use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::{redact_query, CoreError};
use crate::models::settings::Settings;
use crate::models::transaction::{NewTransaction, PendingRequest, Transaction, TransactionUpdate};
use crate::models::user::{ApiMessage, ProfilePictureResponse, SignInResponse, User};

use super::credentials::Credential;
use super::traits::{FundApi, UserAction};

/// Longest slice of a non-JSON error body carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Multipart field name expected by the upload endpoint.
const PROFILE_PIC_FIELD: &str = "profilePic";

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct PortfolioBody {
    portfolio: f64,
}

/// REST client for the fund server.
///
/// - **Auth**: `Authorization: Bearer <token>` taken from the [`Credential`]
///   argument of each call.
/// - **Errors**: non-2xx responses become [`CoreError::Unauthorized`] (401/403)
///   or [`CoreError::Api`], carrying the server's `message` field when present.
#[derive(Debug, Clone)]
pub struct HttpFundApi {
    client: Client,
    base_url: String,
}

impl HttpFundApi {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to initialize HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal ────────────────────────────────────────────────────

    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("[FundApi] {method} {url}");
        let builder = self.client.request(method, url);
        match credential {
            Some(c) => builder.header(AUTHORIZATION, c.authorization_header()),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, CoreError> {
        let body = Self::read_success(builder.send().await?).await?;
        serde_json::from_str(&body).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse fund API response: {e}"))
        })
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), CoreError> {
        Self::read_success(builder.send().await?).await?;
        Ok(())
    }

    async fn read_success(response: Response) -> Result<String, CoreError> {
        let status = response.status();
        let url = redact_query(response.url().as_str());
        let body = response.text().await?;

        if !status.is_success() {
            warn!("[FundApi] {url} returned HTTP {}", status.as_u16());
            return Err(error_from_response(status, &body));
        }
        Ok(body)
    }
}

/// Map a failed response to a [`CoreError`], preferring the server's own message.
fn error_from_response(status: StatusCode, body: &str) -> CoreError {
    let message = serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let snippet: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
            if snippet.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                snippet
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::Unauthorized(message),
        _ => CoreError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Validate an identifier before splicing it into a URL path.
fn path_id<'a>(kind: &str, id: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '?', '#']) {
        return Err(CoreError::ValidationError(format!("Invalid {kind} id '{id}'")));
    }
    Ok(trimmed)
}

/// MIME type for an uploaded picture, from its file extension.
fn image_mime(file_name: &str) -> Result<&'static str, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        _ => Err(CoreError::ValidationError(format!(
            "'{file_name}' is not a supported image (png, jpg, gif, webp)"
        ))),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FundApi for HttpFundApi {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse, CoreError> {
        let builder = self
            .request(Method::POST, "/api/signin", None)
            .json(&SignInBody { email, password });
        self.send_json(builder).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<ApiMessage, CoreError> {
        let builder = self
            .request(Method::POST, "/api/signup", None)
            .json(&SignUpBody {
                email,
                password,
                name,
            });
        self.send_json(builder).await
    }

    async fn current_user(&self, credential: &Credential) -> Result<User, CoreError> {
        let builder = self.request(Method::GET, "/api/user", Some(credential));
        self.send_json(builder).await
    }

    async fn list_transactions(
        &self,
        credential: &Credential,
        user_id: &str,
    ) -> Result<Vec<Transaction>, CoreError> {
        let path = format!("/api/transactions/{}", path_id("user", user_id)?);
        let builder = self.request(Method::GET, &path, Some(credential));
        self.send_json(builder).await
    }

    async fn create_transaction(
        &self,
        credential: &Credential,
        transaction: &NewTransaction,
    ) -> Result<(), CoreError> {
        let builder = self
            .request(Method::POST, "/api/transactions", Some(credential))
            .json(transaction);
        self.send_empty(builder).await
    }

    async fn upload_profile_picture(
        &self,
        credential: &Credential,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ProfilePictureResponse, CoreError> {
        let mime = image_mime(file_name)?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new().part(PROFILE_PIC_FIELD, part);

        let builder = self
            .request(Method::POST, "/api/users/profile-pic", Some(credential))
            .multipart(form);
        self.send_json(builder).await
    }

    async fn update_transaction(
        &self,
        credential: &Credential,
        transaction_id: &str,
        update: &TransactionUpdate,
    ) -> Result<(), CoreError> {
        let path = format!(
            "/api/transactions/{}",
            path_id("transaction", transaction_id)?
        );
        let builder = self
            .request(Method::PUT, &path, Some(credential))
            .json(update);
        self.send_empty(builder).await
    }

    async fn delete_transaction(
        &self,
        credential: &Credential,
        transaction_id: &str,
    ) -> Result<(), CoreError> {
        let path = format!(
            "/api/transactions/{}",
            path_id("transaction", transaction_id)?
        );
        let builder = self.request(Method::DELETE, &path, Some(credential));
        self.send_empty(builder).await
    }

    async fn list_users(&self, credential: &Credential) -> Result<Vec<User>, CoreError> {
        let builder = self.request(Method::GET, "/api/users", Some(credential));
        self.send_json(builder).await
    }

    async fn pending_requests(
        &self,
        credential: &Credential,
    ) -> Result<Vec<PendingRequest>, CoreError> {
        let builder = self.request(Method::GET, "/api/pending-requests", Some(credential));
        self.send_json(builder).await
    }

    async fn moderate_user(
        &self,
        credential: &Credential,
        user_id: &str,
        action: UserAction,
    ) -> Result<(), CoreError> {
        let path = format!(
            "/api/users/{}/{}",
            path_id("user", user_id)?,
            action.path_segment()
        );
        let builder = self
            .request(Method::POST, &path, Some(credential))
            .json(&serde_json::json!({}));
        self.send_empty(builder).await
    }

    async fn set_portfolio(
        &self,
        credential: &Credential,
        user_id: &str,
        portfolio: f64,
    ) -> Result<(), CoreError> {
        let path = format!("/api/users/{}/portfolio", path_id("user", user_id)?);
        let builder = self
            .request(Method::POST, &path, Some(credential))
            .json(&PortfolioBody { portfolio });
        self.send_empty(builder).await
    }
}
