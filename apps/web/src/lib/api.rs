//! HTTP client for the Buku API with consistent timeouts and error handling.
//! Feature gateways go through [`ApiClient`] to avoid duplicating request
//! setup: it unwraps the response envelope, attaches the stored credential on
//! authorized calls, and funnels every 401 on an authorized call through one
//! callback so session teardown happens in exactly one place.

use super::config::AppConfig;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use identity::CredentialStore;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::to_string;
use session::GatewayError;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{AbortController, FormData};

/// Default request timeout (milliseconds) applied to all requests.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Response envelope every API endpoint wraps its payload in. Only the
/// fields we read are declared; the envelope also carries a numeric status.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    message: Option<String>,
}

/// Shared HTTP client.
///
/// A 401 on an authorized call means the credential is no longer accepted;
/// the client reports it through the unauthorized handler exactly once per
/// response and returns [`GatewayError::Unauthorized`] to the caller.
/// Unauthenticated calls (login, registration) never trigger the handler; a
/// 401 there is a failed sign-in, not a lost session.
pub(crate) struct ApiClient {
    base_url: String,
    credentials: Rc<dyn CredentialStore>,
    on_unauthorized: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, credentials: Rc<dyn CredentialStore>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            credentials,
            on_unauthorized: RefCell::new(None),
        }
    }

    /// Registers the callback invoked when an authorized call answers 401.
    pub fn set_unauthorized_handler(&self, handler: Rc<dyn Fn()>) {
        *self.on_unauthorized.borrow_mut() = Some(handler);
    }

    /// Fetches JSON with the stored credential attached.
    pub async fn get_json_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path);
        let authorization = self.authorization_header()?;
        let response = send_with_timeout(|signal| {
            Request::get(&url)
                .header("Authorization", &authorization)
                .abort_signal(Some(signal))
                .build()
                .map_err(|err| GatewayError::Network(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_envelope_response(response, true).await
    }

    /// Posts JSON without a credential, for sign-in and registration calls.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path);
        let payload = to_string(body)
            .map_err(|err| GatewayError::Network(format!("Failed to encode request: {err}")))?;
        let response = send_with_timeout(move |signal| {
            Request::post(&url)
                .header("Content-Type", "application/json")
                .abort_signal(Some(signal))
                .body(payload)
                .map_err(|err| GatewayError::Network(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_envelope_response(response, false).await
    }

    /// Posts multipart form data without a credential. The browser sets the
    /// content type, boundary included.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &FormData,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path);
        let response = send_with_timeout(|signal| {
            Request::post(&url)
                .abort_signal(Some(signal))
                .body(form.clone())
                .map_err(|err| GatewayError::Network(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_envelope_response(response, false).await
    }

    /// Posts multipart form data with the stored credential attached.
    pub async fn post_multipart_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &FormData,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path);
        let authorization = self.authorization_header()?;
        let response = send_with_timeout(|signal| {
            Request::post(&url)
                .header("Authorization", &authorization)
                .abort_signal(Some(signal))
                .body(form.clone())
                .map_err(|err| GatewayError::Network(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_envelope_response(response, true).await
    }

    /// Puts multipart form data with the stored credential attached.
    pub async fn put_multipart_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &FormData,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path);
        let authorization = self.authorization_header()?;
        let response = send_with_timeout(|signal| {
            Request::put(&url)
                .header("Authorization", &authorization)
                .abort_signal(Some(signal))
                .body(form.clone())
                .map_err(|err| GatewayError::Network(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_envelope_response(response, true).await
    }

    /// Deletes with the stored credential attached, ignoring the response
    /// body on success.
    pub async fn delete_authorized(&self, path: &str) -> Result<(), GatewayError> {
        let url = self.build_url(path);
        let authorization = self.authorization_header()?;
        let response = send_with_timeout(|signal| {
            Request::delete(&url)
                .header("Authorization", &authorization)
                .abort_signal(Some(signal))
                .build()
                .map_err(|err| GatewayError::Network(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_empty_response(response, true).await
    }

    /// Builds a URL from the configured API base URL and the provided path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = path.trim();

        if base.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }

    /// The `Authorization` header value for the stored credential. A missing
    /// credential fails the call without touching the unauthorized handler;
    /// teardown is reserved for the API actually answering 401.
    fn authorization_header(&self) -> Result<String, GatewayError> {
        match self.credentials.read() {
            Ok(Some(credential)) => Ok(format!("Bearer {credential}")),
            Ok(None) => Err(GatewayError::Unauthorized),
            Err(err) => {
                log::warn!("credential storage unavailable: {err}");
                Err(GatewayError::Unauthorized)
            }
        }
    }

    /// Unwraps the envelope of a successful response and surfaces HTTP
    /// errors with sanitized messages.
    async fn handle_envelope_response<T: DeserializeOwned>(
        &self,
        response: Response,
        authorized: bool,
    ) -> Result<T, GatewayError> {
        if response.ok() {
            let envelope = response.json::<Envelope<T>>().await.map_err(|err| {
                GatewayError::InvalidResponse(format!("Failed to decode response: {err}"))
            })?;
            envelope.data.ok_or_else(|| {
                GatewayError::InvalidResponse("Response carried no payload.".to_string())
            })
        } else {
            Err(self.error_from_response(response, authorized).await)
        }
    }

    /// Handles responses whose body we do not need.
    async fn handle_empty_response(
        &self,
        response: Response,
        authorized: bool,
    ) -> Result<(), GatewayError> {
        if response.ok() {
            Ok(())
        } else {
            Err(self.error_from_response(response, authorized).await)
        }
    }

    /// Turns a non-success response into a `GatewayError`, notifying the
    /// unauthorized handler on a 401 when the call carried a credential.
    async fn error_from_response(&self, response: Response, authorized: bool) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == 401 {
            if authorized {
                self.notify_unauthorized();
            }
            return GatewayError::Unauthorized;
        }

        GatewayError::Rejected {
            status,
            message: extract_message(&body),
        }
    }

    fn notify_unauthorized(&self) {
        let handler = self.on_unauthorized.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

/// Creates an empty multipart form.
pub(crate) fn new_form_data() -> Result<FormData, GatewayError> {
    FormData::new().map_err(|_| GatewayError::Network("Failed to build form data.".to_string()))
}

/// Appends a text field to a multipart form.
pub(crate) fn append_field(form: &FormData, name: &str, value: &str) -> Result<(), GatewayError> {
    form.append_with_str(name, value)
        .map_err(|_| GatewayError::Network(format!("Failed to append {name} to the form.")))
}

/// Appends a file under its original filename.
pub(crate) fn append_file(
    form: &FormData,
    name: &str,
    file: &web_sys::File,
) -> Result<(), GatewayError> {
    form.append_with_blob_and_filename(name, file, &file.name())
        .map_err(|_| GatewayError::Network(format!("Failed to append {name} to the form.")))
}

/// Maps network errors into `GatewayError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> GatewayError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        GatewayError::Timeout
    } else {
        GatewayError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, GatewayError>,
) -> Result<Response, GatewayError> {
    let controller = AbortController::new()
        .map_err(|_| GatewayError::Network("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

/// Pulls the API's own message out of an error body, falling back to the
/// sanitized raw body when the envelope is absent.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| sanitize_body(body))
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
