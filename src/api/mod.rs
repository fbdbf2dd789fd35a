//! Typed CRUD client for one REST origin.
//!
//! A [`ResourceClient`] is bound to a base URL and a record type. Read verbs
//! are available for every [`Resource`]; write verbs only exist for a
//! [`WritableResource`], so the admin directory client cannot issue them.
//!
//! Each call is independent and at-most-once: no retries, no cache, no request
//! coalescing. Every request is bounded by the client timeout.

mod error;
pub mod observer;

pub use error::ClientError;
pub use observer::{RequestObserver, TracingObserver};

use crate::users::{Admin, User, UserPayload};
use error::{map_request_error, sanitize_body};
use reqwest::{Client, Method, header::ACCEPT};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{marker::PhantomData, sync::Arc, time::Duration};
use tracing::{Instrument, debug, info_span};
use ulid::Ulid;
use url::Url;

/// Default request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A record served under a fixed collection path.
pub trait Resource: DeserializeOwned {
    const PATH: &'static str;

    /// Checks a decoded record; a failure rejects the whole response.
    ///
    /// # Errors
    /// Returns a description of what is wrong with the record.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A resource that accepts create, update and delete.
pub trait WritableResource: Resource {
    type Payload: Serialize;
}

impl Resource for User {
    const PATH: &'static str = "/users";

    fn validate(&self) -> Result<(), String> {
        self.check_gender_other()
            .map_err(|message| format!("user {}: {message}", self.id))
    }
}

impl WritableResource for User {
    type Payload = UserPayload;
}

impl Resource for Admin {
    const PATH: &'static str = "/users";
}

pub struct ResourceClient<R> {
    http: Client,
    base_url: String,
    observer: Arc<dyn RequestObserver>,
    resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            observer: Arc::clone(&self.observer),
            resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Builds a client for `base_url` with the given request deadline. Logs
    /// through [`TracingObserver`] until another observer is set.
    ///
    /// # Errors
    /// Returns `Config` if the URL is not an absolute http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Config {
                url: base_url.clone(),
                message: err.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            observer: Arc::new(TracingObserver),
            resource: PhantomData,
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {PATH}`
    ///
    /// # Errors
    /// Returns `Transport` on a failed request and `Decode` on an invalid body.
    pub async fn list(&self) -> Result<Vec<R>, ClientError> {
        self.request(Method::GET, R::PATH.to_string(), None, decode_list::<R>)
            .await
    }

    /// `GET {PATH}/{id}`
    ///
    /// # Errors
    /// Returns `Transport` on a failed request and `Decode` on an invalid body.
    pub async fn get(&self, id: u64) -> Result<R, ClientError> {
        self.request(Method::GET, item_path::<R>(id), None, decode_one::<R>)
            .await
    }

    async fn request<T>(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
        decode: fn(&str, &str) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let url = build_url(&self.base_url, &path);
        let span = info_span!(
            "api.request",
            http.method = %method,
            url = %url,
            request_id = %Ulid::new()
        );

        async {
            self.observer.on_request(&method, &url);

            let result = self
                .dispatch(method.clone(), &url, body)
                .await
                .and_then(|text| decode(&url, &text));

            if let Err(err) = &result {
                self.observer.on_failure(&method, &url, err);
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<String, ClientError> {
        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| map_request_error(&err))?;
        let status = response.status();
        let text = response.text().await.map_err(|err| map_request_error(&err))?;
        debug!(http.status = status.as_u16(), "response received");

        if status.is_success() {
            Ok(text)
        } else {
            Err(ClientError::Transport {
                status: Some(status.as_u16()),
                body: sanitize_body(&text),
            })
        }
    }
}

impl<R: WritableResource> ResourceClient<R> {
    /// `POST {PATH}`; the server assigns the id.
    ///
    /// # Errors
    /// Returns `Encode`, `Transport` or `Decode`.
    pub async fn create(&self, payload: &R::Payload) -> Result<R, ClientError> {
        let body = encode(payload)?;
        self.request(Method::POST, R::PATH.to_string(), Some(body), decode_one::<R>)
            .await
    }

    /// `PUT {PATH}/{id}`
    ///
    /// # Errors
    /// Returns `Encode`, `Transport` or `Decode`.
    pub async fn update(&self, id: u64, payload: &R::Payload) -> Result<R, ClientError> {
        let body = encode(payload)?;
        self.request(Method::PUT, item_path::<R>(id), Some(body), decode_one::<R>)
            .await
    }

    /// `DELETE {PATH}/{id}`. Deleting a missing record is a `Transport` error,
    /// never a silent success.
    ///
    /// # Errors
    /// Returns `Transport` on a failed request.
    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.request(Method::DELETE, item_path::<R>(id), None, |_, _| Ok(()))
            .await
    }
}

/// Trims the base URL and strips trailing slashes after checking it is an
/// absolute http(s) URL.
///
/// # Errors
/// Returns `Config` for anything else.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let config_error = |message: String| ClientError::Config {
        url: raw.to_string(),
        message,
    };

    let parsed = Url::parse(trimmed).map_err(|err| config_error(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(config_error(format!("unsupported scheme {scheme}"))),
    }
}

fn build_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

fn item_path<R: Resource>(id: u64) -> String {
    format!("{}/{id}", R::PATH)
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, ClientError> {
    serde_json::to_value(payload).map_err(|err| ClientError::Encode(err.to_string()))
}

fn decode_one<R: Resource>(url: &str, text: &str) -> Result<R, ClientError> {
    let record: R = serde_json::from_str(text).map_err(|err| decode_error(url, err.to_string()))?;
    record.validate().map_err(|message| decode_error(url, message))?;
    Ok(record)
}

fn decode_list<R: Resource>(url: &str, text: &str) -> Result<Vec<R>, ClientError> {
    let records: Vec<R> =
        serde_json::from_str(text).map_err(|err| decode_error(url, err.to_string()))?;
    for record in &records {
        record.validate().map_err(|message| decode_error(url, message))?;
    }
    Ok(records)
}

fn decode_error(url: &str, message: String) -> ClientError {
    ClientError::Decode {
        url: url.to_string(),
        message,
    }
}
