use crate::error::ApiError;
use crate::model::adapter::{decode_account_reply, decode_events};
use crate::model::{
    Credentials, Event, EventId, NewEvent, Participation, ParticipationRequest, SessionUser,
};
use crate::session::{CookieJar, SessionStore};

use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

/// Typed client for the events API.
///
/// Clones share one cookie jar, so a login made through any clone
/// authenticates all of them.
#[derive(Clone, Debug)]
pub struct EventsClient {
    http: HttpsClient,
    base_url: String,
    jar: Arc<Mutex<CookieJar>>,
    store: Option<SessionStore>,
    timeout: Duration,
}

impl EventsClient {
    pub fn new(url: &str, insecure: bool, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = url.trim().trim_end_matches('/').to_string();
        let uri: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| ApiError::InvalidUrl(e.to_string()))?;
        let is_https = match uri.scheme_str() {
            Some("https") => true,
            Some("http") => false,
            _ => {
                return Err(ApiError::InvalidUrl(format!(
                    "'{}' must start with http:// or https://",
                    url
                )));
            }
        };

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            // Plain-http servers (the default localhost setup) need no roots.
            if is_https && root_store.is_empty() {
                return Err(ApiError::Tls(
                    "No valid system certificates found.".to_string(),
                ));
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        Ok(Self {
            http: Client::builder(TokioExecutor::new()).build(https_connector),
            base_url,
            jar: Arc::new(Mutex::new(CookieJar::default())),
            store: None,
            timeout,
        })
    }

    /// Persists cookies to `store`, starting from whatever it already holds.
    pub fn with_session_store(self, store: SessionStore) -> Self {
        *self.jar() = store.load();
        Self {
            store: Some(store),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_session(&self) -> bool {
        !self.jar().is_empty()
    }

    /// Forgets the session cookie. There is no server endpoint for this.
    pub fn logout(&self) {
        self.jar().clear();
        if let Some(store) = &self.store
            && let Err(e) = store.clear()
        {
            warn!("Failed to remove session file: {:#}", e);
        }
    }

    // --- ACCOUNT ---

    pub async fn login(&self, credentials: &Credentials) -> Result<Option<SessionUser>, ApiError> {
        let body = self
            .send(Method::POST, "/api/login", Some(serde_json::to_string(credentials)?))
            .await?;
        Ok(decode_account_reply(&body)?)
    }

    pub async fn register(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<SessionUser>, ApiError> {
        let body = self
            .send(Method::POST, "/api/register", Some(serde_json::to_string(credentials)?))
            .await?;
        Ok(decode_account_reply(&body)?)
    }

    // --- READ OPERATIONS ---

    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        self.get_json("/api/user").await
    }

    pub async fn all_events(&self) -> Result<Vec<Event>, ApiError> {
        let body = self.send(Method::GET, "/api/allEvents", None).await?;
        Ok(decode_events(&body)?)
    }

    // --- WRITE OPERATIONS ---

    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError> {
        let body = self
            .send(Method::POST, "/api/event", Some(serde_json::to_string(event)?))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Adds or removes `user_name`'s interest in `event_id`. The reply body is ignored.
    pub async fn set_participation(
        &self,
        direction: Participation,
        event_id: &EventId,
        user_name: &str,
    ) -> Result<(), ApiError> {
        let request = ParticipationRequest {
            event_id: event_id.clone(),
            name: user_name.to_string(),
        };
        self.send(
            Method::POST,
            direction.endpoint(),
            Some(serde_json::to_string(&request)?),
        )
        .await?;
        Ok(())
    }

    // --- TRANSPORT ---

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::GET, path, None).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut builder = Request::builder()
            .method(method)
            .uri(&url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = self.jar().header_value() {
            builder = builder.header(COOKIE, cookie);
        }
        let request = builder
            .body(body.unwrap_or_default())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let (status, bytes) = tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| {
                ApiError::Network(format!("{} timed out after {:?}", url, self.timeout))
            })??;

        if !status.is_success() {
            return Err(ApiError::status(status));
        }
        Ok(bytes)
    }

    async fn exchange(&self, request: Request<String>) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

        let status = response.status();
        let mut changed = false;
        {
            let mut jar = self.jar();
            for value in response.headers().get_all(SET_COOKIE) {
                if let Ok(raw) = value.to_str() {
                    changed |= jar.store_set_cookie(raw);
                }
            }
        }
        if changed {
            self.persist();
        }

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_bytes();
        Ok((status, bytes.to_vec()))
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            let snapshot = self.jar().clone();
            if let Err(e) = store.save(&snapshot) {
                warn!("Failed to save session: {:#}", e);
            }
        }
    }

    fn jar(&self) -> MutexGuard<'_, CookieJar> {
        // A poisoned jar still holds valid cookies.
        self.jar.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            ECDSA_NISTP384_SHA384,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}
