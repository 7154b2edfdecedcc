//! HTTP backends for the Slides and Drive REST APIs.
//!
//! Both services share one [`Session`], which authorizes on the first remote
//! call and keeps the bearer token for the rest of the process.

use super::{DocumentService, ExportFormat, FileService};
use crate::auth::Authenticator;
use crate::error::{Result, SlidezError};
use crate::model::Presentation;
use crate::request::Batch;
use once_cell::unsync::OnceCell;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub slides: String,
    pub drive: String,
}

pub struct Session {
    http: Client,
    auth: Authenticator,
    token: OnceCell<String>,
    endpoints: Endpoints,
}

impl Session {
    pub fn new(http: Client, auth: Authenticator, endpoints: Endpoints) -> Rc<Self> {
        Rc::new(Self {
            http,
            auth,
            token: OnceCell::new(),
            endpoints,
        })
    }

    fn bearer(&self) -> Result<&str> {
        self.token
            .get_or_try_init(|| self.auth.access_token())
            .map(String::as_str)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.bearer_auth(self.bearer()?).build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "request");
        let response = self.http.execute(request)?;
        check(response)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Maps a non-success status to an error category, keeping the server's message.
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &str) -> SlidezError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };
    match status {
        StatusCode::NOT_FOUND => SlidezError::NotFound(message),
        StatusCode::BAD_REQUEST => SlidezError::Rejected(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SlidezError::Auth(message),
        _ => SlidezError::Transport(format!("{}: {}", status, message)),
    }
}

pub struct GoogleSlides {
    session: Rc<Session>,
}

impl GoogleSlides {
    pub fn new(session: Rc<Session>) -> Self {
        Self { session }
    }

    fn url(&self, path: &str) -> String {
        let base = self.session.endpoints.slides.trim_end_matches('/');
        format!("{}/{}", base, path)
    }
}

impl DocumentService for GoogleSlides {
    fn fetch_snapshot(&self, presentation_id: &str) -> Result<Presentation> {
        let url = self.url(&format!("presentations/{}", presentation_id));
        let response = self.session.send(self.session.http.get(url))?;
        Ok(response.json()?)
    }

    fn apply_batch(&mut self, presentation_id: &str, batch: &Batch) -> Result<()> {
        let url = self.url(&format!("presentations/{}:batchUpdate", presentation_id));
        let request = self.session.http.post(url).json(batch);
        self.session.send(request)?;
        Ok(())
    }

    fn create_document(&mut self, title: &str) -> Result<Presentation> {
        let url = self.url("presentations");
        let body = json!({ "title": title });
        let request = self.session.http.post(url).json(&body);
        let response = self.session.send(request)?;
        Ok(response.json()?)
    }
}

pub struct GoogleDrive {
    session: Rc<Session>,
}

impl GoogleDrive {
    pub fn new(session: Rc<Session>) -> Self {
        Self { session }
    }

    fn file_url(&self, file_id: &str) -> String {
        let base = self.session.endpoints.drive.trim_end_matches('/');
        format!("{}/files/{}", base, file_id)
    }
}

impl FileService for GoogleDrive {
    fn export_as(&self, presentation_id: &str, format: ExportFormat) -> Result<Vec<u8>> {
        let url = format!("{}/export", self.file_url(presentation_id));
        let request = self
            .session
            .http
            .get(url)
            .query(&[("mimeType", format.mime_type())]);
        let response = self.session.send(request)?;
        Ok(response.bytes()?.to_vec())
    }

    fn add_parent(&mut self, file_id: &str, folder_id: &str) -> Result<()> {
        let request = self
            .session
            .http
            .patch(self.file_url(file_id))
            .query(&[("addParents", folder_id)])
            .json(&json!({}));
        self.session.send(request)?;
        Ok(())
    }
}
