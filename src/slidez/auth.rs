//! OAuth credentials for the remote services.
//!
//! Client secrets come from `credentials.json` (as downloaded from the cloud
//! console) and the issued token is cached in `token.json`, both in the
//! credentials directory. The interactive handshake only runs when there is no
//! usable cached token and it cannot be refreshed.

use crate::error::{Result, SlidezError};
use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const TOKEN_FILE: &str = "token.json";

pub const SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/drive.readonly",
];

const REDIRECT_URI: &str = "http://localhost";
const CREDENTIALS_HINT: &str =
    "Download an OAuth client (desktop app) from the cloud console and save it there";
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Shows the authorization URL to the user and returns the pasted code.
pub type CodePrompt = Box<dyn Fn(&str) -> Result<String>>;

#[derive(Debug, Clone, Deserialize)]
struct ClientSecrets {
    installed: Option<ClientConfig>,
    web: Option<ClientConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            let path = path.display();
            SlidezError::Auth(format!(
                "unable to read credentials file {path}: {e}\n{CREDENTIALS_HINT}"
            ))
        })?;
        let secrets: ClientSecrets = serde_json::from_str(&data)
            .map_err(|e| SlidezError::Auth(format!("unable to parse credentials: {}", e)))?;
        let missing = "credentials hold neither an installed nor a web client";
        secrets
            .installed
            .or(secrets.web)
            .ok_or_else(|| SlidezError::Auth(missing.to_string()))
    }

    pub fn authorization_url(&self) -> Result<String> {
        let scope = SCOPES.join(" ");
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", REDIRECT_URI),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("state", "state-token"),
            ],
        )
        .map_err(|e| SlidezError::Auth(format!("bad auth_uri '{}': {}", self.auth_uri, e)))?;
        Ok(url.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "bearer")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn bearer() -> String {
    "Bearer".to_string()
}

impl Token {
    /// A token without an expiry never expires.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry > now + Duration::seconds(EXPIRY_MARGIN_SECS),
            None => true,
        }
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_token(self, now: DateTime<Utc>, previous_refresh: Option<String>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            token_type: self.token_type.unwrap_or_else(bearer),
            expiry: self.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// On-disk token cache, private to the owning user.
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns `None` if the cache is missing or unreadable.
    pub fn load(&self) -> Option<Token> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable token cache"
                );
                None
            }
        }
    }

    pub fn save(&self, token: &Token) -> Result<()> {
        tracing::info!(path = %self.path.display(), "saving credentials");
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir)?;
        }
        let data = serde_json::to_string(token)?;
        write_private_file(&self.path, data.as_bytes())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true).mode(0o700).create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(unix)]
fn write_private_file(path: &Path, data: &[u8]) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;
    Ok(())
}

/// Produces a bearer token, from cache, by refresh, or interactively.
pub struct Authenticator {
    http: Client,
    credentials_dir: PathBuf,
    prompt: CodePrompt,
}

impl Authenticator {
    pub fn new(http: Client, credentials_dir: PathBuf, prompt: CodePrompt) -> Self {
        Self {
            http,
            credentials_dir,
            prompt,
        }
    }

    pub fn access_token(&self) -> Result<String> {
        let client = ClientConfig::load(&self.credentials_dir.join(CREDENTIALS_FILE))?;
        let cache = TokenCache::new(self.credentials_dir.join(TOKEN_FILE));
        let now = Utc::now();

        if let Some(token) = cache.load() {
            if token.is_valid_at(now) {
                return Ok(token.access_token);
            }
            if let Some(refresh) = token.refresh_token.clone() {
                match self.refresh(&client, refresh, now) {
                    Ok(fresh) => {
                        cache.save(&fresh)?;
                        return Ok(fresh.access_token);
                    }
                    Err(e) => tracing::warn!(error = %e, "token refresh failed, authorizing again"),
                }
            }
        }

        let url = client.authorization_url()?;
        let code = (self.prompt)(&url)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(SlidezError::Auth("no authorization code entered".to_string()));
        }
        let token = self.exchange(&client, code, now)?;
        cache.save(&token)?;
        Ok(token.access_token)
    }

    fn refresh(
        &self,
        client: &ClientConfig,
        refresh_token: String,
        now: DateTime<Utc>,
    ) -> Result<Token> {
        let response = self.post_token(
            client,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ],
        )?;
        Ok(response.into_token(now, Some(refresh_token)))
    }

    fn exchange(&self, client: &ClientConfig, code: &str, now: DateTime<Utc>) -> Result<Token> {
        let response = self.post_token(
            client,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", REDIRECT_URI),
            ],
        )?;
        Ok(response.into_token(now, None))
    }

    fn post_token(&self, client: &ClientConfig, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
        ];
        form.extend_from_slice(params);
        tracing::debug!(url = %client.token_uri, "POST token");
        let response = self.http.post(&client.token_uri).form(&form).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SlidezError::Auth(format!(
                "token endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }
        response
            .json::<TokenResponse>()
            .map_err(|e| SlidezError::Auth(format!("unexpected token response: {}", e)))
    }
}
