use crate::api::SlidesApi;
use crate::auth::{Authenticator, CodePrompt};
use crate::config::SlidezConfig;
use crate::error::{Result, SlidezError};
use crate::service::google::{Endpoints, GoogleDrive, GoogleSlides, Session};
use directories::ProjectDirs;
use reqwest::blocking::Client;
use std::path::PathBuf;

pub const CONFIG_DIR_ENV: &str = "SLIDEZ_CONFIG_DIR";

pub struct SlidezContext {
    pub api: SlidesApi<GoogleSlides, GoogleDrive>,
    pub config: SlidezConfig,
}

/// `$SLIDEZ_CONFIG_DIR` if set, else the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "slidez", "slidez")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            SlidezError::MalformedInput(format!(
                "could not determine a config directory; set {}",
                CONFIG_DIR_ENV
            ))
        })
}

/// Loads configuration and wires the Google services. No network traffic
/// happens until the first remote call.
pub fn initialize(prompt: CodePrompt) -> Result<SlidezContext> {
    let config_dir = config_dir()?;
    let config = SlidezConfig::load(&config_dir)?;

    let http = Client::builder()
        .user_agent(concat!("slidez/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let credentials_dir = config.credentials_dir(&config_dir);
    let auth = Authenticator::new(http.clone(), credentials_dir, prompt);
    let session = Session::new(
        http,
        auth,
        Endpoints {
            slides: config.slides_endpoint.clone(),
            drive: config.drive_endpoint.clone(),
        },
    );
    tracing::debug!(config_dir = %config_dir.display(), "initialized");

    let api = SlidesApi::new(
        GoogleSlides::new(session.clone()),
        GoogleDrive::new(session),
        config_dir,
    );
    Ok(SlidezContext { api, config })
}
