//! Profile service client and data sources

use crate::constants::*;
use crate::error::ProfileError;
use crate::settings::Settings;
use crate::types::{DataSourceKind, UserProfile};
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

/// HTTP client for `GET {api_url}/api/user/{id}`
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProfileError> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| ProfileError::Transport(format!("invalid API URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProfileError::Transport(format!("invalid API URL {base_url}")));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
            .build()
            .map_err(|e| ProfileError::Transport(e.to_string()))?;

        Ok(Self { http, base_url, timeout })
    }

    /// Profile URL with the user id encoded as a single path segment
    pub fn user_url(&self, user_id: &str) -> reqwest::Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "user", user_id]);
        }
        url
    }

    pub async fn fetch_profile(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> Result<UserProfile, ProfileError> {
        let url = self.user_url(user_id);
        debug!(url = %url, authenticated = token.is_some(), "Requesting profile");

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let profile = serde_json::from_slice::<UserProfile>(&body)?;
        Ok(profile)
    }

    fn classify(&self, e: reqwest::Error) -> ProfileError {
        if e.is_timeout() {
            ProfileError::Timeout(self.timeout)
        } else {
            ProfileError::Transport(e.to_string())
        }
    }
}

/// Where the profile view gets its data
#[derive(Clone)]
pub enum DataSource {
    Live(ApiClient),
    Static(UserProfile),
}

impl DataSource {
    pub fn from_settings(settings: &Settings) -> Result<Self, ProfileError> {
        match settings.data_source {
            DataSourceKind::Live => Ok(Self::Live(ApiClient::new(
                &settings.api_url,
                settings.request_timeout(),
            )?)),
            DataSourceKind::Static => Ok(Self::Static(mock_profile())),
        }
    }

    pub fn kind(&self) -> DataSourceKind {
        match self {
            Self::Live(_) => DataSourceKind::Live,
            Self::Static(_) => DataSourceKind::Static,
        }
    }

    /// Only the live source needs a signed-in user
    pub fn requires_credentials(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub async fn fetch(
        &self,
        user_id: Option<&str>,
        token: Option<&str>,
    ) -> Result<UserProfile, ProfileError> {
        match self {
            Self::Live(client) => {
                let user_id = user_id.ok_or(ProfileError::NotAuthenticated)?;
                client.fetch_profile(user_id, token).await
            }
            Self::Static(profile) => Ok(profile.clone()),
        }
    }
}

/// Hard-coded profile for demos and offline work
pub fn mock_profile() -> UserProfile {
    UserProfile {
        nickname: "Hyun2".to_string(),
        email: "abc@purdue.edu".to_string(),
        crime_selections: "0,3,7".to_string(),
    }
}
