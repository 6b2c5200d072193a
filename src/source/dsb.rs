use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

const BASE_URL: &str = "https://mobileapi.dsbcontrol.de";
const BUNDLE_ID: &str = "de.heinekingmedia.dsbmobile";
const APP_VERSION: &str = "36";
const OS_VERSION: &str = "36";

#[derive(Debug, thiserror::Error)]
pub enum DsbError {
    #[error("DSB login answered with status {0}")]
    UnknownLogin(StatusCode),
    #[error("DSB login failed, check user and password")]
    LoginFailed,
    #[error("DSB timetables could not be loaded (status {0})")]
    DataRequest(StatusCode),
    #[error("DSB account has no timetable document")]
    NoDocument,
    #[error("DSB request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One entry of the timetable listing. The API nests the actual
/// documents under `Childs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Document {
    pub id: String,
    pub date: String,
    pub title: String,
    pub detail: String,
    #[serde(rename = "Childs")]
    pub children: Vec<Document>,
}

impl Document {
    /// The first document of the first timetable, which is the bulletin.
    fn bulletin(timetables: &[Document]) -> Option<&Document> {
        timetables.first()?.children.first()
    }
}

pub struct DsbClient {
    http: Client,
    user: String,
    pass: String,
}

impl DsbClient {
    pub fn new(user: &str, pass: &str) -> Self {
        Self {
            http: Client::new(),
            user: user.to_string(),
            pass: pass.to_string(),
        }
    }

    /// Obtain an auth token. DSB signals bad credentials with an empty token.
    pub async fn login(&self) -> Result<String, DsbError> {
        let response = self
            .http
            .get(format!("{}/authid", BASE_URL))
            .query(&[
                ("bundleid", BUNDLE_ID),
                ("appversion", APP_VERSION),
                ("osversion", OS_VERSION),
                ("pushid", ""),
                ("user", self.user.as_str()),
                ("password", self.pass.as_str()),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(DsbError::UnknownLogin(response.status()));
        }
        let body = response.text().await?;
        parse_token(&body).ok_or(DsbError::LoginFailed)
    }

    pub async fn timetables(&self, token: &str) -> Result<Vec<Document>, DsbError> {
        let response = self
            .http
            .get(format!("{}/dsbtimetables", BASE_URL))
            .query(&[("authid", token)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(DsbError::DataRequest(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn download(&self, document: &Document) -> Result<String, DsbError> {
        debug!(id = %document.id, title = %document.title, date = %document.date, "downloading document");
        let response = self.http.get(&document.detail).send().await?;
        if response.status() != StatusCode::OK {
            return Err(DsbError::DataRequest(response.status()));
        }
        Ok(response.text().await?)
    }
}

/// Log in, list the timetables and download the bulletin.
pub async fn fetch_bulletin(user: &str, pass: &str) -> Result<String, DsbError> {
    let client = DsbClient::new(user, pass);
    let token = client.login().await?;
    info!("logged in to DSB");

    let timetables = client.timetables(&token).await?;
    let document = Document::bulletin(&timetables).ok_or(DsbError::NoDocument)?;
    client.download(document).await
}

/// The token arrives as a JSON string literal.
fn parse_token(body: &str) -> Option<String> {
    let token = body.trim().trim_matches('"');
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

// ── Tests ──
