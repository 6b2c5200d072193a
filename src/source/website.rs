use reqwest::header::{LINK, REFERER};
use reqwest::Client;
use tracing::{debug, info};

const LOGIN_URL: &str = "https://effner.de/wp-login.php?action=postpass";
const PLAN_PAGE: &str = "https://effner.de/service/vertretungsplan/";

#[derive(Debug, thiserror::Error)]
pub enum WebsiteError {
    #[error("website did not send a Link header after login")]
    MissingLink,
    #[error("could not find the plan URL in Link header {0:?}")]
    MalformedLink(String),
    #[error("website request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Unlock the password protected plan page and return its markup.
///
/// WordPress answers the password form with a cookie; the page itself is
/// listed as the second entry of the response's `Link` header.
pub async fn fetch_plan_page(password: &str) -> Result<String, WebsiteError> {
    let client = Client::builder().cookie_store(true).build()?;

    let response = client
        .post(LOGIN_URL)
        .header(REFERER, PLAN_PAGE)
        .form(&[("post_password", password)])
        .send()
        .await?;

    let link = response
        .headers()
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebsiteError::MissingLink)?;
    let url = plan_url(link).ok_or_else(|| WebsiteError::MalformedLink(link.to_string()))?;
    debug!(%url, "plan page located");

    let page = client.get(url).send().await?.error_for_status()?.text().await?;
    info!(bytes = page.len(), "fetched plan page");
    Ok(page)
}

/// `<a>; rel="...", <b>; rel="..."` -> `b`
fn plan_url(link: &str) -> Option<String> {
    let entry = link.split(',').nth(1)?;
    let target = entry.split(';').next()?.trim();
    let url = target.strip_prefix('<')?.strip_suffix('>')?;
    (!url.is_empty()).then(|| url.to_string())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_link_entry() {
        let header = r#"<https://effner.de/wp-json/>; rel="https://api.w.org/", <https://effner.de/wp-json/wp/v2/pages/42>; rel="alternate"; type="application/json""#;
        assert_eq!(
            plan_url(header).as_deref(),
            Some("https://effner.de/wp-json/wp/v2/pages/42")
        );
    }

    #[test]
    fn single_entry_is_rejected() {
        assert_eq!(plan_url(r#"<https://effner.de/wp-json/>; rel="https://api.w.org/""#), None);
    }

    #[test]
    fn garbled_entry_is_rejected() {
        assert_eq!(plan_url("<a>, b"), None);
        assert_eq!(plan_url("<a>, <>"), None);
    }
}
