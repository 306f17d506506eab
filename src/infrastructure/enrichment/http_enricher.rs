//! HTTP metadata enricher: fetches a page and extracts title and description.

use super::service::{EnrichmentResult, MetadataEnricher};
use crate::domain::entities::PageMetadata;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// Upper bound on the bytes read from a target page. Title and description
/// live in `<head>`, well within this.
pub const MAX_BODY_BYTES: usize = 512 * 1024;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").unwrap());

static META_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]{2,8});").unwrap());

static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Fetches target pages over HTTP(S) with bounded connect and request timeouts.
///
/// Extraction is deliberately shallow: the first `<title>` element and the
/// `content` of `<meta name="description">` (falling back to `og:description`).
pub struct HttpMetadataEnricher {
    client: reqwest::Client,
}

impl HttpMetadataEnricher {
    /// Builds an enricher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (TLS backend
    /// initialization failure).
    pub fn new(timeout: Duration) -> EnrichmentResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("urlchemy/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl MetadataEnricher for HttpMetadataEnricher {
    async fn fetch_metadata(&self, url: &str) -> EnrichmentResult<PageMetadata> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let Some(body) = read_html_head(response, MAX_BODY_BYTES).await? else {
            debug!(url, "Target is not an HTML page, skipping metadata");
            return Ok(PageMetadata::default());
        };

        let metadata = extract_metadata(&body);
        debug!(
            url,
            has_title = metadata.title.is_some(),
            has_description = metadata.description.is_some(),
            "Fetched page metadata"
        );

        Ok(metadata)
    }
}

/// Reads at most `cap` bytes of an HTML response body.
///
/// Returns `None` without reading the body when the response declares a
/// `Content-Type` other than HTML. A body cut at `cap` may end mid-character;
/// invalid UTF-8 is replaced.
///
/// # Errors
///
/// Returns an error if reading a body chunk fails.
pub async fn read_html_head(
    mut response: reqwest::Response,
    cap: usize,
) -> EnrichmentResult<Option<String>> {
    if !is_html(&response) {
        return Ok(None);
    }

    let expected = response
        .content_length()
        .map_or(cap, |len| usize::try_from(len).unwrap_or(cap).min(cap));
    let mut buf = Vec::with_capacity(expected);

    while buf.len() < cap {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let take = chunk.len().min(cap - buf.len());
        buf.extend_from_slice(&chunk[..take]);
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn is_html(response: &reqwest::Response) -> bool {
    match response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        Some(content_type) => {
            let mime = content_type.to_ascii_lowercase();
            mime.starts_with("text/html") || mime.starts_with("application/xhtml+xml")
        }
        None => true,
    }
}

/// Extracts title and description from an HTML document.
///
/// Entities in the extracted text are decoded and whitespace is collapsed.
/// Empty values are reported as `None`.
///
/// # Examples
///
/// ```
/// use urlchemy::infrastructure::enrichment::extract_metadata;
///
/// let html = r#"<html><head><title> Rust &amp; Co </title>
///     <meta name="description" content="Systems programming"></head></html>"#;
/// let meta = extract_metadata(html);
/// assert_eq!(meta.title.as_deref(), Some("Rust & Co"));
/// assert_eq!(meta.description.as_deref(), Some("Systems programming"));
/// ```
pub fn extract_metadata(html: &str) -> PageMetadata {
    let title = TITLE_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| clean_text(m.as_str()));

    let mut description = None;
    let mut og_description = None;

    for tag in META_REGEX.find_iter(html) {
        let mut name = None;
        let mut content = None;

        for attr in ATTR_REGEX.captures_iter(tag.as_str()) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map(|m| m.as_str());

            match attr[1].to_ascii_lowercase().as_str() {
                "name" | "property" => name = value.map(str::to_ascii_lowercase),
                "content" => content = value,
                _ => {}
            }
        }

        match name.as_deref() {
            Some("description") if description.is_none() => {
                description = content.and_then(clean_text);
            }
            Some("og:description") if og_description.is_none() => {
                og_description = content.and_then(clean_text);
            }
            _ => {}
        }
    }

    PageMetadata::new(title, description.or(og_description))
}

fn clean_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let decoded = decode_entities(&collapsed);

    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity.strip_prefix('#') {
                Some(num) => match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                }
                .and_then(char::from_u32),
                None => named_entity(entity),
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        _ => return None,
    };
    Some(c)
}
