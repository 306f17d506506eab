//! DTOs for short URL creation, lookup and listing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a target URL.
///
/// Title and description are optional; missing ones are fetched from the target
/// page on a best-effort basis.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(url(message = "Your provided URL is not valid"))]
    pub target_url: String,

    #[validate(length(max = 512))]
    pub title: Option<String>,

    #[validate(length(max = 2048))]
    pub description: Option<String>,
}

/// Publicly visible view of a record. Never carries the secret key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicInfo {
    /// Full short URL.
    pub url: String,
    pub target_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub clicks: i64,
}

impl PublicInfo {
    /// Builds the public view of `record` with its already computed short URL.
    pub fn from_record(record: UrlRecord, url: String) -> Self {
        Self {
            url,
            target_url: record.target_url,
            title: record.title,
            description: record.description,
            is_active: record.is_active,
            clicks: record.clicks,
        }
    }
}

/// Admin view of a record: the public view plus its admin URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminInfo {
    #[serde(flatten)]
    pub info: PublicInfo,
    pub admin_url: String,
}

/// Response to a successful creation.
///
/// The admin URL is only ever returned here and from the admin lookup itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub shortened_url: PublicInfo,
    pub admin_url: String,
}

/// Response to a deactivation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeactivateResponse {
    pub detail: String,
}

/// One record per distinct target host.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistinctTargetsResponse {
    pub data: Vec<PublicInfo>,
}
