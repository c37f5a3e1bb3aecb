use serde::Deserialize;

/// Lookup service search response envelope.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    /// Whether the service considers the search successful.
    #[serde(default)]
    pub success: bool,
    /// Payload, present on success.
    pub data: Option<SearchData>,
}

/// Search payload as returned by the lookup service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    /// URL of the best matching photo.
    pub image_url: Option<String>,
    /// Normalized vehicle name as the service understood the query.
    pub normalized_name: Option<String>,
    /// Vehicle category.
    pub vehicle_type: Option<String>,
    /// Extracted model year.
    pub year: Option<String>,
    /// All candidate photo URLs.
    #[serde(default)]
    pub all_images: Vec<String>,
    /// Upstream source the service found the image in.
    pub source: Option<String>,
}
