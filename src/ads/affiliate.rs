use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateLink {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub commission_percent: f64,
    pub is_active: bool,
}

impl AffiliateLink {
    /// Tracked URL for this link, or `None` while the link is inactive.
    pub fn link_for(&self, affiliate_id: &str, product_id: &str) -> Option<String> {
        if !self.is_active {
            return None;
        }
        Some(generate_affiliate_link(&self.url, affiliate_id, product_id))
    }
}

/// Appends `aff_id` and `product_id` as an `application/x-www-form-urlencoded`
/// query, so spaces become `+`. `base_url` is used as given.
pub fn generate_affiliate_link(base_url: &str, affiliate_id: &str, product_id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("aff_id", affiliate_id)
        .append_pair("product_id", product_id)
        .finish();
    format!("{}?{}", base_url, query)
}
