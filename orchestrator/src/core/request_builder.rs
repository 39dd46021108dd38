//! Upstream URL construction

use shared::UpstreamConfig;
use url::Url;

/// Build the upstream request URL for `quantity` integers.
///
/// Any query already present on the configured base URL is replaced.
pub fn build_upstream_url(config: &UpstreamConfig, quantity: u32) -> Url {
    let mut url = config.base_url.clone();
    url.set_query(None);
    url.query_pairs_mut()
        .append_pair("num", &quantity.to_string())
        .append_pair("min", &config.min.to_string())
        .append_pair("max", &config.max.to_string())
        .append_pair("col", &config.columns.to_string())
        .append_pair("base", &config.base.to_string())
        .append_pair("format", &config.format);
    url
}
