//! URL query-string parsing.

use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use tracing::debug;

/// Parse the `key=value` pairs of a URL's query string.
///
/// Everything after the first `?` is the query; without a `?` the whole
/// input is. Segments without `=` are skipped, values are percent-decoded
/// (`+` is kept literally), and later keys overwrite earlier ones.
///
/// ```
/// use base_common::parse_query;
///
/// let params = parse_query("https://example.com/list?page=2&q=%E4%BD%A0%E5%A5%BD");
/// assert_eq!(params["page"], "2");
/// assert_eq!(params["q"], "你好");
/// ```
pub fn parse_query(url: &str) -> BTreeMap<String, String> {
    let query = match url.find('?') {
        Some(at) => &url[at + 1..],
        None => url,
    };

    let mut params = BTreeMap::new();
    for segment in query.split('&') {
        let Some((name, raw_value)) = segment.split_once('=') else {
            continue;
        };
        match percent_decode_str(raw_value).decode_utf8() {
            Ok(value) => {
                params.insert(name.to_string(), value.into_owned());
            }
            Err(e) => {
                debug!(segment, error = %e, "skipping undecodable query segment");
            }
        }
    }
    params
}
