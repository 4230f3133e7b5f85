//! Helpers that read the host environment through the `Environment` port.

use crate::application::ports::Environment;
use crate::domain::browser::BrowserKind;
use crate::domain::query::parse_query;
use std::collections::BTreeMap;

/// Identify the host browser from its user agent.
pub fn current_browser(env: &dyn Environment) -> BrowserKind {
    BrowserKind::from_user_agent(&env.user_agent())
}

/// Query parameters of `url`, or of the environment's current location
/// when `url` is absent or empty.
///
/// ```
/// use base_common::{url_params, StaticEnvironment};
///
/// let env = StaticEnvironment::new("", "https://shop.example/cart?id=7");
/// assert_eq!(url_params(None, &env)["id"], "7");
/// assert_eq!(url_params(Some("?id=9"), &env)["id"], "9");
/// ```
pub fn url_params(url: Option<&str>, env: &dyn Environment) -> BTreeMap<String, String> {
    match url.filter(|url| !url.is_empty()) {
        Some(url) => parse_query(url),
        None => parse_query(&env.location()),
    }
}
