use base_common::{
    change_case, current_browser, parse_query, sort_by_flag, url_params, BrowserKind, CaseError,
    CaseMode, SortError, StaticEnvironment,
};

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 \
                         (KHTML, like Gecko) Version/17.2 Safari/605.1.15";
const IE_UA: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";

#[test]
fn test_sort_flags() {
    let values = vec![3.5, -2.0, 10.0, 0.0];
    assert_eq!(sort_by_flag(values.clone(), "up").unwrap(), vec![-2.0, 0.0, 3.5, 10.0]);
    assert_eq!(sort_by_flag(values.clone(), "down").unwrap(), vec![10.0, 3.5, 0.0, -2.0]);
    assert_eq!(
        sort_by_flag(values, "sideways"),
        Err(SortError::InvalidDirection("sideways".to_string()))
    );
}

#[test]
fn test_case_flags() {
    let mode: CaseMode = "firCaps".parse().unwrap();
    assert_eq!(change_case("rust", mode).unwrap(), "Rust");

    let mode: CaseMode = "allCaps".parse().unwrap();
    assert_eq!(change_case("straße", mode).unwrap(), "STRASSE");

    assert_eq!("camel".parse::<CaseMode>(), Err(CaseError::UnknownMode("camel".to_string())));
    assert_eq!(change_case("", CaseMode::AllLower), Err(CaseError::EmptyInput));
}

#[test]
fn test_browser_detection_from_environment() {
    let env = StaticEnvironment::new(CHROME_UA, "");
    assert_eq!(current_browser(&env), BrowserKind::Chrome);

    let env = env.with_user_agent(SAFARI_UA);
    assert_eq!(current_browser(&env), BrowserKind::Safari);

    let env = env.with_user_agent(IE_UA);
    assert_eq!(current_browser(&env).to_string(), "IE");

    let env = env.with_user_agent("curl/8.4.0");
    assert_eq!(current_browser(&env), BrowserKind::Unknown);
    assert_eq!(current_browser(&env).label(), "未知浏览器");
}

#[test]
fn test_query_parsing_edge_cases() {
    let params = parse_query("https://example.com/?a=1&flag&b=x%20y&a=2&empty=");
    assert_eq!(params.get("a").map(String::as_str), Some("2"));
    assert_eq!(params.get("b").map(String::as_str), Some("x y"));
    assert_eq!(params.get("empty").map(String::as_str), Some(""));
    assert!(!params.contains_key("flag"));
}

#[test]
fn test_query_value_may_contain_equals() {
    let params = parse_query("?token=abc==&next=/home?tab=1");
    assert_eq!(params["token"], "abc==");
    assert_eq!(params["next"], "/home?tab=1");
}

#[test]
fn test_url_params_falls_back_to_location() {
    let env = StaticEnvironment::new("", "https://example.com/orders?status=open&page=3");

    let params = url_params(None, &env);
    assert_eq!(params["status"], "open");
    assert_eq!(params["page"], "3");

    let params = url_params(Some(""), &env);
    assert_eq!(params.len(), 2);

    let params = url_params(Some("https://example.com/?page=9"), &env);
    assert_eq!(params.len(), 1);
    assert_eq!(params["page"], "9");
}
