//! Basic example touching every helper in the crate.
//!
//! Run with `RUST_LOG=base_common=trace` to see timer decisions as they
//! happen.

use base_common::{
    change_case, current_browser, debounce, sort_by_flag, throttle, to_text, url_params, CaseMode,
    DateFormatter, StaticEnvironment, TimeValue, TokioScheduler,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Date Formatting ===\n");
    let formatter = DateFormatter::builder()
        .with_default_pattern("{y}年{m}月{d}日 {h}:{i} 周{a}")
        .build()?;
    println!("now:        {}", formatter.format_now(None));
    for input in [
        TimeValue::Epoch(1_700_000_000),
        TimeValue::from("2024-02-29 12:00:00"),
        TimeValue::from("not a date"),
        TimeValue::Epoch(0),
    ] {
        println!("{:<40} -> {:?}", format!("{:?}", input), formatter.format(Some(input.clone()), None));
    }

    println!("\n=== Monetary Numerals ===\n");
    for amount in [0.0, 1005.3, 100_000.0, -42.07, 1_000_100_000_000.0] {
        println!("{:>20} -> {}", amount, to_text(amount));
    }

    println!("\n=== Throttle and Debounce ===\n");
    let scheduler = Arc::new(TokioScheduler::current()?);

    let on_scroll = throttle(
        |offset: u32| println!("  throttled scroll handler ran at offset {}", offset),
        Duration::from_millis(100),
        scheduler.clone(),
    );
    let on_search = debounce(
        |query: String| println!("  debounced search for {:?}", query),
        Duration::from_millis(150),
        scheduler,
    );

    for step in 0..20u32 {
        on_scroll.call(step * 10);
        if step % 4 == 0 {
            on_search.call("rust".chars().take((step / 4) as usize).collect());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    println!("\nscroll: {:?}", on_scroll.metrics().snapshot());
    println!("search: {:?}", on_search.metrics().snapshot());

    println!("\n=== Glue Helpers ===\n");
    let env = StaticEnvironment::new(
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "https://example.com/orders?status=open&page=3",
    );
    println!("browser: {}", current_browser(&env));
    println!("params:  {:?}", url_params(None, &env));
    println!("sorted:  {:?}", sort_by_flag(vec![3.0, 1.0, 2.0], "down")?);
    println!("case:    {}", change_case("hello", CaseMode::FirstUpper)?);

    Ok(())
}
