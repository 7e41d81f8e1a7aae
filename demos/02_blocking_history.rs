use vinter_rs::{AssetCategory, ErrorKind, blocking::Client};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var(vinter_rs::config::API_KEY_VAR)?;
    let client = Client::new(api_key, AssetCategory::SingleAsset)?;

    let symbol = "btc-usd-p-d";

    // One calendar day.
    let day = client.data_by_date(symbol, "2021-01-01")?;
    println!("--- {symbol} on 2021-01-01 ---");
    for record in &day {
        println!("  {}", serde_json::Value::Object(record.clone()));
    }
    println!();

    // First and last entries bound the range; the end is exclusive.
    let span = client.data_by_dates(symbol, &["2021-01-01", "2021-01-31"])?;
    println!("--- {symbol} in January 2021: {} rows ---", span.len());
    println!();

    // Open-ended range with an explicit cap.
    let since = client.data_by_range(symbol, "2024-01-01", None, Some(10))?;
    println!("--- {symbol} since 2024-01-01 (max 10) ---");
    for record in &since {
        println!(
            "  {} {}",
            record.get("date").and_then(|v| v.as_str()).unwrap_or("-"),
            record.get("value").unwrap_or(&serde_json::Value::Null)
        );
    }
    println!();

    // Failures are classified without inspecting message text.
    match client.data_by_date(symbol, "2021-02-30") {
        Err(e) if e.kind() == ErrorKind::InvalidArgument => println!("Rejected locally: {e}"),
        other => println!("Unexpected: {other:?}"),
    }
    match client.contributions("btc-usd-p-q") {
        Err(e) => println!("{:?}: {e}", e.kind()),
        Ok(v) => println!("Contributions: {v}"),
    }

    Ok(())
}
