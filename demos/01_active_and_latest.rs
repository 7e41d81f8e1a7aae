use vinter_rs::AssetCategory;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build a client from VINTER_API_KEY (and optional base overrides).
    let client = vinter_rs::config::from_env()?
        .asset_type(AssetCategory::MultiAsset)
        .build()?;

    // 2. List the daily indexes that are currently active.
    let daily = client.all_active_symbols(Some("d")).await?;
    println!("--- Active daily multi-asset indexes ({}) ---", daily.len());
    for symbol in daily.iter().take(10) {
        println!("  {symbol}");
    }
    println!();

    let Some(symbol) = daily.first() else {
        println!("No active daily indexes.");
        return Ok(());
    };

    // 3. Latest value and rebalance metadata for the first one.
    let value = client.latest_value(symbol).await?;
    println!("--- {symbol} ---");
    println!("Latest value: {value:.4}");

    let weights = client.current_rebalance_weights(symbol).await?;
    println!("Current weights: {weights}");
    println!(
        "Next rebalance: {}",
        client
            .next_rebalance_date(symbol)
            .await?
            .unwrap_or_else(|| "not scheduled".into())
    );
    if let Some(next) = client.next_rebalance_weights(symbol).await? {
        println!("Next weights: {next}");
    }
    println!();

    // 4. The last few observations.
    let recent = client.latest_data(symbol, 5).await?;
    println!("--- Last {} observations ---", recent.len());
    for record in &recent {
        println!(
            "  {} {}",
            record.get("date").and_then(|v| v.as_str()).unwrap_or("-"),
            record.get("value").unwrap_or(&serde_json::Value::Null)
        );
    }

    Ok(())
}
