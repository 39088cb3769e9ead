// ============================================================================
// Basic Usage Example
// ============================================================================

use market_stats::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> market_stats::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Market Stats Example ===\n");

    let engine = create_from_config(StatsConfig::bitpin_style())?;

    // Market list
    let markets = vec![
        Market::new(
            1,
            Currency::new("BTC"),
            Currency::new("USDT"),
            "BTC_USDT",
            Market::parse_price("64250.129")?,
            Some(Market::parse_price("-1.537")?),
        ),
        Market::new(
            2,
            Currency::new("BTC"),
            Currency::new("IRT"),
            "BTC_IRT",
            Market::parse_price("6425012345.9")?,
            None,
        ),
    ];

    for quote in ["USDT", "IRT"] {
        let page = engine.market_page(&markets, quote, 1, 10);
        println!("{quote} markets (page {} of {}):", page.page, page.total_pages);
        for row in page.rows {
            println!(
                "  {:<10} {:>14} {} {:>8}",
                row.display_code, row.price, row.quote_code, row.change
            );
        }
    }

    // Sell side of BTC/USDT, best price first
    let asks: Vec<Order> = (0i64..12)
        .map(|i| {
            let price = Decimal::from(64_250 + i * 5);
            let remain = Decimal::new(25 + i, 2);
            Order::new(remain, remain, price, remain * price)
        })
        .collect();

    let depth = engine.depth_stats(&asks)?;
    println!("\n=== Top {} asks ===", engine.depth());
    for order in engine.top_orders(&asks) {
        println!("  {} @ {} (value {})", order.remain, order.price, order.value);
    }
    println!("Total remain: {:?}", depth.total_remain);
    println!("Total value:  {:?}", depth.total_value);
    println!("Weighted avg: {:?}", depth.weighted_average_price);

    // Keystrokes arrive faster than the quiet period; only the last one counts
    println!("\n=== Debounced percentage ===");
    let live = engine.live_estimator(MarketTab::Sell);
    for keystroke in ["1", "12", "12.5"] {
        live.input(keystroke);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(engine.config().quiet_period + Duration::from_millis(50)).await;

    let estimate = live.estimate(engine.context(), &depth)?;
    println!("Percentage: {}", live.committed_percentage());
    println!("Remain:  {:?}", estimate.remain);
    println!("Payable: {:?}", estimate.payable);

    live.switch_tab(MarketTab::Buy);
    println!("\nAfter switching to buy: {:?}", live.estimate(engine.context(), &depth)?);

    Ok(())
}
