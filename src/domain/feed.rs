// ============================================================================
// Feed Snapshot Decoding
// JSON payloads from the exchange's market, order and match endpoints
// ============================================================================

use super::{Currency, Market, Order, Trade};
use crate::numeric::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("malformed feed payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct MarketsResponse {
    results: Vec<MarketRecord>,
}

#[derive(Deserialize)]
struct MarketRecord {
    id: u64,
    currency1: Currency,
    currency2: Currency,
    code: String,
    price: Decimal,
    price_info: PriceInfo,
}

#[derive(Deserialize)]
struct PriceInfo {
    change: Option<Decimal>,
}

impl From<MarketRecord> for Market {
    fn from(record: MarketRecord) -> Self {
        Market::new(
            record.id,
            record.currency1,
            record.currency2,
            record.code,
            record.price,
            record.price_info.change,
        )
    }
}

#[derive(Deserialize)]
struct OrdersResponse {
    orders: Vec<Order>,
}

/// Decode a `{ "results": [...] }` market list.
pub fn parse_markets(json: &str) -> Result<Vec<Market>, FeedError> {
    let response: MarketsResponse = serde_json::from_str(json)?;
    Ok(response.results.into_iter().map(Market::from).collect())
}

/// Decode a `{ "orders": [...] }` book side, keeping feed order.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, FeedError> {
    let response: OrdersResponse = serde_json::from_str(json)?;
    Ok(response.orders)
}

/// Decode a bare array of matches, most recent first.
pub fn parse_trades(json: &str) -> Result<Vec<Trade>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markets() {
        let json = r#"{
            "results": [
                {
                    "id": 1,
                    "currency1": { "id": 10, "code": "BTC", "image": "btc.svg" },
                    "currency2": { "id": 20, "code": "USDT", "image": "usdt.svg" },
                    "code": "BTC_USDT",
                    "price": "64250.125",
                    "price_info": { "change": -1.53 }
                },
                {
                    "id": 2,
                    "currency1": { "code": "ETH" },
                    "currency2": { "code": "IRT" },
                    "code": "ETH_IRT",
                    "price": "190000000",
                    "price_info": { "change": null }
                }
            ]
        }"#;

        let markets = parse_markets(json).unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[0].code, "BTC_USDT");
        assert_eq!(markets[0].price, Decimal::new(64250125, 3));
        assert_eq!(markets[0].price_change, Some(Decimal::new(-153, 2)));
        assert_eq!(markets[1].quote_code(), "IRT");
        assert_eq!(markets[1].price_change, None);
    }

    #[test]
    fn test_parse_orders_preserves_order() {
        let json = r#"{ "orders": [
            { "amount": "3", "remain": "2", "price": "10", "value": "20" },
            { "amount": "3", "remain": "3", "price": "20", "value": "60" }
        ] }"#;

        let orders = parse_orders(json).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].price, Decimal::from(10));
        assert_eq!(orders[1].value, Decimal::from(60));
    }

    #[test]
    fn test_parse_trades() {
        let json = r#"[
            { "time": 1700000000, "price": "100", "value": "50", "match_amount": "0.5",
              "type": "buy", "match_id": "abc" }
        ]"#;

        let trades = parse_trades(json).unwrap();
        assert_eq!(trades[0].trade_type, "buy");
        assert_eq!(trades[0].match_amount, Decimal::new(5, 1));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(parse_orders(r#"{ "orders": 5 }"#), Err(FeedError::Json(_))));
        let bad_amount =
            r#"{ "orders": [{ "amount": "x", "remain": "1", "price": "1", "value": "1" }] }"#;
        assert!(parse_orders(bad_amount).is_err());
    }
}
