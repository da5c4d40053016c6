//! Trade history and watchlist selection

use crate::{TradeHistoryEntry, WatchlistStock};

/// Latest fills, newest first
///
/// The full history is sorted by fill time before the symbol filter and the
/// `limit` cut are applied, so a symbol always gets its own latest fills.
pub fn recent_trades(
    history: &[TradeHistoryEntry],
    symbol: Option<&str>,
    limit: usize,
) -> Vec<TradeHistoryEntry> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| b.filled_time.cmp(&a.filled_time));

    sorted
        .into_iter()
        .filter(|t| symbol.map_or(true, |s| t.symbol == s))
        .take(limit)
        .collect()
}

/// Empty-state text for the history table
pub fn empty_history_message(symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) => format!("No trade history for {}.", symbol),
        None => "No trade history available.".to_string(),
    }
}

/// Stocks shown in the watchlist card
pub fn watchlist(stocks: &[WatchlistStock], limit: usize) -> &[WatchlistStock] {
    &stocks[..stocks.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_dataset;
    use crate::{FillStatus, OrderSide, OrderType};
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn ids(trades: &[TradeHistoryEntry]) -> Vec<&str> {
        trades.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let history = sample_dataset().trade_history;
        let trades = recent_trades(&history, None, 20);
        assert_eq!(ids(&trades), vec!["fill_4", "fill_2", "fill_1", "fill_3", "fill_5"]);
    }

    #[test]
    fn test_symbol_filter_after_sort() {
        let history = sample_dataset().trade_history;
        let trades = recent_trades(&history, Some("AAPL"), 20);
        assert_eq!(ids(&trades), vec!["fill_4", "fill_1"]);
        assert!(recent_trades(&history, Some("IBM"), 20).is_empty());
    }

    #[test]
    fn test_truncation_keeps_latest_for_symbol() {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        // 30 oldest fills are AAPL, the 30 newest are TSLA
        let history: Vec<TradeHistoryEntry> = (0..60)
            .map(|i| TradeHistoryEntry {
                id: format!("fill_{}", i),
                symbol: if i < 30 { "AAPL" } else { "TSLA" }.to_string(),
                side: OrderSide::Buy,
                total_qty: Decimal::ONE,
                average_price: Decimal::TEN,
                order_type: OrderType::Market,
                filled_time: start + Duration::minutes(i),
                order_status: FillStatus::Filled,
            })
            .collect();

        let overall = recent_trades(&history, None, 20);
        assert_eq!(overall.len(), 20);
        assert!(overall.iter().all(|t| t.symbol == "TSLA"));
        assert_eq!(overall[0].id, "fill_59");

        let aapl = recent_trades(&history, Some("AAPL"), 20);
        assert_eq!(aapl.len(), 20);
        assert_eq!(aapl[0].id, "fill_29");
        assert_eq!(aapl[19].id, "fill_10");
    }

    #[test]
    fn test_empty_history_message() {
        assert_eq!(empty_history_message(Some("TSLA")), "No trade history for TSLA.");
        assert_eq!(empty_history_message(None), "No trade history available.");
    }

    #[test]
    fn test_watchlist_limit() {
        let stocks = sample_dataset().watchlist;
        assert_eq!(watchlist(&stocks, 15).len(), stocks.len());
        assert_eq!(watchlist(&stocks, 2).len(), 2);
        assert_eq!(watchlist(&stocks, 2)[0].symbol, "AAPL");
    }
}
