//! Trading tables: positions, open orders, trade history, watchlist

use finboard_core::format::{
    format_fill_time, format_optional_price, format_percent, format_plain_amount, format_price,
    format_short_float, format_signed_percent, format_volume,
};
use finboard_core::{
    empty_history_message, OpenOrder, OpenPosition, TradeHistoryEntry, WatchlistStock,
};
use finboard_utils::escape_html;

fn table(class: &str, title: &str, headers: &[&str], body: String) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{}</th>", h)).collect();
    format!(
        "<section class='{class}'>\n<h2>{title}</h2>\n<table>\n<thead><tr>{head}</tr></thead>\n<tbody>\n{body}</tbody>\n</table>\n</section>\n",
    )
}

fn empty_row(columns: usize, message: &str) -> String {
    format!(
        "<tr class='empty'><td colspan='{}'>{}</td></tr>\n",
        columns,
        escape_html(message)
    )
}

/// Open positions with P&L percent and cost basis
pub fn render_positions(positions: &[OpenPosition]) -> String {
    const HEADERS: [&str; 7] = ["Symbol", "Shares", "Entry", "Current", "P&amp;L %", "Side", "Total Cost"];

    let body = if positions.is_empty() {
        empty_row(HEADERS.len(), "No open positions.")
    } else {
        positions
            .iter()
            .map(|p| {
                let class = if p.is_gain() { "gain" } else { "loss" };
                format!(
                    "<tr data-id='{}'><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class='{}'>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&p.id),
                    escape_html(&p.symbol),
                    p.shares.normalize(),
                    format_price(p.entry_price),
                    format_price(p.current_price),
                    class,
                    format_signed_percent(p.pnl_percent(), p.is_gain()),
                    p.side,
                    format_plain_amount(p.total_cost()),
                )
            })
            .collect()
    };

    table("positions", "Positions", &HEADERS, body)
}

/// Working orders
pub fn render_orders(orders: &[OpenOrder]) -> String {
    const HEADERS: [&str; 7] = ["Symbol", "Side", "Qty", "Type", "Limit/Stop", "Status", "Time"];

    let body = if orders.is_empty() {
        empty_row(HEADERS.len(), "No open orders currently.")
    } else {
        orders
            .iter()
            .map(|o| {
                format!(
                    "<tr data-id='{}'><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&o.id),
                    escape_html(&o.symbol),
                    o.side,
                    o.quantity.normalize(),
                    o.order_type,
                    format_optional_price(o.limit_price),
                    o.status,
                    escape_html(&o.time),
                )
            })
            .collect()
    };

    table("orders", "Open Orders", &HEADERS, body)
}

/// Latest fills; `symbol` only changes the empty-state text
pub fn render_history(trades: &[TradeHistoryEntry], symbol: Option<&str>) -> String {
    const HEADERS: [&str; 7] = ["Symbol", "Side", "Qty", "Avg Price", "Type", "Time", "Status"];

    let body = if trades.is_empty() {
        empty_row(HEADERS.len(), &empty_history_message(symbol))
    } else {
        trades
            .iter()
            .map(|t| {
                format!(
                    "<tr data-id='{}'><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&t.id),
                    escape_html(&t.symbol),
                    t.side,
                    t.total_qty.normalize(),
                    format_price(t.average_price),
                    t.order_type,
                    format_fill_time(&t.filled_time),
                    t.order_status,
                )
            })
            .collect()
    };

    table("history", "History", &HEADERS, body)
}

/// Watchlist rows; the selected symbol is flagged
pub fn render_watchlist(stocks: &[WatchlistStock], selected: Option<&str>) -> String {
    const HEADERS: [&str; 5] = ["Symbol", "Price", "Volume", "Short %", "% Change"];

    let body: String = stocks
        .iter()
        .map(|s| {
            let class = if s.is_up() { "gain" } else { "loss" };
            format!(
                "<tr data-symbol='{}' data-selected='{}'><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class='{}'>{}</td></tr>\n",
                escape_html(&s.symbol),
                selected == Some(s.symbol.as_str()),
                escape_html(&s.symbol),
                format_price(s.price),
                format_volume(s.volume),
                format_short_float(s.short_float),
                class,
                format_percent(s.change_percent),
            )
        })
        .collect();

    table("watchlist", "Watchlist", &HEADERS, body)
}
