//! Static HTML rendering of the dashboard
//!
//! Views are organized into modules:
//! - banking: total balance and accounts card
//! - transactions: recent transactions with filters and see more / see less
//! - trading: positions, open orders, trade history, watchlist
//!
//! Every function returns an HTML fragment; `render_page` wraps them into a
//! complete document.

pub mod banking;
pub mod trading;
pub mod transactions;

use finboard_core::{Dashboard, FilterCriteria, TransactionQuery};
use finboard_utils::escape_html;

pub use banking::render_accounts;
pub use trading::{render_history, render_orders, render_positions, render_watchlist};
pub use transactions::{display_amount, render_transactions};

/// Per-render view state
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Transaction filter state
    pub criteria: FilterCriteria,
    /// Symbol synced between the watchlist and the history table
    pub symbol: Option<String>,
}

/// Wrap content into a full HTML document
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang='en'>
<head>
<meta charset='utf-8'>
<title>{}</title>
</head>
<body>
<main>
{}</main>
</body>
</html>
"#,
        escape_html(title),
        content
    )
}

/// Render the whole dashboard
pub fn render_page(
    dashboard: &Dashboard,
    query: &mut TransactionQuery,
    options: &PageOptions,
) -> String {
    let symbol = options.symbol.as_deref();
    let types = query.types();
    let result = query.run(&options.criteria);
    log::debug!(
        "Rendering page: {} of {} transactions visible, symbol={:?}",
        result.rows.len(),
        result.matched,
        symbol
    );

    let mut content = render_accounts(dashboard.accounts());
    content.push_str(&render_transactions(&result, &types, &options.criteria));
    content.push_str(&render_positions(dashboard.positions().positions()));
    content.push_str(&render_orders(dashboard.orders().orders()));
    content.push_str(&render_history(&dashboard.recent_trades(symbol), symbol));
    content.push_str(&render_watchlist(dashboard.watchlist(), symbol));

    layout("Dashboard", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_config::Config;
    use finboard_core::Dataset;

    fn sample_dashboard() -> Dashboard {
        let dataset = Dataset::from_yaml(include_str!("../../../data/dashboard.yaml")).unwrap();
        Dashboard::new(Config::default(), dataset)
    }

    #[test]
    fn test_layout_escapes_title() {
        let html = layout("A & B", "<p>x</p>\n");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<p>x</p>"));
    }

    #[test]
    fn test_render_page_contains_all_sections() {
        let dashboard = sample_dashboard();
        let mut query = dashboard.transaction_query();
        let html = render_page(&dashboard, &mut query, &PageOptions::default());

        for section in ["accounts", "transactions", "positions", "orders", "history", "watchlist"] {
            assert!(html.contains(&format!("<section class='{}'>", section)), "missing {}", section);
        }
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_render_page_with_symbol() {
        let dashboard = sample_dashboard();
        let mut query = dashboard.transaction_query();
        let options = PageOptions {
            criteria: FilterCriteria::new(),
            symbol: Some("IBM".to_string()),
        };
        let html = render_page(&dashboard, &mut query, &options);
        assert!(html.contains("No trade history for IBM."));
    }
}
