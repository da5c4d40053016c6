//! Core dashboard processing: transaction queries, trading metrics and
//! dataset loading

pub mod error;
pub mod format;
pub mod history;
pub mod models;
pub mod orders;
pub mod positions;
pub mod query;
pub mod time;
pub mod types;

use finboard_config::Config;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use history::{empty_history_message, recent_trades};
pub use models::{
    total_balance, Account, OpenOrder, OpenPosition, TradeHistoryEntry, Transaction,
    WatchlistStock,
};
pub use orders::OrderBook;
pub use positions::{PositionBook, PositionMetrics};
pub use query::{
    distinct_types, filter, visible_window, FilterCriteria, QueryResult, TransactionQuery,
    TypeFilter,
};
pub use time::DateRange;
pub use types::{
    AccountKind, FillStatus, OrderAction, OrderSide, OrderStatus, OrderType, PositionSide,
    TransactionType,
};

/// Everything the dashboard displays, as read from the dataset file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub positions: Vec<OpenPosition>,
    #[serde(default)]
    pub orders: Vec<OpenOrder>,
    #[serde(default)]
    pub trade_history: Vec<TradeHistoryEntry>,
    #[serde(default)]
    pub watchlist: Vec<WatchlistStock>,
}

impl Dataset {
    /// Parse and validate a dataset from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let dataset: Dataset = serde_yaml::from_str(content).map_err(|e| CoreError::ParseError {
            message: e.to_string(),
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Ids must be unique within each collection
    pub fn validate(&self) -> CoreResult<()> {
        ensure_unique("account", self.accounts.iter().map(|a| a.id.as_str()))?;
        ensure_unique("transaction", self.transactions.iter().map(|t| t.id.as_str()))?;
        ensure_unique("position", self.positions.iter().map(|p| p.id.as_str()))?;
        ensure_unique("order", self.orders.iter().map(|o| o.id.as_str()))?;
        ensure_unique("trade", self.trade_history.iter().map(|t| t.id.as_str()))?;
        ensure_unique("watchlist stock", self.watchlist.iter().map(|s| s.id.as_str()))?;
        Ok(())
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> CoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::DuplicateEntry {
                entry: format!("{} {}", kind, id),
            });
        }
    }
    Ok(())
}

/// Loaded dashboard state
#[derive(Debug)]
pub struct Dashboard {
    config: Config,
    accounts: Vec<Account>,
    transactions: Arc<[Transaction]>,
    positions: PositionBook,
    orders: OrderBook,
    trade_history: Vec<TradeHistoryEntry>,
    watchlist: Vec<WatchlistStock>,
}

impl Dashboard {
    /// Build from an already validated dataset
    pub fn new(config: Config, dataset: Dataset) -> Self {
        Self {
            config,
            accounts: dataset.accounts,
            transactions: dataset.transactions.into(),
            positions: PositionBook::new(dataset.positions),
            orders: OrderBook::new(dataset.orders),
            trade_history: dataset.trade_history,
            watchlist: dataset.watchlist,
        }
    }

    /// Read the dataset named by the configuration
    pub async fn load(config: Config) -> CoreResult<Self> {
        let path = config.dataset_path();
        if !path.exists() {
            return Err(CoreError::DatasetNotFound {
                path: path.display().to_string(),
            });
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let dataset = Dataset::from_yaml(&content)?;
        log::info!(
            "Loaded dataset {}: {} accounts, {} transactions, {} positions, {} orders, {} fills, {} watchlist stocks",
            path.display(),
            dataset.accounts.len(),
            dataset.transactions.len(),
            dataset.positions.len(),
            dataset.orders.len(),
            dataset.trade_history.len(),
            dataset.watchlist.len()
        );

        Ok(Self::new(config, dataset))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> Decimal {
        total_balance(&self.accounts)
    }

    pub fn transactions(&self) -> Arc<[Transaction]> {
        Arc::clone(&self.transactions)
    }

    /// New query session over the transaction list
    pub fn transaction_query(&self) -> TransactionQuery {
        TransactionQuery::new(self.transactions())
            .with_collapsed_rows(self.config.display.collapsed_rows)
    }

    pub fn positions(&self) -> &PositionBook {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut PositionBook {
        &mut self.positions
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn orders_mut(&mut self) -> &mut OrderBook {
        &mut self.orders
    }

    /// Latest fills, optionally for one symbol
    pub fn recent_trades(&self, symbol: Option<&str>) -> Vec<TradeHistoryEntry> {
        recent_trades(&self.trade_history, symbol, self.config.display.history_limit)
    }

    /// Stocks shown in the watchlist card
    pub fn watchlist(&self) -> &[WatchlistStock] {
        history::watchlist(&self.watchlist, self.config.display.watchlist_limit)
    }
}


// ==================== Tests ====================
