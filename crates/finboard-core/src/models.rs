//! Core data models for the dashboard

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    AccountKind, FillStatus, OrderAction, OrderSide, OrderStatus, OrderType, PositionSide,
    TransactionType,
};

/// Bank account shown in the accounts card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable account identifier
    pub id: String,
    /// Account kind (checking, savings)
    pub name: AccountKind,
    /// Current balance in USD
    pub balance: Decimal,
    /// Annual percentage yield as a fraction (0.005 = 0.50%)
    pub apy: Decimal,
    /// Link to the account detail view
    #[serde(default)]
    pub href: String,
}

/// Sum of all account balances
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts.iter().map(|a| a.balance).sum()
}

/// Bank transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Posting date (no time component)
    pub date: NaiveDate,
    /// Free-text label
    pub description: String,
    /// Transaction type
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Signed amount; negative values are debits
    pub amount: Decimal,
}

impl Transaction {
    /// Money leaving the account
    pub fn is_debit(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Money entering the account (zero counts as a credit)
    pub fn is_credit(&self) -> bool {
        !self.is_debit()
    }

    /// String form of every field, as matched by free-text search
    ///
    /// Amounts use their shortest decimal form (`-12.5`, `1200`).
    pub fn search_fields(&self) -> [String; 5] {
        [
            self.id.clone(),
            self.date.to_string(),
            self.description.clone(),
            self.kind.to_string(),
            self.amount.normalize().to_string(),
        ]
    }

    /// Check if any field contains the already-lowercased needle
    pub fn contains_text(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Open trading position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub id: String,
    pub symbol: String,
    pub side: PositionSide,
    pub shares: Decimal,
    pub entry_price: Decimal,
    pub current_price: Decimal,
}

/// Working order that has not been filled yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub id: String,
    pub action: OrderAction,
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub order_type: OrderType,
    /// Limit or stop trigger price; market orders carry none
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    pub status: OrderStatus,
    /// Wall-clock label of when the order was placed (e.g. "09:42:11 AM")
    pub time: String,
}

/// Completed fill in the trade history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistoryEntry {
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub total_qty: Decimal,
    pub average_price: Decimal,
    pub order_type: OrderType,
    pub filled_time: DateTime<Utc>,
    pub order_status: FillStatus,
}

/// Quote row in the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistStock {
    pub id: String,
    pub symbol: String,
    pub price: Decimal,
    /// Daily change in percent
    pub change_percent: Decimal,
    /// Traded volume in millions of shares
    #[serde(default)]
    pub volume: Option<Decimal>,
    /// Short interest as percent of float
    #[serde(default)]
    pub short_float: Option<Decimal>,
}

impl WatchlistStock {
    /// Whether the daily change is flat or positive
    pub fn is_up(&self) -> bool {
        self.change_percent >= Decimal::ZERO
    }
}
