//! Open positions: derived P&L fields and the in-memory position book

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::{OpenPosition, PositionSide};

impl OpenPosition {
    /// Unrealized P&L: `(current - entry) * shares`
    pub fn pnl(&self) -> Decimal {
        (self.current_price - self.entry_price) * self.shares
    }

    /// Unrealized P&L in percent of the entry price
    ///
    /// `None` when the entry price is zero.
    pub fn pnl_percent(&self) -> Option<Decimal> {
        (self.current_price - self.entry_price)
            .checked_div(self.entry_price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }

    /// Cost basis: `entry * shares`
    pub fn total_cost(&self) -> Decimal {
        self.entry_price * self.shares
    }

    /// Whether the position is flat or in profit
    pub fn is_gain(&self) -> bool {
        self.pnl() >= Decimal::ZERO
    }

    /// Position row with all derived fields filled in
    pub fn metrics(&self) -> PositionMetrics {
        PositionMetrics {
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            side: self.side,
            shares: self.shares,
            entry_price: self.entry_price,
            current_price: self.current_price,
            pnl: self.pnl(),
            pnl_percent: self.pnl_percent(),
            total_cost: self.total_cost(),
        }
    }
}

/// Position with derived values, as printed by the CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionMetrics {
    pub id: String,
    pub symbol: String,
    pub side: PositionSide,
    pub shares: Decimal,
    pub entry_price: Decimal,
    pub current_price: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Option<Decimal>,
    pub total_cost: Decimal,
}

/// Caller-owned set of open positions
#[derive(Debug, Clone, Default)]
pub struct PositionBook {
    positions: Vec<OpenPosition>,
}

impl PositionBook {
    pub fn new(positions: Vec<OpenPosition>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[OpenPosition] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Derived rows for every position, in book order
    pub fn metrics(&self) -> Vec<PositionMetrics> {
        self.positions.iter().map(OpenPosition::metrics).collect()
    }

    /// Remove a position from the book
    pub fn close(&mut self, id: &str) -> CoreResult<OpenPosition> {
        let index = self
            .positions
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::PositionNotFound { id: id.to_string() })?;
        let closed = self.positions.remove(index);
        log::info!("Closed position {} ({} {})", closed.id, closed.side, closed.symbol);
        Ok(closed)
    }
}
