//! Open orders book

use crate::error::{CoreError, CoreResult};
use crate::OpenOrder;

/// Caller-owned list of working orders
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<OpenOrder>,
}

impl OrderBook {
    pub fn new(orders: Vec<OpenOrder>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[OpenOrder] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Drop an order from the book; nothing is sent anywhere
    pub fn cancel(&mut self, id: &str) -> CoreResult<OpenOrder> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound { id: id.to_string() })?;
        let canceled = self.orders.remove(index);
        log::info!("Canceled order {} ({} {})", canceled.id, canceled.action, canceled.symbol);
        Ok(canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_dataset;

    #[test]
    fn test_cancel_keeps_remaining_order() {
        let mut book = OrderBook::new(sample_dataset().orders);
        let canceled = book.cancel("ord_2").unwrap();
        assert_eq!(canceled.symbol, "AAPL");

        let remaining: Vec<&str> = book.orders().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(remaining, vec!["ord_1", "ord_3"]);
    }

    #[test]
    fn test_cancel_unknown_order() {
        let mut book = OrderBook::new(vec![]);
        assert!(book.is_empty());
        let err = book.cancel("ord_9").unwrap_err();
        assert!(err.to_string().contains("ord_9"));
    }
}
