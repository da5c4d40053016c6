//! Transaction query engine
//!
//! Filters the injected transaction list by type, date range and free-text
//! search, then applies the collapsed/expanded display window.
//!
//! Structure:
//! - free functions (`distinct_types`, `filter`, `visible_window`) are pure
//!   and hold no state
//! - `TransactionQuery` owns the list for a session and memoizes the filtered
//!   result until the criteria or the list change

use std::sync::Arc;

use finboard_config::DEFAULT_COLLAPSED_ROWS;
use serde::Serialize;

use crate::time::{DateFilter, DateRange};
use crate::{Transaction, TransactionType};

/// Rows shown while the list is collapsed
pub const COLLAPSED_ROW_LIMIT: usize = DEFAULT_COLLAPSED_ROWS;

/// Type selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    /// No type restriction
    #[default]
    All,
    /// Only transactions of this type
    Only(TransactionType),
}

impl TypeFilter {
    /// Check if a transaction type passes the filter
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == kind,
        }
    }

    /// Label shown in the type selector
    pub fn label(&self) -> String {
        match self {
            TypeFilter::All => "All Types".to_string(),
            TypeFilter::Only(kind) => kind.to_string(),
        }
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<TransactionType>().map(TypeFilter::Only)
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

impl Serialize for TypeFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Filter state owned by the view for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub type_filter: TypeFilter,
    pub date_range: Option<DateRange>,
    pub search_text: String,
    pub expanded: bool,
}

impl FilterCriteria {
    /// Criteria matching everything, collapsed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.type_filter = type_filter;
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.date_range = range;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip between "see more" and "see less"
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// The part of the criteria that decides which rows match
    fn filter_key(&self) -> FilterKey {
        FilterKey {
            type_filter: self.type_filter,
            date_range: self.date_range.filter(DateRange::is_active),
            search: self.search_text.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    type_filter: TypeFilter,
    date_range: Option<DateRange>,
    search: String,
}

impl FilterKey {
    fn matches(&self, tx: &Transaction) -> bool {
        let type_match = self.type_filter.matches(tx.kind);
        let date_match = self
            .date_range
            .as_ref()
            .map_or(true, |range| tx.filter_by_date(range));
        let search_match = self.search.is_empty() || tx.contains_text(&self.search);

        type_match && date_match && search_match
    }
}

/// Distinct transaction types in first-seen order, prefixed by `All`
pub fn distinct_types(transactions: &[Transaction]) -> Vec<TypeFilter> {
    let mut types = vec![TypeFilter::All];
    for tx in transactions {
        let entry = TypeFilter::Only(tx.kind);
        if !types.contains(&entry) {
            types.push(entry);
        }
    }
    types
}

/// Stable filter of the transactions matching every criterion
pub fn filter(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    let key = criteria.filter_key();
    transactions
        .iter()
        .filter(|tx| key.matches(tx))
        .cloned()
        .collect()
}

/// Rows to display for the default collapsed limit
pub fn visible_window<T>(filtered: &[T], expanded: bool) -> &[T] {
    visible_window_with(filtered, expanded, COLLAPSED_ROW_LIMIT)
}

/// Rows to display when collapsed lists show at most `limit` rows
pub fn visible_window_with<T>(filtered: &[T], expanded: bool, limit: usize) -> &[T] {
    if expanded {
        filtered
    } else {
        &filtered[..filtered.len().min(limit)]
    }
}

/// Output of one query run, ready for the table renderer
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    /// Rows to render, in original order
    pub rows: &'a [Transaction],
    /// Total number of matching transactions
    pub matched: usize,
    /// Whether the see more / see less control is offered
    pub has_more: bool,
    /// Whether the rows are the full match list
    pub expanded: bool,
}

impl QueryResult<'_> {
    /// Whether the empty-state indicator should be shown
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

#[derive(Debug)]
struct Memo {
    version: u64,
    key: FilterKey,
    filtered: Vec<Transaction>,
}

/// Memoizing query session over an injected transaction list
#[derive(Debug)]
pub struct TransactionQuery {
    transactions: Arc<[Transaction]>,
    version: u64,
    collapsed_rows: usize,
    memo: Option<Memo>,
    evaluations: usize,
}

impl TransactionQuery {
    /// Create a session over the given list
    pub fn new(transactions: Arc<[Transaction]>) -> Self {
        Self {
            transactions,
            version: 0,
            collapsed_rows: COLLAPSED_ROW_LIMIT,
            memo: None,
            evaluations: 0,
        }
    }

    /// Override the number of rows shown while collapsed
    pub fn with_collapsed_rows(mut self, rows: usize) -> Self {
        self.collapsed_rows = rows;
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn collapsed_rows(&self) -> usize {
        self.collapsed_rows
    }

    /// Swap in a new list; cached results are discarded
    pub fn replace_transactions(&mut self, transactions: Arc<[Transaction]>) {
        self.transactions = transactions;
        self.version += 1;
        self.memo = None;
    }

    /// Number of times the filter actually ran
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Options for the type selector
    pub fn types(&self) -> Vec<TypeFilter> {
        distinct_types(&self.transactions)
    }

    /// Matching transactions, recomputed only when the filter key changes
    pub fn filtered(&mut self, criteria: &FilterCriteria) -> &[Transaction] {
        let key = criteria.filter_key();
        let fresh = matches!(
            &self.memo,
            Some(memo) if memo.version == self.version && memo.key == key
        );

        if !fresh {
            let filtered: Vec<Transaction> = self
                .transactions
                .iter()
                .filter(|tx| key.matches(tx))
                .cloned()
                .collect();
            self.evaluations += 1;
            log::debug!(
                "Transaction filter ran: type={}, range={:?}, search={:?} -> {} of {} rows",
                key.type_filter,
                key.date_range,
                key.search,
                filtered.len(),
                self.transactions.len()
            );
            self.memo = Some(Memo {
                version: self.version,
                key,
                filtered,
            });
        }

        match &self.memo {
            Some(memo) => &memo.filtered,
            None => &[],
        }
    }

    /// Run the query and apply the display window
    pub fn run(&mut self, criteria: &FilterCriteria) -> QueryResult<'_> {
        let limit = self.collapsed_rows;
        let expanded = criteria.expanded;
        let filtered = self.filtered(criteria);
        let matched = filtered.len();

        QueryResult {
            rows: visible_window_with(filtered, expanded, limit),
            matched,
            has_more: matched > limit,
            expanded,
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_transactions;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ids(rows: &[Transaction]) -> Vec<&str> {
        rows.iter().map(|t| t.id.as_str()).collect()
    }

    fn criteria_for(type_filter: &str) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        criteria.set_type_filter(type_filter.parse().unwrap());
        criteria
    }

    #[test]
    fn test_default_criteria() {
        let criteria = FilterCriteria::new();
        assert_eq!(criteria.type_filter, TypeFilter::All);
        assert!(criteria.date_range.is_none());
        assert!(criteria.search_text.is_empty());
        assert!(!criteria.expanded);
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!("ALL".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "ach".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(TransactionType::Ach)
        );
        assert_eq!(
            "Purchase".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(TransactionType::Purchase)
        );
        assert!("refund".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_distinct_types_first_seen_order() {
        let txs = sample_transactions();
        let types = distinct_types(&txs);
        assert_eq!(
            types,
            vec![
                TypeFilter::All,
                TypeFilter::Only(TransactionType::Ach),
                TypeFilter::Only(TransactionType::Deposit),
                TypeFilter::Only(TransactionType::Purchase),
                TypeFilter::Only(TransactionType::Withdrawal),
                TypeFilter::Only(TransactionType::Transfer),
            ]
        );
    }

    #[test]
    fn test_distinct_types_only_present_types() {
        let txs: Vec<Transaction> = sample_transactions()
            .into_iter()
            .filter(|t| t.kind == TransactionType::Deposit)
            .collect();
        assert_eq!(
            distinct_types(&txs),
            vec![TypeFilter::All, TypeFilter::Only(TransactionType::Deposit)]
        );
        assert_eq!(distinct_types(&[]), vec![TypeFilter::All]);
    }

    #[test]
    fn test_all_filter_is_identity() {
        let txs = sample_transactions();
        let filtered = filter(&txs, &FilterCriteria::new());
        assert_eq!(filtered, txs);
    }

    #[test]
    fn test_type_filter_selects_exactly_that_type() {
        let txs = sample_transactions();
        let filtered = filter(&txs, &criteria_for("purchase"));

        assert_eq!(
            ids(&filtered),
            vec!["txn_3", "txn_5", "txn_7", "txn_9", "txn_11"]
        );
        let amounts: Vec<Decimal> = filtered.iter().map(|t| t.amount).collect();
        let expected: Vec<Decimal> = ["-12.50", "-6.75", "-24.99", "-32.15", "-15.99"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(amounts, expected);

        let all_purchases = txs
            .iter()
            .filter(|t| t.kind == TransactionType::Purchase)
            .count();
        assert_eq!(filtered.len(), all_purchases);
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let txs = sample_transactions();
        let mut criteria = FilterCriteria::new();
        criteria.set_date_range(Some(DateRange::new(day("2025-07-22"), day("2025-07-25"))));

        let filtered = filter(&txs, &criteria);
        assert_eq!(ids(&filtered), vec!["txn_4", "txn_5", "txn_6", "txn_7", "txn_8"]);
    }

    #[test]
    fn test_date_range_without_upper_bound() {
        let txs = sample_transactions();
        let mut criteria = FilterCriteria::new();
        criteria.set_date_range(Some(DateRange::starting(day("2025-07-27"))));

        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_1", "txn_2"]);
    }

    #[test]
    fn test_inverted_range_yields_empty_result() {
        let txs = sample_transactions();
        let mut criteria = FilterCriteria::new();
        criteria.set_date_range(Some(DateRange::new(day("2025-07-28"), day("2025-07-15"))));

        assert!(filter(&txs, &criteria).is_empty());
    }

    #[test]
    fn test_search_matches_any_field() {
        let txs = sample_transactions();
        let mut criteria = FilterCriteria::new();

        criteria.set_search_text("txn_1");
        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_1", "txn_10", "txn_11", "txn_12"]);

        criteria.set_search_text("2025-07-25");
        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_4", "txn_5"]);

        criteria.set_search_text("-12.5");
        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_3"]);

        criteria.set_search_text("WITHDRAWAL");
        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_4"]);
    }

    #[test]
    fn test_search_deposit_hits_description_and_type() {
        let txs = sample_transactions();
        let mut criteria = FilterCriteria::new();
        criteria.set_search_text("deposit");

        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_2", "txn_8", "txn_12"]);
    }

    #[test]
    fn test_combined_criteria() {
        let txs = sample_transactions();
        let mut criteria = criteria_for("ACH");
        criteria.set_search_text("loan");
        assert_eq!(ids(&filter(&txs, &criteria)), vec!["txn_10"]);

        criteria.set_date_range(Some(DateRange::starting(day("2025-07-21"))));
        assert!(filter(&txs, &criteria).is_empty());
    }

    #[test]
    fn test_visible_window() {
        let rows: Vec<u32> = (0..12).collect();
        assert_eq!(visible_window(&rows, true).len(), 12);
        assert_eq!(visible_window(&rows, false), &rows[..7]);

        let short: Vec<u32> = (0..3).collect();
        assert_eq!(visible_window(&short, false).len(), 3);
        assert!(visible_window::<u32>(&[], false).is_empty());
        assert_eq!(visible_window_with(&rows, false, 2), &[0, 1]);
    }

    #[test]
    fn test_run_reports_window_and_more_control() {
        let mut query = TransactionQuery::new(sample_transactions().into());
        let mut criteria = FilterCriteria::new();

        let result = query.run(&criteria);
        assert_eq!(result.matched, 12);
        assert_eq!(result.rows.len(), 7);
        assert!(result.has_more);

        criteria.toggle_expanded();
        let result = query.run(&criteria);
        assert_eq!(result.rows.len(), 12);
        assert!(result.has_more);

        criteria.set_search_text("deposit");
        let result = query.run(&criteria);
        assert_eq!(result.matched, 3);
        assert!(!result.has_more);
    }

    #[test]
    fn test_run_empty_result() {
        let mut query = TransactionQuery::new(sample_transactions().into());
        let mut criteria = FilterCriteria::new();
        criteria.set_search_text("no such payee");

        let result = query.run(&criteria);
        assert!(result.is_empty());
        assert!(result.rows.is_empty());
        assert!(!result.has_more);
    }

    #[test]
    fn test_toggle_expanded_reuses_memo() {
        let mut query = TransactionQuery::new(sample_transactions().into());
        let mut criteria = FilterCriteria::new();

        query.run(&criteria);
        criteria.toggle_expanded();
        query.run(&criteria);
        criteria.toggle_expanded();
        query.run(&criteria);
        assert_eq!(query.evaluations(), 1);

        // Search is case-insensitive, so the key is too
        criteria.set_search_text("Deposit");
        query.run(&criteria);
        criteria.set_search_text("DEPOSIT");
        query.run(&criteria);
        assert_eq!(query.evaluations(), 2);

        criteria.set_type_filter(TypeFilter::Only(TransactionType::Deposit));
        query.run(&criteria);
        assert_eq!(query.evaluations(), 3);
    }

    #[test]
    fn test_replace_transactions_invalidates_memo() {
        let txs = sample_transactions();
        let mut query = TransactionQuery::new(txs.clone().into());
        let criteria = FilterCriteria::new();
        assert_eq!(query.run(&criteria).matched, 12);

        let fewer: Vec<Transaction> = txs.into_iter().take(2).collect();
        query.replace_transactions(fewer.into());
        assert_eq!(query.run(&criteria).matched, 2);
        assert_eq!(query.evaluations(), 2);
    }

    #[test]
    fn test_custom_collapsed_rows() {
        let mut query = TransactionQuery::new(sample_transactions().into()).with_collapsed_rows(3);
        let result = query.run(&FilterCriteria::new());
        assert_eq!(ids(result.rows), vec!["txn_1", "txn_2", "txn_3"]);
        assert!(result.has_more);
    }
}
