//! Recent transactions section
//!
//! Renders the filter header (type selector, date label, search box), the
//! visible rows of a query result and the see more / see less control.

use finboard_core::format::{
    format_plain_amount, format_range_label, format_short_date, format_signed_amount,
};
use finboard_core::{FilterCriteria, QueryResult, Transaction, TypeFilter};
use finboard_utils::escape_html;

/// Debits use the plain form, credits the signed form
pub fn display_amount(tx: &Transaction) -> String {
    if tx.is_debit() {
        format_plain_amount(tx.amount)
    } else {
        format_signed_amount(tx.amount)
    }
}

fn render_type_options(types: &[TypeFilter], selected: TypeFilter) -> String {
    types
        .iter()
        .map(|t| {
            let value = escape_html(&t.to_string());
            let marker = if *t == selected { " selected" } else { "" };
            format!(
                "<option value='{}'{}>{}</option>",
                value,
                marker,
                escape_html(&t.label())
            )
        })
        .collect()
}

fn render_row(tx: &Transaction) -> String {
    let amount_class = if tx.is_debit() { "amount debit" } else { "amount credit" };
    format!(
        r#"<tr data-id='{id}'>
  <td>{date}</td>
  <td class='description'>{description}</td>
  <td>{kind}</td>
  <td class='{amount_class}'>{amount}</td>
</tr>
"#,
        id = escape_html(&tx.id),
        date = format_short_date(tx.date),
        description = escape_html(&tx.description),
        kind = tx.kind,
        amount_class = amount_class,
        amount = display_amount(tx),
    )
}

/// Transactions card for one query result
pub fn render_transactions(
    result: &QueryResult<'_>,
    types: &[TypeFilter],
    criteria: &FilterCriteria,
) -> String {
    let body = if result.is_empty() {
        "<tr class='empty'><td colspan='4'>No transactions found.</td></tr>\n".to_string()
    } else {
        result.rows.iter().map(render_row).collect::<String>()
    };

    let toggle = if result.has_more {
        let label = if result.expanded { "See Less" } else { "See More" };
        format!(
            "<div class='toggle'><button type='button' data-expanded='{}'>{}</button></div>\n",
            result.expanded, label
        )
    } else {
        String::new()
    };

    format!(
        r#"<section class='transactions'>
<header>
  <h2>Recent Transactions</h2>
  <select name='type'>{options}</select>
  <button type='button' class='date-range'>{range}</button>
  <input type='search' name='q' placeholder='Search...' value='{search}'>
</header>
<table>
<thead><tr><th>Date</th><th>Description</th><th>Type</th><th>Amount</th></tr></thead>
<tbody>
{body}</tbody>
</table>
{toggle}</section>
"#,
        options = render_type_options(types, criteria.type_filter),
        range = escape_html(&format_range_label(criteria.date_range.as_ref())),
        search = escape_html(&criteria.search_text),
        body = body,
        toggle = toggle,
    )
}
