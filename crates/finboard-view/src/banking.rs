//! Banking page: total balance and the accounts card

use finboard_core::format::{format_apy, format_plain_amount};
use finboard_core::{total_balance, Account};
use finboard_utils::escape_html;

/// Total balance headline plus one entry per account
pub fn render_accounts(accounts: &[Account]) -> String {
    let items: String = accounts
        .iter()
        .map(|a| {
            format!(
                r#"<li>
  <a href='{href}'>
    <div class='name'>{name}</div>
    <div class='apy'>Current APY {apy}</div>
    <div class='balance'>{balance}</div>
    <span>View</span>
  </a>
</li>
"#,
                href = escape_html(&a.href),
                name = a.name,
                apy = format_apy(a.apy),
                balance = format_plain_amount(a.balance),
            )
        })
        .collect();

    format!(
        "<h1>Banking</h1>\n<div class='total-balance'>{}</div>\n<section class='accounts'>\n<header><h2>Accounts</h2></header>\n<ul>\n{}</ul>\n</section>\n",
        format_plain_amount(total_balance(accounts)),
        items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_core::Dataset;

    #[test]
    fn test_accounts_card() {
        let dataset = Dataset::from_yaml(include_str!("../../../data/dashboard.yaml")).unwrap();
        let html = render_accounts(&dataset.accounts);

        assert!(html.contains("<div class='total-balance'>$9,389.97</div>"));
        assert!(html.contains("Current APY 0.50%"));
        assert!(html.contains("Current APY 3.80%"));
        assert!(html.contains("<div class='balance'>$9,258.71</div>"));
    }

    #[test]
    fn test_no_accounts() {
        let html = render_accounts(&[]);
        assert!(html.contains("<div class='total-balance'>$0.00</div>"));
    }
}
