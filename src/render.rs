//! Console presentation of the dashboard.

use crate::{
    models::{PayResponse, PaymentRecord, X402Metadata},
    services::DashboardState,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use colored::Colorize;

/// `0x1234...abcd`. Empty input stays empty.
pub fn truncate_hash(hash: &str) -> String {
    if hash.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = hash.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn format_date(at: &DateTime<Utc>) -> String {
    format_date_in(at, &Local)
}

/// Short form such as `Jan 15, 10:30 AM`.
pub fn format_date_in<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%b %-d, %I:%M %p").to_string()
}

pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn render_payment(payment: &PaymentRecord) -> String {
    let provider = if payment.provider.is_empty() {
        "Unknown Provider"
    } else {
        payment.provider.as_str()
    };
    let badge = match &payment.status {
        Some(status) if status.is_simulated() => status.as_str().yellow(),
        Some(status) => status.as_str().green(),
        None => "completed".green(),
    };
    let invoice = payment
        .invoice_id
        .as_deref()
        .map(truncate_hash)
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = format!(
        "{}  [{}]  {}\n  Quantity: {} units @ {} each\n  Invoice: {}\n",
        provider.bold(),
        badge,
        format_usd(payment.total_cost_usd),
        payment.quantity,
        format_usd(payment.price_usd_per_unit),
        invoice
    );
    if let Some(tx_hash) = &payment.tx_hash {
        out.push_str(&format!("  Tx: {}\n", truncate_hash(tx_hash)));
    }
    if let Some(created_at) = &payment.created_at {
        out.push_str(&format!("  {}\n", format_date(created_at).dimmed()));
    }

    out
}

pub fn render_result(result: &PayResponse) -> String {
    let heading = if result.ok {
        "Success".green().bold()
    } else {
        "Error".red().bold()
    };
    let mut out = format!("{}\n", heading);

    if result.ok {
        if let Some(receipt) = &result.receipt {
            out.push_str(&format!(
                "  Provider: {}\n  Amount: ${} USDC\n  Quantity: {} units\n",
                receipt.provider, receipt.total_cost_usd, receipt.quantity
            ));
            if let Some(tx_hash) = &receipt.tx_hash {
                out.push_str(&format!("  Tx: {}\n", tx_hash));
            }
        }
        if let Some(message) = &result.result {
            out.push_str(&format!("  {}\n", message.message));
        }
    }

    if let Some(error) = &result.error {
        out.push_str(&format!("  {}\n", error.red()));
    }

    out
}

pub fn render_dashboard(state: &DashboardState, starting_balance_usd: f64) -> String {
    let balance = state.balance.unwrap_or(starting_balance_usd);

    let mut out = format!(
        "{}\nWallet Balance: {}   Transactions: {}   Protocol: x402\n\n",
        "API Wallet Agent".bold(),
        format_usd(balance),
        state.payments.len()
    );

    if let Some(result) = &state.last_result {
        out.push_str(&render_result(result));
        out.push('\n');
    }

    if state.payments.is_empty() {
        out.push_str(&format!("{}\n", "No payments yet".dimmed()));
    } else {
        for payment in &state.payments {
            out.push_str(&render_payment(payment));
        }
    }

    out
}

/// Provider pricing plus what `max_usd` buys at that price.
pub fn render_pricing(metadata: &X402Metadata, max_usd: f64) -> String {
    format!(
        "{}\n  Price: {} {} per unit\n  Chain: {}\n  Wallet: {}\n  Endpoint: {}\n  Budget ${} buys {} unit(s)\n",
        metadata.name.bold(),
        metadata.price_usd,
        metadata.currency,
        metadata.chain,
        metadata.provider_wallet,
        metadata.endpoint,
        max_usd,
        metadata.affordable_units(max_usd)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentStatus, Receipt};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn truncates_hashes() {
        let hash = format!("0x{}", "ab".repeat(32));
        assert_eq!(truncate_hash(&hash), "0xabab...abab");
        assert_eq!(truncate_hash("inv_0123456789"), "inv_01...6789");
        assert_eq!(truncate_hash(""), "");
    }

    #[test]
    fn formats_dates_in_short_form() {
        let at = "2025-01-15T10:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_date_in(&at, &Utc), "Jan 15, 10:30 AM");

        let evening = "2025-03-02T21:05:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_date_in(&evening, &Utc), "Mar 2, 09:05 PM");
    }

    #[test]
    fn renders_payment_with_fallbacks() {
        plain();
        let rendered = render_payment(&PaymentRecord::default());
        assert!(rendered.contains("Unknown Provider"));
        assert!(rendered.contains("[completed]"));
        assert!(rendered.contains("Invoice: N/A"));
        assert!(rendered.contains("0 units @ $0.00 each"));
    }

    #[test]
    fn renders_simulated_payment() {
        plain();
        let payment = PaymentRecord {
            provider: "Image API Provider".to_string(),
            total_cost_usd: 0.03,
            quantity: 3,
            price_usd_per_unit: 0.01,
            invoice_id: Some("inv_0123456789abcdef".to_string()),
            tx_hash: Some("0xSIMULATED_0123456789".to_string()),
            status: Some(PaymentStatus::Simulated),
            ..Default::default()
        };

        let rendered = render_payment(&payment);
        assert!(rendered.contains("Image API Provider  [simulated]  $0.03"));
        assert!(rendered.contains("3 units @ $0.01 each"));
        assert!(rendered.contains("Invoice: inv_01...cdef"));
        assert!(rendered.contains("Tx: 0xSIMU...6789"));
    }

    #[test]
    fn dashboard_shows_starting_balance_before_first_poll() {
        plain();
        let rendered = render_dashboard(&DashboardState::default(), 1.0);
        assert!(rendered.contains("Wallet Balance: $1.00"));
        assert!(rendered.contains("Transactions: 0"));
        assert!(rendered.contains("No payments yet"));
    }

    #[test]
    fn dashboard_shows_error_banner() {
        plain();
        let state = DashboardState {
            balance: Some(0.95),
            last_result: Some(PayResponse::failure("Budget exceeded")),
            ..Default::default()
        };

        let rendered = render_dashboard(&state, 1.0);
        assert!(rendered.contains("Wallet Balance: $0.95"));
        assert!(rendered.contains("Error"));
        assert!(rendered.contains("Budget exceeded"));
    }

    #[test]
    fn pricing_shows_affordable_units() {
        plain();
        let metadata = X402Metadata::new("Image API Provider", 0.01, "0xPROVIDER_WALLET_ON_ARC");

        let rendered = render_pricing(&metadata, 0.05);
        assert!(rendered.starts_with("Image API Provider\n"));
        assert!(rendered.contains("Price: 0.01 USDC per unit"));
        assert!(rendered.contains("Budget $0.05 buys 5 unit(s)"));

        assert!(render_pricing(&metadata, 0.0).contains("buys 0 unit(s)"));
    }

    #[test]
    fn result_shows_receipt_details() {
        plain();
        let result = PayResponse {
            ok: true,
            receipt: Some(Receipt {
                provider: "Image API Provider".to_string(),
                total_cost_usd: 0.03,
                quantity: 3,
                tx_hash: Some("0xSIMULATED_abc".to_string()),
                invoice_id: None,
            }),
            ..Default::default()
        };

        let rendered = render_result(&result);
        assert!(rendered.starts_with("Success"));
        assert!(rendered.contains("Amount: $0.03 USDC"));
        assert!(rendered.contains("Quantity: 3 units"));
        assert!(rendered.contains("Tx: 0xSIMULATED_abc"));
    }
}
