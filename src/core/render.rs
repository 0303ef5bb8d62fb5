//! Composes submissions into the fixed Uzbek message templates.
//!
//! Section order is part of the contract: title, customer block, items
//! block, plan/install/total lines, note, date, source. Optional lines
//! are dropped entirely when empty and blank separators never run
//! together.

use crate::core::currency::{format_uzs, CurrencyStyle};
use crate::core::escape::escape_for;
use crate::domain::model::{ContactSubmission, Dialect, OrderSubmission, RenderedMessage};
use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;

pub fn render_order(
    order: &OrderSubmission,
    dialect: Dialect,
    currency: CurrencyStyle,
) -> RenderedMessage {
    let e = |s: &str| escape_for(dialect, s);
    let fmt = |n: f64| e(&format_uzs(n, currency));

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("🧾 {}", bold(dialect, "Yangi buyurtma")));
    lines.push(String::new());
    lines.push(format!(
        "👤 {} {}",
        bold(dialect, "Mijoz:"),
        e(&order.customer.name)
    ));
    lines.push(format!(
        "📞 {} {}",
        bold(dialect, "Telefon:"),
        e(&order.customer.phone)
    ));
    lines.push(String::new());

    if !order.items.is_empty() {
        lines.push(format!("📦 {}", bold(dialect, "Buyurtma tarkibi:")));
        for (i, item) in order.items.iter().enumerate() {
            lines.push(format!("   {}) {}", i + 1, e(&item.title)));
            lines.push(format!(
                "      └ {} × {} = {}",
                item.qty,
                fmt(item.price),
                bold(dialect, &fmt(item.subtotal()))
            ));
        }
        lines.push(String::new());
    }

    if let Some(plan) = &order.plan {
        lines.push(format!(
            "📋 {} {} {}/{}",
            bold(dialect, "Tarif:"),
            e(&plan.tag),
            fmt(plan.price_uzs),
            plan.cycle.label()
        ));
    }
    if order.install_fee() > 0.0 {
        lines.push(format!(
            "🛠 {} {}",
            bold(dialect, "O'rnatish:"),
            fmt(order.install_fee())
        ));
    }
    if !order.items.is_empty() {
        lines.push(format!("💰 {} {}", bold(dialect, "Jami:"), fmt(order.total)));
    }
    if order.plan.is_some() || order.install_fee() > 0.0 || !order.items.is_empty() {
        lines.push(format!(
            "💳 {} {}",
            bold(dialect, "Birinchi to'lov:"),
            fmt(order.grand_first_payment())
        ));
    }
    if let Some(note) = order.customer.note.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("🗒 {} {}", bold(dialect, "Izoh:"), e(note)));
    }
    lines.push(String::new());
    lines.push(format!(
        "📅 {} {}",
        bold(dialect, "Sana:"),
        e(&format_date(resolve_created_at(order.created_at.as_ref())))
    ));
    if let Some(source) = order.source.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("🔗 {} {}", bold(dialect, "Manba:"), e(source)));
    }

    RenderedMessage {
        text: join_lines(&lines),
        dialect,
    }
}

pub fn render_contact(contact: &ContactSubmission, dialect: Dialect) -> RenderedMessage {
    let e = |s: &str| escape_for(dialect, s);

    let lines = vec![
        format!("📨 {}", bold(dialect, "Yangi murojaat")),
        String::new(),
        format!("👤 {} {}", bold(dialect, "Ism:"), e(&contact.name)),
        format!("📞 {} {}", bold(dialect, "Telefon:"), e(&contact.phone)),
        String::new(),
        format!("💬 {} {}", bold(dialect, "Xabar:"), e(&contact.message)),
        String::new(),
        format!(
            "📅 {} {}",
            bold(dialect, "Sana:"),
            e(&format_date(Local::now()))
        ),
    ];

    RenderedMessage {
        text: join_lines(&lines),
        dialect,
    }
}

fn bold(dialect: Dialect, inner: &str) -> String {
    match dialect {
        Dialect::MarkdownV2 => format!("*{inner}*"),
        Dialect::Html => format!("<b>{inner}</b>"),
    }
}

/// Join template lines, collapsing blank runs and trimming blank edges.
fn join_lines(lines: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && kept.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|l| l.is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

/// `createdAt` may be an RFC 3339 string or epoch milliseconds; anything
/// unusable falls back to the current time.
fn resolve_created_at(raw: Option<&Value>) -> DateTime<Local> {
    match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Local))
            .unwrap_or_else(|_| Local::now()),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Local.timestamp_millis_opt(ms).single())
            .unwrap_or_else(Local::now),
        _ => Local::now(),
    }
}

/// uz-UZ `toLocaleString` shape.
fn format_date(dt: DateTime<Local>) -> String {
    dt.format("%d.%m.%Y, %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(value: Value) -> OrderSubmission {
        serde_json::from_value(value).unwrap()
    }

    fn base_order() -> OrderSubmission {
        order(json!({
            "customer": {"name": "Ali Valiyev", "phone": "+998 90 123-45-67"},
            "items": [{"title": "IP kamera", "qty": 2, "price": 50, "subtotal": 100}],
            "total": 100
        }))
    }

    #[test]
    fn order_sections_in_fixed_order() {
        let rendered = render_order(&base_order(), Dialect::MarkdownV2, CurrencyStyle::Symbol);
        let text = &rendered.text;

        let title = text.find("Yangi buyurtma").unwrap();
        let name = text.find("Ali Valiyev").unwrap();
        let items = text.find("Buyurtma tarkibi").unwrap();
        let total = text.find("Jami:").unwrap();
        let date = text.find("Sana:").unwrap();
        assert!(title < name && name < items && items < total && total < date);
        assert!(text.starts_with("🧾"));
    }

    #[test]
    fn markdown_dialect_escapes_user_text_and_currency() {
        let rendered = render_order(&base_order(), Dialect::MarkdownV2, CurrencyStyle::Symbol);
        assert!(rendered.text.contains(r"\+998 90 123\-45\-67"));
        // Item line: index, title, quantity breakdown with bold subtotal.
        assert!(rendered.text.contains("   1) IP kamera"));
        assert!(rendered.text.contains("      └ 2 × 50$ = *100$*"));
    }

    #[test]
    fn html_dialect_uses_tags_and_entities() {
        let mut o = base_order();
        o.customer.name = "Ali & Co <LLC>".to_string();
        let rendered = render_order(&o, Dialect::Html, CurrencyStyle::Symbol);
        assert!(rendered.text.contains("<b>Yangi buyurtma</b>"));
        assert!(rendered.text.contains("Ali &amp; Co &lt;LLC&gt;"));
        assert_eq!(rendered.dialect, Dialect::Html);
    }

    #[test]
    fn grand_total_sums_items_plan_and_install() {
        let o = order(json!({
            "customer": {"name": "Ali", "phone": "+998"},
            "items": [{"title": "x", "qty": 1, "price": 100}],
            "total": 100,
            "plan": {"tag": "Pro", "cycle": "monthly", "priceUZS": 50},
            "install": {"feeUZS": 20, "cycle": "monthly"}
        }));
        let rendered = render_order(&o, Dialect::MarkdownV2, CurrencyStyle::Symbol);
        assert!(rendered.text.contains("Birinchi to'lov:* 170$"));
        assert!(rendered.text.contains("Tarif:* Pro 50$/oy"));
        assert!(rendered.text.contains("O'rnatish:* 20$"));
    }

    #[test]
    fn explicit_grand_total_overrides_sum() {
        let o = order(json!({
            "customer": {"name": "Ali", "phone": "+998"},
            "items": [{"title": "x", "qty": 1, "price": 100}],
            "total": 100,
            "plan": {"tag": "Pro", "cycle": "yearly", "priceUZS": 50},
            "install": {"feeUZS": 20, "cycle": "monthly"},
            "grandFirstPaymentUZS": 999
        }));
        let rendered = render_order(&o, Dialect::MarkdownV2, CurrencyStyle::Symbol);
        assert!(rendered.text.contains("Birinchi to'lov:* 999$"));
        assert!(!rendered.text.contains("170$"));
        assert!(rendered.text.contains("Tarif:* Pro 50$/yil"));
    }

    #[test]
    fn plan_only_order_skips_items_sections() {
        let o = order(json!({
            "customer": {"name": "Ali", "phone": "+998"},
            "plan": {"tag": "Start", "cycle": "monthly", "priceUZS": 75000}
        }));
        let rendered = render_order(&o, Dialect::MarkdownV2, CurrencyStyle::Symbol);
        assert!(!rendered.text.contains("Buyurtma tarkibi"));
        assert!(!rendered.text.contains("Jami:"));
        assert!(rendered.text.contains("Tarif:* Start 75 000$/oy"));
        assert!(rendered.text.contains("Birinchi to'lov:* 75 000$"));
    }

    #[test]
    fn optional_lines_omitted_without_blank_runs() {
        let rendered = render_order(&base_order(), Dialect::MarkdownV2, CurrencyStyle::Symbol);
        assert!(!rendered.text.contains("Izoh"));
        assert!(!rendered.text.contains("Manba"));
        assert!(!rendered.text.contains("\n\n\n"));
        assert!(!rendered.text.ends_with('\n'));

        let mut o = base_order();
        o.customer.note = Some("Eshik oldiga".to_string());
        o.source = Some("web".to_string());
        let rendered = render_order(&o, Dialect::MarkdownV2, CurrencyStyle::Symbol);
        assert!(rendered.text.contains("Izoh:* Eshik oldiga"));
        assert!(rendered.text.contains("Manba:* web"));
    }

    #[test]
    fn explicit_created_at_is_used() {
        let mut o = base_order();
        o.created_at = Some(json!("2024-03-05T12:00:00Z"));
        let rendered = render_order(&o, Dialect::Html, CurrencyStyle::Symbol);
        // Day shifts with the host offset; month and year do not.
        assert!(rendered.text.contains(".03.2024"));
    }

    #[test]
    fn bogus_created_at_falls_back_to_now() {
        let mut o = base_order();
        o.created_at = Some(json!("not a date"));
        let rendered = render_order(&o, Dialect::Html, CurrencyStyle::Symbol);
        assert!(rendered.text.contains("Sana:"));

        o.created_at = Some(json!(1_709_640_000_000_i64));
        let rendered = render_order(&o, Dialect::Html, CurrencyStyle::Symbol);
        assert!(rendered.text.contains(".03.2024"));
    }

    #[test]
    fn contact_template() {
        let contact = ContactSubmission {
            name: "Vali".to_string(),
            phone: "+998 91 000-00-00".to_string(),
            message: "Qo'ng'iroq qiling!".to_string(),
        };
        let rendered = render_contact(&contact, Dialect::MarkdownV2);
        assert!(rendered.text.starts_with("📨 *Yangi murojaat*"));
        assert!(rendered.text.contains("Ism:* Vali"));
        assert!(rendered.text.contains(r"Xabar:* Qo'ng'iroq qiling\!"));
        assert!(rendered.text.contains("Sana:"));
        assert!(!rendered.text.contains("\n\n\n"));
    }
}
