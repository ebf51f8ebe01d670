//! Terminal rendering for the shell: ASCII tables for catalog and order
//! listings, plus a small profile card.

use crate::api::models::{Order, Product, UserProfile};
use crate::identity::{order_actions, Action, Claims};
use crate::view::ProfileSource;

// Cap any single column to keep output readable on narrow terminals.
const MAX_COL_WIDTH: usize = 60;

pub fn print_products(products: &[Product], can_order: bool) {
    if products.is_empty() {
        println!("no products in the catalog");
        return;
    }
    let cols = ["id", "name", "description", "price", "category", "stock"];
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.description.clone().unwrap_or_default(),
                format!("{:.2}", p.price),
                p.category.clone().unwrap_or_default(),
                p.stock_quantity.to_string(),
            ]
        })
        .collect();
    print_table(&cols, &rows);
    println!("products: {}", products.len());
    if can_order {
        println!("place an order with: order <productId>x<qty> [...]");
    }
}

pub fn print_orders(orders: &[Order], claims: Option<&Claims>) {
    if orders.is_empty() {
        println!("no orders");
        return;
    }
    let cols = ["id", "status", "total", "items", "actions"];
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            let items = o
                .order_items
                .iter()
                .map(|it| {
                    let name = it
                        .product_name
                        .clone()
                        .or_else(|| it.product_id.map(|id| format!("#{id}")))
                        .unwrap_or_else(|| "?".to_string());
                    format!("{} x {}", name, it.quantity)
                })
                .collect::<Vec<_>>()
                .join(", ");
            let actions = order_actions(claims, o)
                .iter()
                .map(|a| action_verb(*a))
                .collect::<Vec<_>>()
                .join("/");
            vec![
                o.id.to_string(),
                o.status.to_string(),
                o.total_amount.map(|t| format!("{t:.2}")).unwrap_or_default(),
                items,
                actions,
            ]
        })
        .collect();
    print_table(&cols, &rows);
    println!("orders: {}", orders.len());
}

pub fn print_profile(profile: &UserProfile, source: ProfileSource) {
    println!("username: {}", profile.display_name());
    println!("email:    {}", profile.email.as_deref().unwrap_or("-"));
    println!("role:     {:?}", profile.role);
    if let Some(id) = profile.user_id {
        println!("user id:  {}", id);
    }
    if source == ProfileSource::TokenClaims {
        println!("(source: token claims; profile endpoint unavailable)");
    }
}

fn action_verb(action: Action) -> &'static str {
    match action {
        Action::BrowseProducts => "browse",
        Action::AddProduct => "add-product",
        Action::ViewOrders => "orders",
        Action::PlaceOrder => "order",
        Action::CancelOwnOrder => "cancel",
        Action::ApproveOrder => "approve",
        Action::RejectOrder => "reject",
        Action::ViewProfile => "profile",
    }
}

/// Render a table with computed column widths, numeric right-alignment and
/// `…` truncation of long cells.
pub fn print_table(cols: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = cols.iter().map(|c| c.len().min(MAX_COL_WIDTH)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols.len()) {
            let w = display_len(cell);
            if w > widths[i] {
                widths[i] = w.min(MAX_COL_WIDTH);
            }
        }
    }

    let sep = separator(&widths);
    println!("{}", sep);
    println!("{}", render_row(&cols.iter().map(|c| c.to_string()).collect::<Vec<_>>(), &widths));
    println!("{}", sep);
    for row in rows {
        println!("{}", render_row(row, &widths));
    }
    println!("{}", sep);
}

fn display_len(s: &str) -> usize {
    s.chars().count()
}

fn separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let text = truncate(&cell, *w);
        let pad = w.saturating_sub(display_len(&text));
        s.push(' ');
        if is_numeric_like(&cell) {
            s.push_str(&" ".repeat(pad));
            s.push_str(&text);
        } else {
            s.push_str(&text);
            s.push_str(&" ".repeat(pad));
        }
        s.push(' ');
        s.push('|');
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "…".to_string();
    }
    s.chars().take(max - 1).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    // crude detection for aligning numbers to the right
    let st = s.trim();
    if st.is_empty() {
        return false;
    }
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() {
            has_digit = true;
            continue;
        }
        if ".-+eE,_".contains(ch) {
            continue;
        }
        return false;
    }
    has_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("somethinglong", 5), "some…");
        assert_eq!(truncate("ab", 1), "…");
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric_like("42"));
        assert!(is_numeric_like("19.99"));
        assert!(!is_numeric_like("PENDING"));
        assert!(!is_numeric_like(""));
    }
}
