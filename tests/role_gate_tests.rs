//! Role-gating policy: totality over the full role set, the per-screen
//! action sets, and the per-order lifecycle controls.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use shopfront::api::models::{Order, OrderStatus};
use shopfront::identity::{
    can, decode, order_actions, permitted_actions, status_for, Action, Claims, Role, Screen,
};

fn claims_with_role(sub: &str, role: &str) -> Claims {
    decode(&format!(
        "hdr.{}.sig",
        STANDARD.encode(format!(r#"{{"sub":"{sub}","role":"{role}"}}"#))
    ))
}

fn order(id: i64, username: &str, status: OrderStatus) -> Order {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "username": username,
        "orderItems": [],
        "status": status,
    }))
    .unwrap()
}

#[test]
fn policy_is_total_over_every_role_value() {
    let sessions: Vec<Option<Claims>> = vec![
        None,
        Some(claims_with_role("u", "USER")),
        Some(claims_with_role("m", "MANAGER")),
        Some(claims_with_role("a", "ADMIN")),
        Some(claims_with_role("x", "unrecognized-string")),
    ];
    for session in &sessions {
        for screen in [Screen::Home, Screen::Products, Screen::Orders, Screen::Profile] {
            // Defined for every combination, no panic, and always a set.
            let _ = permitted_actions(session.as_ref(), screen);
        }
        for action in [
            Action::BrowseProducts,
            Action::AddProduct,
            Action::ViewOrders,
            Action::PlaceOrder,
            Action::CancelOwnOrder,
            Action::ApproveOrder,
            Action::RejectOrder,
            Action::ViewProfile,
        ] {
            let _ = can(session.as_ref(), action);
        }
    }
}

#[test]
fn anonymous_may_browse_but_not_view_orders() {
    assert!(can(None, Action::BrowseProducts));
    assert!(!can(None, Action::ViewOrders));
    assert!(!can(None, Action::PlaceOrder));
    assert!(!can(None, Action::AddProduct));
    assert!(permitted_actions(None, Screen::Orders).is_empty());
}

#[test]
fn user_orders_but_does_not_stock_the_shelves() {
    let alice = claims_with_role("alice", "USER");
    let products = permitted_actions(Some(&alice), Screen::Products);
    assert!(products.contains(&Action::PlaceOrder));
    assert!(!products.contains(&Action::AddProduct));

    let orders = permitted_actions(Some(&alice), Screen::Orders);
    assert!(orders.contains(&Action::PlaceOrder));
    assert!(orders.contains(&Action::CancelOwnOrder));
    assert!(!orders.contains(&Action::ApproveOrder));
}

#[test]
fn manager_and_admin_stock_shelves_but_do_not_shop() {
    for role in ["MANAGER", "ADMIN"] {
        let claims = claims_with_role("staff", role);
        let products = permitted_actions(Some(&claims), Screen::Products);
        assert!(products.contains(&Action::AddProduct), "role {role}");
        assert!(!products.contains(&Action::PlaceOrder), "role {role}");
        assert!(!can(Some(&claims), Action::PlaceOrder), "role {role}");
    }
    // Approval is admin-only
    assert!(can(Some(&claims_with_role("a", "ADMIN")), Action::ApproveOrder));
    assert!(!can(Some(&claims_with_role("m", "MANAGER")), Action::ApproveOrder));
}

#[test]
fn unknown_role_is_logged_in_for_display_only() {
    let odd = claims_with_role("x", "SUPERVISOR");
    assert_eq!(odd.role, Role::Unknown);
    // Still a session: may view orders and profile...
    assert!(can(Some(&odd), Action::ViewOrders));
    assert!(can(Some(&odd), Action::ViewProfile));
    // ...but no mutation is granted on an unexpected value.
    assert!(!can(Some(&odd), Action::PlaceOrder));
    assert!(!can(Some(&odd), Action::AddProduct));
    assert!(!can(Some(&odd), Action::ApproveOrder));
}

#[test]
fn admin_sees_approve_and_reject_on_pending_orders_only() {
    let admin = claims_with_role("root", "ADMIN");
    let pending = order(1, "alice", OrderStatus::Pending);
    assert_eq!(
        order_actions(Some(&admin), &pending),
        vec![Action::ApproveOrder, Action::RejectOrder]
    );
    let delivered = order(2, "alice", OrderStatus::Delivered);
    assert!(order_actions(Some(&admin), &delivered).is_empty());
}

#[test]
fn user_cancels_only_their_own_pending_orders() {
    let alice = claims_with_role("alice", "USER");
    let own_pending = order(1, "alice", OrderStatus::Pending);
    assert_eq!(order_actions(Some(&alice), &own_pending), vec![Action::CancelOwnOrder]);

    let someone_elses = order(2, "bob", OrderStatus::Pending);
    assert!(order_actions(Some(&alice), &someone_elses).is_empty());

    let own_shipped = order(3, "alice", OrderStatus::Shipped);
    assert!(order_actions(Some(&alice), &own_shipped).is_empty());
}

#[test]
fn approve_delivers_and_reject_cancels() {
    assert_eq!(status_for(Action::ApproveOrder), Some(OrderStatus::Delivered));
    assert_eq!(status_for(Action::RejectOrder), Some(OrderStatus::Cancelled));
    assert_eq!(status_for(Action::CancelOwnOrder), Some(OrderStatus::Cancelled));
    assert_eq!(status_for(Action::BrowseProducts), None);
}
