//! Role-gated view policy: which actions a screen offers for the current
//! claims. Pure functions, total over the role set; deny-by-default on
//! anything unrecognized. This is menu gating, not enforcement: the gateway
//! re-checks every request server-side.

use std::collections::BTreeSet;

use crate::api::models::{Order, OrderStatus};

use super::claims::{Claims, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Products,
    Orders,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    BrowseProducts,
    AddProduct,
    ViewOrders,
    PlaceOrder,
    CancelOwnOrder,
    ApproveOrder,
    RejectOrder,
    ViewProfile,
}

/// Actions the given screen offers under the given claims. `None` claims is
/// an anonymous visitor; a credential with an unrecognized role counts as
/// logged in for display but earns no mutation permission.
pub fn permitted_actions(session: Option<&Claims>, screen: Screen) -> BTreeSet<Action> {
    let role = session.map(|c| c.role);
    let mut out = BTreeSet::new();
    match screen {
        Screen::Home | Screen::Products => {
            out.insert(Action::BrowseProducts);
            match role {
                None | Some(Role::Unknown) => {}
                Some(Role::User) => {
                    out.insert(Action::PlaceOrder);
                }
                Some(Role::Manager) | Some(Role::Admin) => {
                    out.insert(Action::AddProduct);
                }
            }
        }
        Screen::Orders => match role {
            None => {}
            Some(Role::User) => {
                out.insert(Action::ViewOrders);
                out.insert(Action::PlaceOrder);
                out.insert(Action::CancelOwnOrder);
            }
            Some(Role::Manager) => {
                out.insert(Action::ViewOrders);
            }
            Some(Role::Admin) => {
                out.insert(Action::ViewOrders);
                out.insert(Action::ApproveOrder);
                out.insert(Action::RejectOrder);
            }
            Some(Role::Unknown) => {
                out.insert(Action::ViewOrders);
            }
        },
        Screen::Profile => {
            if role.is_some() {
                out.insert(Action::ViewProfile);
            }
        }
    }
    out
}

/// Whether a single action is permitted at all, independent of screen.
/// Used to refuse a command before any network call is made.
pub fn can(session: Option<&Claims>, action: Action) -> bool {
    let role = session.map(|c| c.role);
    match action {
        Action::BrowseProducts => true,
        Action::ViewOrders | Action::ViewProfile => role.is_some(),
        Action::PlaceOrder | Action::CancelOwnOrder => matches!(role, Some(Role::User)),
        Action::AddProduct => matches!(role, Some(Role::Manager) | Some(Role::Admin)),
        Action::ApproveOrder | Action::RejectOrder => matches!(role, Some(Role::Admin)),
    }
}

/// Backend order status a lifecycle action maps to: approve delivers, reject
/// and cancel both end in CANCELLED. Non-lifecycle actions map to nothing.
pub fn status_for(action: Action) -> Option<OrderStatus> {
    match action {
        Action::ApproveOrder => Some(OrderStatus::Delivered),
        Action::RejectOrder | Action::CancelOwnOrder => Some(OrderStatus::Cancelled),
        Action::BrowseProducts
        | Action::AddProduct
        | Action::ViewOrders
        | Action::PlaceOrder
        | Action::ViewProfile => None,
    }
}

/// Per-order controls: a USER may cancel their own PENDING order, an ADMIN
/// may approve or reject any PENDING order. Everything else gets nothing.
pub fn order_actions(session: Option<&Claims>, order: &Order) -> Vec<Action> {
    let Some(claims) = session else { return Vec::new() };
    if order.status != OrderStatus::Pending {
        return Vec::new();
    }
    match claims.role {
        Role::User => {
            if claims.sub.as_deref() == Some(order.username.as_str()) {
                vec![Action::CancelOwnOrder]
            } else {
                Vec::new()
            }
        }
        Role::Admin => vec![Action::ApproveOrder, Action::RejectOrder],
        Role::Manager | Role::Unknown => Vec::new(),
    }
}
