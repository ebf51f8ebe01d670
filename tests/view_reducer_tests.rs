//! Reducer behavior: navigation, load results, and the stale-fetch guard
//! that keeps a result from a screen the user already left from landing.

use shopfront::api::models::Product;
use shopfront::identity::Screen;
use shopfront::view::{reduce, Event, ViewState};

fn product(id: i64, name: &str) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "price": 1.0,
        "stockQuantity": 5,
    }))
    .unwrap()
}

#[test]
fn load_result_for_current_generation_lands() {
    let state = reduce(ViewState::default(), Event::NavigatedTo(Screen::Products));
    let generation = state.fetch_generation();
    let state = reduce(
        state,
        Event::ProductsLoaded { generation, result: Ok(vec![product(1, "Mug")]) },
    );
    assert_eq!(state.products.len(), 1);
    assert!(state.error.is_none());
}

#[test]
fn stale_load_result_is_discarded() {
    let state = reduce(ViewState::default(), Event::NavigatedTo(Screen::Products));
    let stale_generation = state.fetch_generation();

    // User navigates away before the fetch resolves.
    let state = reduce(state, Event::NavigatedTo(Screen::Orders));
    let state = reduce(
        state,
        Event::ProductsLoaded {
            generation: stale_generation,
            result: Ok(vec![product(1, "Mug")]),
        },
    );
    assert!(state.products.is_empty(), "result for an unmounted view must be dropped");
}

#[test]
fn failed_load_is_a_displayable_message_not_a_panic() {
    let state = reduce(ViewState::default(), Event::NavigatedTo(Screen::Orders));
    let generation = state.fetch_generation();
    let state = reduce(
        state,
        Event::OrdersLoaded { generation, result: Err("network_error: connection refused".into()) },
    );
    assert_eq!(state.error.as_deref(), Some("network_error: connection refused"));
    assert!(state.orders.is_empty());
}

#[test]
fn navigation_clears_previous_error_and_notice() {
    let state = reduce(ViewState::default(), Event::Failed("boom".into()));
    let state = reduce(state, Event::Notice("done".into()));
    let state = reduce(state, Event::NavigatedTo(Screen::Home));
    assert!(state.error.is_none());
    assert!(state.notice.is_none());
}

#[test]
fn session_change_drops_credential_bound_data_and_invalidates_fetches() {
    let state = reduce(ViewState::default(), Event::NavigatedTo(Screen::Orders));
    let generation = state.fetch_generation();
    let state = reduce(
        state,
        Event::OrdersLoaded {
            generation,
            result: Ok(vec![serde_json::from_value(serde_json::json!({
                "id": 1, "username": "alice", "status": "PENDING"
            }))
            .unwrap()]),
        },
    );
    assert_eq!(state.orders.len(), 1);

    let state = reduce(state, Event::SessionChanged);
    assert!(state.orders.is_empty());
    assert!(state.profile.is_none());

    // A fetch started under the old session must not land either.
    let state = reduce(
        state,
        Event::OrdersLoaded {
            generation,
            result: Ok(vec![serde_json::from_value(serde_json::json!({
                "id": 2, "username": "alice", "status": "PENDING"
            }))
            .unwrap()]),
        },
    );
    assert!(state.orders.is_empty());
}
