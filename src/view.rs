//! View state for the shell, driven as a deterministic reducer:
//! `(state, event) -> state`. No I/O happens here, which keeps every screen
//! transition testable without a terminal or a backend.
//!
//! Fetches are tagged with the generation current at the time they were
//! started; results arriving for an older generation (the user has navigated
//! away since) are discarded instead of overwriting the live screen.

use crate::api::models::{Order, Product, UserProfile};
use crate::identity::Screen;

/// Where a rendered profile came from. The `/api/users/me` endpoint is
/// optional in some deployments; when it fails we fall back to token claims
/// and say so instead of passing the fallback off as backend data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    Backend,
    TokenClaims,
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub screen: Option<Screen>,
    /// Bumped on every navigation; stamps outbound fetches.
    pub generation: u64,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub profile: Option<(UserProfile, ProfileSource)>,
    /// One-shot displayable message from the last event, if any.
    pub notice: Option<String>,
    /// Last surfaced failure, displayable, never fatal.
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum Event {
    NavigatedTo(Screen),
    /// Session was established or cleared; screen data tied to the old
    /// credential is dropped.
    SessionChanged,
    ProductsLoaded { generation: u64, result: Result<Vec<Product>, String> },
    OrdersLoaded { generation: u64, result: Result<Vec<Order>, String> },
    ProfileLoaded { generation: u64, result: Result<(UserProfile, ProfileSource), String> },
    Notice(String),
    Failed(String),
}

impl ViewState {
    /// Generation stamp for a fetch started now.
    pub fn fetch_generation(&self) -> u64 {
        self.generation
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation
    }
}

/// Apply one event. Stale load results leave the state untouched.
pub fn reduce(mut state: ViewState, event: Event) -> ViewState {
    match event {
        Event::NavigatedTo(screen) => {
            state.screen = Some(screen);
            state.generation += 1;
            state.notice = None;
            state.error = None;
        }
        Event::SessionChanged => {
            state.generation += 1;
            state.orders.clear();
            state.profile = None;
            state.error = None;
        }
        Event::ProductsLoaded { generation, result } => {
            if state.is_stale(generation) {
                return state;
            }
            match result {
                Ok(products) => {
                    state.products = products;
                    state.error = None;
                }
                Err(msg) => state.error = Some(msg),
            }
        }
        Event::OrdersLoaded { generation, result } => {
            if state.is_stale(generation) {
                return state;
            }
            match result {
                Ok(orders) => {
                    state.orders = orders;
                    state.error = None;
                }
                Err(msg) => state.error = Some(msg),
            }
        }
        Event::ProfileLoaded { generation, result } => {
            if state.is_stale(generation) {
                return state;
            }
            match result {
                Ok(profile) => {
                    state.profile = Some(profile);
                    state.error = None;
                }
                Err(msg) => state.error = Some(msg),
            }
        }
        Event::Notice(msg) => state.notice = Some(msg),
        Event::Failed(msg) => state.error = Some(msg),
    }
    state
}
