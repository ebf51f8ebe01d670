//! Session and authorization context: the persisted credential, the claims
//! projected from it, and the role-gating policy consumed by the shell.
//! Keep the public surface thin and split implementation across sub-modules.

mod claims;
mod policy;
mod session;

pub use claims::{decode, Claims, Role};
pub use policy::{can, order_actions, permitted_actions, status_for, Action, Screen};
pub use session::SessionStore;
