//! Advisory decode of the bearer token payload.
//!
//! The gateway issues JWT-shaped tokens; we only ever read the middle segment
//! to drive display and menu gating. No signature or expiry verification
//! happens here, so nothing decoded from a token is an enforcement decision.
//! The backend re-checks authorization on every request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Role claim embedded by the user service. Closed set plus a catch-all so
/// gating logic can match exhaustively; anything unrecognized gets `Unknown`
/// and no elevated permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Manager,
    Admin,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Claims carried in a token payload. Pure projection of the credential:
/// recomputed on every use, never persisted or cached on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    /// Whatever else the backend chose to embed (iat, exp, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("(unknown)")
    }
}

/// Decode the payload segment of a bearer token into [`Claims`].
///
/// Split on `.`, take the second segment, base64-decode it (standard
/// alphabet, standard padding) and parse the bytes as a JSON object. Any
/// failure at any step yields empty claims; this decoder is display-only and
/// must never be the source of a crash.
pub fn decode(token: &str) -> Claims {
    let payload = match token.split('.').nth(1) {
        Some(seg) => seg,
        None => return Claims::default(),
    };
    let bytes = match STANDARD.decode(payload) {
        Ok(b) => b,
        Err(_) => return Claims::default(),
    };
    serde_json::from_slice(&bytes).unwrap_or_default()
}
