//! Wire DTOs for the gateway REST surface. Field names are camelCase on the
//! wire to stay bit-compatible with the Java services behind the gateway.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::identity::{Claims, Role};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response. Older deployments of the user service named the credential
/// `accessToken`; both spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Profile as served by `GET /api/users/me`, or reconstructed from token
/// claims when that endpoint is unavailable.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.sub.as_deref())
            .unwrap_or("(unknown)")
    }

    /// Claims-derived fallback used when the profile endpoint fails.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            username: None,
            sub: claims.sub.clone(),
            email: claims.email.clone(),
            role: claims.role,
            user_id: claims.user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock_quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Order placement payload: `{ items: [{ productId, quantity }] }`.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_accepts_both_token_spellings() {
        let a: AuthResponse = serde_json::from_str(r#"{"token":"h.e.s"}"#).unwrap();
        assert_eq!(a.token.as_deref(), Some("h.e.s"));
        let b: AuthResponse = serde_json::from_str(r#"{"accessToken":"h.e.s","tokenType":"Bearer"}"#).unwrap();
        assert_eq!(b.token.as_deref(), Some("h.e.s"));
        assert_eq!(b.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn order_payload_is_items_with_camel_case_fields() {
        let req = PlaceOrderRequest { items: vec![NewOrderItem { product_id: 3, quantity: 2 }] };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"items": [{"productId": 3, "quantity": 2}]}));
    }

    #[test]
    fn status_update_payload_is_uppercase() {
        let req = UpdateOrderStatusRequest { status: OrderStatus::Delivered };
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({"status": "DELIVERED"}));
        let req = UpdateOrderStatusRequest { status: OrderStatus::Cancelled };
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({"status": "CANCELLED"}));
    }

    #[test]
    fn order_deserializes_backend_shape() {
        let o: Order = serde_json::from_str(
            r#"{
                "id": 7,
                "userId": 2,
                "username": "alice",
                "orderItems": [{"id": 1, "productId": 3, "productName": "Mug", "quantity": 2, "unitPrice": 9.5}],
                "status": "PENDING",
                "totalAmount": 19.0,
                "createdAt": "2024-05-01T10:30:00"
            }"#,
        )
        .unwrap();
        assert_eq!(o.status, OrderStatus::Pending);
        assert_eq!(o.order_items.len(), 1);
        assert_eq!(o.order_items[0].product_name.as_deref(), Some("Mug"));
        assert!(o.created_at.is_some());
    }
}
