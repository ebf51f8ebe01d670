//! HTTP client for the gateway REST API. One method per endpoint, paths kept
//! bit-exact with the gateway routes. Failures come back as [`AppError`] and
//! surface once to the initiating command; there is no retry or backoff.

pub mod models;

use reqwest::{RequestBuilder, Response, Url};
use tracing::debug;

use crate::error::{AppError, AppResult};

use models::{
    AuthResponse, CreateProductRequest, LoginRequest, NewOrderItem, Order, OrderStatus,
    PlaceOrderRequest, Product, RegisterRequest, UpdateOrderStatusRequest, UserProfile,
};

#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(api_base: &str) -> AppResult<Self> {
        let base = Url::parse(api_base)
            .map_err(|e| AppError::user("invalid_api_base".into(), format!("invalid API base URL '{api_base}': {e}")))?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { base, http })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::internal("bad_path".into(), format!("cannot build URL for {path}: {e}")))
    }

    fn bearer(rb: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(t) => rb.header(reqwest::header::AUTHORIZATION, format!("Bearer {t}")),
            None => rb,
        }
    }

    /// Non-2xx responses carry a `{message}` body on this backend; pull it
    /// out when present, else fall back to the status line.
    async fn check(resp: Response) -> AppResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let code = status.as_u16();
        let message = match resp.json::<serde_json::Value>().await {
            Ok(v) => v
                .get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("HTTP {code}")),
            Err(_) => format!("HTTP {code}"),
        };
        debug!(target: "shopfront", status = code, %message, "gateway rejected request");
        Err(AppError::from_status(code, message))
    }

    pub async fn register(&self, req: &RegisterRequest) -> AppResult<()> {
        let resp = self.http.post(self.url("/api/users/register")?).json(req).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthResponse> {
        let body = LoginRequest { username: username.to_string(), password: password.to_string() };
        let resp = self.http.post(self.url("/api/users/login")?).json(&body).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<AuthResponse>().await?)
    }

    pub async fn me(&self, token: &str) -> AppResult<UserProfile> {
        let rb = self.http.get(self.url("/api/users/me")?);
        let resp = Self::bearer(rb, Some(token)).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<UserProfile>().await?)
    }

    /// Catalog listing; public, but the bearer is attached when present so
    /// the backend can tailor the result.
    pub async fn products(&self, token: Option<&str>) -> AppResult<Vec<Product>> {
        let rb = self.http.get(self.url("/api/products")?);
        let resp = Self::bearer(rb, token).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<Vec<Product>>().await?)
    }

    pub async fn create_product(&self, token: &str, req: &CreateProductRequest) -> AppResult<()> {
        let rb = self.http.post(self.url("/api/products")?).json(req);
        let resp = Self::bearer(rb, Some(token)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn orders(&self, token: &str) -> AppResult<Vec<Order>> {
        let rb = self.http.get(self.url("/api/orders")?);
        let resp = Self::bearer(rb, Some(token)).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<Vec<Order>>().await?)
    }

    pub async fn place_order(&self, token: &str, items: Vec<NewOrderItem>) -> AppResult<()> {
        let body = PlaceOrderRequest { items };
        let rb = self.http.post(self.url("/api/orders")?).json(&body);
        let resp = Self::bearer(rb, Some(token)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn set_order_status(&self, token: &str, order_id: i64, status: OrderStatus) -> AppResult<()> {
        let body = UpdateOrderStatusRequest { status };
        let rb = self
            .http
            .put(self.url(&format!("/api/orders/{order_id}/status"))?)
            .json(&body);
        let resp = Self::bearer(rb, Some(token)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
