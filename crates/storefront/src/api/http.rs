//! REST implementation of [`Backend`] over `reqwest`.

use std::sync::Arc;

use lumen_core::{
    Cart, CartCount, ErrorResponse, FavoriteProduct, Order, OrderAcknowledgement, OrderPayload,
    ProductId, UserInfo, UserInfoPayload,
};
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{field, instrument};
use url::Url;
use uuid::Uuid;

use super::Backend;
use crate::config::StorefrontConfig;
use crate::error::ClientError;

/// Header carrying the customer access token.
const AUTH_HEADER: &str = "x-auth";

/// Header carrying a per-request correlation id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest body excerpt written to logs.
const LOG_BODY_CHARS: usize = 500;

/// Client for the Lumen REST API.
///
/// Keeps a cookie store so a guest cart survives between calls, and sends
/// the configured access token on every request.
#[derive(Clone)]
pub struct HttpBackend {
    inner: Arc<HttpBackendInner>,
}

struct HttpBackendInner {
    client: reqwest::Client,
    access_token: Option<SecretString>,
    endpoints: Endpoints,
}

struct Endpoints {
    cart: Url,
    cart_count: Url,
    favorites: Url,
    orders: Url,
    users: Url,
}

impl Endpoints {
    fn new(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            cart: base.join("cart")?,
            cart_count: base.join("cart/count")?,
            favorites: base.join("favorites")?,
            orders: base.join("orders")?,
            users: base.join("users")?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartLineBody<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteBody<'a> {
    product_id: &'a ProductId,
}

impl HttpBackend {
    /// Create a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the API base
    /// URL cannot form endpoint URLs.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.http_timeout)
            .build()?;

        Self::with_client(client, config)
    }

    /// Use an already configured `reqwest` client. It should keep cookies
    /// for guest carts to work.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL cannot form endpoint URLs.
    pub fn with_client(
        client: reqwest::Client,
        config: &StorefrontConfig,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            inner: Arc::new(HttpBackendInner {
                client,
                access_token: config.access_token.clone(),
                endpoints: Endpoints::new(&config.api_url)?,
            }),
        })
    }

    /// Send a request and decode the JSON body through the error envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut request = request.header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = &self.inner.access_token {
            request = request.header(AUTH_HEADER, token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Read as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(
                status = %status,
                request_id = %request_id,
                body = %excerpt(&body),
                "Backend returned non-success status"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&body).inspect_err(|err| {
            if matches!(err, ClientError::Parse(_)) {
                tracing::error!(
                    error = %err,
                    request_id = %request_id,
                    body = %excerpt(&body),
                    "Failed to parse backend response"
                );
            }
        })
    }
}

impl Backend for HttpBackend {
    #[instrument(skip(self), fields(request_id = field::Empty))]
    async fn get_cart(&self) -> Result<Cart, ClientError> {
        let request = self.inner.client.get(self.inner.endpoints.cart.clone());
        self.send(request).await
    }

    #[instrument(skip(self), fields(product_id = %product_id, request_id = field::Empty))]
    async fn set_cart_line_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ClientError> {
        let request = self
            .inner
            .client
            .post(self.inner.endpoints.cart.clone())
            .json(&CartLineBody {
                product_id,
                quantity,
            });
        self.send(request).await
    }

    #[instrument(skip(self), fields(request_id = field::Empty))]
    async fn get_cart_count(&self) -> Result<CartCount, ClientError> {
        let request = self.inner.client.get(self.inner.endpoints.cart_count.clone());
        self.send(request).await
    }

    #[instrument(skip(self), fields(request_id = field::Empty))]
    async fn get_favorites(&self) -> Result<Vec<FavoriteProduct>, ClientError> {
        let request = self.inner.client.get(self.inner.endpoints.favorites.clone());
        self.send(request).await
    }

    #[instrument(skip(self), fields(product_id = %product_id, request_id = field::Empty))]
    async fn add_favorite(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<FavoriteProduct>, ClientError> {
        let request = self
            .inner
            .client
            .post(self.inner.endpoints.favorites.clone())
            .json(&FavoriteBody { product_id });
        self.send(request).await
    }

    #[instrument(skip(self), fields(product_id = %product_id, request_id = field::Empty))]
    async fn remove_favorite(&self, product_id: &ProductId) -> Result<ErrorResponse, ClientError> {
        let request = self
            .inner
            .client
            .delete(self.inner.endpoints.favorites.clone())
            .json(&FavoriteBody { product_id });
        self.send(request).await
    }

    #[instrument(skip(self, payload), fields(delivery_type = %payload.delivery_type, request_id = field::Empty))]
    async fn create_order(&self, payload: &OrderPayload) -> Result<Order, ClientError> {
        let request = self
            .inner
            .client
            .post(self.inner.endpoints.orders.clone())
            .json(payload);
        let body: serde_json::Value = self.send(request).await?;
        Ok(Order::new(
            payload.clone(),
            OrderAcknowledgement::from_value(body),
        ))
    }

    #[instrument(skip(self), fields(request_id = field::Empty))]
    async fn get_user_info(&self) -> Result<UserInfo, ClientError> {
        let request = self.inner.client.get(self.inner.endpoints.users.clone());
        self.send(request).await
    }

    #[instrument(skip(self, payload), fields(request_id = field::Empty))]
    async fn update_user_info(
        &self,
        payload: &UserInfoPayload,
    ) -> Result<ErrorResponse, ClientError> {
        let request = self
            .inner
            .client
            .post(self.inner.endpoints.users.clone())
            .json(payload);
        self.send(request).await
    }
}

// =============================================================================
// Body Decoding
// =============================================================================

/// Decode a 2xx body, turning an `{ "error": true }` envelope into
/// [`ClientError::Domain`].
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if let Some(envelope) = ErrorResponse::from_value(&value)
        && envelope.error
    {
        return Err(ClientError::Domain(envelope.message));
    }

    Ok(serde_json::from_value(value)?)
}

/// The `message` of a non-2xx JSON body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ErrorResponse::from_value(&value)
        .map(|envelope| envelope.message)
        .or_else(|| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .filter(|message| !message.is_empty())
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_CHARS).collect()
}
