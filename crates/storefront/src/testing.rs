//! In-memory collaborators for view-model tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use lumen_core::{
    Cart, CartCount, CartItem, CartProduct, DeliveryType, ErrorResponse, FavoriteProduct, Order,
    OrderId, OrderPayload, OrderStatus, Price, Product, ProductId, UserInfo, UserInfoPayload,
};
use tokio::sync::oneshot;

use crate::api::Backend;
use crate::error::ClientError;
use crate::ui::{Dialogs, Navigator, Notifier, Route, Ui};

// =============================================================================
// Fixtures
// =============================================================================

pub fn product(id: &str, price: i64) -> Product {
    Product {
        id: ProductId::from(id),
        name: format!("Plant {id}"),
        price: Price::from_units(price),
        image: format!("{id}.jpg"),
        url: format!("plant-{id}"),
        is_in_favorite: false,
        count_in_cart: None,
    }
}

pub fn favorite(id: &str, price: i64) -> FavoriteProduct {
    FavoriteProduct {
        id: ProductId::from(id),
        name: format!("Plant {id}"),
        url: format!("plant-{id}"),
        image: format!("{id}.jpg"),
        price: Price::from_units(price),
    }
}

pub fn cart_line(id: &str, price: i64, quantity: u32) -> CartItem {
    CartItem {
        product: CartProduct {
            id: ProductId::from(id),
            name: format!("Plant {id}"),
            url: format!("plant-{id}"),
            image: format!("{id}.jpg"),
            price: Price::from_units(price),
        },
        quantity,
    }
}

// =============================================================================
// FakeBackend
// =============================================================================

/// A backend call as observed by [`FakeBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetCart,
    SetQuantity(ProductId, u32),
    GetCartCount,
    GetFavorites,
    AddFavorite(ProductId),
    RemoveFavorite(ProductId),
    CreateOrder(OrderPayload),
    GetUserInfo,
    UpdateUserInfo(UserInfoPayload),
}

/// Which operation a scripted failure or gate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetCart,
    SetQuantity,
    GetFavorites,
    AddFavorite,
    RemoveFavorite,
    CreateOrder,
    GetUserInfo,
    UpdateUserInfo,
}

/// A scripted failure.
#[derive(Debug, Clone)]
pub enum Failure {
    Domain(String),
    Status(u16, Option<String>),
}

impl Failure {
    fn into_error(self) -> ClientError {
        match self {
            Self::Domain(message) => ClientError::Domain(message),
            Self::Status(status, message) => ClientError::Status { status, message },
        }
    }
}

#[derive(Default)]
struct FakeState {
    cart: Cart,
    favorites: Vec<FavoriteProduct>,
    user_info: UserInfo,
    calls: Vec<Call>,
    failures: HashMap<Op, VecDeque<Failure>>,
    gates: HashMap<Op, VecDeque<oneshot::Receiver<()>>>,
}

/// A backend that keeps cart, favorites and profile in memory.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_cart(self: Arc<Self>, items: Vec<CartItem>) -> Arc<Self> {
        self.state.lock().unwrap().cart = Cart { items };
        self
    }

    pub fn with_favorites(self: Arc<Self>, favorites: Vec<FavoriteProduct>) -> Arc<Self> {
        self.state.lock().unwrap().favorites = favorites;
        self
    }

    pub fn with_user_info(self: Arc<Self>, info: UserInfo) -> Arc<Self> {
        self.state.lock().unwrap().user_info = info;
        self
    }

    /// Make the next call of `op` fail with `failure`.
    pub fn fail_next(&self, op: Op, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .failures
            .entry(op)
            .or_default()
            .push_back(failure);
    }

    /// Hold the response of the next call of `op` until the returned sender
    /// fires. The call's effect on backend state happens immediately.
    pub fn hold_next(&self, op: Op) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state
            .lock()
            .unwrap()
            .gates
            .entry(op)
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn cart(&self) -> Cart {
        self.state.lock().unwrap().cart.clone()
    }

    pub fn favorites(&self) -> Vec<FavoriteProduct> {
        self.state.lock().unwrap().favorites.clone()
    }

    /// Record `call` and pop the scripted failure and gate for `op`.
    fn begin(
        &self,
        op: Op,
        call: Call,
    ) -> (Result<(), ClientError>, Option<oneshot::Receiver<()>>) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        let failure = state
            .failures
            .get_mut(&op)
            .and_then(VecDeque::pop_front)
            .map_or(Ok(()), |f| Err(f.into_error()));
        let gate = state.gates.get_mut(&op).and_then(VecDeque::pop_front);
        (failure, gate)
    }

    async fn release(gate: Option<oneshot::Receiver<()>>) {
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

impl Backend for FakeBackend {
    async fn get_cart(&self) -> Result<Cart, ClientError> {
        let (failure, gate) = self.begin(Op::GetCart, Call::GetCart);
        let cart = self.cart();
        Self::release(gate).await;
        failure.map(|()| cart)
    }

    async fn set_cart_line_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ClientError> {
        let (failure, gate) = self.begin(
            Op::SetQuantity,
            Call::SetQuantity(product_id.clone(), quantity),
        );
        let result = failure.map(|()| {
            let mut state = self.state.lock().unwrap();
            let items = &mut state.cart.items;
            match items.iter().position(|item| &item.product.id == product_id) {
                Some(index) if quantity == 0 => {
                    items.remove(index);
                }
                Some(index) => items[index].quantity = quantity,
                None if quantity == 0 => {}
                None => items.push(cart_line(product_id.as_str(), 100, quantity)),
            }
            state.cart.clone()
        });
        Self::release(gate).await;
        result
    }

    async fn get_cart_count(&self) -> Result<CartCount, ClientError> {
        self.state.lock().unwrap().calls.push(Call::GetCartCount);
        Ok(CartCount {
            count: self.cart().totals().total_count,
        })
    }

    async fn get_favorites(&self) -> Result<Vec<FavoriteProduct>, ClientError> {
        let (failure, gate) = self.begin(Op::GetFavorites, Call::GetFavorites);
        let favorites = self.favorites();
        Self::release(gate).await;
        failure.map(|()| favorites)
    }

    async fn add_favorite(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<FavoriteProduct>, ClientError> {
        let (failure, gate) = self.begin(Op::AddFavorite, Call::AddFavorite(product_id.clone()));
        let result = failure.map(|()| {
            let mut state = self.state.lock().unwrap();
            if !state.favorites.iter().any(|f| &f.id == product_id) {
                state.favorites.push(favorite(product_id.as_str(), 100));
            }
            state.favorites.clone()
        });
        Self::release(gate).await;
        result
    }

    async fn remove_favorite(&self, product_id: &ProductId) -> Result<ErrorResponse, ClientError> {
        let (failure, gate) = self.begin(
            Op::RemoveFavorite,
            Call::RemoveFavorite(product_id.clone()),
        );
        let result = failure.map(|()| {
            self.state
                .lock()
                .unwrap()
                .favorites
                .retain(|f| &f.id != product_id);
            ErrorResponse {
                error: false,
                message: "Removed".to_string(),
            }
        });
        Self::release(gate).await;
        result
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<Order, ClientError> {
        let (failure, gate) = self.begin(Op::CreateOrder, Call::CreateOrder(payload.clone()));
        Self::release(gate).await;
        failure.map(|()| Order {
            id: Some(OrderId::from("order-1")),
            details: payload.clone(),
            status: Some(OrderStatus::New),
            total_amount: None,
            created_at: None,
        })
    }

    async fn get_user_info(&self) -> Result<UserInfo, ClientError> {
        let (failure, gate) = self.begin(Op::GetUserInfo, Call::GetUserInfo);
        let info = self.state.lock().unwrap().user_info.clone();
        Self::release(gate).await;
        failure.map(|()| info)
    }

    async fn update_user_info(
        &self,
        payload: &UserInfoPayload,
    ) -> Result<ErrorResponse, ClientError> {
        let (failure, gate) = self.begin(
            Op::UpdateUserInfo,
            Call::UpdateUserInfo(payload.clone()),
        );
        Self::release(gate).await;
        failure.map(|()| ErrorResponse {
            error: false,
            message: "Saved".to_string(),
        })
    }
}

// =============================================================================
// RecordingUi
// =============================================================================

/// UI collaborators that remember what they were asked to do.
#[derive(Default)]
pub struct RecordingUi {
    notices: Mutex<Vec<String>>,
    routes: Mutex<Vec<Route>>,
    dialog_open: Mutex<bool>,
}

impl RecordingUi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ui(self: &Arc<Self>) -> Ui {
        Ui::new(self.clone(), self.clone(), self.clone())
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn dialog_open(&self) -> bool {
        *self.dialog_open.lock().unwrap()
    }
}

impl Notifier for RecordingUi {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

impl Navigator for RecordingUi {
    fn navigate(&self, route: &Route) {
        self.routes.lock().unwrap().push(route.clone());
    }
}

impl Dialogs for RecordingUi {
    fn open_order_confirmation(&self) {
        *self.dialog_open.lock().unwrap() = true;
    }

    fn close_order_confirmation(&self) {
        *self.dialog_open.lock().unwrap() = false;
    }
}

/// A profile with every field filled in.
pub fn full_profile(delivery_type: Option<DeliveryType>) -> UserInfo {
    UserInfo {
        delivery_type,
        payment_type: Some(lumen_core::PaymentType::CardOnline),
        first_name: Some("Anna".to_string()),
        last_name: Some("Petrova".to_string()),
        father_name: Some("Igorevna".to_string()),
        phone: Some("+79990001122".to_string()),
        email: Some("anna@lumen.shop".to_string()),
        street: Some("Lenina".to_string()),
        house: Some("5".to_string()),
        entrance: Some("2".to_string()),
        apartment: Some("41".to_string()),
    }
}
