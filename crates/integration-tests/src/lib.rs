//! Integration test harness for Nurvi Jewel.
//!
//! Boots the storefront and admin apps on ephemeral ports, with the payment
//! gateway and SMS provider replaced by an in-process fake. Tests drive the
//! apps over real HTTP with a cookie-aware client.
//!
//! ```bash
//! cargo test -p nurvi-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use nurvi_admin::{AdminConfig, config::DEFAULT_ADMIN_EMAIL};
use nurvi_storefront::config::{BusinessConfig, RazorpayConfig, TwilioConfig};
use nurvi_storefront::db::UserStore;
use nurvi_storefront::{StorefrontConfig, services::razorpay};

/// Gateway key secret shared by the fake and the storefront.
pub const KEY_SECRET: &str = "rzp_test_9fK2mQ7vXc4LpT8wZb1N";
/// Admin password accepted by the spawned admin app.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Boxed error for harness helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A message captured by the fake SMS provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub body: String,
}

#[derive(Debug, Default)]
struct Recorded {
    orders: Vec<Value>,
    messages: Vec<SentSms>,
}

/// In-process stand-in for the payment gateway and SMS provider.
#[derive(Clone, Default)]
pub struct FakeProviders {
    recorded: Arc<Mutex<Recorded>>,
    sms_down: Arc<Mutex<bool>>,
}

impl FakeProviders {
    /// Gateway orders received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<Value> {
        self.lock().orders.clone()
    }

    /// SMS messages received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<SentSms> {
        self.lock().messages.clone()
    }

    /// Make the SMS endpoint answer 503.
    pub fn fail_sms(&self) {
        *self.sms_down.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/v1/orders", post(create_order))
            .route(
                "/2010-04-01/Accounts/{sid}/Messages.json",
                post(send_message),
            )
            .with_state(self.clone())
    }
}

async fn create_order(State(fake): State<FakeProviders>, Json(body): Json<Value>) -> Json<Value> {
    let mut recorded = fake.lock();
    let id = format!("order_test{:04}", recorded.orders.len() + 1);
    let response = json!({
        "id": id,
        "amount": body["amount"],
        "currency": body["currency"],
        "receipt": body["receipt"],
        "status": "created",
    });
    recorded.orders.push(body);
    Json(response)
}

#[derive(Deserialize)]
struct MessageForm {
    #[serde(rename = "To")]
    to: String,
    #[serde(rename = "Body")]
    body: String,
}

async fn send_message(
    State(fake): State<FakeProviders>,
    Path(sid): Path<String>,
    Form(form): Form<MessageForm>,
) -> (StatusCode, Json<Value>) {
    if *fake.sms_down.lock().unwrap_or_else(PoisonError::into_inner) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": "Service unavailable" })),
        );
    }
    let mut recorded = fake.lock();
    recorded.messages.push(SentSms {
        to: form.to,
        body: form.body,
    });
    let message_sid = format!("SM{sid}{:04}", recorded.messages.len());
    (
        StatusCode::CREATED,
        Json(json!({ "sid": message_sid, "status": "queued" })),
    )
}

async fn serve(router: Router) -> Result<SocketAddr, BoxError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}

/// Running storefront plus the fakes it talks to.
pub struct StorefrontHarness {
    pub base_url: String,
    pub providers: FakeProviders,
    pub client: reqwest::Client,
}

impl StorefrontHarness {
    /// Start the fakes and a storefront wired to them.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener cannot bind or the app fails to build.
    pub async fn start() -> Result<Self, BoxError> {
        let providers = FakeProviders::default();
        let fake_addr = serve(providers.router()).await?;

        let config = StorefrontConfig {
            host: "127.0.0.1".parse()?,
            port: 0,
            base_url: "http://localhost".to_string(),
            data_dir: std::env::temp_dir(),
            catalog_seed: 7,
            razorpay: RazorpayConfig {
                key_id: "rzp_test_nurvi".to_string(),
                key_secret: SecretString::from(KEY_SECRET),
                api_url: format!("http://{fake_addr}/v1"),
            },
            twilio: TwilioConfig {
                account_sid: "AC0042".to_string(),
                auth_token: SecretString::from("tw_test_Q8zN3vLp6Xr1Km9Jd4Hs"),
                phone_number: "+15005550006".to_string(),
                api_url: format!("http://{fake_addr}/2010-04-01"),
            },
            business: BusinessConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = nurvi_storefront::AppState::new(config, UserStore::in_memory())?;
        let addr = serve(nurvi_storefront::app(state)).await?;

        Ok(Self {
            base_url: format!("http://{addr}"),
            providers,
            client: cookie_client()?,
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second browser with its own cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to build.
    pub fn new_browser(&self) -> Result<reqwest::Client, BoxError> {
        cookie_client()
    }
}

/// Running admin app with seeded data.
pub struct AdminHarness {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl AdminHarness {
    /// Start an admin app whose password is [`ADMIN_PASSWORD`].
    ///
    /// # Errors
    ///
    /// Returns an error if hashing, binding or the client build fails.
    pub async fn start() -> Result<Self, BoxError> {
        let config = AdminConfig {
            host: "127.0.0.1".parse()?,
            port: 0,
            base_url: "http://localhost".to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password_hash: SecretString::from(
                nurvi_admin::services::auth::hash_password(ADMIN_PASSWORD)?,
            ),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = nurvi_admin::AppState::new(config, nurvi_admin::db::Directory::seeded());
        let addr = serve(nurvi_admin::app(state)).await?;

        Ok(Self {
            base_url: format!("http://{addr}"),
            client: cookie_client()?,
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/admin{path}", self.base_url)
    }

    /// Log in with the seeded admin account.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 response.
    pub async fn login(&self) -> Result<Value, BoxError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": DEFAULT_ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn cookie_client() -> Result<reqwest::Client, BoxError> {
    Ok(reqwest::Client::builder().cookie_store(true).build()?)
}

/// Signature the checkout widget would return for a successful payment.
#[must_use]
pub fn widget_signature(order_id: &str, payment_id: &str) -> String {
    razorpay::sign(KEY_SECRET, order_id, payment_id)
}
