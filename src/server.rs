//! JSON HTTP server for the storefront.
//!
//! Serves the trending listing, the similar-items recommendation endpoint,
//! and account signup/signin. The original demo rendered HTML templates;
//! presentation is out of scope here, so every route returns JSON carrying
//! the same messages and flows.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/`, `/index` | Trending product cards (first 8 rows) |
//! | `GET`  | `/main` | Recommendation search page descriptor |
//! | `GET/POST` | `/signup` | Create an account from form fields |
//! | `GET/POST` | `/signin` | Authenticate and return the trending page with a welcome notice |
//! | `GET/POST` | `/recommendations` | Run the similarity engine for a product |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses use the shape:
//!
//! ```json
//! { "error": { "code": "conflict", "message": "Username or Email already exists. Please try another." } }
//! ```
//!
//! Error codes: `bad_request` (400), `invalid_credentials` (401),
//! `conflict` (409), `internal` (500). An unknown product name is not an
//! error: `/recommendations` answers 200 with a no-recommendations message.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the demo frontend can
//! be served from anywhere.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use shopline_core::models::Recommendation;

use crate::accounts::{self, SignupOutcome, User};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::db;
use crate::display;
use crate::migrate;

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor. The catalog snapshot is immutable; the pool serializes writes.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
    pool: SqlitePool,
}

/// Starts the storefront HTTP server.
///
/// Binds to the address configured in `[server].bind`, applies the database
/// schema, and serves until the process is terminated. The catalog snapshot
/// must already be loaded; the server never reloads it.
pub async fn run_server(config: &Config, catalog: Arc<Catalog>) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let pool = db::connect(config).await?;
    migrate::apply_schema(&pool).await?;

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog,
        pool,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_index))
        .route("/index", get(handle_index))
        .route("/main", get(handle_main))
        .route("/signup", get(handle_signup_page).post(handle_signup))
        .route("/signin", get(handle_signin_page).post(handle_signin))
        .route(
            "/recommendations",
            get(handle_recommendations_page).post(handle_recommendations),
        )
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("Storefront listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"conflict"`, `"bad_request"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 401 for a failed signin.
fn invalid_credentials(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::UNAUTHORIZED,
        code: "invalid_credentials".to_string(),
        message: message.into(),
    }
}

/// Constructs a 409 for a duplicate username or email.
fn conflict(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::CONFLICT,
        code: "conflict".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 for unexpected failures.
fn internal(err: anyhow::Error) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: err.to_string(),
    }
}

// ============ Card building ============

/// One product card in the trending listing.
#[derive(Serialize)]
struct ProductCard {
    name: String,
    brand: String,
    review_count: i64,
    rating: f64,
    image_url: String,
    /// Randomly assigned placeholder image for display.
    display_image: String,
}

/// One ranked card in a recommendation response.
#[derive(Serialize)]
struct RecommendationCard {
    name: String,
    brand: String,
    review_count: i64,
    rating: f64,
    image_url: String,
    display_image: String,
    /// Cosine similarity to the query product.
    score: f64,
}

/// Trending page body: the listing plus the page price and an optional
/// notice (used for the post-signin welcome message).
#[derive(Serialize)]
struct TrendingResponse {
    products: Vec<ProductCard>,
    price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Build the trending listing with display cosmetics assigned.
///
/// One random placeholder image per card, one random price for the page,
/// matching the reference behavior.
fn trending_page(state: &AppState, message: Option<String>) -> TrendingResponse {
    let mut rng = rand::thread_rng();
    let products = state
        .catalog
        .trending_head(state.config.catalog.trending_rows)
        .iter()
        .map(|p| ProductCard {
            name: p.name.clone(),
            brand: p.brand.clone(),
            review_count: p.review_count,
            rating: p.rating,
            image_url: p.image_url.clone(),
            display_image: display::placeholder_image(&mut rng),
        })
        .collect();

    TrendingResponse {
        products,
        price: display::page_price(&mut rng),
        message,
    }
}

fn recommendation_cards(recs: Vec<Recommendation>) -> Vec<RecommendationCard> {
    let mut rng = rand::thread_rng();
    recs.into_iter()
        .map(|r| RecommendationCard {
            name: r.product.name,
            brand: r.product.brand,
            review_count: r.product.review_count,
            rating: r.product.rating,
            image_url: r.product.image_url,
            display_image: display::placeholder_image(&mut rng),
            score: r.score,
        })
        .collect()
}

// ============ GET / and /index ============

/// Handler for `GET /` and `GET /index`: the trending listing.
async fn handle_index(State(state): State<AppState>) -> Json<TrendingResponse> {
    Json(trending_page(&state, None))
}

// ============ GET /main ============

/// JSON response body for `GET /main`.
#[derive(Serialize)]
struct MainResponse {
    /// Number of catalog products the similarity engine was fitted over.
    products_indexed: usize,
}

/// Handler for `GET /main`: the recommendation search page descriptor.
async fn handle_main(State(state): State<AppState>) -> Json<MainResponse> {
    Json(MainResponse {
        products_indexed: state.catalog.product_count(),
    })
}

// ============ GET|POST /signup ============

/// Signup form fields, named as the original frontend posts them.
#[derive(Deserialize)]
struct SignupForm {
    username: String,
    email: String,
    password: String,
}

#[derive(Serialize)]
struct SignupResponse {
    message: String,
    redirect: String,
    user: User,
}

/// Handler for `GET /signup`: describes the expected form.
async fn handle_signup_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "form": ["username", "email", "password"],
    }))
}

/// Handler for `POST /signup`.
///
/// Creates the account, or answers 409 when the username or email is
/// already taken. Uniqueness is enforced by the database, so concurrent
/// duplicate signups cannot both succeed.
async fn handle_signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<impl IntoResponse, AppError> {
    if form.username.trim().is_empty()
        || form.email.trim().is_empty()
        || form.password.is_empty()
    {
        return Err(bad_request("username, email, and password are required"));
    }

    let outcome = accounts::create_user(&state.pool, &form.username, &form.email, &form.password)
        .await
        .map_err(internal)?;

    match outcome {
        SignupOutcome::Created(user) => Ok((
            StatusCode::CREATED,
            Json(SignupResponse {
                message: "Signup successful. You can now log in.".to_string(),
                redirect: "/signin".to_string(),
                user,
            }),
        )),
        SignupOutcome::Conflict => Err(conflict(
            "Username or Email already exists. Please try another.",
        )),
    }
}

// ============ GET|POST /signin ============

/// Signin form fields, named as the original frontend posts them.
#[derive(Deserialize)]
struct SigninForm {
    #[serde(rename = "signinUsername")]
    username: String,
    #[serde(rename = "signinPassword")]
    password: String,
}

/// Handler for `GET /signin`: describes the expected form.
async fn handle_signin_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "form": ["signinUsername", "signinPassword"],
    }))
}

/// Handler for `POST /signin`.
///
/// On success, answers with the trending page and a welcome notice, as the
/// original did. On failure, answers 401 with the original's message.
async fn handle_signin(
    State(state): State<AppState>,
    Form(form): Form<SigninForm>,
) -> Result<Json<TrendingResponse>, AppError> {
    let user = accounts::authenticate(&state.pool, &form.username, &form.password)
        .await
        .map_err(internal)?;

    match user {
        Some(user) => {
            let message = format!("Welcome back, {}!", user.username);
            Ok(Json(trending_page(&state, Some(message))))
        }
        None => Err(invalid_credentials(
            "Invalid username or password. Please try again.",
        )),
    }
}

// ============ GET|POST /recommendations ============

/// Recommendation form fields, named as the original frontend posts them.
/// `nbr` arrives as text and is validated here rather than by the extractor
/// so a bad count is a clean 400.
#[derive(Deserialize)]
struct RecommendForm {
    prod: String,
    nbr: String,
}

#[derive(Serialize)]
struct RecommendResponse {
    recommendations: Vec<RecommendationCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Handler for `GET /recommendations`: describes the expected form.
async fn handle_recommendations_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "form": ["prod", "nbr"],
    }))
}

/// Handler for `POST /recommendations`.
///
/// Runs the similarity engine for the posted product name. An unknown name
/// degrades to a 200 with a no-recommendations message rather than an error.
async fn handle_recommendations(
    State(state): State<AppState>,
    Form(form): Form<RecommendForm>,
) -> Result<Json<RecommendResponse>, AppError> {
    let top_n: usize = form
        .nbr
        .trim()
        .parse()
        .map_err(|_| bad_request("nbr must be a non-negative integer"))?;

    let recs = state.catalog.recommend(&form.prod, top_n);

    if recs.is_empty() {
        return Ok(Json(RecommendResponse {
            recommendations: Vec::new(),
            price: None,
            message: Some("No recommendations available for this product.".to_string()),
        }));
    }

    let cards = recommendation_cards(recs);
    let price = {
        let mut rng = rand::thread_rng();
        display::page_price(&mut rng)
    };

    Ok(Json(RecommendResponse {
        recommendations: cards,
        price: Some(price),
        message: None,
    }))
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
