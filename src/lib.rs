//! # catalog
//!
//! A small product catalog served as a JSON API over hyper.
//!
//! | Route | Method | Result |
//! |---|---|---|
//! | `/api/` | `GET` | every product |
//! | `/api/` | `POST` | `201` with the new product |
//! | `/api/{pk}/` | `GET` | one product |
//! | `/api/{pk}/update/` | `PUT` / `PATCH` | the updated product |
//! | `/api/{pk}/delete/` | `DELETE` | `204` |
//! | `/api/echo/` | `GET` / `POST` | the JSON body plus its `content_type` |
//! | `/healthz`, `/readyz` | `GET` | probes |
//!
//! ```rust,no_run
//! use catalog::{
//!     app,
//!     http::Server,
//!     products::models::{ContentPolicy, DiscountPolicy},
//!     state::AppState,
//! };
//!
//! # async fn run() -> Result<(), catalog::http::Error> {
//! let state = AppState::in_memory(ContentPolicy::Title, DiscountPolicy::SalePrice);
//!
//! Server::bind("0.0.0.0:8000").await?.serve(app::router(state)).await
//! # }
//! ```
//!
//! Products live in process memory and are lost on restart.

pub mod app;
pub mod client;
pub mod config;
pub mod echo;
pub mod errors;
pub mod http;
pub mod logging;
pub mod products;
pub mod state;
