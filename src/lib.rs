//! Billing API Library
//!
//! CRUD backend for customers, subscription plans, transactions, and derived
//! invoices over a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod features;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub features: features::FeatureFlags,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        let features =
            features::FeatureFlags::from_disabled_list(config.disabled_features.as_deref());
        Self {
            db,
            config,
            services,
            features,
        }
    }
}

/// Assembles the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/health", handlers::health::health_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/plans", handlers::plans::plan_routes())
        .nest("/transactions", handlers::transactions::transaction_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
