pub mod auth;
pub mod context;
pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::clients::{AddressClient, BackendClient, OrganizationClient, ScanGroupClient, UserClient};
use crate::config::{BackendKind, ConsoleConfig, LimitsConfig};
use crate::errors::ConsoleError;
use crate::scangroup::DetailsValidator;
use crate::services::{AddressService, MemoryBackend, OrganizationService, ScanGroupService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub scan_groups: Arc<dyn ScanGroupService>,
    pub addresses: Arc<dyn AddressService>,
    pub organizations: Arc<dyn OrganizationService>,
    pub users: Arc<dyn UserService>,
    pub validator: Arc<DetailsValidator>,
    pub limits: LimitsConfig,
    pub api_token: Option<String>,
    pub env: String,
    pub region: String,
}

impl AppState {
    /// Every collaborator served by one in-memory backend.
    pub fn with_memory(backend: Arc<MemoryBackend>, config: &ConsoleConfig) -> Self {
        Self {
            scan_groups: backend.clone(),
            addresses: backend.clone(),
            organizations: backend.clone(),
            users: backend,
            validator: Arc::new(DetailsValidator::new()),
            limits: config.limits.clone(),
            api_token: config.api_token.clone(),
            env: config.env.clone(),
            region: config.region.clone(),
        }
    }
}

pub fn create_app_state(config: &ConsoleConfig) -> Result<AppState, ConsoleError> {
    match config.backend.kind {
        BackendKind::Memory => {
            let backend = MemoryBackend::seeded(config.organizations.clone(), config.users.clone());
            Ok(AppState::with_memory(Arc::new(backend), config))
        }
        BackendKind::Http => {
            let endpoints = config.backend.endpoints.clone().unwrap_or_default();
            let client_for = |name: &str, url: Option<String>| -> Result<BackendClient, ConsoleError> {
                let url = url.ok_or_else(|| ConsoleError::Config(format!("missing {} endpoint", name)))?;
                BackendClient::new(&url, &config.backend)
            };

            Ok(AppState {
                scan_groups: Arc::new(ScanGroupClient::new(client_for("scangroup", endpoints.scangroup)?)),
                addresses: Arc::new(AddressClient::new(client_for("address", endpoints.address)?)),
                organizations: Arc::new(OrganizationClient::new(client_for("organization", endpoints.organization)?)),
                users: Arc::new(UserClient::new(client_for("user", endpoints.user)?)),
                validator: Arc::new(DetailsValidator::new()),
                limits: config.limits.clone(),
                api_token: config.api_token.clone(),
                env: config.env.clone(),
                region: config.region.clone(),
            })
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let scangroup_routes = Router::new()
        .route("/groups", get(routes::scangroups::list_groups))
        .route("/groups/stats", get(routes::scangroups::get_group_stats))
        .route("/id/{id}", get(routes::scangroups::get_group_by_id))
        .route(
            "/name/{name}",
            get(routes::scangroups::get_group_by_name)
                .post(routes::scangroups::create_group)
                .patch(routes::scangroups::update_group)
                .delete(routes::scangroups::delete_group),
        )
        .route("/name/{name}/status", patch(routes::scangroups::update_group_status));

    let address_routes = Router::new()
        .route("/group/{id}", get(routes::addresses::get_addresses))
        .route("/group/{id}/hosts", get(routes::addresses::get_host_list))
        .route("/group/{id}/initial", put(routes::addresses::put_initial_addresses))
        .route("/group/{id}/count", get(routes::addresses::get_group_count))
        .route("/group/{id}/download", post(routes::addresses::export_addresses))
        .route("/group/{id}/delete", patch(routes::addresses::delete_addresses))
        .route("/group/{id}/ignore", patch(routes::addresses::ignore_addresses));

    // Layers run bottom-up: token check, then identity.
    let console = Router::new()
        .nest("/scangroup", scangroup_routes)
        .nest("/address", address_routes)
        .layer(middleware::from_fn(context::user_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth::api_auth_middleware));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(console)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(state.limits.max_body_bytes)),
        )
        .with_state(state)
}
