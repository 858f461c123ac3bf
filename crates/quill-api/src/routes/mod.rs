mod api_keys;
mod articles;
mod auth;
mod blogs;
mod brands;
mod carousels;
mod categories;
mod files;
mod languages;
mod pages;
mod product_categories;
mod products;
mod tags;
mod users;

use axum::Json;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use serde::{Deserialize, Deserializer};

use crate::guard;
use crate::state::ApiState;

/// Patch bodies need three states per nullable column: absent leaves it
/// alone, an explicit `null` clears it, a value replaces it. Plain serde
/// folds `null` into the outer `None`; this keeps it as `Some(None)`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Everything under `/api`. Public reads stay outside the guard; every
/// mutation and admin read sits behind it.
pub fn router(state: ApiState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .merge(auth::public_routes())
        .merge(languages::public_routes())
        .merge(articles::public_routes())
        .merge(categories::public_routes())
        .merge(tags::public_routes())
        .merge(pages::public_routes())
        .merge(products::public_routes())
        .merge(brands::public_routes())
        .merge(product_categories::public_routes())
        .merge(carousels::public_routes());

    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(users::routes())
        .merge(api_keys::routes())
        .merge(languages::protected_routes())
        .merge(blogs::routes())
        .merge(articles::protected_routes())
        .merge(categories::protected_routes())
        .merge(tags::protected_routes())
        .merge(pages::protected_routes())
        .merge(products::protected_routes())
        .merge(brands::protected_routes())
        .merge(product_categories::protected_routes())
        .merge(carousels::protected_routes())
        .merge(files::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_auth,
        ));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}
