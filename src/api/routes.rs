/*
 * Responsibility
 * - /api の URL 構造を定義
 * - register/login は公開、favourites 系だけ auth gate を route_layer で掛ける
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::handlers::{
    favourites::{add_favourite, get_favourites, remove_favourite},
    users::{login, register},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login));

    let protected = Router::new()
        .route("/user/favourites", get(get_favourites))
        .route(
            "/user/favourites/{id}",
            put(add_favourite).delete(remove_favourite),
        );
    let protected = middleware::auth::apply(protected, state);

    public.merge(protected)
}
