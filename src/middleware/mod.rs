/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::apply (favourites 系), cors::apply, http::apply
 */
pub mod auth;
pub mod cors;
pub mod http;
