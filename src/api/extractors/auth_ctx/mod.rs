/*!
 * Authenticated principal extractor
 *
 * Responsibility:
 * - auth gate が extensions に入れた Principal を handler に提供する
 */

mod core;

pub use core::AuthPrincipal;
