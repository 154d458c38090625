/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（AuthCtx）を handler に提供する
 * - 検証や identity sync は middleware / services 側の責務。
 *   ここは extensions から取り出すだけ。
 *
 * Public API:
 * - AuthCtx
 */

mod core;
mod types;

pub use types::AuthCtx;
