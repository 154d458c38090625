/*
 * Responsibility
 * - GET /me: 認証済み principal をそのまま返す
 * - AuthCtx extractor が無ければ 401（匿名は許可しない route）
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::AuthCtx;

pub async fn me(ctx: AuthCtx) -> Json<MeResponse> {
    Json(ctx.user.into())
}
