//! Authorization ヘッダ → AuthGate → AuthCtx を request extensions に載せる
//!
//! - 認証成功時のみ AuthCtx を格納する。匿名リクエストはそのまま通し、
//!   個々の handler / extractor 側で要否を判断する。
//! - storage 障害だけは 500 として返す（401 に混ぜない）。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::gate::AuthOutcome;
use crate::state::AppState;

/// Wrap a router with the authentication gate.
///
/// 例：
/// ```ignore
/// let v1 = access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、
    // `from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let outcome = {
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.gate.authenticate(authorization).await
    };

    match outcome {
        Ok(AuthOutcome::Authenticated(user)) => {
            // middleware → extractor への受け渡し
            req.extensions_mut().insert(AuthCtx::new(user));
        }
        Ok(AuthOutcome::Anonymous) => {}
        Err(err) => {
            tracing::error!(error = %err, "authentication gate failed");
            return Err(AppError::Internal);
        }
    }

    Ok(next.run(req).await)
}
