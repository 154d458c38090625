/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が gate の結果を request extensions に格納し、
 *   handler はこの型だけを受け取る
 */

use crate::repos::user_repo::LocalUser;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// `user` は identity sync 済みのローカルユーザー（provider claims を反映済み）。
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user: LocalUser,
}

impl AuthCtx {
    pub fn new(user: LocalUser) -> Self {
        Self { user }
    }
}
