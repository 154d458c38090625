use serde::Deserialize;

/// RFC 7662 introspection response, reduced to the one field this service
/// acts on. A missing `active` deserializes to `false`; any other claim the
/// provider sends is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Introspection {
    #[serde(default)]
    pub active: bool,
}

/// Userinfo claims this service consumes. All optional: a misbehaving
/// provider may answer with a partial document, and missing-claim handling
/// is an explicit branch at the call site rather than a map lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
}
