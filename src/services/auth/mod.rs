/*!
 * Authentication flow
 *
 * Responsibility:
 * - bearer token extraction (token)
 * - provider identity → local user mapping (sync)
 * - the per-request authentication decision (gate)
 */

pub mod gate;
pub mod sync;
#[cfg(test)]
pub(crate) mod testing;
pub mod token;
