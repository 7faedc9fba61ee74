//! Identity collaborators: turn a bearer credential into an [`Identity`].
//!
//! [`Identity`]: docsmith_core::Identity

pub mod key_set;
pub mod local;
pub mod supabase;

pub use key_set::{HttpKeySetSource, KeySetCache, KeySetSource};
pub use local::StaticIdentity;
pub use supabase::SupabaseIdentity;

/// Strip an optional `Bearer` scheme (any case). A bare scheme yields `""`.
pub fn bearer_token(credential: &str) -> &str {
    let credential = credential.trim_start();
    let rest = match credential.get(..6) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {
            let rest = &credential[6..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest
            } else {
                credential
            }
        }
        _ => credential,
    };
    rest.trim()
}
