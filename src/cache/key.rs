//! Cache Key Module
//!
//! Deterministic key derivation for cached calls.

use serde::Serialize;

use crate::error::Result;

/// Builds a key from a resource name and the call's parameters.
///
/// The parameters are serialized as JSON, so equal parameters always give the
/// same key. Structs serialize in declaration order; use `BTreeMap` rather
/// than `HashMap` for map-shaped parameters.
///
/// ```
/// use api_cache::cache_key;
///
/// #[derive(serde::Serialize)]
/// struct Range<'a> { start: &'a str, end: &'a str }
///
/// let key = cache_key("bills_all", &Range { start: "2024-01-01", end: "2024-01-31" }).unwrap();
/// assert_eq!(key, r#"bills_all_{"start":"2024-01-01","end":"2024-01-31"}"#);
/// ```
pub fn cache_key<P: Serialize + ?Sized>(resource: &str, params: &P) -> Result<String> {
    let params = serde_json::to_string(params)?;
    Ok(format!("{}_{}", resource, params))
}

/// Builds a key for a single item of a resource, e.g. `bills_detail_5`.
pub fn resource_key(resource: &str, discriminator: impl std::fmt::Display) -> String {
    format!("{}_{}", resource, discriminator)
}
