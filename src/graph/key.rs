//! Stable identity derivation for nodes and contributors

use uuid::Uuid;

/// UUID v5 namespace for entity keys
const ENTITY_NS: Uuid = Uuid::from_bytes([
    0x3d, 0x6f, 0x0b, 0x52, 0x9c, 0x41, 0x4e, 0x8a,
    0xb2, 0x17, 0x5e, 0xc0, 0x7a, 0x93, 0x1f, 0x64,
]);

/// Derive a stable key from an ordered list of parts.
///
/// The parts are joined with `--` and hashed into a name-based UUID, so the
/// same `(name, type)` pair maps to the same key in every batch.
pub fn stable_key<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("--");
    Uuid::new_v5(&ENTITY_NS, joined.as_bytes()).to_string()
}

/// Key for an entity identified by name and optional category.
pub fn entity_key(name: &str, entity_type: Option<&str>) -> String {
    match entity_type {
        Some(t) => stable_key(&[name, t]),
        None => stable_key(&[name]),
    }
}
