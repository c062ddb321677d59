use uuid::Uuid;

use crate::validation::ValidationResult;

/// A record kept in a [`Repository`](crate::store::Repository).
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable kind used in errors and activity entries.
    const KIND: &'static str;
    /// Prefix of generated identifiers.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn validate(&self) -> ValidationResult;
}

/// Locally generated identifier, e.g. `htl-3f2a9c01b7de`.
pub fn new_id(prefix: &str) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &simple[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_shape() {
        let id = new_id("bkg");
        assert!(id.starts_with("bkg-"));
        assert_eq!(id.len(), 16);
        assert_ne!(new_id("bkg"), new_id("bkg"));
    }
}
