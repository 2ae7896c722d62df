use serde::{Deserialize, Serialize};

/// Host-side object identity: a slash-delimited node path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectPath(pub String);

impl ObjectPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized, collision-resistant identity used as the deduplication key in
/// every registry and in every cross-reference of the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalName(String);

impl CanonicalName {
    /// Wrap an already-normalized name (synthesized resources, the assembly).
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive the canonical form of a host path: the leading separator is
    /// stripped and every remaining `/` becomes `__`.
    pub fn from_path(path: &ObjectPath) -> Self {
        Self(path.as_str().trim_start_matches('/').replace('/', "__"))
    }

    /// Derive a child name for a resource synthesized under this one
    /// (e.g. a light's private emission color).
    pub fn child(&self, suffix: &str) -> CanonicalName {
        Self(format!("{}_{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed dependency edge. The resolver follows `path` against the scene
/// source; registries and the serialized document use `name`. Both come from
/// the same construction site so they cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub path: ObjectPath,
    pub name: CanonicalName,
}

impl ResourceRef {
    pub fn new(path: ObjectPath) -> Self {
        let name = CanonicalName::from_path(&path);
        Self { path, name }
    }

    /// Build a reference from an evaluated parameter value, treating the
    /// empty string as "no resource assigned".
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self::new(ObjectPath::new(raw)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_from_path() {
        let path = ObjectPath::new("/obj/geo1/mat");
        assert_eq!(CanonicalName::from_path(&path).as_str(), "obj__geo1__mat");
    }

    #[test]
    fn test_canonical_name_without_leading_slash() {
        let path = ObjectPath::new("obj/light1");
        assert_eq!(CanonicalName::from_path(&path).as_str(), "obj__light1");
    }

    #[test]
    fn test_canonical_name_child() {
        let name = CanonicalName::new("obj__light1");
        assert_eq!(name.child("exitance").as_str(), "obj__light1_exitance");
    }

    #[test]
    fn test_resource_ref_parse() {
        assert!(ResourceRef::parse("").is_none());
        let r = ResourceRef::parse("/shop/red").unwrap();
        assert_eq!(r.path.as_str(), "/shop/red");
        assert_eq!(r.name.as_str(), "shop__red");
    }
}
