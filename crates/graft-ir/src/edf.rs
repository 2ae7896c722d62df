use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{AttributeSet, CanonicalName, GraftResult, Moment, ObjectPath, ResourceRef, Value};

use crate::require_ref;

const EXITANCE: &str = "exitance";

/// A diffuse emission profile referencing one exitance color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edf {
    pub name: CanonicalName,
    pub exitance: ResourceRef,
    pub params: AttributeSet,
}

impl Edf {
    pub const MODEL: &'static str = "diffuse_edf";

    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::text(EXITANCE, "")]
    }

    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;
        let exitance = require_ref(&name, &values, EXITANCE)?;

        let mut params = AttributeSet::new();
        params.set(EXITANCE, Value::Text(exitance.name.as_str().to_owned()));

        Ok(Self {
            name,
            exitance,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeScene;
    use graft_core::GraftError;

    #[test]
    fn test_resolves_exitance_color() {
        let scene = FakeScene::new()
            .with_param("/shop/glow", EXITANCE, Value::Text("/shop/warm".into()));
        let edf = Edf::resolve(&scene, &ObjectPath::new("/shop/glow"), Moment::zero()).unwrap();

        assert_eq!(edf.exitance.name.as_str(), "shop__warm");
        assert_eq!(
            edf.params.get("e", EXITANCE).unwrap().as_text(),
            Some("shop__warm")
        );
    }

    #[test]
    fn test_missing_exitance_is_fatal() {
        let scene = FakeScene::new();
        let err =
            Edf::resolve(&scene, &ObjectPath::new("/shop/glow"), Moment::zero()).unwrap_err();
        assert!(matches!(err, GraftError::MissingRequiredReference { .. }));
    }
}
