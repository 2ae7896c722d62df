use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{AttributeSet, CanonicalName, GraftResult, Matrix4, Moment, ObjectPath, Value};

use crate::color::Color;

// Host parameters queried for a light.
const CONE_ENABLE: &str = "coneenable";
const CONE_ANGLE: &str = "coneangle";
const CONE_DELTA: &str = "conedelta";
const LIGHT_COLOR: &str = "light_color";
const LIGHT_INTENSITY: &str = "light_intensity";

// Emitted parameters.
const EXITANCE: &str = "exitance";
const INNER_ANGLE: &str = "inner_angle";
const OUTER_ANGLE: &str = "outer_angle";

/// The lighting model a host light resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightModel {
    Point,
    Spot { inner_angle: f64, outer_angle: f64 },
}

impl LightModel {
    pub fn tag(&self) -> &'static str {
        match self {
            LightModel::Point => "point_light",
            LightModel::Spot { .. } => "spot_light",
        }
    }
}

/// A light source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Light {
    pub name: CanonicalName,
    pub model: LightModel,
    pub params: AttributeSet,
    /// World transform, already transposed into document convention.
    pub transform: Matrix4,
}

impl Light {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::boolean(CONE_ENABLE, false),
            ParamSpec::float(CONE_ANGLE, 45.0),
            ParamSpec::float(CONE_DELTA, 10.0),
            ParamSpec::tuple(LIGHT_COLOR, &[1.0, 1.0, 1.0]),
            ParamSpec::float(LIGHT_INTENSITY, 1.0),
        ]
    }

    /// Resolve a light. A light with its cone enabled becomes a spot light
    /// (inner angle = cone angle - cone delta), otherwise a point light.
    ///
    /// Returns the light together with its synthesized emission color. The
    /// color is private to this light (one per light, never shared) and is
    /// registered like any other color resource.
    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<(Self, Color)> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;

        let model = if values.boolean(CONE_ENABLE)? {
            let angle = values.float(CONE_ANGLE)?;
            let delta = values.float(CONE_DELTA)?;
            LightModel::Spot {
                inner_angle: angle - delta,
                outer_angle: angle,
            }
        } else {
            LightModel::Point
        };

        let emission = Color::from_values(
            name.child(EXITANCE),
            &values.tuple(LIGHT_COLOR)?,
            values.float(LIGHT_INTENSITY)?,
        );

        let mut params = AttributeSet::new();
        params.set_required(
            EXITANCE,
            Value::Text(String::new()),
            Value::Text(emission.name.as_str().to_owned()),
        );
        if let LightModel::Spot {
            inner_angle,
            outer_angle,
        } = model
        {
            params.set(INNER_ANGLE, Value::Float(inner_angle));
            params.set(OUTER_ANGLE, Value::Float(outer_angle));
        }
        params.validate_required(name.as_str())?;

        let transform = source.world_transform(path, moment)?.transposed();

        Ok((
            Self {
                name,
                model,
                params,
                transform,
            },
            emission,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeScene;

    #[test]
    fn test_point_light_by_default() {
        let scene = FakeScene::new();
        let (light, emission) =
            Light::resolve(&scene, &ObjectPath::new("/obj/lamp1"), Moment::zero()).unwrap();

        assert_eq!(light.model, LightModel::Point);
        assert_eq!(light.model.tag(), "point_light");
        assert_eq!(emission.name.as_str(), "obj__lamp1_exitance");
        assert_eq!(
            light.params.get("l", EXITANCE).unwrap().as_text(),
            Some("obj__lamp1_exitance")
        );
        assert!(!light.params.has(INNER_ANGLE));
    }

    #[test]
    fn test_cone_enabled_becomes_spot() {
        let scene = FakeScene::new()
            .with_param("/obj/lamp1", CONE_ENABLE, Value::Bool(true))
            .with_param("/obj/lamp1", CONE_ANGLE, Value::Float(40.0))
            .with_param("/obj/lamp1", CONE_DELTA, Value::Float(5.0));
        let (light, _) =
            Light::resolve(&scene, &ObjectPath::new("/obj/lamp1"), Moment::zero()).unwrap();

        assert_eq!(
            light.model,
            LightModel::Spot {
                inner_angle: 35.0,
                outer_angle: 40.0
            }
        );
        assert_eq!(light.params.get("l", INNER_ANGLE).unwrap().as_float(), Some(35.0));
        assert_eq!(light.params.get("l", OUTER_ANGLE).unwrap().as_float(), Some(40.0));
    }

    #[test]
    fn test_emission_carries_color_and_intensity() {
        let scene = FakeScene::new()
            .with_param("/obj/lamp1", LIGHT_COLOR, Value::Tuple(vec![1.0, 0.5, 0.0]))
            .with_param("/obj/lamp1", LIGHT_INTENSITY, Value::Float(80.0));
        let (_, emission) =
            Light::resolve(&scene, &ObjectPath::new("/obj/lamp1"), Moment::zero()).unwrap();

        assert_eq!(
            emission.params.get("c", "color").unwrap().as_tuple().unwrap(),
            &[1.0, 0.5, 0.0]
        );
        assert_eq!(
            emission.params.get("c", "multiplier").unwrap().as_float(),
            Some(80.0)
        );
    }
}
