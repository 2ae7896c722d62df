use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{AttributeSet, CanonicalName, GraftResult, Matrix4, Moment, ObjectPath, Value};

// Host parameters queried for a camera.
const FOCAL: &str = "focal";
const APERTURE: &str = "aperture";
const RES_X: &str = "resx";
const RES_Y: &str = "resy";

// Emitted parameters.
const FILM_DIMENSIONS: &str = "film_dimensions";
const FOCAL_LENGTH: &str = "focal_length";

/// The camera viewing the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub name: CanonicalName,
    pub params: AttributeSet,
    /// World transform, already transposed into document convention.
    pub transform: Matrix4,
    /// Raster resolution in pixels. Consumed by the output frame, never
    /// emitted on the camera element itself.
    pub resolution: (u32, u32),
}

impl Camera {
    pub const MODEL: &'static str = "pinhole_camera";

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::float(FOCAL, 35.0),
            ParamSpec::float(APERTURE, 41.4214),
            ParamSpec::float(RES_X, 640.0),
            ParamSpec::float(RES_Y, 480.0),
        ]
    }

    /// Resolve the camera. The film plane derives from the host's aperture
    /// and raster aspect ratio; millimeter quantities are stored in meters.
    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;

        let focal = values.float(FOCAL)?;
        let aperture = values.float(APERTURE)?;
        let res_x = values.float(RES_X)?;
        let res_y = values.float(RES_Y)?;

        let film_width = aperture / 1000.0;
        let film_height = aperture * (res_y / res_x) / 1000.0;

        let mut params = AttributeSet::new();
        params.set_required(
            FILM_DIMENSIONS,
            Value::Tuple(Vec::new()),
            Value::Tuple(vec![film_width, film_height]),
        );
        params.set_required(
            FOCAL_LENGTH,
            Value::Float(0.0),
            Value::Float(focal / 1000.0),
        );
        params.validate_required(name.as_str())?;

        let transform = source.world_transform(path, moment)?.transposed();

        Ok(Self {
            name,
            params,
            transform,
            resolution: (res_x as u32, res_y as u32),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeScene;

    #[test]
    fn test_film_dimension_derivation() {
        let scene = FakeScene::new()
            .with_param("/obj/cam1", FOCAL, Value::Float(35.0))
            .with_param("/obj/cam1", APERTURE, Value::Float(25.0))
            .with_param("/obj/cam1", RES_X, Value::Float(640.0))
            .with_param("/obj/cam1", RES_Y, Value::Float(480.0));

        let camera =
            Camera::resolve(&scene, &ObjectPath::new("/obj/cam1"), Moment::zero()).unwrap();

        let film = camera
            .params
            .get("cam", FILM_DIMENSIONS)
            .unwrap()
            .as_tuple()
            .unwrap()
            .to_vec();
        assert_eq!(film, vec![0.025, 0.01875]);

        let focal = camera
            .params
            .get("cam", FOCAL_LENGTH)
            .unwrap()
            .as_float()
            .unwrap();
        assert!((focal - 0.035).abs() < 1e-12);
        assert_eq!(camera.resolution, (640, 480));
    }

    #[test]
    fn test_defaults_apply_when_host_has_no_parameters() {
        let scene = FakeScene::new();
        let camera =
            Camera::resolve(&scene, &ObjectPath::new("/obj/cam1"), Moment::zero()).unwrap();
        assert_eq!(camera.name.as_str(), "obj__cam1");
        assert_eq!(camera.resolution, (640, 480));
    }

    #[test]
    fn test_world_transform_is_transposed() {
        let scene = FakeScene::new()
            .with_transform("/obj/cam1", Matrix4::translation(1.0, 2.0, 3.0));
        let camera =
            Camera::resolve(&scene, &ObjectPath::new("/obj/cam1"), Moment::zero()).unwrap();
        let m = camera.transform.values();
        assert_eq!((m[3], m[7], m[11]), (1.0, 2.0, 3.0));
    }
}
