use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{AttributeSet, GraftResult, Moment, ObjectPath, Value};

use crate::camera::Camera;

// Driver parameters.
const TILE_SIZE: &str = "tile_size";
const COLOR_SPACE: &str = "color_space";

// Emitted parameters.
const CAMERA: &str = "camera";
const RESOLUTION: &str = "resolution";

/// One output frame of the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub params: AttributeSet,
}

impl Frame {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::float(TILE_SIZE, 32.0),
            ParamSpec::text(COLOR_SPACE, "srgb"),
        ]
    }

    /// Resolve the frame: the identity comes from the export options, the
    /// resolution from the referenced camera's own raster parameters, the
    /// tiling and color-space options from the output driver.
    pub fn resolve(
        source: &dyn SceneSource,
        driver: &ObjectPath,
        frame_name: &str,
        camera: &Camera,
        moment: Moment,
    ) -> GraftResult<Self> {
        let values = source.evaluate(driver, moment, &Self::specs())?;

        let mut params = AttributeSet::new();
        params.set_required(
            CAMERA,
            Value::Text(String::new()),
            Value::Text(camera.name.as_str().to_owned()),
        );
        let (res_x, res_y) = camera.resolution;
        params.set_required(
            RESOLUTION,
            Value::Tuple(Vec::new()),
            Value::Tuple(vec![res_x as f64, res_y as f64]),
        );
        params.set(TILE_SIZE, Value::Float(values.float(TILE_SIZE)?));
        params.set(COLOR_SPACE, Value::Text(values.text(COLOR_SPACE)?));
        params.validate_required(frame_name)?;

        Ok(Self {
            name: frame_name.to_owned(),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeScene;

    #[test]
    fn test_frame_takes_resolution_from_camera() {
        let scene = FakeScene::new()
            .with_param("/obj/cam1", "resx", Value::Float(1920.0))
            .with_param("/obj/cam1", "resy", Value::Float(1080.0))
            .with_param("/out/graft1", TILE_SIZE, Value::Float(64.0));
        let camera =
            Camera::resolve(&scene, &ObjectPath::new("/obj/cam1"), Moment::zero()).unwrap();
        let frame = Frame::resolve(
            &scene,
            &ObjectPath::new("/out/graft1"),
            "beauty",
            &camera,
            Moment::zero(),
        )
        .unwrap();

        assert_eq!(frame.name, "beauty");
        assert_eq!(
            frame.params.get("f", CAMERA).unwrap().as_text(),
            Some("obj__cam1")
        );
        assert_eq!(
            frame.params.get("f", RESOLUTION).unwrap().as_tuple().unwrap(),
            &[1920.0, 1080.0]
        );
        assert_eq!(frame.params.get("f", TILE_SIZE).unwrap().as_float(), Some(64.0));
        assert_eq!(
            frame.params.get("f", COLOR_SPACE).unwrap().as_text(),
            Some("srgb")
        );
    }
}
