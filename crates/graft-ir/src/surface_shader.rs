use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{
    AttributeSet, CanonicalName, GraftError, GraftResult, Moment, ObjectPath, ResourceRef, Value,
};

use crate::require_ref;

const MODEL: &str = "model";

const SAMPLING_METHOD: &str = "sampling_method";
const SAMPLES: &str = "samples";
const MAX_DISTANCE: &str = "max_distance";
const COLOR: &str = "color";
const MODE: &str = "mode";
const ALBEDO: &str = "albedo";
const SCALE: &str = "scale";
const AMBIENT_SSS: &str = "ambient_sss";
const VIEW_DEP_SSS: &str = "view_dep_sss";
const DIFFUSE: &str = "diffuse";
const POWER: &str = "power";
const DISTORTION: &str = "distortion";
const COLOR_MULTIPLIER: &str = "color_multiplier";
const ALPHA_MULTIPLIER: &str = "alpha_multiplier";
const SKY_COLOR: &str = "sky_color";
const BOUNDS: &str = "bounds";
const ABSORPTION: &str = "absorption";

/// The shading model of a surface shader and the colors it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceShaderModel {
    /// Ambient-occlusion shading.
    AmbientOcclusion,
    /// A constant color, unlit.
    Constant { color: ResourceRef },
    /// Diagnostic visualization (normals, UVs, ...).
    Diagnostic,
    /// Fast approximate subsurface scattering.
    FastSss { albedo: ResourceRef },
    /// Physically-based shading of the material's BSDF/EDF.
    Physical,
    /// Volumetric smoke shading.
    Smoke { sky_color: ResourceRef },
}

impl SurfaceShaderModel {
    pub fn tag(&self) -> &'static str {
        match self {
            SurfaceShaderModel::AmbientOcclusion => "ao_surface_shader",
            SurfaceShaderModel::Constant { .. } => "constant_surface_shader",
            SurfaceShaderModel::Diagnostic => "diagnostic_surface_shader",
            SurfaceShaderModel::FastSss { .. } => "fast_sss_surface_shader",
            SurfaceShaderModel::Physical => "physical_surface_shader",
            SurfaceShaderModel::Smoke { .. } => "smoke_surface_shader",
        }
    }

    /// The color resources this model references.
    pub fn color_refs(&self) -> Vec<&ResourceRef> {
        match self {
            SurfaceShaderModel::Constant { color } => vec![color],
            SurfaceShaderModel::FastSss { albedo } => vec![albedo],
            SurfaceShaderModel::Smoke { sky_color } => vec![sky_color],
            _ => Vec::new(),
        }
    }
}

/// A surface shader resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceShader {
    pub name: CanonicalName,
    pub model: SurfaceShaderModel,
    pub params: AttributeSet,
}

impl SurfaceShader {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(MODEL, "physical_surface_shader"),
            ParamSpec::text(SAMPLING_METHOD, "uniform"),
            ParamSpec::float(SAMPLES, 16.0),
            ParamSpec::float(MAX_DISTANCE, 1.0),
            ParamSpec::text(COLOR, ""),
            ParamSpec::text(MODE, "facing_ratio"),
            ParamSpec::text(ALBEDO, ""),
            ParamSpec::float(SCALE, 1.0),
            ParamSpec::float(AMBIENT_SSS, 0.0),
            ParamSpec::float(VIEW_DEP_SSS, 0.0),
            ParamSpec::float(DIFFUSE, 0.0),
            ParamSpec::float(POWER, 1.0),
            ParamSpec::float(DISTORTION, 0.0),
            ParamSpec::float(COLOR_MULTIPLIER, 1.0),
            ParamSpec::float(ALPHA_MULTIPLIER, 1.0),
            ParamSpec::text(SKY_COLOR, ""),
            ParamSpec::tuple(BOUNDS, &[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]),
            ParamSpec::float(ABSORPTION, 0.5),
        ]
    }

    /// Resolve a surface shader, dispatching on its model tag.
    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;
        let tag = values.text(MODEL)?;

        let mut params = AttributeSet::new();
        let model = match tag.as_str() {
            "ao_surface_shader" => {
                params.set(SAMPLING_METHOD, Value::Text(values.text(SAMPLING_METHOD)?));
                params.set(SAMPLES, Value::Float(values.float(SAMPLES)?));
                params.set(MAX_DISTANCE, Value::Float(values.float(MAX_DISTANCE)?));
                SurfaceShaderModel::AmbientOcclusion
            }
            "constant_surface_shader" => {
                let color = require_ref(&name, &values, COLOR)?;
                params.set(COLOR, Value::Text(color.name.as_str().to_owned()));
                SurfaceShaderModel::Constant { color }
            }
            "diagnostic_surface_shader" => {
                params.set(MODE, Value::Text(values.text(MODE)?));
                SurfaceShaderModel::Diagnostic
            }
            "fast_sss_surface_shader" => {
                let albedo = require_ref(&name, &values, ALBEDO)?;
                params.set(ALBEDO, Value::Text(albedo.name.as_str().to_owned()));
                params.set(SCALE, Value::Float(values.float(SCALE)?));
                params.set(AMBIENT_SSS, Value::Float(values.float(AMBIENT_SSS)?));
                params.set(VIEW_DEP_SSS, Value::Float(values.float(VIEW_DEP_SSS)?));
                params.set(DIFFUSE, Value::Float(values.float(DIFFUSE)?));
                params.set(POWER, Value::Float(values.float(POWER)?));
                params.set(DISTORTION, Value::Float(values.float(DISTORTION)?));
                SurfaceShaderModel::FastSss { albedo }
            }
            "physical_surface_shader" => {
                params.set(
                    COLOR_MULTIPLIER,
                    Value::Float(values.float(COLOR_MULTIPLIER)?),
                );
                params.set(
                    ALPHA_MULTIPLIER,
                    Value::Float(values.float(ALPHA_MULTIPLIER)?),
                );
                SurfaceShaderModel::Physical
            }
            "smoke_surface_shader" => {
                let sky_color = require_ref(&name, &values, SKY_COLOR)?;
                params.set(SKY_COLOR, Value::Text(sky_color.name.as_str().to_owned()));
                params.set(BOUNDS, Value::Tuple(values.tuple(BOUNDS)?));
                params.set(ABSORPTION, Value::Float(values.float(ABSORPTION)?));
                SurfaceShaderModel::Smoke { sky_color }
            }
            other => {
                return Err(GraftError::Unsupported(format!(
                    "surface shader model '{}' on '{}'",
                    other, name
                )))
            }
        };

        Ok(Self { name, model, params })
    }
}
