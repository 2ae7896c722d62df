use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource, ShaderStyle};
use graft_core::{
    AttributeSet, CanonicalName, GraftError, GraftResult, Moment, ObjectPath, ResourceRef, Value,
};

const BSDF: &str = "bsdf";
const EDF: &str = "edf";
const SURFACE_SHADER: &str = "surface_shader";

/// A material: optional BSDF and EDF references plus the mandatory surface
/// shader that turns shading results into pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: CanonicalName,
    pub bsdf: Option<ResourceRef>,
    pub edf: Option<ResourceRef>,
    pub surface_shader: ResourceRef,
    pub params: AttributeSet,
}

impl Material {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(BSDF, ""),
            ParamSpec::text(EDF, ""),
            ParamSpec::text(SURFACE_SHADER, ""),
        ]
    }

    /// Resolve a material. A missing surface-shader assignment, or one whose
    /// host node is not a surface shader, is a fatal configuration error
    /// naming this material.
    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;

        let surface_shader = ResourceRef::parse(&values.text(SURFACE_SHADER)?).ok_or_else(|| {
            GraftError::missing_reference(name.as_str(), "no surface shader assigned")
        })?;
        match source.shader_style(&surface_shader.path) {
            Some(ShaderStyle::SurfaceShader) => {}
            Some(other) => {
                return Err(GraftError::missing_reference(
                    name.as_str(),
                    format!(
                        "'{}' is a {} node, expected a surface shader",
                        surface_shader.path, other
                    ),
                ))
            }
            None => {
                return Err(GraftError::missing_reference(
                    name.as_str(),
                    format!("surface shader '{}' does not exist", surface_shader.path),
                ))
            }
        }

        let bsdf = ResourceRef::parse(&values.text(BSDF)?);
        let edf = ResourceRef::parse(&values.text(EDF)?);

        let mut params = AttributeSet::new();
        if let Some(r) = &bsdf {
            params.set(BSDF, Value::Text(r.name.as_str().to_owned()));
        }
        if let Some(r) = &edf {
            params.set(EDF, Value::Text(r.name.as_str().to_owned()));
        }
        params.set_required(
            SURFACE_SHADER,
            Value::Text(String::new()),
            Value::Text(surface_shader.name.as_str().to_owned()),
        );
        params.validate_required(name.as_str())?;

        Ok(Self {
            name,
            bsdf,
            edf,
            surface_shader,
            params,
        })
    }
}
