//! # graft-ir
//!
//! The graft Intermediate Representation: the typed resource graph built
//! from one host scene snapshot. Cameras, lights, materials, shading
//! resources, geometry, output frames, and render configurations, each
//! resolved exactly once and keyed by canonical name.

pub mod assembly;
pub mod bsdf;
pub mod camera;
pub mod color;
pub mod edf;
pub mod frame;
pub mod light;
pub mod material;
pub mod object;
pub mod project;
pub mod registry;
pub mod settings;
pub mod surface_shader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use assembly::{Assembly, AssemblyInstance};
pub use bsdf::{Bsdf, BsdfModel};
pub use camera::Camera;
pub use color::Color;
pub use edf::Edf;
pub use frame::Frame;
pub use light::{Light, LightModel};
pub use material::Material;
pub use object::{Object, ObjectInstance};
pub use project::{Output, Project, Scene};
pub use registry::Registry;
pub use settings::{Configuration, Configurations};
pub use surface_shader::{SurfaceShader, SurfaceShaderModel};

use graft_core::host::ParamMap;
use graft_core::{CanonicalName, GraftError, GraftResult, ResourceRef};

/// Read an evaluated parameter that must name another resource.
pub(crate) fn require_ref(
    node: &CanonicalName,
    values: &ParamMap,
    param: &str,
) -> GraftResult<ResourceRef> {
    ResourceRef::parse(&values.text(param)?).ok_or_else(|| {
        GraftError::missing_reference(
            node.as_str(),
            format!("parameter '{}' names no resource", param),
        )
    })
}
