use serde::{Deserialize, Serialize};

use graft_core::{CanonicalName, Matrix4};

use crate::bsdf::Bsdf;
use crate::color::Color;
use crate::edf::Edf;
use crate::light::Light;
use crate::material::Material;
use crate::object::{Object, ObjectInstance};
use crate::registry::Registry;
use crate::surface_shader::SurfaceShader;

/// The assembly: every resolved resource registry of the scene. Each
/// registry deduplicates by canonical name and iterates in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub name: CanonicalName,
    pub lights: Registry<Light>,
    pub materials: Registry<Material>,
    pub bsdfs: Registry<Bsdf>,
    pub edfs: Registry<Edf>,
    pub colors: Registry<Color>,
    pub surface_shaders: Registry<SurfaceShader>,
    pub objects: Registry<Object>,
    pub object_instances: Registry<ObjectInstance>,
}

impl Assembly {
    pub fn new(name: CanonicalName) -> Self {
        Self {
            name,
            lights: Registry::new(),
            materials: Registry::new(),
            bsdfs: Registry::new(),
            edfs: Registry::new(),
            colors: Registry::new(),
            surface_shaders: Registry::new(),
            objects: Registry::new(),
            object_instances: Registry::new(),
        }
    }
}

/// Placement of the assembly in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyInstance {
    pub name: CanonicalName,
    pub assembly: CanonicalName,
    pub transform: Matrix4,
}

impl AssemblyInstance {
    /// An untransformed placement of the given assembly.
    pub fn new(assembly: CanonicalName) -> Self {
        Self {
            name: assembly.child("inst"),
            assembly,
            transform: Matrix4::identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_instance_naming() {
        let instance = AssemblyInstance::new(CanonicalName::new("assembly"));
        assert_eq!(instance.name.as_str(), "assembly_inst");
        assert_eq!(instance.assembly.as_str(), "assembly");
        assert_eq!(instance.transform, Matrix4::identity());
    }
}
