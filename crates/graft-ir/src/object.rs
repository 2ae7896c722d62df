use serde::{Deserialize, Serialize};

use graft_core::host::{GeometryExporter, ParamSpec, SceneSource};
use graft_core::{
    AttributeSet, CanonicalName, GraftError, GraftResult, Matrix4, Moment, ObjectPath,
    ResourceRef, Value,
};

// Host parameters queried for a geometry instance.
const SOP_PATH: &str = "soppath";
const MATERIAL_PATH: &str = "shop_materialpath";

// Emitted parameters.
const FILENAME: &str = "filename";

/// A mesh shape written to a side file by the geometry exporter. Only the
/// returned reference path is recorded; mesh data is never inlined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    pub name: CanonicalName,
    pub params: AttributeSet,
}

impl Object {
    pub const MODEL: &'static str = "mesh_object";

    pub fn resolve(
        exporter: &mut dyn GeometryExporter,
        shape: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(shape);
        let filename = exporter.export(shape, moment)?;

        let mut params = AttributeSet::new();
        params.set_required(FILENAME, Value::Text(String::new()), Value::Text(filename));
        params.validate_required(name.as_str())?;

        Ok(Self { name, params })
    }
}

/// Placement of a shape in the scene together with its shading assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInstance {
    pub name: CanonicalName,
    /// The shape this instance places.
    pub shape: ResourceRef,
    /// World transform, already transposed into document convention.
    pub transform: Matrix4,
    /// The instance's shading assignment as named by the host, if any.
    pub material_path: Option<ResourceRef>,
    /// Canonical material name, attached by the resolver once the material
    /// registry holds it. Emitted on both front and back slots.
    pub material: Option<CanonicalName>,
    pub params: AttributeSet,
}

impl ObjectInstance {
    fn specs() -> Vec<ParamSpec> {
        vec![ParamSpec::text(SOP_PATH, ""), ParamSpec::text(MATERIAL_PATH, "")]
    }

    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;

        let shape = ResourceRef::parse(&values.text(SOP_PATH)?).ok_or_else(|| {
            GraftError::missing_reference(name.as_str(), "instance names no shape")
        })?;
        let material_path = ResourceRef::parse(&values.text(MATERIAL_PATH)?);
        let transform = source.world_transform(path, moment)?.transposed();

        Ok(Self {
            name,
            shape,
            transform,
            material_path,
            material: None,
            params: AttributeSet::new(),
        })
    }

    pub fn assign_material(&mut self, material: CanonicalName) {
        self.material = Some(material);
    }
}
