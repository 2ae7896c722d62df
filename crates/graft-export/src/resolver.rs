use graft_core::host::{GeometryExporter, SceneSource};
use graft_core::{CanonicalName, GraftResult, Moment, ObjectPath, ResourceRef};
use graft_ir::{Assembly, Bsdf, Color, Edf, Material, Object, ObjectInstance, SurfaceShader};

/// Resolves a geometry instance and the transitive closure of every shading
/// resource it references, registering each resource the first time it is
/// seen. Every step is guarded by a resolve-only-if-absent check against the
/// corresponding registry, so shared resources resolve exactly once no
/// matter how many instances reach them and recursion cannot re-enter an
/// already-resolved name.
pub struct DependencyResolver<'a> {
    source: &'a dyn SceneSource,
    exporter: &'a mut dyn GeometryExporter,
    assembly: &'a mut Assembly,
    moment: Moment,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        source: &'a dyn SceneSource,
        exporter: &'a mut dyn GeometryExporter,
        assembly: &'a mut Assembly,
        moment: Moment,
    ) -> Self {
        Self {
            source,
            exporter,
            assembly,
            moment,
        }
    }

    /// Resolve one geometry instance: its shape, its material, and the
    /// material's whole dependency closure.
    pub fn resolve_instance(&mut self, path: &ObjectPath) -> GraftResult<()> {
        let name = CanonicalName::from_path(path);
        if self.assembly.object_instances.contains(&name) {
            return Ok(());
        }
        tracing::debug!(instance = %name, "resolving geometry instance");

        let mut instance = ObjectInstance::resolve(self.source, path, self.moment)?;

        // The geometry exporter runs at most once per shape.
        let shape = instance.shape.clone();
        let exporter = &mut *self.exporter;
        let moment = self.moment;
        self.assembly
            .objects
            .get_or_insert_with(&shape.name, || Object::resolve(exporter, &shape.path, moment))?;

        if let Some(material_ref) = instance.material_path.clone() {
            self.resolve_material(&material_ref)?;
            instance.assign_material(material_ref.name);
        }

        self.assembly.object_instances.insert(name, instance);
        Ok(())
    }

    /// Resolve a material and, transitively, every BSDF, EDF, surface shader
    /// and color it references.
    fn resolve_material(&mut self, material: &ResourceRef) -> GraftResult<()> {
        if self.assembly.materials.contains(&material.name) {
            return Ok(());
        }
        tracing::debug!(material = %material.name, "resolving material");

        let resolved = Material::resolve(self.source, &material.path, self.moment)?;
        let bsdf = resolved.bsdf.clone();
        let edf = resolved.edf.clone();
        let surface_shader = resolved.surface_shader.clone();
        self.assembly.materials.insert(material.name.clone(), resolved);

        if let Some(bsdf) = bsdf {
            self.resolve_bsdf(&bsdf)?;
        }
        if let Some(edf) = edf {
            self.resolve_edf(&edf)?;
        }
        self.resolve_surface_shader(&surface_shader)
    }

    /// Resolve a BSDF, every color its model names, and (for the mixture
    /// model) both nested BSDFs. Terminates because colors are leaves and
    /// the registry blocks re-entry into resolved names.
    fn resolve_bsdf(&mut self, bsdf: &ResourceRef) -> GraftResult<()> {
        if self.assembly.bsdfs.contains(&bsdf.name) {
            return Ok(());
        }

        let resolved = Bsdf::resolve(self.source, &bsdf.path, self.moment)?;
        let model = resolved.model.clone();
        self.assembly.bsdfs.insert(bsdf.name.clone(), resolved);

        for color in model.color_refs() {
            self.resolve_color(color)?;
        }
        for nested in model.nested_bsdfs() {
            self.resolve_bsdf(nested)?;
        }
        Ok(())
    }

    fn resolve_edf(&mut self, edf: &ResourceRef) -> GraftResult<()> {
        if self.assembly.edfs.contains(&edf.name) {
            return Ok(());
        }

        let resolved = Edf::resolve(self.source, &edf.path, self.moment)?;
        let exitance = resolved.exitance.clone();
        self.assembly.edfs.insert(edf.name.clone(), resolved);

        self.resolve_color(&exitance)
    }

    fn resolve_surface_shader(&mut self, shader: &ResourceRef) -> GraftResult<()> {
        if self.assembly.surface_shaders.contains(&shader.name) {
            return Ok(());
        }

        let resolved = SurfaceShader::resolve(self.source, &shader.path, self.moment)?;
        let model = resolved.model.clone();
        self.assembly
            .surface_shaders
            .insert(shader.name.clone(), resolved);

        for color in model.color_refs() {
            self.resolve_color(color)?;
        }
        Ok(())
    }

    fn resolve_color(&mut self, color: &ResourceRef) -> GraftResult<()> {
        let source = self.source;
        let moment = self.moment;
        self.assembly
            .colors
            .get_or_insert_with(&color.name, || Color::resolve(source, &color.path, moment))?;
        Ok(())
    }
}
