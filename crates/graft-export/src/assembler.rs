use graft_core::host::{GeometryExporter, ObjectCategory, SceneSource};
use graft_core::{CanonicalName, GraftError, GraftResult, Moment, ObjectPath};
use graft_ir::{
    Assembly, AssemblyInstance, Camera, Configurations, Frame, Light, Output, Project, Scene,
};

use crate::resolver::DependencyResolver;

/// Context for one export run: the moment to sample the scene at, the
/// output driver queried for frame and sampling parameters, and the name of
/// the emitted frame.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub moment: Moment,
    pub driver: ObjectPath,
    pub frame_name: String,
}

impl ExportOptions {
    pub fn new(moment: Moment, driver: ObjectPath) -> Self {
        Self {
            moment,
            driver,
            frame_name: "beauty".to_owned(),
        }
    }

    /// Builder: name the emitted frame.
    pub fn with_frame_name(mut self, name: impl Into<String>) -> Self {
        self.frame_name = name.into();
        self
    }
}

/// Drives the top-level traversal of one export run: lock the scene, resolve
/// the camera, the lights, every geometry instance with its dependency
/// closure, then the output frame and render configurations. The assembler
/// owns all registries during resolution; the finished project is immutable
/// from the caller's point of view.
pub struct SceneAssembler<'a> {
    source: &'a mut dyn SceneSource,
    exporter: &'a mut dyn GeometryExporter,
    options: ExportOptions,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(
        source: &'a mut dyn SceneSource,
        exporter: &'a mut dyn GeometryExporter,
        options: ExportOptions,
    ) -> Self {
        Self {
            source,
            exporter,
            options,
        }
    }

    /// Build the complete project graph for one scene snapshot.
    pub fn assemble(mut self) -> GraftResult<Project> {
        let moment = self.options.moment;

        self.source.lock(moment).map_err(|e| {
            GraftError::UnresolvableScene(format!("failed to lock scene at {}: {}", moment, e))
        })?;

        let cameras = self.source.object_names(ObjectCategory::Camera);
        let camera_path = cameras.first().ok_or_else(|| {
            GraftError::UnresolvableScene("scene contains no camera".to_owned())
        })?;
        let camera = Camera::resolve(&*self.source, camera_path, moment)?;
        tracing::info!(camera = %camera.name, "resolved camera");

        let mut assembly = Assembly::new(CanonicalName::new("assembly"));

        for light_path in self.source.object_names(ObjectCategory::Light) {
            let name = CanonicalName::from_path(&light_path);
            if assembly.lights.contains(&name) {
                continue;
            }
            let (light, emission) = Light::resolve(&*self.source, &light_path, moment)?;
            assembly.colors.insert(emission.name.clone(), emission);
            assembly.lights.insert(name, light);
        }

        let instances = self.source.object_names(ObjectCategory::Instance);
        {
            let mut resolver =
                DependencyResolver::new(&*self.source, self.exporter, &mut assembly, moment);
            for instance_path in &instances {
                resolver.resolve_instance(instance_path)?;
            }
        }
        tracing::info!(
            lights = assembly.lights.len(),
            instances = assembly.object_instances.len(),
            materials = assembly.materials.len(),
            colors = assembly.colors.len(),
            "resolved scene resources"
        );

        let frame = Frame::resolve(
            &*self.source,
            &self.options.driver,
            &self.options.frame_name,
            &camera,
            moment,
        )?;
        let mut output = Output::new();
        output.add_frame(frame);

        let configurations = Configurations::resolve(&*self.source, &self.options.driver, moment)?;

        let assembly_instance = AssemblyInstance::new(assembly.name.clone());

        Ok(Project {
            scene: Scene {
                camera,
                assembly,
                assembly_instance,
            },
            output,
            configurations,
        })
    }
}
