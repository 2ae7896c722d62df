use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::assembly::{Assembly, AssemblyInstance};
use crate::camera::Camera;
use crate::frame::Frame;
use crate::settings::Configurations;

/// The scene block of a project: the camera, the assembly holding every
/// resolved resource, and the assembly's placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub camera: Camera,
    pub assembly: Assembly,
    pub assembly_instance: AssemblyInstance,
}

/// The project's output block: frame name → frame, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Output {
    pub frames: IndexMap<String, Frame>,
}

impl Output {
    pub fn new() -> Self {
        Self {
            frames: IndexMap::new(),
        }
    }

    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.insert(frame.name.clone(), frame);
    }
}

/// Top-level project: the root of the resolved resource graph. Built once
/// per export run, immutable once serialization begins, and discarded after
/// the document is emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub scene: Scene,
    pub output: Output,
    pub configurations: Configurations,
}
