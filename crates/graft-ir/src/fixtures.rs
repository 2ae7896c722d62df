//! In-memory scene source used by the node resolution tests.

use std::collections::HashMap;

use graft_core::host::{ObjectCategory, ParamMap, ParamSpec, SceneSource, ShaderStyle};
use graft_core::{GraftResult, Matrix4, Moment, ObjectPath, Value};

#[derive(Default)]
pub struct FakeScene {
    params: HashMap<String, HashMap<String, Value>>,
    transforms: HashMap<String, Matrix4>,
    styles: HashMap<String, ShaderStyle>,
}

impl FakeScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, path: &str, name: &str, value: Value) -> Self {
        self.params
            .entry(path.to_owned())
            .or_default()
            .insert(name.to_owned(), value);
        self
    }

    pub fn with_transform(mut self, path: &str, transform: Matrix4) -> Self {
        self.transforms.insert(path.to_owned(), transform);
        self
    }

    pub fn with_style(mut self, path: &str, style: ShaderStyle) -> Self {
        self.styles.insert(path.to_owned(), style);
        self
    }
}

impl SceneSource for FakeScene {
    fn lock(&mut self, _moment: Moment) -> GraftResult<()> {
        Ok(())
    }

    fn object_names(&self, _category: ObjectCategory) -> Vec<ObjectPath> {
        Vec::new()
    }

    fn evaluate(
        &self,
        path: &ObjectPath,
        _moment: Moment,
        requested: &[ParamSpec],
    ) -> GraftResult<ParamMap> {
        let object = self.params.get(path.as_str());
        let mut map = ParamMap::new();
        for spec in requested {
            let value = object
                .and_then(|params| params.get(spec.name))
                .cloned()
                .unwrap_or_else(|| spec.default.clone());
            map.insert(spec.name, value);
        }
        Ok(map)
    }

    fn world_transform(&self, path: &ObjectPath, _moment: Moment) -> GraftResult<Matrix4> {
        Ok(self
            .transforms
            .get(path.as_str())
            .copied()
            .unwrap_or_default())
    }

    fn shader_style(&self, path: &ObjectPath) -> Option<ShaderStyle> {
        self.styles.get(path.as_str()).copied()
    }
}
