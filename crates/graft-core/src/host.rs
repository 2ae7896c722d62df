//! Traits for the external collaborators of an export run: the authoring
//! host's scene source, the geometry side-file exporter, and the sink that
//! receives the finished document.

use std::collections::HashMap;

use crate::error::{GraftError, GraftResult};
use crate::math::Matrix4;
use crate::name::ObjectPath;
use crate::time::Moment;
use crate::value::Value;

/// Object list categories exposed by the scene source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectCategory {
    Camera,
    Light,
    Instance,
}

/// The shading style the host reports for a shading-network node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStyle {
    Bsdf,
    Edf,
    SurfaceShader,
    Color,
}

impl std::fmt::Display for ShaderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStyle::Bsdf => write!(f, "bsdf"),
            ShaderStyle::Edf => write!(f, "edf"),
            ShaderStyle::SurfaceShader => write!(f, "surface shader"),
            ShaderStyle::Color => write!(f, "color"),
        }
    }
}

/// One requested host parameter: its name plus the default the source falls
/// back to when the host object carries no such parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: Value,
}

impl ParamSpec {
    pub fn float(name: &'static str, default: f64) -> Self {
        Self {
            name,
            default: Value::Float(default),
        }
    }

    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            default: Value::Bool(default),
        }
    }

    pub fn text(name: &'static str, default: &str) -> Self {
        Self {
            name,
            default: Value::Text(default.to_owned()),
        }
    }

    pub fn tuple(name: &'static str, default: &[f64]) -> Self {
        Self {
            name,
            default: Value::Tuple(default.to_vec()),
        }
    }
}

/// Evaluated parameter values keyed by parameter name.
///
/// The scene source must answer every requested [`ParamSpec`], substituting
/// the spec's default where the host has no such parameter; the typed getters
/// treat a missing or mistyped entry as a broken source.
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    values: HashMap<String, Value>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn float(&self, name: &str) -> GraftResult<f64> {
        self.get(name)
            .and_then(Value::as_float)
            .ok_or_else(|| bad_param(name, "float"))
    }

    pub fn boolean(&self, name: &str) -> GraftResult<bool> {
        self.get(name)
            .and_then(Value::as_bool)
            .ok_or_else(|| bad_param(name, "bool"))
    }

    pub fn text(&self, name: &str) -> GraftResult<String> {
        self.get(name)
            .and_then(Value::as_text)
            .map(str::to_owned)
            .ok_or_else(|| bad_param(name, "text"))
    }

    pub fn tuple(&self, name: &str) -> GraftResult<Vec<f64>> {
        self.get(name)
            .and_then(Value::as_tuple)
            .map(<[f64]>::to_vec)
            .ok_or_else(|| bad_param(name, "tuple"))
    }
}

fn bad_param(name: &str, expected: &str) -> GraftError {
    GraftError::Source(format!(
        "evaluated parameter '{}' is missing or not a {}",
        name, expected
    ))
}

/// The authoring host: named objects, typed parameter evaluation at a given
/// moment, and world-space transforms.
pub trait SceneSource {
    /// Fence further scene edits for the duration of the export run.
    fn lock(&mut self, moment: Moment) -> GraftResult<()>;

    /// Enumerate the objects of one category, in the host's stable order.
    fn object_names(&self, category: ObjectCategory) -> Vec<ObjectPath>;

    /// Evaluate the requested parameters of one object at the given moment.
    fn evaluate(
        &self,
        path: &ObjectPath,
        moment: Moment,
        requested: &[ParamSpec],
    ) -> GraftResult<ParamMap>;

    /// Sample the object's world-space transform, row-major.
    fn world_transform(&self, path: &ObjectPath, moment: Moment) -> GraftResult<Matrix4>;

    /// The shading style of a shading-network node, if the path names one.
    fn shader_style(&self, path: &ObjectPath) -> Option<ShaderStyle>;
}

/// Writes mesh data for one shape to a side file and returns the reference
/// path recorded in the document. Mesh data is never inlined.
pub trait GeometryExporter {
    fn export(&mut self, path: &ObjectPath, moment: Moment) -> GraftResult<String>;
}

/// Receives the finished document for writing to storage or a stream.
pub trait DocumentSink {
    fn write(&mut self, document: &str) -> GraftResult<()>;
}
