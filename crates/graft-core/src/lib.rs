//! # graft-core
//!
//! Core types and primitives for the graft scene exporter.
//! This crate contains foundational types shared across all graft crates:
//! parameter values, attribute stores, identities, transforms, the export
//! moment, the host-facing traits, and error types.

pub mod error;
pub mod host;
pub mod math;
pub mod name;
pub mod time;
pub mod value;

pub use error::{GraftError, GraftResult};
pub use host::{
    DocumentSink, GeometryExporter, ObjectCategory, ParamMap, ParamSpec, SceneSource, ShaderStyle,
};
pub use math::Matrix4;
pub use name::{CanonicalName, ObjectPath, ResourceRef};
pub use time::Moment;
pub use value::{Attribute, AttributeSet, Value};
