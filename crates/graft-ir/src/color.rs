use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{AttributeSet, CanonicalName, GraftResult, Moment, ObjectPath, Value};

const COLOR_SPACE: &str = "color_space";
const COLOR: &str = "color";
const VALUES: &str = "values";
const WAVELENGTH_RANGE: &str = "wavelength_range";
const ALPHA: &str = "alpha";
const MULTIPLIER: &str = "multiplier";

const SPECTRAL: &str = "spectral";
const LINEAR_RGB: &str = "linear_rgb";

/// A color resource: a 3-tuple of linear values in some color space, or a
/// spectral distribution over a wavelength range. Colors are leaves of the
/// resource graph and reference nothing further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub name: CanonicalName,
    pub params: AttributeSet,
}

impl Color {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(COLOR_SPACE, LINEAR_RGB),
            ParamSpec::tuple(COLOR, &[1.0, 1.0, 1.0]),
            ParamSpec::tuple(VALUES, &[1.0]),
            ParamSpec::tuple(WAVELENGTH_RANGE, &[400.0, 700.0]),
            ParamSpec::float(ALPHA, 1.0),
            ParamSpec::float(MULTIPLIER, 1.0),
        ]
    }

    /// Resolve a color from the host. Alpha and the intensity multiplier are
    /// emitted only when they depart from 1.
    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;
        let space = values.text(COLOR_SPACE)?;

        let mut params = AttributeSet::new();
        params.set(COLOR_SPACE, Value::Text(space.clone()));
        if space == SPECTRAL {
            params.set(VALUES, Value::Tuple(values.tuple(VALUES)?));
            params.set(
                WAVELENGTH_RANGE,
                Value::Tuple(values.tuple(WAVELENGTH_RANGE)?),
            );
        } else {
            params.set(COLOR, Value::Tuple(values.tuple(COLOR)?));
        }

        let alpha = values.float(ALPHA)?;
        if alpha != 1.0 {
            params.set(ALPHA, Value::Float(alpha));
        }
        let multiplier = values.float(MULTIPLIER)?;
        if multiplier != 1.0 {
            params.set(MULTIPLIER, Value::Float(multiplier));
        }

        Ok(Self { name, params })
    }

    /// Build a synthesized color carrying literal linear values. Light
    /// emission colors are made this way rather than read from the host.
    pub fn from_values(name: CanonicalName, linear: &[f64], multiplier: f64) -> Self {
        let mut params = AttributeSet::new();
        params.set(COLOR_SPACE, Value::Text(LINEAR_RGB.to_owned()));
        params.set(COLOR, Value::Tuple(linear.to_vec()));
        if multiplier != 1.0 {
            params.set(MULTIPLIER, Value::Float(multiplier));
        }
        Self { name, params }
    }
}
