use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{AttributeSet, GraftResult, Moment, ObjectPath};

const FINAL_PREFIX: &str = "final_";
const INTERACTIVE_PREFIX: &str = "interactive_";

/// One named render-settings profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub params: AttributeSet,
}

impl Configuration {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            params: AttributeSet::new(),
        }
    }
}

/// The two fixed render-settings profiles, partitioned from the driver's
/// flat, prefix-keyed parameter bag. The prefix is stripped when a parameter
/// is filed into its profile, so emission needs no further name surgery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configurations {
    pub final_quality: Configuration,
    pub interactive_quality: Configuration,
}

impl Configurations {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::float("final_min_samples", 1.0),
            ParamSpec::float("final_max_samples", 16.0),
            ParamSpec::float("final_sample_filter_size", 4.0),
            ParamSpec::text("final_sample_filter_type", "mitchell"),
            ParamSpec::float("interactive_min_samples", 1.0),
            ParamSpec::float("interactive_max_samples", 1.0),
            ParamSpec::float("interactive_sample_filter_size", 1.0),
            ParamSpec::text("interactive_sample_filter_type", "box"),
        ]
    }

    /// Resolve the render settings from the output driver.
    pub fn resolve(
        source: &dyn SceneSource,
        driver: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let specs = Self::specs();
        let values = source.evaluate(driver, moment, &specs)?;

        let mut final_quality = Configuration::new("final");
        let mut interactive_quality = Configuration::new("interactive");

        // Partition by walking the spec list, not the evaluated map, so the
        // parameter order inside each profile is stable.
        for spec in &specs {
            let value = values
                .get(spec.name)
                .cloned()
                .unwrap_or_else(|| spec.default.clone());
            if let Some(stripped) = spec.name.strip_prefix(FINAL_PREFIX) {
                final_quality.params.set(stripped, value);
            } else if let Some(stripped) = spec.name.strip_prefix(INTERACTIVE_PREFIX) {
                interactive_quality.params.set(stripped, value);
            }
        }

        Ok(Self {
            final_quality,
            interactive_quality,
        })
    }
}
