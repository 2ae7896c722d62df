use serde::{Deserialize, Serialize};

use graft_core::host::{ParamSpec, SceneSource};
use graft_core::{
    AttributeSet, CanonicalName, GraftError, GraftResult, Moment, ObjectPath, ResourceRef, Value,
};

use crate::require_ref;

// Host parameter selecting the reflectance model; the remaining parameters
// are read per model arm.
const MODEL: &str = "model";

const DIFFUSE_REFLECTANCE: &str = "diffuse_reflectance";
const GLOSSY_REFLECTANCE: &str = "glossy_reflectance";
const SHININESS_U: &str = "shininess_u";
const SHININESS_V: &str = "shininess_v";
const MATTE_REFLECTANCE: &str = "matte_reflectance";
const SPECULAR_REFLECTANCE: &str = "specular_reflectance";
const ROUGHNESS: &str = "roughness";
const BSDF0: &str = "bsdf0";
const BSDF1: &str = "bsdf1";
const WEIGHT0: &str = "weight0";
const WEIGHT1: &str = "weight1";
const REFLECTANCE: &str = "reflectance";
const TRANSMITTANCE: &str = "transmittance";
const FROM_IOR: &str = "from_ior";
const TO_IOR: &str = "to_ior";

/// The reflectance model of a BSDF and the resources it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BsdfModel {
    /// Anisotropic diffuse-glossy reflectance.
    Ashikhmin {
        diffuse_reflectance: ResourceRef,
        glossy_reflectance: ResourceRef,
    },
    /// Matte/specular mix.
    Kelemen {
        matte_reflectance: ResourceRef,
        specular_reflectance: ResourceRef,
    },
    /// Weighted mixture of two other BSDFs.
    Mix {
        bsdf0: ResourceRef,
        bsdf1: ResourceRef,
    },
    /// Pure diffuse reflectance.
    Lambertian { reflectance: ResourceRef },
    /// Perfect specular reflection.
    SpecularReflection { reflectance: ResourceRef },
    /// Perfect specular transmission.
    SpecularTransmission {
        reflectance: ResourceRef,
        transmittance: ResourceRef,
    },
}

impl BsdfModel {
    pub fn tag(&self) -> &'static str {
        match self {
            BsdfModel::Ashikhmin { .. } => "ashikhmin_brdf",
            BsdfModel::Kelemen { .. } => "kelemen_brdf",
            BsdfModel::Mix { .. } => "bsdf_mix",
            BsdfModel::Lambertian { .. } => "lambertian_brdf",
            BsdfModel::SpecularReflection { .. } => "specular_brdf",
            BsdfModel::SpecularTransmission { .. } => "specular_btdf",
        }
    }

    /// The color resources this model references.
    pub fn color_refs(&self) -> Vec<&ResourceRef> {
        match self {
            BsdfModel::Ashikhmin {
                diffuse_reflectance,
                glossy_reflectance,
            } => vec![diffuse_reflectance, glossy_reflectance],
            BsdfModel::Kelemen {
                matte_reflectance,
                specular_reflectance,
            } => vec![matte_reflectance, specular_reflectance],
            BsdfModel::Mix { .. } => Vec::new(),
            BsdfModel::Lambertian { reflectance }
            | BsdfModel::SpecularReflection { reflectance } => vec![reflectance],
            BsdfModel::SpecularTransmission {
                reflectance,
                transmittance,
            } => vec![reflectance, transmittance],
        }
    }

    /// The nested BSDFs this model references (mixture model only).
    pub fn nested_bsdfs(&self) -> Vec<&ResourceRef> {
        match self {
            BsdfModel::Mix { bsdf0, bsdf1 } => vec![bsdf0, bsdf1],
            _ => Vec::new(),
        }
    }
}

/// A BSDF resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bsdf {
    pub name: CanonicalName,
    pub model: BsdfModel,
    pub params: AttributeSet,
}

impl Bsdf {
    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(MODEL, "lambertian_brdf"),
            ParamSpec::text(DIFFUSE_REFLECTANCE, ""),
            ParamSpec::text(GLOSSY_REFLECTANCE, ""),
            ParamSpec::float(SHININESS_U, 100.0),
            ParamSpec::float(SHININESS_V, 100.0),
            ParamSpec::text(MATTE_REFLECTANCE, ""),
            ParamSpec::text(SPECULAR_REFLECTANCE, ""),
            ParamSpec::float(ROUGHNESS, 0.1),
            ParamSpec::text(BSDF0, ""),
            ParamSpec::text(BSDF1, ""),
            ParamSpec::float(WEIGHT0, 0.5),
            ParamSpec::float(WEIGHT1, 0.5),
            ParamSpec::text(REFLECTANCE, ""),
            ParamSpec::text(TRANSMITTANCE, ""),
            ParamSpec::float(FROM_IOR, 1.0),
            ParamSpec::float(TO_IOR, 1.5),
        ]
    }

    /// Resolve a BSDF, dispatching on its model tag. Each arm reads a
    /// disjoint parameter set.
    pub fn resolve(
        source: &dyn SceneSource,
        path: &ObjectPath,
        moment: Moment,
    ) -> GraftResult<Self> {
        let name = CanonicalName::from_path(path);
        let values = source.evaluate(path, moment, &Self::specs())?;
        let tag = values.text(MODEL)?;

        let mut params = AttributeSet::new();
        let model = match tag.as_str() {
            "ashikhmin_brdf" => {
                let diffuse = require_ref(&name, &values, DIFFUSE_REFLECTANCE)?;
                let glossy = require_ref(&name, &values, GLOSSY_REFLECTANCE)?;
                params.set(
                    DIFFUSE_REFLECTANCE,
                    Value::Text(diffuse.name.as_str().to_owned()),
                );
                params.set(
                    GLOSSY_REFLECTANCE,
                    Value::Text(glossy.name.as_str().to_owned()),
                );
                params.set(SHININESS_U, Value::Float(values.float(SHININESS_U)?));
                params.set(SHININESS_V, Value::Float(values.float(SHININESS_V)?));
                BsdfModel::Ashikhmin {
                    diffuse_reflectance: diffuse,
                    glossy_reflectance: glossy,
                }
            }
            "kelemen_brdf" => {
                let matte = require_ref(&name, &values, MATTE_REFLECTANCE)?;
                let specular = require_ref(&name, &values, SPECULAR_REFLECTANCE)?;
                params.set(
                    MATTE_REFLECTANCE,
                    Value::Text(matte.name.as_str().to_owned()),
                );
                params.set(
                    SPECULAR_REFLECTANCE,
                    Value::Text(specular.name.as_str().to_owned()),
                );
                params.set(ROUGHNESS, Value::Float(values.float(ROUGHNESS)?));
                BsdfModel::Kelemen {
                    matte_reflectance: matte,
                    specular_reflectance: specular,
                }
            }
            "bsdf_mix" => {
                let bsdf0 = require_ref(&name, &values, BSDF0)?;
                let bsdf1 = require_ref(&name, &values, BSDF1)?;
                params.set(BSDF0, Value::Text(bsdf0.name.as_str().to_owned()));
                params.set(BSDF1, Value::Text(bsdf1.name.as_str().to_owned()));
                params.set(WEIGHT0, Value::Float(values.float(WEIGHT0)?));
                params.set(WEIGHT1, Value::Float(values.float(WEIGHT1)?));
                BsdfModel::Mix { bsdf0, bsdf1 }
            }
            "lambertian_brdf" => {
                let reflectance = require_ref(&name, &values, REFLECTANCE)?;
                params.set(REFLECTANCE, Value::Text(reflectance.name.as_str().to_owned()));
                BsdfModel::Lambertian { reflectance }
            }
            "specular_brdf" => {
                let reflectance = require_ref(&name, &values, REFLECTANCE)?;
                params.set(REFLECTANCE, Value::Text(reflectance.name.as_str().to_owned()));
                BsdfModel::SpecularReflection { reflectance }
            }
            "specular_btdf" => {
                let reflectance = require_ref(&name, &values, REFLECTANCE)?;
                let transmittance = require_ref(&name, &values, TRANSMITTANCE)?;
                params.set(REFLECTANCE, Value::Text(reflectance.name.as_str().to_owned()));
                params.set(
                    TRANSMITTANCE,
                    Value::Text(transmittance.name.as_str().to_owned()),
                );
                params.set(FROM_IOR, Value::Float(values.float(FROM_IOR)?));
                params.set(TO_IOR, Value::Float(values.float(TO_IOR)?));
                BsdfModel::SpecularTransmission {
                    reflectance,
                    transmittance,
                }
            }
            other => {
                return Err(GraftError::Unsupported(format!(
                    "bsdf model '{}' on '{}'",
                    other, name
                )))
            }
        };

        Ok(Self { name, model, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeScene;

    #[test]
    fn test_lambertian_reads_reflectance() {
        let scene = FakeScene::new()
            .with_param("/shop/brdf", MODEL, Value::Text("lambertian_brdf".into()))
            .with_param("/shop/brdf", REFLECTANCE, Value::Text("/shop/red".into()));
        let bsdf = Bsdf::resolve(&scene, &ObjectPath::new("/shop/brdf"), Moment::zero()).unwrap();

        assert_eq!(bsdf.model.tag(), "lambertian_brdf");
        let colors: Vec<&str> = bsdf.model.color_refs().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(colors, vec!["shop__red"]);
        assert!(bsdf.model.nested_bsdfs().is_empty());
    }

    #[test]
    fn test_mix_names_two_nested_bsdfs_and_no_colors() {
        let scene = FakeScene::new()
            .with_param("/shop/mix", MODEL, Value::Text("bsdf_mix".into()))
            .with_param("/shop/mix", BSDF0, Value::Text("/shop/a".into()))
            .with_param("/shop/mix", BSDF1, Value::Text("/shop/b".into()))
            .with_param("/shop/mix", WEIGHT0, Value::Float(0.7))
            .with_param("/shop/mix", WEIGHT1, Value::Float(0.3));
        let bsdf = Bsdf::resolve(&scene, &ObjectPath::new("/shop/mix"), Moment::zero()).unwrap();

        let nested: Vec<&str> = bsdf.model.nested_bsdfs().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(nested, vec!["shop__a", "shop__b"]);
        assert!(bsdf.model.color_refs().is_empty());
        assert_eq!(bsdf.params.get("b", WEIGHT0).unwrap().as_float(), Some(0.7));
    }

    #[test]
    fn test_ashikhmin_reads_both_reflectances() {
        let scene = FakeScene::new()
            .with_param("/shop/brdf", MODEL, Value::Text("ashikhmin_brdf".into()))
            .with_param("/shop/brdf", DIFFUSE_REFLECTANCE, Value::Text("/shop/d".into()))
            .with_param("/shop/brdf", GLOSSY_REFLECTANCE, Value::Text("/shop/g".into()));
        let bsdf = Bsdf::resolve(&scene, &ObjectPath::new("/shop/brdf"), Moment::zero()).unwrap();
        assert_eq!(bsdf.model.color_refs().len(), 2);
        assert!(bsdf.params.has(SHININESS_U));
    }

    #[test]
    fn test_missing_color_reference_is_fatal() {
        let scene = FakeScene::new()
            .with_param("/shop/brdf", MODEL, Value::Text("lambertian_brdf".into()));
        let err =
            Bsdf::resolve(&scene, &ObjectPath::new("/shop/brdf"), Moment::zero()).unwrap_err();
        assert!(matches!(err, GraftError::MissingRequiredReference { .. }));
    }

    #[test]
    fn test_unknown_model_is_unsupported() {
        let scene = FakeScene::new()
            .with_param("/shop/brdf", MODEL, Value::Text("phong_brdf".into()));
        let err =
            Bsdf::resolve(&scene, &ObjectPath::new("/shop/brdf"), Moment::zero()).unwrap_err();
        assert!(matches!(err, GraftError::Unsupported(_)));
    }
}
