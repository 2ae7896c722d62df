//! The document serializer: a pure, read-only projection of the resolved
//! project graph into the renderer's nested element/parameter text schema.
//! Emission order follows registry insertion order throughout, so an
//! unchanged scene snapshot always serializes to byte-identical output.

use std::fmt::Write as _;

use graft_core::{AttributeSet, Matrix4};
use graft_ir::{Camera, Edf, Object, Project};

const INDENT: &str = "    ";

struct DocumentWriter {
    out: String,
    depth: usize,
}

impl DocumentWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.line(&format!("<{}{}>", tag, attr_text(attrs)));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.line(&format!("</{}>", tag));
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.line(&format!("<{}{} />", tag, attr_text(attrs)));
    }

    /// Emit every attribute of the store as a `<parameter>` child, in
    /// insertion order.
    fn parameters(&mut self, params: &AttributeSet) {
        for attr in params.iter() {
            let value = attr.value.to_string();
            self.empty("parameter", &[("name", &attr.name), ("value", &value)]);
        }
    }

    fn transform(&mut self, matrix: &Matrix4) {
        self.open("transform", &[]);
        self.open("matrix", &[]);
        self.line(&matrix_text(matrix));
        self.close("matrix");
        self.close("transform");
    }
}

fn attr_text(attrs: &[(&str, &str)]) -> String {
    let mut text = String::new();
    for (name, value) in attrs {
        let _ = write!(text, " {}=\"{}\"", name, escape(value));
    }
    text
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 16 space-separated fixed-precision values.
fn matrix_text(matrix: &Matrix4) -> String {
    let values: Vec<String> = matrix.values().iter().map(|v| format!("{:.6}", v)).collect();
    values.join(" ")
}

/// Serialize the resolved project graph into the renderer's document text.
pub fn serialize(project: &Project) -> String {
    let mut w = DocumentWriter::new();
    w.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    w.open("project", &[]);
    w.open("scene", &[]);

    let camera = &project.scene.camera;
    w.open(
        "camera",
        &[("name", camera.name.as_str()), ("model", Camera::MODEL)],
    );
    w.parameters(&camera.params);
    w.transform(&camera.transform);
    w.close("camera");

    let assembly = &project.scene.assembly;
    w.open("assembly", &[("name", assembly.name.as_str())]);

    for (name, light) in assembly.lights.iter() {
        w.open(
            "light",
            &[("name", name.as_str()), ("model", light.model.tag())],
        );
        w.parameters(&light.params);
        w.transform(&light.transform);
        w.close("light");
    }

    for (name, material) in assembly.materials.iter() {
        w.open("material", &[("name", name.as_str())]);
        w.parameters(&material.params);
        w.close("material");
    }

    for (name, bsdf) in assembly.bsdfs.iter() {
        w.open(
            "bsdf",
            &[("name", name.as_str()), ("model", bsdf.model.tag())],
        );
        w.parameters(&bsdf.params);
        w.close("bsdf");
    }

    for (name, edf) in assembly.edfs.iter() {
        w.open("edf", &[("name", name.as_str()), ("model", Edf::MODEL)]);
        w.parameters(&edf.params);
        w.close("edf");
    }

    for (name, color) in assembly.colors.iter() {
        w.open("color", &[("name", name.as_str())]);
        w.parameters(&color.params);
        w.close("color");
    }

    for (name, shader) in assembly.surface_shaders.iter() {
        w.open(
            "surface_shader",
            &[("name", name.as_str()), ("model", shader.model.tag())],
        );
        w.parameters(&shader.params);
        w.close("surface_shader");
    }

    for (name, object) in assembly.objects.iter() {
        w.open(
            "object",
            &[("name", name.as_str()), ("model", Object::MODEL)],
        );
        w.parameters(&object.params);
        w.close("object");
    }

    for (name, instance) in assembly.object_instances.iter() {
        w.open(
            "object_instance",
            &[
                ("name", name.as_str()),
                ("object", instance.shape.name.as_str()),
            ],
        );
        w.parameters(&instance.params);
        w.transform(&instance.transform);
        if let Some(material) = &instance.material {
            w.empty(
                "assign_material",
                &[("slot", "front"), ("material", material.as_str())],
            );
            w.empty(
                "assign_material",
                &[("slot", "back"), ("material", material.as_str())],
            );
        }
        w.close("object_instance");
    }

    w.close("assembly");

    let assembly_instance = &project.scene.assembly_instance;
    w.open(
        "assembly_instance",
        &[
            ("name", assembly_instance.name.as_str()),
            ("assembly", assembly_instance.assembly.as_str()),
        ],
    );
    w.transform(&assembly_instance.transform);
    w.close("assembly_instance");

    w.close("scene");

    w.open("output", &[]);
    for (name, frame) in &project.output.frames {
        w.open("frame", &[("name", name.as_str())]);
        w.parameters(&frame.params);
        w.close("frame");
    }
    w.close("output");

    w.open("configurations", &[]);
    for config in [
        &project.configurations.final_quality,
        &project.configurations.interactive_quality,
    ] {
        w.open("configuration", &[("name", config.name.as_str())]);
        w.parameters(&config.params);
        w.close("configuration");
    }
    w.close("configurations");

    w.close("project");
    w.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{CanonicalName, Value};
    use graft_ir::{
        Assembly, AssemblyInstance, Configuration, Configurations, Frame, Output, Scene,
    };

    fn minimal_project() -> Project {
        let mut camera_params = AttributeSet::new();
        camera_params.set("film_dimensions", Value::Tuple(vec![0.025, 0.01875]));
        camera_params.set("focal_length", Value::Float(0.035));
        let camera = Camera {
            name: CanonicalName::new("obj__cam1"),
            params: camera_params,
            transform: Matrix4::translation(1.0, 2.0, 3.0).transposed(),
            resolution: (640, 480),
        };

        let assembly = Assembly::new(CanonicalName::new("assembly"));
        let assembly_instance = AssemblyInstance::new(assembly.name.clone());

        let mut frame_params = AttributeSet::new();
        frame_params.set("camera", Value::Text("obj__cam1".into()));
        frame_params.set("resolution", Value::Tuple(vec![640.0, 480.0]));
        let mut output = Output::new();
        output.add_frame(Frame {
            name: "beauty".into(),
            params: frame_params,
        });

        let mut final_params = AttributeSet::new();
        final_params.set("max_samples", Value::Float(16.0));
        Project {
            scene: Scene {
                camera,
                assembly,
                assembly_instance,
            },
            output,
            configurations: Configurations {
                final_quality: Configuration {
                    name: "final".into(),
                    params: final_params,
                },
                interactive_quality: Configuration {
                    name: "interactive".into(),
                    params: AttributeSet::new(),
                },
            },
        }
    }

    #[test]
    fn test_document_shell_structure() {
        let document = serialize(&minimal_project());
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n"));
        assert!(document.ends_with("</project>\n"));
        assert!(document.contains("<camera name=\"obj__cam1\" model=\"pinhole_camera\">"));
        assert!(document.contains("<assembly name=\"assembly\">"));
        assert!(document.contains("<assembly_instance name=\"assembly_inst\" assembly=\"assembly\">"));
        assert!(document.contains("<frame name=\"beauty\">"));
        assert!(document.contains("<configuration name=\"final\">"));
        assert!(document.contains("<configuration name=\"interactive\">"));
    }

    #[test]
    fn test_translation_matrix_emits_column_major_fixed_precision() {
        let document = serialize(&minimal_project());
        assert!(document.contains(concat!(
            "1.000000 0.000000 0.000000 1.000000 ",
            "0.000000 1.000000 0.000000 2.000000 ",
            "0.000000 0.000000 1.000000 3.000000 ",
            "0.000000 0.000000 0.000000 1.000000"
        )));
    }

    #[test]
    fn test_parameters_emit_in_insertion_order() {
        let document = serialize(&minimal_project());
        let film = document.find("name=\"film_dimensions\"").unwrap();
        let focal = document.find("name=\"focal_length\"").unwrap();
        assert!(film < focal);
        assert!(document.contains("<parameter name=\"film_dimensions\" value=\"0.025 0.01875\" />"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
