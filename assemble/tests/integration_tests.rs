use std::path::{Path, PathBuf};

use swagger_model_assemble::{
    AssembleConfig, AssembleError, Assembler, DefinitionBundle, OutputConfig, load_document,
    write_document,
};
use swagger_model_core::{
    Definition, Document, Format, MergeStrategy, Parameter, Property, Request, Response, Schema,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn base_document() -> Document {
    let mut doc = Document::new("Widgets", "1.0.0").with_base_path("/v1");
    doc.insert_operation(
        "/widgets",
        "post",
        Request::new("Create widget")
            .with_parameter(Parameter::body("body", Schema::reference("#/definitions/Widget")))
            .with_response("201", Response::new("Created")),
    );
    doc.insert_definition(
        "Widget",
        Definition::object()
            .with_property("id", Property::of_type("integer"))
            .with_required("id"),
    );
    doc
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn write_config(dir: &Path, strategy: &str, output: &str) -> PathBuf {
    let yaml = format!(
        r#"version: "1.0"
base: api/base.yaml
definitions:
  - models
  - shared.json
strategy: {strategy}
output:
  path: {output}
"#
    );
    write_file(dir, "swagger-assemble.yml", &yaml)
}

fn seed_sources(dir: &Path) {
    write_document(dir.join("api/base.yaml"), &base_document(), Format::Yaml, true).unwrap();
    write_file(
        dir,
        "models/gadget.yaml",
        "Gadget:\n  type: object\n  properties:\n    name:\n      type: string\n",
    );
    write_file(
        dir,
        "models/widget.json",
        r#"{"Widget":{"properties":{"name":{"type":"string"}},"required":["name"]}}"#,
    );
    write_file(
        dir,
        "shared.json",
        r#"{"swagger":"2.0","definitions":{"Error":{"type":"object","properties":{"message":{"type":"string"}}}}}"#,
    );
}

// ---------------------------------------------------------------------------
// Config-driven assembly
// ---------------------------------------------------------------------------

#[test]
fn test_assemble_union_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    seed_sources(dir.path());
    let config_path = write_config(dir.path(), "union", "dist/swagger.json");

    let report = Assembler::from_config_file(&config_path)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(report.output, dir.path().join("dist/swagger.json"));
    assert_eq!(report.definitions_total, 3);
    assert_eq!(report.merged, vec!["Gadget", "Widget", "Error"]);

    let doc = load_document(&report.output).unwrap();
    let widget = doc.definition("Widget").unwrap();
    assert_eq!(widget.definition_type, "object");
    assert_eq!(widget.properties.len(), 2);
    assert_eq!(widget.required, vec!["id", "name"]);
    assert!(doc.operation("/widgets", "post").is_some());

    let raw = std::fs::read_to_string(&report.output).unwrap();
    assert!(raw.starts_with("{\n"), "pretty JSON expected");
}

#[test]
fn test_assemble_prefer_base_keeps_existing_definition() {
    let dir = tempfile::tempdir().unwrap();
    seed_sources(dir.path());
    let config_path = write_config(dir.path(), "prefer-base", "dist/swagger.yaml");

    let report = Assembler::from_config_file(&config_path)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(report.merged, vec!["Gadget", "Error"]);

    let doc = load_document(&report.output).unwrap();
    assert_eq!(doc.definition("Widget").unwrap().properties.len(), 1);
}

#[test]
fn test_assemble_prefer_overlay_replaces_definition() {
    let dir = tempfile::tempdir().unwrap();
    seed_sources(dir.path());
    let config_path = write_config(dir.path(), "prefer-overlay", "out.json");

    let assembler = Assembler::from_config_file(&config_path).unwrap();
    let (doc, merged) = assembler.build().unwrap();

    assert!(merged.contains(&"Widget".to_string()));
    let widget = doc.definition("Widget").unwrap();
    assert!(widget.definition_type.is_empty());
    assert_eq!(widget.required, vec!["name"]);
    // build() does not write
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_assemble_missing_base_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), "union", "out.json");

    let err = Assembler::from_config_file(&config_path)
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, AssembleError::IoError(_)));
}

#[test]
fn test_assemble_malformed_base_is_document_error() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "api/base.yaml", "swagger: [2.0\n");
    let config_path = write_config(dir.path(), "union", "out.json");

    let err = Assembler::from_config_file(&config_path)
        .unwrap()
        .run()
        .unwrap_err();
    match err {
        AssembleError::DocumentError(e) => assert!(e.is_malformed()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_config_rejected_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "bad.yml",
        "version: \"\"\nbase: base.json\noutput:\n  path: out.json\n",
    );

    let err = Assembler::from_config_file(&path).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidConfig(_)));
}

// ---------------------------------------------------------------------------
// Programmatic assembly
// ---------------------------------------------------------------------------

#[test]
fn test_assembler_new_with_absolute_paths() {
    let dir = tempfile::tempdir().unwrap();
    seed_sources(dir.path());

    let config = AssembleConfig {
        version: "1.0".to_string(),
        base: dir.path().join("api/base.yaml"),
        definitions: vec![dir.path().join("shared.json")],
        strategy: MergeStrategy::Union,
        output: OutputConfig {
            path: dir.path().join("out/api.yml"),
            format: None,
            pretty: true,
        },
    };
    let report = Assembler::new(config).run().unwrap();

    assert_eq!(report.merged, vec!["Error"]);
    let raw = std::fs::read_to_string(&report.output).unwrap();
    assert!(raw.contains("swagger: '2.0'") || raw.contains("swagger: \"2.0\""));
}

#[test]
fn test_bundle_merge_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    seed_sources(dir.path());

    let mut doc = base_document();
    let bundle = DefinitionBundle::load(dir.path().join("models")).unwrap();
    doc.merge_definitions(&bundle, MergeStrategy::Union);

    let out = dir.path().join("merged.json");
    write_document(&out, &doc, Format::Json, false).unwrap();
    assert_eq!(load_document(&out).unwrap(), doc);
}

#[test]
fn test_assembler_new_validates_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    seed_sources(dir.path());

    let config = AssembleConfig {
        version: "1.0".to_string(),
        base: dir.path().join("api/base.yaml"),
        definitions: Vec::new(),
        strategy: MergeStrategy::Union,
        output: OutputConfig {
            path: PathBuf::new(),
            format: None,
            pretty: true,
        },
    };
    let assembler = Assembler::new(config);

    assert!(matches!(assembler.build(), Err(AssembleError::InvalidConfig(_))));
    assert!(matches!(assembler.run(), Err(AssembleError::InvalidConfig(_))));
}
