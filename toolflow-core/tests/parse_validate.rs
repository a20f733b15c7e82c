use toolflow_core::{
    parse_catalog_str, validate_catalog, CatalogFormat, HandlerSpec, ParseError, SchemaType,
    Validate,
};

fn minimal_valid_yaml() -> &'static str {
    r#"
tools:
  - name: generate_ideas
    inputSchema:
      type: object
      required: [topic, keywords]
      properties:
        topic: { type: string }
        keywords: { type: string }
    outputSchema:
      type: object
      properties:
        ideas:
          type: array
          items:
            type: object
            properties:
              idea: { type: string }
    handler:
      type: static
      value: { ideas: [] }
  - name: write_note
    inputSchema:
      type: object
      required: [title]
      properties:
        title: { type: string }
workflows:
  - name: ideas_to_notes
    description: Brainstorm, then write one note per idea
    steps:
      - toolName: generate_ideas
        inputMapping:
          topic: "input.topic"
          keywords: "input.keywords"
      - toolName: write_note
        inputMapping:
          title: "output.ideas[$index].idea"
"#
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_catalog_str(minimal_valid_yaml(), CatalogFormat::Yaml).unwrap();
    validate_catalog(&parsed.catalog).unwrap();
    assert_eq!(parsed.catalog.tools.len(), 2);
    assert_eq!(parsed.catalog.workflows[0].steps.len(), 2);
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_catalog_str(minimal_valid_yaml(), CatalogFormat::Auto).unwrap();
    assert_eq!(parsed.format, CatalogFormat::Yaml);
}

#[test]
fn parse_auto_detects_json() {
    let json = r#"{ "tools": [ { "name": "echo", "handler": { "type": "echo" } } ], "workflows": [ { "name": "w1", "steps": [ { "toolName": "echo", "inputMapping": { "x": "input.x" } } ] } ] }"#;
    let parsed = parse_catalog_str(json, CatalogFormat::Auto).unwrap();
    assert_eq!(parsed.format, CatalogFormat::Json);
    parsed.catalog.validate().unwrap();
}

#[test]
fn parse_unknown_format_is_rejected() {
    let err = parse_catalog_str("not: [valid", CatalogFormat::Auto).unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}

#[test]
fn handler_defaults_to_echo_and_schema_types_deserialize() {
    let parsed = parse_catalog_str(minimal_valid_yaml(), CatalogFormat::Yaml).unwrap();
    let write_note = parsed.catalog.tool("write_note").unwrap();
    assert_eq!(write_note.handler, HandlerSpec::Echo);
    assert_eq!(
        write_note.input_schema.properties["title"].schema_type,
        Some(toolflow_core::types::SchemaTypes::Single(SchemaType::String))
    );
}

#[test]
fn union_types_deserialize() {
    let yaml = r#"
tools:
  - name: t
    inputSchema:
      type: object
      properties:
        note: { type: [string, "null"] }
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let schema = &parsed.catalog.tools[0].input_schema.properties["note"];
    assert!(toolflow_core::validate_value(schema, &serde_json::json!(null)).is_ok());
    assert!(toolflow_core::validate_value(schema, &serde_json::json!("x")).is_ok());
    assert!(toolflow_core::validate_value(schema, &serde_json::json!(1)).is_err());
}

#[test]
fn empty_catalog_is_rejected() {
    let parsed = parse_catalog_str("tools: []", CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$"));
}

#[test]
fn invalid_names_are_rejected() {
    let yaml = r#"
tools:
  - name: "bad name"
workflows:
  - name: ""
    steps:
      - toolName: "bad name"
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    assert_eq!(err.at("$.tools[0].name").count(), 1);
    assert_eq!(err.at("$.workflows[0].name").count(), 1);
}

#[test]
fn workflow_without_steps_is_rejected() {
    let yaml = r#"
workflows:
  - name: empty
    steps: []
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    assert_eq!(err.at("$.workflows[0].steps").count(), 1);
}

#[test]
fn http_handler_url_must_be_http() {
    let yaml = r#"
tools:
  - name: remote
    handler:
      type: http
      url: "ftp://example.com/tool"
  - name: broken
    handler:
      type: http
      url: "not a url"
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    assert_eq!(err.at("$.tools[0].handler.url").count(), 1);
    assert_eq!(err.at("$.tools[1].handler.url").count(), 1);
}

#[test]
fn required_properties_must_be_declared() {
    let yaml = r#"
tools:
  - name: t
    inputSchema:
      type: object
      required: [missing]
      properties:
        present: { type: string }
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.tools[0].inputSchema.required" && v.message.contains("missing")));
}

#[test]
fn malformed_mapping_paths_are_rejected() {
    let yaml = r#"
tools:
  - name: t
workflows:
  - name: w
    steps:
      - toolName: t
        inputMapping:
          a: "output.items[x]"
          b: "input..topic"
          c: "output.items.$index"
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    let base = "$.workflows[0].steps[0].inputMapping";
    assert_eq!(err.at(&format!("{base}.a")).count(), 1);
    assert_eq!(err.at(&format!("{base}.b")).count(), 1);
    assert_eq!(err.at(&format!("{base}.c")).count(), 1);
}

#[test]
fn index_placeholder_in_literal_only_is_rejected() {
    let yaml = r#"
tools:
  - name: t
workflows:
  - name: w
    steps:
      - toolName: t
        inputMapping:
          label: "Idea #$index"
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    let err = validate_catalog(&parsed.catalog).unwrap_err();
    assert_eq!(
        err.at("$.workflows[0].steps[0].inputMapping").count(),
        1
    );
}

#[test]
fn literal_mapping_values_are_accepted() {
    let yaml = r#"
tools:
  - name: t
workflows:
  - name: w
    steps:
      - toolName: t
        inputMapping:
          count: 3
          flag: true
          label: "plain text"
          nested: { a: 1 }
"#;
    let parsed = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
    validate_catalog(&parsed.catalog).unwrap();
}
