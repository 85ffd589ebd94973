use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use yapi_codegen::{
    GenerationError, TypeOptions, convert_schema, convert_schema_with_name, generate_types,
};

const TEST_SCHEMA_PATH: &str = "tests/test_schema.json";
const EXPECTED_TYPES_PATH: &str = "tests/expected_types.ts";
const ENDPOINT_PATH: &str = "tests/endpoint.json";
const EXPECTED_AXIOS_PATH: &str = "tests/expected_axios.ts";

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_yapi-codegen"));
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Test generate_types against the expected fixture
#[test]
fn test_library_generate_types() {
    let schema_content =
        fs::read_to_string(TEST_SCHEMA_PATH).expect("Failed to read test schema file");
    let expected_output =
        fs::read_to_string(EXPECTED_TYPES_PATH).expect("Failed to read expected output file");

    let options = TypeOptions {
        interface_name: Some("UserInfo".to_string()),
        title: Some("获取用户信息".to_string()),
        ..TypeOptions::default()
    };
    let result = generate_types(&schema_content, &options).expect("Failed to generate types");

    assert_eq!(result.interface_name, "UserInfo");
    assert_eq!(result.data_key, "data");
    assert_eq!(
        result.type_definition.trim(),
        expected_output.trim(),
        "Library output doesn't match expected output"
    );
}

#[test]
fn test_library_convert_schema_defaults() {
    let schema_content =
        fs::read_to_string(TEST_SCHEMA_PATH).expect("Failed to read test schema file");

    let result = convert_schema(&schema_content).expect("Failed to convert schema");
    assert!(result.starts_with("export interface ApiData {"));

    let result = convert_schema_with_name(&schema_content, "CustomName")
        .expect("Failed to convert schema with custom name");
    assert!(result.starts_with("export interface CustomName {"));
    assert!(result.contains("  email: string;"));
    assert!(result.contains("  isActive?: boolean;"));
}

#[test]
fn test_interface_name_derived_from_endpoint() {
    let schema_content =
        fs::read_to_string(TEST_SCHEMA_PATH).expect("Failed to read test schema file");

    let options = TypeOptions {
        path: Some("/user/{id}".to_string()),
        method: Some("POST".to_string()),
        ..TypeOptions::default()
    };
    let result = generate_types(&schema_content, &options).unwrap();
    assert_eq!(result.interface_name, "PostUserData");
    assert!(result.type_definition.starts_with("export interface PostUserData {"));
}

#[test]
fn test_nested_object_and_array_types() {
    let schema = r#"{
        "properties": {
            "data": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "age": { "type": "integer" },
                    "labels": { "type": "array", "items": { "type": "string" } },
                    "matrix": {
                        "type": "array",
                        "items": { "type": "array", "items": { "type": "number" } }
                    }
                }
            }
        }
    }"#;

    let result = convert_schema(schema).unwrap();
    assert!(result.contains("  name: string;\n  age: number;\n"));
    assert!(result.contains("  labels: string[];"));
    assert!(result.contains("  matrix: number[][];"));
}

#[test]
fn test_scalar_fields_keep_schema_order() {
    let schema = r#"{
        "properties": {
            "data": {
                "type": "object",
                "properties": {
                    "zeta": { "type": "string" },
                    "alpha": { "type": "number" },
                    "mid": { "type": "boolean" },
                    "beta": { "type": "integer" }
                }
            }
        }
    }"#;

    let result = convert_schema(schema).unwrap();
    let names: Vec<&str> = result
        .lines()
        .filter_map(|line| line.trim().split_once(':').map(|(name, _)| name))
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid", "beta"]);
}

#[test]
fn test_empty_properties_emit_empty_literal() {
    let schema = r#"{ "properties": { "data": { "type": "object", "properties": {} } } }"#;

    let result = convert_schema(schema).unwrap();
    assert_eq!(result, "export interface ApiData {}");
}

#[test]
fn test_non_identifier_keys_are_quoted() {
    let schema = r#"{
        "properties": {
            "data": {
                "type": "object",
                "properties": { "content-type": { "type": "string" } }
            }
        }
    }"#;

    let result = convert_schema(schema).unwrap();
    assert!(result.contains("  'content-type': string;"));
}

#[test]
fn test_empty_description_is_ignored() {
    let schema = r#"{
        "properties": {
            "data": {
                "type": "object",
                "properties": {
                    "remark": { "type": "string", "description": "" },
                    "note": { "type": "string", "description": "备注" }
                }
            }
        }
    }"#;

    let result = convert_schema(schema).unwrap();
    assert_eq!(
        result,
        "export interface ApiData {\n  remark: string;\n  /** 备注 */\n  note: string;\n}"
    );
}

#[test]
fn test_library_missing_properties() {
    let result = convert_schema(r#"{ "type": "object" }"#);
    let err = result.expect_err("Should fail without properties");
    assert!(matches!(err, GenerationError::MalformedSchema));
    assert!(err.to_string().contains("properties"));
}

#[test]
fn test_library_missing_data_key() {
    let schema = r#"{ "properties": { "result": { "type": "string" } } }"#;

    let err = convert_schema(schema).expect_err("Should fail without data field");
    assert!(matches!(err, GenerationError::FieldNotFound(ref key) if key == "data"));
    assert!(err.to_string().contains("data"));
}

#[test]
fn test_library_malformed_json() {
    let malformed_json = r#"{ "type": "object", "properties": { "name": }"#;

    let result = convert_schema(malformed_json);
    assert!(matches!(result, Err(GenerationError::SchemaParse(_))));
}

#[test]
fn test_library_empty_input() {
    let result = convert_schema("  ");
    assert!(matches!(result, Err(GenerationError::MissingInput(_))));
}

#[test]
fn test_cli_types_conversion() {
    let expected_output =
        fs::read_to_string(EXPECTED_TYPES_PATH).expect("Failed to read expected output file");

    let output = cli()
        .args([
            "types",
            TEST_SCHEMA_PATH,
            "--interface-name",
            "UserInfo",
            "--title",
            "获取用户信息",
        ])
        .output()
        .expect("Failed to execute CLI command");

    assert!(
        output.status.success(),
        "CLI command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let cli_output = String::from_utf8(output.stdout).expect("CLI output is not valid UTF-8");
    assert_eq!(cli_output.trim(), expected_output.trim());
}

#[test]
fn test_cli_types_from_stdin() {
    let schema = fs::read_to_string(TEST_SCHEMA_PATH).unwrap();

    cli()
        .args(["types", "-", "--path", "/user/{id}", "--method", "GET"])
        .write_stdin(schema)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("export interface userData {"));
}

#[test]
fn test_cli_with_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_file = dir.path().join("types.d.ts");

    cli()
        .args(["types", TEST_SCHEMA_PATH, "--interface-name", "UserInfo", "--title", "获取用户信息"])
        .arg("--output")
        .arg(&output_file)
        .assert()
        .success();

    let file_content = fs::read_to_string(&output_file).expect("Failed to read CLI output file");
    let expected_output = fs::read_to_string(EXPECTED_TYPES_PATH).unwrap();
    assert_eq!(file_content.trim(), expected_output.trim());
}

#[test]
fn test_cli_json_envelope_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let schema_file = dir.path().join("broken.json");
    fs::write(&schema_file, r#"{ "type": "object" }"#).unwrap();

    let output = cli()
        .arg("--json")
        .arg("types")
        .arg(&schema_file)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["success"], false);
    assert!(envelope["error"].as_str().unwrap().contains("properties"));
    assert!(envelope.get("data").is_none());
}

#[test]
fn test_cli_json_envelope_on_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("yapi.config.json");
    fs::write(&config_file, r#"{ "requestLib": "jquery" }"#).unwrap();

    let output = cli()
        .arg("--json")
        .arg("--config")
        .arg(&config_file)
        .args(["types", TEST_SCHEMA_PATH])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["success"], false);
    assert!(envelope["message"].as_str().unwrap().starts_with("config loading failed"));
    assert!(envelope["error"].as_str().unwrap().contains("invalid configuration"));
}

#[test]
fn test_cli_bad_config_without_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("yapi.config.json"), r#"{ "dataKey": "" }"#).unwrap();

    cli()
        .current_dir(dir.path())
        .args(["mock", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("dataKey"));
}

#[test]
fn test_cli_api_code() {
    let expected_output = fs::read_to_string(EXPECTED_AXIOS_PATH).unwrap();

    let output = cli()
        .args(["api", ENDPOINT_PATH, "--interface-name", "apiUserData"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let cli_output = String::from_utf8(output.stdout).unwrap();
    assert_eq!(cli_output.trim(), expected_output.trim());
}

#[test]
fn test_cli_mock_is_repeatable_with_seed() {
    let run = || {
        cli()
            .args(["mock", TEST_SCHEMA_PATH, "--mock-type", "data-only", "--seed", "7"])
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());

    let first: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&second.stdout).unwrap();
    // createdAt follows the wall clock, everything else follows the seed
    assert_eq!(first["userName"], "测试名称");
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["tags"], second["tags"]);
    assert_eq!(first["friends"], second["friends"]);
}

#[test]
fn test_cli_rejects_unknown_mock_type() {
    cli()
        .args(["mock", TEST_SCHEMA_PATH, "--mock-type", "partial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("partial"));
}
