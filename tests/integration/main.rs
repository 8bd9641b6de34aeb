//! Integration tests for modfacts
//!
//! These tests drive the extractor end to end: unit input in, JSON-lines facts out.

use modfacts_core::{Fact, FactSink, JsonLinesSink, MemorySink};
use modfacts_extractor::{Coordinator, ExtractionContext, ExtractionInput, ExtractorConfig};
use std::collections::{BTreeSet, HashMap};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

const UNITS: &str = r#"{
  "units": [
    {
      "name": "Shapes.cs",
      "declarations": [
        {
          "id": 1,
          "symbol": {
            "name": "IShape",
            "kind": "named_type",
            "accessibility": "public",
            "flags": { "is_abstract": true },
            "detail": { "shape": "named_type", "type_kind": "interface" },
            "declared_in_source": true
          }
        },
        {
          "id": 2,
          "symbol": {
            "name": "IShape.Area",
            "kind": "method",
            "accessibility": "public",
            "flags": { "is_abstract": true },
            "containing_type": { "kind": "named_type", "type_kind": "interface" },
            "detail": { "shape": "method" },
            "declared_in_source": true
          }
        },
        {
          "id": 3,
          "symbol": {
            "name": "Circle.Pi",
            "kind": "field",
            "accessibility": "private",
            "flags": { "is_static": true },
            "containing_type": { "kind": "named_type", "type_kind": "class" },
            "detail": { "shape": "field", "is_const": true },
            "declared_in_source": true
          }
        }
      ]
    },
    {
      "name": "Buffers.cs",
      "declarations": [
        {
          "id": 10,
          "symbol": {
            "name": "Span",
            "kind": "named_type",
            "accessibility": "protected_or_internal",
            "detail": { "shape": "named_type", "type_kind": "struct", "is_read_only": true, "is_ref_like": true },
            "declared_in_source": true,
            "source_modifiers": ["partial"]
          }
        }
      ]
    },
    {
      "name": "Legacy.cs",
      "declarations": [
        {
          "id": 20,
          "symbol": { "name": "Old", "kind": "property", "accessibility": "friend" }
        }
      ]
    }
  ]
}"#;

fn modifiers_by_declaration(facts: &[Fact]) -> HashMap<u64, BTreeSet<String>> {
    let names: HashMap<_, _> = facts
        .iter()
        .filter_map(|f| match f {
            Fact::Modifiers { id, name } => Some((*id, name.clone())),
            _ => None,
        })
        .collect();

    let mut by_decl: HashMap<u64, BTreeSet<String>> = HashMap::new();
    for fact in facts {
        if let Fact::HasModifiers { declaration, modifier } = fact {
            by_decl
                .entry(declaration.0)
                .or_default()
                .insert(names[modifier].clone());
        }
    }
    by_decl
}

/// Test a full run against an in-memory sink
#[test]
fn test_extraction_run() {
    let input: ExtractionInput = serde_json::from_str(UNITS).unwrap();
    let sink = Arc::new(MemorySink::new());
    let cx = ExtractionContext::new(sink.clone());

    let summary = Coordinator::new(ExtractorConfig::default())
        .run(&cx, &input.units)
        .unwrap();

    assert_eq!(summary.units.len(), 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].unit, "Legacy.cs");

    let by_decl = modifiers_by_declaration(&sink.facts());
    let set = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();

    assert_eq!(by_decl[&1], set(&["public"]));
    assert_eq!(by_decl[&2], set(&["public", "virtual"]));
    assert_eq!(by_decl[&3], set(&["private"]));
    assert_eq!(by_decl[&10], set(&["protected", "internal", "partial", "readonly", "ref"]));
    assert!(!by_decl.contains_key(&20));

    // One declaration fact per distinct modifier name
    let declared = sink.declared_names();
    let distinct: BTreeSet<_> = declared.iter().cloned().collect();
    assert_eq!(declared.len(), distinct.len());
    assert_eq!(summary.stats.entities_created, distinct.len());
}

/// Test that JSON-lines output parses back into facts
#[test]
fn test_json_lines_run() {
    let input: ExtractionInput = serde_json::from_str(UNITS).unwrap();
    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let cx = ExtractionContext::new(sink.clone() as Arc<dyn FactSink>);

    Coordinator::new(ExtractorConfig { threads: Some(1), ..Default::default() })
        .run(&cx, &input.units)
        .unwrap();
    drop(cx);

    let sink = Arc::try_unwrap(sink).ok().unwrap();
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let facts: Vec<Fact> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

    let by_decl = modifiers_by_declaration(&facts);
    assert_eq!(by_decl.len(), 4);
}

/// Test that the CLI extracts and reports aborted units
#[test]
fn test_cli_extract() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("units.json");
    let output = temp_dir.path().join("facts.jsonl");
    std::fs::write(&input, UNITS).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_modfacts"))
        .arg("extract")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Legacy.cs"));
    let stats: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(stats["units_aborted"], 1);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.lines().count() > 0);
    assert!(text.contains(r#""name":"virtual""#));
    assert!(!text.contains(r#""name":"abstract""#));
}

/// Test that --abort-run fails the whole run
#[test]
fn test_cli_abort_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("units.json");
    std::fs::write(&input, UNITS).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_modfacts"))
        .args(["extract", "--abort-run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(temp_dir.path().join("facts.jsonl"))
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success());
}

/// Test that --config is honoured when given after the subcommand
#[test]
fn test_cli_config_after_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("units.json");
    let config = temp_dir.path().join("strict.toml");
    std::fs::write(&input, UNITS).unwrap();
    std::fs::write(&config, "failure-policy = \"abort-run\"\n").unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_modfacts"))
        .args(["extract", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(temp_dir.path().join("facts.jsonl"))
        .arg("--config")
        .arg(&config)
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Legacy.cs"));
}

/// Test the single-symbol classify command
#[test]
fn test_cli_classify() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("symbol.json");
    std::fs::write(
        &input,
        r#"{ "name": "Missing", "kind": "error_type", "accessibility": "private" }"#,
    )
    .unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_modfacts"))
        .args(["classify", "--input"])
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success());
    assert_eq!(String::from_utf8_lossy(&result.stdout).trim(), "private public");
}
