use callseq::commands::{execute_generate, validate_args, validate_trace_file, GenerateArgs};
use callseq::output::read_diagram;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_trace(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("trace.json");
    let trace = json!({
        "transaction": { "hash": "0xabc", "network": "sepolia" },
        "participants": { "0xb": { "name": "Vault" } },
        "events": [
            { "id": 1, "kind": "Call", "from": "0xa", "to": "0xb", "gasUsed": 30000 },
            { "id": 2, "kind": "Call", "from": "0xb", "to": "0xc", "succeeded": false, "errorMessage": "nope" },
            { "id": 3, "kind": "ValueTransfer", "from": "0xb", "to": "0xa", "amount": "1000000000000000000" }
        ]
    });
    fs::write(&path, trace.to_string()).unwrap();
    path
}

#[test]
fn test_validate_args_valid() {
    let dir = TempDir::new().unwrap();
    let args = GenerateArgs {
        input: write_trace(&dir),
        output_puml: dir.path().join("out.puml"),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_input() {
    let args = GenerateArgs::default();
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_missing_input() {
    let args = GenerateArgs {
        input: PathBuf::from("/nonexistent/trace.json"),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_same_outputs() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.puml");
    let args = GenerateArgs {
        input: write_trace(&dir),
        output_puml: output.clone(),
        output_json: Some(output),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_output_overwrites_input() {
    let dir = TempDir::new().unwrap();
    let input = write_trace(&dir);
    let args = GenerateArgs {
        input: input.clone(),
        output_puml: input,
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_missing_style() {
    let dir = TempDir::new().unwrap();
    let args = GenerateArgs {
        input: write_trace(&dir),
        output_puml: dir.path().join("out.puml"),
        style: Some(dir.path().join("style.toml")),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_execute_generate_writes_outputs() {
    let dir = TempDir::new().unwrap();
    let style_path = dir.path().join("style.toml");
    fs::write(&style_path, "native_symbol = \"SEP\"\n").unwrap();

    let args = GenerateArgs {
        input: write_trace(&dir),
        output_puml: dir.path().join("out/sequence.puml"),
        output_json: Some(dir.path().join("out/sequence.json")),
        show_gas: true,
        style: Some(style_path),
        ..Default::default()
    };

    execute_generate(args.clone()).unwrap();

    let puml = fs::read_to_string(&args.output_puml).unwrap();
    assert!(puml.starts_with("@startuml\ntitle 0xabc (sepolia)\n"));
    assert!(puml.contains("participant \"Vault\\n0xb\" as p_0xb\n"));
    assert!(puml.contains("p_0xa -> p_0xb: \\n30,000 gas\n"));
    assert!(puml.contains("destroy p_0xc\nnote right of p_0xc: nope\n"));
    assert!(puml.contains("p_0xb ->> p_0xa: 1.00 SEP\n"));
    assert!(puml.ends_with("@enduml\n"));

    let diagram = read_diagram(args.output_json.as_ref().unwrap()).unwrap();
    assert!(diagram.options.show_gas);
    assert!(!diagram.options.show_params);
}

#[test]
fn test_execute_generate_rejects_inconsistent_trace() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(
        &input,
        json!([
            { "id": 2, "kind": "Call", "from": "0xa", "to": "0xb" },
            { "id": 1, "kind": "Call", "from": "0xb", "to": "0xc" }
        ])
        .to_string(),
    )
    .unwrap();

    let args = GenerateArgs {
        input,
        output_puml: dir.path().join("bad.puml"),
        ..Default::default()
    };

    assert!(execute_generate(args.clone()).is_err());
    assert!(!args.output_puml.exists());
}

#[test]
fn test_validate_trace_file() {
    let dir = TempDir::new().unwrap();
    assert!(validate_trace_file(write_trace(&dir)).is_ok());
    assert!(validate_trace_file(dir.path().join("missing.json")).is_err());
}
