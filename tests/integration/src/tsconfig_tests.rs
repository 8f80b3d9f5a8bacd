//! End-to-end tests of the config resolution state machine, driven
//! through full layout resolution with a recording sink.

use keel_core::{Error, Level, RecordingSink, layout};
use keel_test_utils::TestProject;
use pretty_assertions::assert_eq;
use serde_json::json;

fn resolve(project: &TestProject) -> (keel_core::Layout, RecordingSink) {
    let sink = RecordingSink::new();
    let layout = layout::create(project.root(), &sink).expect("resolution should not error");
    (layout, sink)
}

#[test]
fn scaffolds_a_default_config_when_none_exists() {
    let project = TestProject::new();
    project.file("app.ts", "");

    let (layout, sink) = resolve(&project);

    // Exactly two informational lines: not-found plus scaffold location.
    let rendered = sink.rendered();
    assert_eq!(rendered.len(), 2);
    assert_eq!(
        rendered[0],
        "● keel:tsconfig We could not find a \"tsconfig.json\" file"
    );
    assert!(rendered[1].starts_with("● keel:tsconfig We scaffolded one for you at "));
    assert!(rendered[1].ends_with("/tsconfig.json"));
    assert!(sink.exit_signals().is_empty());

    // The scaffolded file carries exactly the default document; the
    // managed outDir is in-memory only.
    let on_disk = project.read_json("tsconfig.json");
    assert_eq!(
        on_disk,
        json!({
            "compilerOptions": {
                "lib": ["esnext"],
                "module": "commonjs",
                "rootDir": ".",
                "strict": true,
                "target": "es2016",
            },
            "include": ["."],
        })
    );

    let raw = &layout.ts_config.raw;
    assert_eq!(raw["compilerOptions"]["lib"], json!(["esnext"]));
    assert_eq!(raw["compilerOptions"]["module"], "commonjs");
    assert_eq!(raw["compilerOptions"]["rootDir"], ".");
    assert_eq!(raw["compilerOptions"]["target"], "es2016");
    assert_eq!(raw["include"], json!(["."]));
}

#[test]
fn warns_once_per_reserved_option_in_declaration_order() {
    let project = TestProject::new();
    project.tsconfig(
        r#"{ "compilerOptions": { "rootDir": ".", "incremental": true, "tsBuildInfoFile": "foo" }, "include": ["."] }"#,
    );
    project.file("app.ts", "");

    let (layout, sink) = resolve(&project);

    let rendered = sink.rendered();
    assert_eq!(rendered.len(), 2);
    assert_eq!(
        rendered[0],
        "▲ keel:tsconfig You have set compilerOptions.incremental in your tsconfig.json \
         but it will be ignored by keel. keel manages this value internally."
    );
    assert_eq!(
        rendered[1],
        "▲ keel:tsconfig You have set compilerOptions.tsBuildInfoFile in your tsconfig.json \
         but it will be ignored by keel. keel manages this value internally."
    );
    assert!(sink.exit_signals().is_empty());

    // Include stays exactly as the user wrote it.
    assert_eq!(layout.ts_config.raw["include"], json!(["."]));
}

#[test]
fn empty_config_gets_required_settings_in_memory_only() {
    let project = TestProject::new();
    project.tsconfig("");
    project.file("app.ts", "");

    let (layout, sink) = resolve(&project);

    let rendered = sink.rendered();
    assert_eq!(rendered.len(), 2);
    assert_eq!(
        rendered[0],
        "▲ keel:tsconfig Please set your tsconfig.json compilerOptions.rootDir to \".\""
    );
    assert_eq!(
        rendered[1],
        "▲ keel:tsconfig Please set your tsconfig.json include to have \".\""
    );

    assert_eq!(layout.ts_config.raw["compilerOptions"]["rootDir"], ".");
    assert_eq!(layout.ts_config.raw["include"], json!(["."]));

    // Never persisted: the file on disk is still blank.
    let on_disk = std::fs::read_to_string(project.root().join("tsconfig.json")).unwrap();
    assert_eq!(on_disk, "");
}

#[test]
fn unparsable_config_is_fatal_but_defaulting_still_runs() {
    let project = TestProject::new();
    project.tsconfig("bad json");
    project.file("app.ts", "");

    let (layout, sink) = resolve(&project);

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 3);

    assert_eq!(diagnostics[0].level, Level::Fatal);
    assert!(diagnostics[0].message.contains("Unable to read your tsconfig.json"));
    // The offending line and its location are part of the message.
    assert!(diagnostics[0].message.contains("bad json"));
    assert!(diagnostics[0].message.contains("tsconfig.json:1:1"));
    assert_eq!(sink.exit_signals(), vec![1]);

    // The recoverable-field warnings are computed in the same run.
    assert_eq!(diagnostics[1].level, Level::Warn);
    assert!(diagnostics[1].message.contains("compilerOptions.rootDir"));
    assert_eq!(diagnostics[2].level, Level::Warn);
    assert!(diagnostics[2].message.contains("include"));

    assert_eq!(layout.ts_config.raw["compilerOptions"]["rootDir"], ".");
    assert_eq!(layout.ts_config.raw["include"], json!(["."]));
}

#[test]
fn schema_invalid_config_is_fatal_with_the_validator_message() {
    let project = TestProject::new();
    project.tsconfig(r#"{ "exclude": "bad" }"#);
    project.file("app.ts", "");

    let (_layout, sink) = resolve(&project);

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics[0].level, Level::Fatal);
    assert!(diagnostics[0].message.contains("Your tsconfig.json is invalid"));
    assert!(
        diagnostics[0]
            .message
            .contains("Compiler option 'exclude' requires a value of type Array.")
    );
    assert_eq!(sink.exit_signals(), vec![1]);

    // Required-setting warnings still follow.
    assert_eq!(diagnostics[1].level, Level::Warn);
    assert_eq!(diagnostics[2].level, Level::Warn);
}

#[test]
fn normalized_config_resolves_without_diagnostics() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("app.ts", "");

    let (_layout, sink) = resolve(&project);
    assert_eq!(sink.rendered(), Vec::<String>::new());

    // Re-resolving the unchanged tree is just as quiet.
    let (_layout, sink) = resolve(&project);
    assert_eq!(sink.rendered(), Vec::<String>::new());
}

#[test]
fn missing_scan_root_propagates_without_diagnostics() {
    let project = TestProject::new();
    let sink = RecordingSink::new();

    let err = layout::create(project.root().join("nope"), &sink).unwrap_err();
    assert!(matches!(err, Error::RootNotFound { .. }));
    assert!(err.to_string().contains("does not exist"));
    assert!(sink.diagnostics().is_empty());
}
