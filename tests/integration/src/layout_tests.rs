//! End-to-end layout resolution scenarios.

use keel_core::{Layout, PackageManager, RecordingSink, WatchDepth, layout};
use keel_fs::NormalizedPath;
use keel_test_utils::TestProject;
use pretty_assertions::assert_eq;

fn resolve(project: &TestProject) -> (Layout, RecordingSink) {
    let sink = RecordingSink::new();
    let layout = layout::create(project.root(), &sink).expect("resolution should not error");
    (layout, sink)
}

fn source_relative(layout: &Layout, paths: &[NormalizedPath]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.relative_to(&layout.source_root).unwrap().to_string())
        .collect()
}

#[test]
fn finds_nested_schema_modules_in_deterministic_order() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("app.ts", "");
    for rel in [
        "src/graphql/1.ts",
        "src/graphql/2.ts",
        "src/graphql/graphql/3.ts",
        "src/graphql/graphql/4.ts",
        "src/graphql/graphql/graphql/5.ts",
        "src/graphql/graphql/graphql/6.ts",
    ] {
        project.file(rel, "");
    }

    let (layout, sink) = resolve(&project);

    assert!(sink.exit_signals().is_empty());
    assert!(layout.app.exists);
    assert_eq!(layout.app.path, Some(layout.source_root.join("app.ts")));
    assert_eq!(
        source_relative(&layout, &layout.schema_modules),
        vec![
            "src/graphql/1.ts",
            "src/graphql/2.ts",
            "src/graphql/graphql/3.ts",
            "src/graphql/graphql/4.ts",
            "src/graphql/graphql/graphql/5.ts",
            "src/graphql/graphql/graphql/6.ts",
        ]
    );

    // The whole resolved shape hangs together.
    assert_eq!(layout.build_output_relative, "node_modules/.build");
    assert_eq!(layout.package_manager, PackageManager::Npm);
    assert!(layout.project.is_anonymous);
    assert_eq!(layout.project.name, "anonymous");
    assert_eq!(layout.package_json.dir, layout.project_root);
    assert_eq!(
        layout.package_json.path,
        layout.project_root.join("package.json")
    );
    assert_eq!(layout.source_root, layout.project_root);
    assert_eq!(
        layout.start_module_in_path,
        layout.source_root.join("index.ts")
    );
    assert_eq!(
        layout.start_module_out_path,
        layout.project_root.join("node_modules/.build/index.js")
    );

    // Config carries the computed specs keyed by the source root.
    let ts_config = &layout.ts_config;
    assert_eq!(ts_config.include_specs, vec!["."]);
    assert_eq!(ts_config.exclude_specs, vec!["node_modules/.build"]);
    assert_eq!(
        ts_config
            .wildcard_directories
            .get(layout.source_root.as_str()),
        Some(&WatchDepth::Recursive)
    );
    assert_eq!(ts_config.file_names.len(), 7);
    assert_eq!(ts_config.file_names[0], layout.source_root.join("app.ts"));
}

#[test]
fn schema_modules_only_is_sufficient() {
    let project = TestProject::new().with_default_tsconfig();
    for rel in [
        "graphql/1.ts",
        "graphql/2.ts",
        "graphql/graphql/3.ts",
        "graphql/graphql/4.ts",
        "graphql/graphql/graphql/5.ts",
        "graphql/graphql/graphql/6.ts",
    ] {
        project.file(rel, "");
    }

    let (layout, sink) = resolve(&project);

    assert!(sink.exit_signals().is_empty());
    assert!(!layout.app.exists);
    assert_eq!(layout.app.path, None);
    assert_eq!(layout.schema_modules.len(), 6);
}

#[test]
fn single_schema_file_is_sufficient() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("graphql.ts", "");

    let (layout, sink) = resolve(&project);

    assert!(sink.exit_signals().is_empty());
    assert!(!layout.app.exists);
    assert_eq!(
        layout.schema_modules,
        vec![layout.source_root.join("graphql.ts")]
    );
}

#[test]
fn no_modules_is_fatal_with_three_option_remediation() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("src/User.ts", "");
    project.file("src/Post.ts", "");

    let (_layout, sink) = resolve(&project);

    let rendered = sink.rendered();
    assert_eq!(rendered.len(), 1);
    assert_eq!(
        rendered[0],
        "✕ keel:layout We could not find any graphql modules or app entrypoint\n\
         Please do one of the following:\n\n  \
         1. Create a graphql.ts file and write your GraphQL type definitions in it.\n  \
         2. Create a graphql directory and write your GraphQL type definitions inside files there.\n  \
         3. Create an app.ts file."
    );
    assert_eq!(sink.exit_signals(), vec![1]);
}

#[test]
fn detects_yarn_as_package_manager() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("app.ts", "");
    project.file("yarn.lock", "");

    let (layout, _sink) = resolve(&project);
    assert_eq!(layout.package_manager, PackageManager::Yarn);
}

#[test]
fn detects_pnpm_as_package_manager() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("app.ts", "");
    project.file("pnpm-lock.yaml", "");

    let (layout, _sink) = resolve(&project);
    assert_eq!(layout.package_manager, PackageManager::Pnpm);
}

#[test]
fn named_manifest_resolves_the_project_identity() {
    let project = TestProject::new().with_default_tsconfig();
    project.package_json("my-api");
    project.file("app.ts", "");

    let (layout, _sink) = resolve(&project);
    assert!(!layout.project.is_anonymous);
    assert_eq!(layout.project.name, "my-api");
}

#[test]
fn source_root_honors_the_root_dir_setting() {
    let project = TestProject::new();
    project.tsconfig(r#"{ "compilerOptions": { "rootDir": "api" }, "include": ["."] }"#);
    project.file("api/app.ts", "");

    let (layout, sink) = resolve(&project);

    assert!(sink.exit_signals().is_empty());
    assert_eq!(layout.source_root, layout.project_root.join("api"));
    assert!(layout.app.exists);
    assert_eq!(
        layout.start_module_in_path,
        layout.project_root.join("api/index.ts")
    );
    // Out path still mirrors into the managed build output.
    assert_eq!(
        layout.start_module_out_path,
        layout.project_root.join("node_modules/.build/index.js")
    );
}

#[test]
fn source_root_is_an_ancestor_of_every_resolved_module() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("app.ts", "");
    project.file("graphql/a.ts", "");
    project.file("src/graphql/b.ts", "");

    let (layout, _sink) = resolve(&project);

    assert!(
        layout
            .app
            .path
            .as_ref()
            .is_some_and(|p| p.is_under(&layout.source_root))
    );
    assert!(
        layout
            .schema_modules
            .iter()
            .all(|m| m.is_under(&layout.source_root))
    );
}

#[test]
fn build_output_is_invisible_to_the_scan() {
    let project = TestProject::new().with_default_tsconfig();
    project.file("graphql.ts", "");
    project.file("node_modules/.build/graphql.ts", "");
    project.file("node_modules/dep/graphql/schema.ts", "");

    let (layout, _sink) = resolve(&project);
    assert_eq!(layout.schema_modules.len(), 1);
}
