mod common;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use pkgsmith::docs::DocGenerator;
use pkgsmith::error::{Error, Result};
use pkgsmith::processor::Processor;
use pkgsmith::renderer::MiniJinjaRenderer;
use tempfile::TempDir;

/// Records invocations instead of spawning the documentation tool.
#[derive(Default)]
struct FakeDocGenerator {
    calls: RefCell<Vec<(PathBuf, String, PathBuf)>>,
    exit_code: Option<i32>,
}

impl DocGenerator for FakeDocGenerator {
    fn generate_docs(&self, project_root: &Path, nav_root: &str, out_dir: &Path) -> Result<()> {
        self.calls.borrow_mut().push((
            project_root.to_path_buf(),
            nav_root.to_string(),
            out_dir.to_path_buf(),
        ));
        match self.exit_code {
            Some(code) => Err(Error::DocGenerationError {
                exit_code: Some(code),
                output: "fake failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn add_docs_section(project: &Path) {
    let descriptor = project.join("template.yaml");
    let mut content = fs::read_to_string(&descriptor).unwrap();
    content.push_str(
        "docs:\n  toolDir: node_modules/@youwol/mkdocs-ts\n  project: ..\n  out: assets/api\n",
    );
    fs::write(descriptor, content).unwrap();
}

#[test_log::test]
fn test_end_to_end_library() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    let renderer = MiniJinjaRenderer::new();

    let summary = Processor::new(&renderer, project.path()).unwrap().run(None).unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.path().join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["name"], "lib");
    assert_eq!(manifest["version"], "1.0.0");
    assert_eq!(manifest["runTimeDependencies"]["externals"]["rxjs"], "^7.5.6");
    assert_eq!(
        manifest["runTimeDependencies"]["includedInBundle"]["@ungap/custom-elements"],
        "1.2.0"
    );
    assert_eq!(manifest["devDependencies"]["rxjs-spy"], "^8.0.2");
    assert_eq!(manifest["mainModule"]["loadDependencies"], serde_json::json!(["rxjs"]));
    assert_eq!(manifest["userGuide"], true);

    assert_eq!(summary.copied.len(), 8);
    assert!(project.path().join("src/auto-generated.ts").is_file());
    assert_eq!(
        fs::read_to_string(project.path().join("jest.config.ts")).unwrap(),
        "template copy of jest.config.ts\n"
    );
    assert!(!summary.docs_generated);
}

#[test]
fn test_second_run_is_identical() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    common::library_project(first.path());
    common::library_project(second.path());
    let renderer = MiniJinjaRenderer::new();

    Processor::new(&renderer, first.path()).unwrap().run(None).unwrap();
    Processor::new(&renderer, second.path()).unwrap().run(None).unwrap();
    Processor::new(&renderer, second.path()).unwrap().run(None).unwrap();

    assert!(!dir_diff::is_different(first.path(), second.path()).unwrap());
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_custom_manifest_path_is_rewritten() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    let original = fs::read_to_string(project.path().join("package.json")).unwrap();
    fs::remove_file(project.path().join("package.json")).unwrap();
    common::write(&project.path().join("pkg/package.json"), &original);
    let descriptor = project.path().join("template.yaml");
    let content = fs::read_to_string(&descriptor).unwrap();
    fs::write(&descriptor, format!("manifest: pkg/package.json\n{content}")).unwrap();
    let renderer = MiniJinjaRenderer::new();

    let summary = Processor::new(&renderer, project.path()).unwrap().run(None).unwrap();

    let target = project.path().join("pkg/package.json");
    assert!(summary.rendered.contains(&target));
    let manifest = read_json(&target);
    assert_eq!(manifest["name"], "lib");
    assert_eq!(manifest["runTimeDependencies"]["externals"]["rxjs"], "^7.5.6");
    assert!(!project.path().join("package.json").exists());
}

#[test]
fn test_rendered_template_wins_over_scaffold_copy() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    common::write(
        &project.path().join(".template/webpack.config.ts.j2"),
        "export const name = '{{ name }}'\n",
    );
    let renderer = MiniJinjaRenderer::new();

    let summary = Processor::new(&renderer, project.path()).unwrap().run(None).unwrap();

    let webpack = project.path().join("webpack.config.ts");
    assert_eq!(fs::read_to_string(&webpack).unwrap(), "export const name = 'lib'\n");
    assert!(summary.rendered.contains(&webpack));
    assert!(!summary.copied.contains(&webpack));
    assert_eq!(summary.copied.len(), 7);
}

#[test]
fn test_scaffold_file_only_available_as_template() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    fs::remove_file(project.path().join(".template/webpack.config.ts")).unwrap();
    common::write(
        &project.path().join(".template/webpack.config.ts.j2"),
        "export const entry = '{{ entryFile }}'\n",
    );
    let renderer = MiniJinjaRenderer::new();

    let summary = Processor::new(&renderer, project.path()).unwrap().run(None).unwrap();

    assert_eq!(
        fs::read_to_string(project.path().join("webpack.config.ts")).unwrap(),
        "export const entry = './index.ts'\n"
    );
    assert_eq!(summary.copied.len(), 7);
}

#[test]
fn test_person_author_is_kept_in_manifest() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    common::write(
        &project.path().join("package.json"),
        r#"{"name": "lib", "version": "1.0.0", "description": "d",
            "author": {"name": "someone", "email": "someone@example.com", "url": "https://example.com"}}"#,
    );
    let renderer = MiniJinjaRenderer::new();

    Processor::new(&renderer, project.path()).unwrap().run(None).unwrap();

    let manifest = read_json(&project.path().join("package.json"));
    assert_eq!(
        manifest["author"],
        serde_json::json!({
            "name": "someone",
            "email": "someone@example.com",
            "url": "https://example.com"
        })
    );
}

#[test]
fn test_doc_project_uses_parent_version() {
    let root = TempDir::new().unwrap();
    common::write(
        &root.path().join("package.json"),
        r#"{"name": "@youwol/rx-vdom", "version": "2.0.0-wip", "description": "lib", "author": "a"}"#,
    );
    let doc = root.path().join("rx-vdom-doc");
    common::write(
        &doc.join("package.json"),
        r#"{"name": "@youwol/rx-vdom-doc", "version": "0.0.1", "description": "doc", "author": "a"}"#,
    );
    common::write(
        &doc.join("template.json"),
        r#"{
            "type": "application",
            "versionFrom": "../package.json",
            "dependencies": {
                "runTime": {
                    "externals": {
                        "@youwol/rx-vdom": "^{{ parent.base_version }}",
                        "rxjs": "^7.5.6"
                    }
                }
            },
            "bundles": { "mainModule": { "entryFile": "./main.ts" } },
            "devServer": { "port": 3027 },
            "scaffold": { "exclude": [".npmignore", ".prettierignore"] }
        }"#,
    );
    common::template_dir(&doc.join(".template"));
    let renderer = MiniJinjaRenderer::new();

    let summary = Processor::new(&renderer, &doc).unwrap().run(None).unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(doc.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["version"], "2.0.0-wip");
    assert_eq!(manifest["type"], "application");
    assert_eq!(manifest["runTimeDependencies"]["externals"]["@youwol/rx-vdom"], "^2.0.0");
    assert_eq!(manifest["devServer"]["port"], 3027);
    assert_eq!(summary.copied.len(), 5);
    assert!(!doc.join(".npmignore").exists());
    assert!(!doc.join("jest.config.ts").exists());
}

#[test]
fn test_docs_run_after_scaffold() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    add_docs_section(project.path());
    let renderer = MiniJinjaRenderer::new();
    let generator = FakeDocGenerator::default();

    let summary =
        Processor::new(&renderer, project.path()).unwrap().run(Some(&generator)).unwrap();

    assert!(summary.docs_generated);
    let calls = generator.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, project.path().join(".."));
    assert_eq!(calls[0].1, "/api");
    assert_eq!(calls[0].2, project.path().join("assets/api"));
}

#[test]
fn test_doc_failure_aborts_with_exit_code() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    add_docs_section(project.path());
    let renderer = MiniJinjaRenderer::new();
    let generator = FakeDocGenerator { exit_code: Some(7), ..Default::default() };

    match Processor::new(&renderer, project.path()).unwrap().run(Some(&generator)) {
        Err(Error::DocGenerationError { exit_code, .. }) => assert_eq!(exit_code, Some(7)),
        other => panic!("Expected DocGenerationError, got {other:?}"),
    }
    // The scaffold written before the doc step stays in place.
    assert!(project.path().join("package.json").is_file());
}

#[test]
fn test_generate_docs_without_section() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    let renderer = MiniJinjaRenderer::new();

    let result = Processor::new(&renderer, project.path())
        .unwrap()
        .generate_docs(&FakeDocGenerator::default());
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_duplicate_dependency_in_descriptor() {
    let project = TempDir::new().unwrap();
    common::library_project(project.path());
    common::write(
        &project.path().join("template.yaml"),
        r#"
dependencies:
  runTime:
    externals:
      rxjs: "^7.5.6"
  devTime:
    rxjs: "^7.5.6"
bundles:
  mainModule:
    entryFile: ./index.ts
"#,
    );
    let renderer = MiniJinjaRenderer::new();

    let result = Processor::new(&renderer, project.path()).unwrap().run(None);
    assert!(matches!(result, Err(Error::DuplicateClassificationError { .. })));
    assert!(!project.path().join("src/auto-generated.ts").exists());
}

#[test]
fn test_missing_descriptor() {
    let project = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    assert!(matches!(
        Processor::new(&renderer, project.path()),
        Err(Error::ConfigError(_))
    ));
}
