#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const STUB: &str = "\nconst runTimeDependencies = {}\nexport const setup = {}\n";

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Creates a template directory holding the generated stub and the library
/// scaffold files.
pub fn template_dir(root: &Path) {
    write(&root.join("src/auto-generated.ts"), STUB);
    for file in [
        "README.md",
        ".gitignore",
        ".npmignore",
        ".prettierignore",
        "LICENSE",
        "tsconfig.json",
        "jest.config.ts",
        "webpack.config.ts",
    ] {
        write(&root.join(file), &format!("template copy of {file}\n"));
    }
}

/// Creates a library project with its manifest, descriptor and template.
pub fn library_project(root: &Path) {
    write(
        &root.join("package.json"),
        r#"{"name": "lib", "version": "1.0.0", "description": "d", "author": "a"}"#,
    );
    write(
        &root.join("template.yaml"),
        r#"
dependencies:
  runTime:
    externals:
      rxjs: "^7.5.6"
    includedInBundle:
      "@ungap/custom-elements": "1.2.0"
  devTime:
    rxjs-spy: "^8.0.2"
bundles:
  mainModule:
    entryFile: ./index.ts
userGuide: true
"#,
    );
    template_dir(&root.join(".template"));
}
