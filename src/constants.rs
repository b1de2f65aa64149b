//! Common constants used throughout pkgsmith.

/// Supported project descriptor file names, tried in order.
pub const CONFIG_FILES: [&str; 3] = ["template.json", "template.yml", "template.yaml"];

/// Default manifest file name, relative to the project directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Default template directory, relative to the project directory.
pub const TEMPLATE_DIR: &str = ".template";

/// Generated source stub copied verbatim from the template directory.
pub const GENERATED_STUB: &str = "src/auto-generated.ts";

/// Stubs that must be present in every template directory.
pub const EXPECTED_STUBS: [&str; 1] = [GENERATED_STUB];

/// Suffix of files rendered through the template engine.
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Version suffix marking a work-in-progress release.
pub const WIP_SUFFIX: &str = "-wip";

/// Scaffold files copied into a library project.
pub const LIBRARY_SCAFFOLD: [&str; 8] = [
    "README.md",
    ".gitignore",
    ".npmignore",
    ".prettierignore",
    "LICENSE",
    "tsconfig.json",
    "jest.config.ts",
    "webpack.config.ts",
];

/// Scaffold files copied into a browser application project.
pub const APPLICATION_SCAFFOLD: [&str; 7] = [
    "README.md",
    ".gitignore",
    ".npmignore",
    ".prettierignore",
    "LICENSE",
    "tsconfig.json",
    "webpack.config.ts",
];

/// Defaults of the documentation tool invocation.
pub const DOC_PROGRAM: &str = "node";
pub const DOC_ENTRY: &str = "./bin/index.js";
pub const DOC_NAV: &str = "/api";
