//! Common constants used throughout kratestack.

/// Name of the ignore file as it lives in a source tree and in a generated project.
pub const GITIGNORE: &str = ".gitignore";

/// Name the ignore file is stored under inside a packaged template.
pub const PACKED_GITIGNORE: &str = "gitignore";

/// Project descriptor at the root of a template and of every generated project.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Supported manifest file names, looked up at the source root
pub const MANIFEST_FILES: [&str; 3] = ["kratestack.json", "kratestack.yml", "kratestack.yaml"];

/// Top-level entries copied into the template when no manifest file is present.
pub const DEFAULT_INCLUDES: &[&str] = &[
    "apps",
    "packages/client",
    "package.json",
    "pnpm-workspace.yaml",
    "tsconfig.json",
    ".gitignore",
    "README.md",
    "vercel.json",
    "Cargo.toml",
];

/// Path components never copied into the template when no manifest file is present.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    "target",
    ".next",
    "dist",
    ".git",
    ".roo",
    "create-kratestack",
    "pnpm-lock.yaml",
    "test-scaffold",
];

/// Suggested name when the user is asked for one.
pub const DEFAULT_PROJECT_NAME: &str = "my-kratestack-app";

/// Where `snapshot` writes the template, relative to the source root.
pub const DEFAULT_TEMPLATE_DIR: &str = "packages/create-kratestack/template";

/// Prefix of the staging directories created next to a destination.
pub const STAGE_PREFIX: &str = ".kratestack-stage-";
