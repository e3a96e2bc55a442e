//! tsdocgen configuration management.
//!
//! Configuration is read from the first file found of:
//! - the path given with `--config`
//! - `./tsdocgen.toml`
//! - `<config dir>/tsdocgen/config.toml` (`~/.config` on Linux)
//!
//! Compiler options may instead come from a `tsconfig.json`, which is JSON5
//! (comments and trailing commas are allowed there).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::docgen::ClassSymbolPolicy;
use crate::error::{DocgenError, Result};

/// Project-local configuration file name
pub const CONFIG_FILE_NAME: &str = "tsdocgen.toml";

/// tsdocgen configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocgenConfig {
    /// Options handed to the program builder
    #[serde(default)]
    pub compiler: CompilerOptions,

    /// Documentation extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options for building a program from root files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompilerOptions {
    /// Target language level. Accepted for tsconfig compatibility; it does
    /// not change parsing, binding or type rendering.
    #[serde(default)]
    pub target: ScriptTarget,

    /// Strategy for resolving relative import specifiers
    #[serde(default)]
    pub module_resolution: ModuleResolutionKind,

    /// Library definitions. Accepted for tsconfig compatibility; no library
    /// declarations are loaded, so globals such as `Promise` stay unresolved.
    #[serde(default)]
    pub lib: Vec<String>,

    /// Enables every strictness flag, `strict_null_checks` among them
    #[serde(default)]
    pub strict: bool,

    /// Overrides the value implied by `strict`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_null_checks: Option<bool>,

    /// Accept `.js`/`.jsx` files
    #[serde(default)]
    pub allow_js: bool,

    /// Do not follow imports; only root files enter the program
    #[serde(default)]
    pub no_resolve: bool,
}

impl CompilerOptions {
    pub fn strict_null_checks(&self) -> bool {
        self.strict_null_checks.unwrap_or(self.strict)
    }

    /// Read `compilerOptions` from a tsconfig file
    pub fn from_tsconfig(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocgenError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_tsconfig_str(&content).map_err(|e| match e {
            DocgenError::ConfigError { message } => DocgenError::ConfigError {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Parse the `compilerOptions` section of tsconfig text
    pub fn from_tsconfig_str(content: &str) -> Result<Self> {
        let file: TsConfigFile = json5::from_str(content).map_err(|e| DocgenError::ConfigError {
            message: format!("Failed to parse tsconfig: {}", e),
        })?;
        let ts = file.compiler_options;
        let defaults = Self::default();

        Ok(Self {
            target: ts.target.unwrap_or(defaults.target),
            module_resolution: ts.module_resolution.unwrap_or(defaults.module_resolution),
            lib: ts.lib.unwrap_or_default(),
            strict: ts.strict.unwrap_or(false),
            strict_null_checks: ts.strict_null_checks,
            allow_js: ts.allow_js.unwrap_or(false),
            no_resolve: ts.no_resolve.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    #[serde(default)]
    compiler_options: TsCompilerOptions,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TsCompilerOptions {
    target: Option<ScriptTarget>,
    module_resolution: Option<ModuleResolutionKind>,
    lib: Option<Vec<String>>,
    strict: Option<bool>,
    strict_null_checks: Option<bool>,
    allow_js: Option<bool>,
    no_resolve: Option<bool>,
}

/// Target language level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScriptTarget {
    Es3,
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    EsNext,
}

impl FromStr for ScriptTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es3" => Ok(Self::Es3),
            "es5" => Ok(Self::Es5),
            "es6" | "es2015" => Ok(Self::Es2015),
            "es2016" => Ok(Self::Es2016),
            "es2017" => Ok(Self::Es2017),
            "es2018" => Ok(Self::Es2018),
            "es2019" => Ok(Self::Es2019),
            "es2020" => Ok(Self::Es2020),
            "es2021" => Ok(Self::Es2021),
            "es2022" => Ok(Self::Es2022),
            "es2023" => Ok(Self::Es2023),
            "esnext" => Ok(Self::EsNext),
            other => Err(format!("unknown target '{}'", other)),
        }
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Es3 => "ES3",
            Self::Es5 => "ES5",
            Self::Es2015 => "ES2015",
            Self::Es2016 => "ES2016",
            Self::Es2017 => "ES2017",
            Self::Es2018 => "ES2018",
            Self::Es2019 => "ES2019",
            Self::Es2020 => "ES2020",
            Self::Es2021 => "ES2021",
            Self::Es2022 => "ES2022",
            Self::Es2023 => "ES2023",
            Self::EsNext => "ESNext",
        };
        f.write_str(name)
    }
}

impl TryFrom<String> for ScriptTarget {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScriptTarget> for String {
    fn from(value: ScriptTarget) -> Self {
        value.to_string()
    }
}

/// Module resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModuleResolutionKind {
    /// Extension candidates only, no directory index lookup
    Classic,
    #[default]
    Node10,
    Node16,
    NodeNext,
    Bundler,
}

impl ModuleResolutionKind {
    /// Whether `./dir` may resolve to `./dir/index.ts`
    pub fn resolves_directory_index(&self) -> bool {
        !matches!(self, Self::Classic)
    }
}

impl FromStr for ModuleResolutionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "node" | "node10" => Ok(Self::Node10),
            "node16" => Ok(Self::Node16),
            "nodenext" => Ok(Self::NodeNext),
            "bundler" => Ok(Self::Bundler),
            other => Err(format!("unknown module resolution '{}'", other)),
        }
    }
}

impl fmt::Display for ModuleResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Classic => "classic",
            Self::Node10 => "node10",
            Self::Node16 => "node16",
            Self::NodeNext => "nodenext",
            Self::Bundler => "bundler",
        };
        f.write_str(name)
    }
}

impl TryFrom<String> for ModuleResolutionKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleResolutionKind> for String {
    fn from(value: ModuleResolutionKind) -> Self {
        value.to_string()
    }
}

/// Documentation extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// What to do when a class name does not resolve to a symbol
    #[serde(default)]
    pub class_symbol_policy: ClassSymbolPolicy,

    /// Stamp top-level records with their source file
    #[serde(default = "default_include_file_names")]
    pub include_file_names: bool,
}

fn default_include_file_names() -> bool {
    true
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            class_symbol_policy: ClassSymbolPolicy::default(),
            include_file_names: default_include_file_names(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DocgenConfig {
    /// Load configuration, falling back to defaults when no file exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(DocgenError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
        }

        match Self::locate(explicit) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// The configuration file `load` would read, if any
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        Self::global_path().filter(|p| p.exists())
    }

    /// Per-user configuration file path
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tsdocgen").join("config.toml"))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;

        toml::from_str(&content).map_err(|e| DocgenError::ConfigError {
            message: format!("Failed to parse config {}: {}", path.display(), e),
        })
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DocgenError::ConfigError {
            message: format!("Failed to serialize config: {}", e),
        })
    }
}
