//! Package, type and output path derivation for a properties file.
//!
//! Given `base_dir = "src/main/resources"` and the source
//! `"src/main/resources/com/example/messages.properties"`, the generated enum is
//! `com.example.Messages`, written to `<output_dir>/com/example/Messages.java`,
//! and its resource base name is `com.example.messages`.

use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Extension of generated source files.
pub const TARGET_EXTENSION: &str = "java";

/// Everything derived from the location of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Package of the generated type; empty for the default package.
    pub package_name: String,
    /// Simple name of the generated enum type.
    pub type_name: String,
    /// Full path of the file to generate.
    pub output_file: PathBuf,
    /// Fully qualified name of the source resource, e.g. `com.example.messages`.
    pub resource_base_name: String,
    /// Source path relative to the base directory, always `/`-separated.
    pub relative_source: String,
}

impl ResolvedPaths {
    /// Resolves all paths for `source`, which must be located below `base_dir`.
    ///
    /// `explicit_package` replaces the derived package for the generated
    /// type only; the resource base name always reflects where the resource
    /// actually lives.
    pub fn resolve(
        base_dir: &Path,
        source: &Path,
        output_dir: &Path,
        explicit_package: Option<&str>,
    ) -> Result<Self, Error> {
        let derived_package = package_name(base_dir, source)?;
        let stem = file_stem(source)?;
        let package_name = explicit_package
            .map(str::to_string)
            .unwrap_or_else(|| derived_package.clone());
        let type_name = type_name(&stem);

        Ok(Self {
            output_file: target_file(output_dir, &package_name, &type_name),
            resource_base_name: qualify(&derived_package, &stem),
            relative_source: relative_components(base_dir, source)?.join("/"),
            package_name,
            type_name,
        })
    }

    /// Fully qualified name of the generated type.
    pub fn qualified_type_name(&self) -> String {
        qualify(&self.package_name, &self.type_name)
    }
}

/// Builds the package name from the parent directory of `source`, relative to
/// `base_dir`, e.g. `com.example` for `<base_dir>/com/example/File.properties`.
///
/// A source that sits directly in `base_dir` belongs to the default package,
/// which is the empty string.
pub fn package_name(base_dir: &Path, source: &Path) -> Result<String, Error> {
    let mut components = relative_components(base_dir, source)?;
    components.pop();
    Ok(components.join("."))
}

/// Builds the resource base name, e.g. `com.example.properties` for
/// `/foo/bar/com/example/properties.properties` below `/foo/bar`.
pub fn base_name(base_dir: &Path, source: &Path) -> Result<String, Error> {
    Ok(qualify(&package_name(base_dir, source)?, &file_stem(source)?))
}

/// Derives the enum type name from a file stem by upper-casing its first
/// character (`messages` becomes `Messages`).
pub fn type_name(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds `<output_dir>/<package as directories>/<type_name>.java`.
pub fn target_file(output_dir: &Path, package_name: &str, type_name: &str) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for segment in package_name.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.{}", type_name, TARGET_EXTENSION));
    path
}

fn qualify(package_name: &str, name: &str) -> String {
    if package_name.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package_name, name)
    }
}

fn file_stem(source: &Path) -> Result<String, Error> {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid_source(source, Path::new("")))
}

/// Lexically relativizes `source` against `base_dir`, returning the normal
/// components (directories and file name) in order.
fn relative_components(base_dir: &Path, source: &Path) -> Result<Vec<String>, Error> {
    let relative = source
        .strip_prefix(base_dir)
        .map_err(|_| invalid_source(source, base_dir))?;

    let mut components = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => components.push(
                part.to_str()
                    .ok_or_else(|| invalid_source(source, base_dir))?
                    .to_string(),
            ),
            Component::CurDir => {}
            _ => return Err(invalid_source(source, base_dir)),
        }
    }

    if components.is_empty() {
        return Err(invalid_source(source, base_dir));
    }
    Ok(components)
}

fn invalid_source(source: &Path, base_dir: &Path) -> Error {
    Error::InvalidSourcePath {
        path: source.to_path_buf(),
        base: base_dir.to_path_buf(),
    }
}
