//! Assembly and rendering of generated enum types.
//!
//! Emission happens in two steps. [`EnumEmitter::build_spec`] turns the
//! entries of one properties file into an [`EnumSpec`], normalizing,
//! validating and de-duplicating every key on the way. [`EnumEmitter::render`]
//! then produces the Java source text. Nothing is written here; the
//! [`crate::generator`] takes care of files.

use std::path::{Path, PathBuf};

use indoc::indoc;
use tracing::debug;

use crate::{
    config::Config,
    error::Error,
    javadoc::build_javadoc,
    naming::normalize_key,
    paths::ResolvedPaths,
    template::JavadocTemplate,
    tracker::DuplicateTracker,
    types::{EnumSpec, GeneratedField, PropertyEntry},
    validation::FieldPattern,
};

/// Indentation of members inside the enum body.
const MEMBER_INDENT: &str = "  ";

/// The generated output for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub spec: EnumSpec,
    pub paths: ResolvedPaths,
    /// Complete Java source text.
    pub source: String,
}

/// Builds enum types from property entries.
///
/// Holds the compiled per-run settings; construct it once per run with
/// [`EnumEmitter::new`] and share a single [`DuplicateTracker`] across all
/// calls.
#[derive(Debug, Clone)]
pub struct EnumEmitter {
    base_dir: PathBuf,
    output_dir: PathBuf,
    package_name: Option<String>,
    prefix: String,
    prefixed_only: bool,
    interface_name: Option<String>,
    line_length: usize,
    field_pattern: FieldPattern,
    template: JavadocTemplate,
}

impl EnumEmitter {
    /// Compiles the emission settings of `config`.
    ///
    /// Fails with [`Error::Config`] or [`Error::InvalidPattern`] if the
    /// configuration, the javadoc template or the field pattern is invalid.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let field_pattern = FieldPattern::new(&config.field_pattern)?;
        let template = JavadocTemplate::parse(&config.enum_javadoc)?;

        debug!(
            base_dir = %config.base_dir.display(),
            output_dir = %config.output_dir.display(),
            prefix = %config.prefix,
            prefixed_only = config.prefixed_only,
            pattern = %field_pattern.as_str(),
            "compiled emitter settings"
        );

        Ok(Self {
            base_dir: config.base_dir.clone(),
            output_dir: config.output_dir.clone(),
            package_name: config.package_name.clone(),
            prefix: config.prefix.clone(),
            prefixed_only: config.prefixed_only,
            interface_name: config.implement.clone(),
            line_length: config.line_length,
            field_pattern,
            template,
        })
    }

    /// Resolves package, type name and output file for `source`.
    pub fn resolve_paths(&self, source: &Path) -> Result<ResolvedPaths, Error> {
        ResolvedPaths::resolve(
            &self.base_dir,
            source,
            &self.output_dir,
            self.package_name.as_deref(),
        )
    }

    /// Whether `key` survives the prefix filter.
    pub fn accepts(&self, key: &str) -> bool {
        !self.prefixed_only || key.starts_with(&self.prefix)
    }

    /// Builds the enum model for the entries of `source`.
    ///
    /// Entries keep their order. The first key that yields an invalid or
    /// duplicate identifier aborts the whole type.
    pub fn build_spec(
        &self,
        tracker: &mut DuplicateTracker,
        source: &Path,
        entries: &[PropertyEntry],
    ) -> Result<(EnumSpec, ResolvedPaths), Error> {
        let paths = self.resolve_paths(source)?;
        let qualified = paths.qualified_type_name();
        tracker.begin_type(&qualified);

        let mut spec = EnumSpec::new(paths.type_name.clone(), paths.package_name.clone());
        spec.interface_name = self.interface_name.clone();
        spec.source_path = paths.relative_source.clone();
        spec.resource_base_name = paths.resource_base_name.clone();

        for entry in entries {
            if !self.accepts(&entry.key) {
                debug!(key = %entry.key, prefix = %self.prefix, "skipping key without prefix");
                continue;
            }

            let identifier = normalize_key(&entry.key, &self.prefix);
            self.field_pattern.validate(&entry.key, &identifier)?;
            tracker.register(&qualified, &identifier, &entry.key)?;
            debug!(key = %entry.key, identifier = %identifier, "generated enum field");

            spec.push_field(GeneratedField {
                identifier,
                original_key: entry.key.clone(),
                value: entry.value.clone(),
            });
        }

        debug!(enum_type = %qualified, fields = ?spec.identifiers(), "built enum model");
        Ok((spec, paths))
    }

    /// Renders the Java source of `spec`.
    pub fn render(&self, spec: &EnumSpec) -> String {
        let mut out = String::new();

        if !spec.package_name.is_empty() {
            out.push_str(&format!("package {};\n\n", spec.package_name));
        }

        out.push_str(&self.javadoc(
            &format!(
                "Auto generated enum type for property file \"{}\".",
                spec.source_path
            ),
            "",
        ));

        out.push_str("public enum ");
        out.push_str(&spec.type_name);
        if let Some(interface) = &spec.interface_name {
            out.push_str(" implements ");
            out.push_str(interface);
        }
        out.push_str(" {\n\n");

        let constants: Vec<String> = spec
            .fields
            .iter()
            .map(|field| {
                format!(
                    "{}{}{}({})",
                    self.javadoc(
                        &self.template.render(&field.original_key, &field.value),
                        MEMBER_INDENT,
                    ),
                    MEMBER_INDENT,
                    field.identifier,
                    java_string_literal(&field.original_key)
                )
            })
            .collect();
        out.push_str(&constants.join(",\n\n"));
        out.push_str(";\n\n");

        out.push_str(&self.javadoc("The original key in the property file.", MEMBER_INDENT));
        out.push_str(MEMBER_INDENT);
        out.push_str("private final String originalKey;\n\n");

        out.push_str(&self.javadoc(
            &format!(
                "Constructs a new {{@link {}}}.\n\n@param originalKey\n         the property's key as it's denoted in the properties file",
                spec.type_name
            ),
            MEMBER_INDENT,
        ));
        out.push_str(&indent_block(
            &format!(
                indoc! {"
                    {}(String originalKey) {{
                      this.originalKey = originalKey;
                    }}

                "},
                spec.type_name
            ),
            MEMBER_INDENT,
        ));

        out.push_str(&self.javadoc(
            "@return the source properties file's base name",
            MEMBER_INDENT,
        ));
        out.push_str(&indent_block(
            &format!(
                indoc! {"
                    public final String getBaseName() {{
                      return {};
                    }}

                "},
                java_string_literal(&spec.resource_base_name)
            ),
            MEMBER_INDENT,
        ));

        out.push_str(&self.javadoc("@return the original property key.", MEMBER_INDENT));
        out.push_str(&indent_block(
            indoc! {"
                @Override
                public final String toString() {
                  return originalKey;
                }
            "},
            MEMBER_INDENT,
        ));

        out.push_str("}\n");
        out
    }

    /// Builds and renders the enum for `source` in one go.
    pub fn emit(
        &self,
        tracker: &mut DuplicateTracker,
        source: &Path,
        entries: &[PropertyEntry],
    ) -> Result<Emission, Error> {
        let (spec, paths) = self.build_spec(tracker, source, entries)?;
        let source = self.render(&spec);
        Ok(Emission {
            spec,
            paths,
            source,
        })
    }

    fn javadoc(&self, description: &str, indent: &str) -> String {
        build_javadoc(&sanitize_comment(description), indent, self.line_length)
    }
}

/// Formats `value` as a Java string literal, quotes included.
///
/// Control characters use octal escapes; `\u` escapes are avoided since Java
/// resolves them before lexing.
pub fn java_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\x08' => literal.push_str("\\b"),
            '\x0c' => literal.push_str("\\f"),
            c if c.is_ascii_control() => literal.push_str(&format!("\\{:03o}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Makes arbitrary text safe inside a javadoc block.
///
/// `*/` would end the comment and `\u` starts a unicode escape even inside
/// comments, so both are replaced by HTML entities.
pub fn sanitize_comment(text: &str) -> String {
    text.replace("*/", "*&#47;").replace("\\u", "&#92;u")
}

/// Prefixes every non-empty line of `block` with `indent`.
fn indent_block(block: &str, indent: &str) -> String {
    block
        .split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect()
}
