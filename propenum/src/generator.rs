//! Generation runs: read every configured properties file, emit its enum and
//! write it to the output directory.

use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    emitter::{Emission, EnumEmitter},
    encoding,
    error::Error,
    properties::Format,
    tracker::DuplicateTracker,
    traits::Parser,
    types::PropertyEntry,
};

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in processing order.
    pub generated: Vec<PathBuf>,
    /// Sources that failed, only filled when failures are collected.
    pub failures: Vec<(PathBuf, Error)>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turns collected failures into an [`Error::Batch`].
    pub fn into_result(self) -> Result<Vec<PathBuf>, Error> {
        if self.failures.is_empty() {
            Ok(self.generated)
        } else {
            Err(Error::Batch(self.failures))
        }
    }
}

/// Runs generation for one [`Config`].
#[derive(Debug)]
pub struct Generator {
    config: Config,
    emitter: EnumEmitter,
    source_encoding: &'static Encoding,
    target_encoding: &'static Encoding,
}

impl Generator {
    /// Checks and compiles `config`.
    ///
    /// Everything that does not depend on individual source files is
    /// checked here, so an invalid configuration never writes anything.
    pub fn new(config: Config) -> Result<Self, Error> {
        let emitter = EnumEmitter::new(&config)?;
        let source_encoding = encoding::resolve(&config.source_encoding)?;
        let target_encoding = encoding::resolve_target(&config.target_encoding)?;

        debug!(
            source_encoding = source_encoding.name(),
            target_encoding = target_encoding.name(),
            files = config.files.len(),
            "generator configured"
        );

        Ok(Self {
            config,
            emitter,
            source_encoding,
            target_encoding,
        })
    }

    /// Path of a configured source file; relative entries are taken relative
    /// to the base directory.
    pub fn source_path(&self, file: &str) -> PathBuf {
        self.config.base_dir.join(file)
    }

    /// Reads the entries of `source` with the configured source encoding.
    pub fn read_entries(&self, source: &Path) -> Result<Vec<PropertyEntry>, Error> {
        if !source.is_file() {
            return Err(Error::MissingSource(source.to_path_buf()));
        }
        let format = Format::read_from_with_encoding(source, self.source_encoding)?;
        debug!(source = %source.display(), entries = format.entries.len(), "read properties");
        Ok(format.into())
    }

    /// Emits the enum for `source` without writing it.
    ///
    /// Uses a fresh duplicate tracker, so the result is independent of any
    /// run.
    pub fn preview(&self, source: &Path) -> Result<Emission, Error> {
        let mut tracker = DuplicateTracker::new();
        self.emit_file(&mut tracker, source)
    }

    /// Processes all configured files.
    ///
    /// Stops at the first failure and returns it, unless `continue-on-error`
    /// is set; then every failure is recorded in the report and the
    /// remaining files are still generated.
    pub fn generate(&self) -> Result<GenerationReport, Error> {
        if self.config.files.is_empty() {
            return Err(Error::config_error("no source files configured"));
        }

        let mut tracker = DuplicateTracker::new();
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut report = GenerationReport::default();

        for file in &self.config.files {
            let source = self.source_path(file);
            match self.generate_file(&mut tracker, &mut written, &source) {
                Ok(target) => report.generated.push(target),
                Err(err) if self.config.continue_on_error => {
                    warn!(source = %source.display(), error = %err, "generation failed");
                    report.failures.push((source, err));
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            generated = report.generated.len(),
            failed = report.failures.len(),
            fields = tracker.len(),
            "generation finished"
        );
        Ok(report)
    }

    fn emit_file(
        &self,
        tracker: &mut DuplicateTracker,
        source: &Path,
    ) -> Result<Emission, Error> {
        let entries = self.read_entries(source)?;
        self.emitter.emit(tracker, source, &entries)
    }

    /// `written` maps every output file of this run to its source; a
    /// different source resolving to the same output fails instead of
    /// replacing it.
    fn generate_file(
        &self,
        tracker: &mut DuplicateTracker,
        written: &mut HashMap<PathBuf, PathBuf>,
        source: &Path,
    ) -> Result<PathBuf, Error> {
        let output = self.emit_file(tracker, source)?;
        if let Some(previous_source) = written
            .get(&output.paths.output_file)
            .filter(|previous| previous.as_path() != source)
        {
            return Err(Error::OutputConflict {
                output: output.paths.output_file.clone(),
                source_file: source.to_path_buf(),
                previous_source: previous_source.clone(),
            });
        }
        let bytes = encoding::encode_java_source(&output.source, self.target_encoding);
        write_atomic(&output.paths.output_file, &bytes)?;
        written.insert(output.paths.output_file.clone(), source.to_path_buf());

        info!(
            source = %source.display(),
            target = %output.paths.output_file.display(),
            fields = output.spec.fields.len(),
            "generated enum {}",
            output.spec.qualified_name()
        );
        Ok(output.paths.output_file)
    }
}

/// Writes `bytes` to `path` through a temporary file in the same directory,
/// creating missing parent directories.
///
/// The target is replaced by a rename, so readers never see a partially
/// written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("resources");
        fs::create_dir_all(&base).unwrap();
        for (name, content) in files {
            let path = base.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let config = Config::new()
            .with_base_dir(&base)
            .with_output_dir(dir.path().join("generated"))
            .with_files(files.iter().map(|(name, _)| name.to_string()));
        (dir, config)
    }

    #[test]
    fn test_generate_writes_enum() {
        let (dir, config) = setup(&[("com/example/messages.properties", "myKey=My Key\n")]);
        let report = Generator::new(config).unwrap().generate().unwrap();

        let target = dir.path().join("generated/com/example/Messages.java");
        assert_eq!(report.generated, vec![target.clone()]);
        assert!(report.is_success());
        let java = fs::read_to_string(target).unwrap();
        assert!(java.starts_with("package com.example;\n"));
        assert!(java.contains("  MY_KEY(\"myKey\");\n"));
    }

    #[test]
    fn test_missing_source_fails() {
        let (_dir, config) = setup(&[]);
        let generator = Generator::new(config.with_files(["absent.properties"])).unwrap();
        assert!(matches!(generator.generate(), Err(Error::MissingSource(_))));
    }

    #[test]
    fn test_empty_file_list_is_a_config_error() {
        let (_dir, config) = setup(&[]);
        let generator = Generator::new(config).unwrap();
        assert!(matches!(generator.generate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_fail_fast_leaves_no_output() {
        let (dir, config) = setup(&[
            ("bad.properties", "dollar$key=x\n"),
            ("good.properties", "ok=1\n"),
        ]);
        let err = Generator::new(config).unwrap().generate().unwrap_err();
        assert!(matches!(err, Error::InvalidKey { .. }));
        assert!(!dir.path().join("generated/Bad.java").exists());
        assert!(!dir.path().join("generated/Good.java").exists());
    }

    #[test]
    fn test_continue_on_error_collects_failures() {
        let (dir, config) = setup(&[
            ("bad.properties", "myKey=1\nmy.key=2\n"),
            ("good.properties", "ok=1\n"),
        ]);
        let report = Generator::new(config.with_continue_on_error(true))
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(report.generated, vec![dir.path().join("generated/Good.java")]);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].1, Error::DuplicateField { .. }));
        assert!(matches!(report.into_result(), Err(Error::Batch(failures)) if failures.len() == 1));
    }

    #[test]
    fn test_sources_sharing_an_output_file_conflict() {
        let (dir, config) = setup(&[
            ("a/messages.properties", "first=1\n"),
            ("b/messages.properties", "second=2\n"),
        ]);
        let config = config.with_package_name(Some("com.example".to_string()));
        let err = Generator::new(config).unwrap().generate().unwrap_err();

        let target = dir.path().join("generated/com/example/Messages.java");
        match err {
            Error::OutputConflict {
                output,
                source_file,
                previous_source,
            } => {
                assert_eq!(output, target);
                assert!(source_file.ends_with("b/messages.properties"));
                assert!(previous_source.ends_with("a/messages.properties"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let java = fs::read_to_string(target).unwrap();
        assert!(java.contains("FIRST(\"first\")"));
    }

    #[test]
    fn test_listing_a_source_twice_regenerates_it() {
        let (_dir, config) = setup(&[("messages.properties", "a=b\n")]);
        let config = config.with_files(["messages.properties", "messages.properties"]);
        let report = Generator::new(config).unwrap().generate().unwrap();
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.generated[0], report.generated[1]);
    }

    #[test]
    fn test_source_and_target_encodings() {
        // "Größe" in ISO-8859-1 plus an escaped CJK character.
        let (dir, config) = setup(&[]);
        fs::write(
            config.base_dir.join("labels.properties"),
            b"size=Gr\xf6\xdfe \\u8515\n",
        )
        .unwrap();
        let config = config.with_files(["labels.properties"]);
        let config = config.with_encodings("ISO-8859-1", "ISO-8859-1");
        Generator::new(config).unwrap().generate().unwrap();

        let bytes = fs::read(dir.path().join("generated/Labels.java")).unwrap();
        let text: String = bytes.iter().map(|&b| b as char).collect();
        assert!(text.contains("value \"Gr\u{f6}\u{df}e \\u8515\""));
    }

    #[test]
    fn test_unsupported_encodings_are_rejected_up_front() {
        let (_dir, config) = setup(&[]);
        assert!(matches!(
            Generator::new(config.clone().with_encodings("klingon", "UTF-8")),
            Err(Error::UnsupportedEncoding(_))
        ));
        assert!(matches!(
            Generator::new(config.with_encodings("UTF-8", "UTF-16BE")),
            Err(Error::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_preview_does_not_write() {
        let (dir, config) = setup(&[("messages.properties", "a=b\n")]);
        let generator = Generator::new(config).unwrap();
        let output = generator
            .preview(&generator.source_path("messages.properties"))
            .unwrap();
        assert!(output.source.contains("  A(\"a\");"));
        assert!(!dir.path().join("generated").exists());
    }

    #[test]
    fn test_write_atomic_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/Out.java");
        write_atomic(&target, b"first").unwrap();
        write_atomic(&target, b"second").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"second");
        assert_eq!(fs::read_dir(target.parent().unwrap()).unwrap().count(), 1);
    }
}
