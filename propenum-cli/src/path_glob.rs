use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, warn};

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

/// Directory part of `pattern` before its first glob meta-character, e.g.
/// `com/example` for `com/example/**/*.properties`.
fn static_prefix_dir(pattern: &str) -> &str {
    let meta = pattern
        .find(|c| matches!(c, '*' | '?' | '[' | '{'))
        .unwrap_or(pattern.len());
    match pattern[..meta].rfind('/') {
        Some(slash) => &pattern[..slash],
        None => "",
    }
}

/// `path` relative to `base_dir`, `/`-separated.
fn relative_slash_path(base_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base_dir).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    parts.map(|parts| parts.join("/"))
}

fn walk_matches(base_dir: &Path, pattern: &str, matcher: &GlobMatcher) -> Vec<String> {
    let root: PathBuf = base_dir.join(static_prefix_dir(pattern));
    if !root.is_dir() {
        return Vec::new();
    }

    let walker = WalkBuilder::new(&root)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .hidden(false)
        .ignore(true)
        .parents(true)
        .build();

    let mut out: Vec<String> = walker
        .filter_map(Result::ok)
        .filter(|dent| dent.file_type().is_some_and(|t| t.is_file()))
        .filter_map(|dent| relative_slash_path(base_dir, dent.path()))
        .filter(|relative| matcher.is_match(relative))
        .collect();
    out.sort();
    out
}

/// Expands glob patterns in the configured source list.
///
/// Patterns are matched against paths relative to `base_dir`, walking only
/// the directory before the first meta-character (in parallel, honouring
/// `.gitignore`). Matches of one pattern are sorted; entries keep their
/// configured order and duplicates are dropped. Entries without glob
/// meta-characters are kept as they are, even if the file does not exist, so
/// generation reports them as missing.
pub fn expand_source_globs(base_dir: &Path, files: &[String]) -> Result<Vec<String>, String> {
    let expanded: Vec<Vec<String>> = files
        .par_iter()
        .map(|entry| -> Result<Vec<String>, String> {
            if !has_glob_meta(entry) {
                return Ok(vec![entry.clone()]);
            }
            let matcher = GlobBuilder::new(entry)
                .literal_separator(true)
                .build()
                .map_err(|e| format!("Invalid glob pattern '{}': {}", entry, e))?
                .compile_matcher();
            let matches = walk_matches(base_dir, entry, &matcher);
            if matches.is_empty() {
                warn!(pattern = %entry, base_dir = %base_dir.display(), "glob matched no files");
            } else {
                debug!(pattern = %entry, matches = matches.len(), "expanded glob");
            }
            Ok(matches)
        })
        .collect::<Result<_, _>>()?;

    let mut seen: HashSet<String> = HashSet::new();
    Ok(expanded
        .into_iter()
        .flatten()
        .filter(|file| seen.insert(file.clone()))
        .collect())
}
