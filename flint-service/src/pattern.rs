//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Expansion of input file arguments

use flint_core::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WILDCARDS: &[char] = &['*', '?'];

fn has_wildcard(s: &str) -> bool {
    s.contains(WILDCARDS)
}

/// Sorted and de-duplicated files of paths and glob patterns (`*`, `?`)
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if has_wildcard(input) {
            let compiled = CompiledPattern::new(input, false)?;
            let matches = compiled.find()?;
            if matches.is_empty() {
                warn!("No files match '{}'", input);
            }
            files.extend(matches.into_iter().map(|(path, _)| path));
        } else {
            let path = PathBuf::from(input);
            if !path.is_file() {
                return Err(Error::input(path, "Input raster is not a file"));
            }
            files.push(path);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Files matching a pattern with `{name}` placeholders, ordered by the placeholder values.
///
/// `rasters/forest_{year}.tif` matches `rasters/forest_2000.tif` with key `["2000"]`.
#[derive(Debug)]
pub struct RasterPattern {
    pub pattern: String,
    /// Placeholder names in pattern order
    pub keys: Vec<String>,
    pub files: BTreeMap<Vec<String>, PathBuf>,
}

impl RasterPattern {
    pub fn find(pattern: &str) -> Result<RasterPattern> {
        let compiled = CompiledPattern::new(pattern, true)?;
        if compiled.keys.is_empty() {
            return Err(Error::Pattern(format!(
                "'{}' contains no {{name}} placeholder",
                pattern
            )));
        }
        let mut files = BTreeMap::new();
        for (path, key) in compiled.find()? {
            if let Some(other) = files.insert(key.clone(), path.clone()) {
                return Err(Error::Pattern(format!(
                    "{} and {} have the same key {:?}",
                    other.display(),
                    path.display(),
                    key
                )));
            }
        }
        if files.is_empty() {
            return Err(Error::input(pattern, "no files match the raster pattern"));
        }
        Ok(RasterPattern {
            pattern: pattern.to_string(),
            keys: compiled.keys,
            files,
        })
    }
    /// Files in key order
    pub fn sorted_files(&self) -> Vec<PathBuf> {
        self.files.values().cloned().collect()
    }
}

/// Pattern split into a literal base directory and a regex for the remaining path
struct CompiledPattern {
    base: PathBuf,
    depth: usize,
    regex: Regex,
    keys: Vec<String>,
}

impl CompiledPattern {
    fn new(pattern: &str, placeholders: bool) -> Result<CompiledPattern> {
        let is_special = |c: char| WILDCARDS.contains(&c) || (placeholders && c == '{');
        let components = pattern.split('/').collect::<Vec<_>>();
        let first = components
            .iter()
            .position(|c| c.contains(is_special))
            .ok_or_else(|| Error::Pattern(format!("'{}' is no pattern", pattern)))?;
        let base = match components[..first].join("/") {
            ref s if s.is_empty() && pattern.starts_with('/') => PathBuf::from("/"),
            ref s if s.is_empty() => PathBuf::from("."),
            s => PathBuf::from(s),
        };
        let rest = &components[first..];

        let mut expr = String::from("^");
        let mut keys = Vec::new();
        let mut chars = rest.join("/").chars().collect::<Vec<_>>().into_iter();
        while let Some(c) = chars.next() {
            match c {
                '*' => expr.push_str("[^/]*"),
                '?' => expr.push_str("[^/]"),
                '{' if placeholders => {
                    let name = chars.by_ref().take_while(|c| *c != '}').collect::<String>();
                    if !is_identifier(&name) {
                        return Err(Error::Pattern(format!(
                            "invalid placeholder {{{}}} in '{}'",
                            name, pattern
                        )));
                    }
                    if keys.contains(&name) {
                        return Err(Error::Pattern(format!(
                            "placeholder {{{}}} used twice in '{}'",
                            name, pattern
                        )));
                    }
                    expr.push_str(&format!("(?P<{}>[^/]+)", name));
                    keys.push(name);
                }
                c => expr.push_str(&regex::escape(&c.to_string())),
            }
        }
        expr.push('$');
        let regex = Regex::new(&expr).map_err(|e| Error::Pattern(e.to_string()))?;
        debug!("Pattern '{}': base {}, regex {}", pattern, base.display(), expr);
        Ok(CompiledPattern {
            base,
            depth: rest.len(),
            regex,
            keys,
        })
    }
    /// Matching files with their placeholder values
    fn find(&self) -> Result<Vec<(PathBuf, Vec<String>)>> {
        let mut matches = Vec::new();
        if !self.base.is_dir() {
            return Ok(matches);
        }
        let walker = WalkDir::new(&self.base)
            .min_depth(self.depth)
            .max_depth(self.depth)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| Error::input(&self.base, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = relative_path(entry.path(), &self.base);
            if let Some(caps) = self.regex.captures(&rel) {
                let key = self
                    .keys
                    .iter()
                    .map(|k| caps.name(k).map_or("", |m| m.as_str()).to_string())
                    .collect();
                let path = entry.path().strip_prefix(".").unwrap_or(entry.path());
                matches.push((path.to_path_buf(), key));
            }
        }
        Ok(matches)
    }
}

fn relative_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
