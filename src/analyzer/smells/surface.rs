//! Chart surface enumeration.
//!
//! Collects the YAML files of a chart and measures its configuration volume.
//! Two independent walks: YAML files (`.yaml`, `.yml`) are what checks scan,
//! while line counting also folds in `.tpl` templates.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, SmellError};

/// Extensions of files checks scan.
const YAML_EXTENSIONS: &[&str] = &[".yaml", ".yml"];

/// Extensions counted as configuration volume.
const CONFIG_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".tpl"];

/// Name of the directory holding chart templates.
pub const TEMPLATES_DIR: &str = "templates";

/// The enumerated surface of one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSurface {
    /// Chart root directory.
    pub root: PathBuf,
    /// YAML files under the root, in walk order.
    pub yaml_files: Vec<PathBuf>,
    /// Lines across YAML and template files.
    pub total_lines: usize,
}

impl ChartSurface {
    /// Enumerate a chart root.
    ///
    /// Fails only when the root itself is missing or not a directory;
    /// unreadable files inside the chart are skipped.
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(SmellError::MissingPath(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(SmellError::NotADirectory(root.to_path_buf()));
        }

        let total_lines = count_lines(root);
        let yaml_files = yaml_files(root);
        debug!(
            "{}: {} YAML files, {} configuration lines",
            root.display(),
            yaml_files.len(),
            total_lines
        );

        Ok(Self {
            root: root.to_path_buf(),
            yaml_files,
            total_lines,
        })
    }

    /// Number of YAML files.
    pub fn total_files(&self) -> usize {
        self.yaml_files.len()
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| extensions.iter().any(|ext| name.ends_with(ext)))
        .unwrap_or(false)
}

/// True for `.yaml` / `.yml` files.
pub fn is_yaml_file(path: &Path) -> bool {
    has_extension(path, YAML_EXTENSIONS)
}

/// True for files counted as configuration volume.
pub fn is_config_file(path: &Path) -> bool {
    has_extension(path, CONFIG_EXTENSIONS)
}

/// Regular files below `dir`, top-down: a directory's own files come
/// before its subdirectories, each group sorted by name. Symlinks to files
/// are listed; symlinked directories are not descended.
fn walk_files(dir: &Path) -> impl Iterator<Item = PathBuf> + use<> {
    let root = dir.to_path_buf();
    WalkDir::new(dir)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
        })
        .map(|entry| entry.into_path())
}

/// All YAML files under a chart root. Templates (`.tpl`) are excluded.
pub fn yaml_files(root: &Path) -> Vec<PathBuf> {
    walk_files(root).filter(|p| is_yaml_file(p)).collect()
}

/// Total lines across `.yaml`, `.yml` and `.tpl` files under a root.
///
/// Files that cannot be read as UTF-8 text are logged and skipped.
pub fn count_lines(root: &Path) -> usize {
    walk_files(root)
        .filter(|p| is_config_file(p))
        .filter_map(|p| read_source(&p))
        .map(|content| content.lines().count())
        .sum()
}

/// Read a source file, logging and returning `None` when it is unreadable.
pub fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("Skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}

/// Template sources (`.yaml`, `.tpl`) under `<root>/templates`.
///
/// Returns `None` when the chart has no templates directory.
pub fn template_files(root: &Path) -> Option<Vec<PathBuf>> {
    let dir = root.join(TEMPLATES_DIR);
    if !dir.is_dir() {
        return None;
    }
    Some(
        walk_files(&dir)
            .filter(|p| has_extension(p, &[".yaml", ".tpl"]))
            .collect(),
    )
}

/// First file named exactly `name` anywhere under the root.
pub fn find_file_named(root: &Path, name: &str) -> Option<PathBuf> {
    walk_files(root).find(|p| p.file_name().and_then(|n| n.to_str()) == Some(name))
}

/// File name of a path, or an empty string.
pub fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}
