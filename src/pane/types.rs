//! Capability flags and the source model shared by panes and editors.

use std::fmt;
use std::path::{Path, PathBuf};

/// What a pane can do; options consult these before applying to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneCapabilities {
    pub supports_abbreviate_package_names: bool,
    pub supports_compact_directories: bool,
    pub supports_flatten_modules: bool,
    pub supports_folders_always_on_top: bool,
    pub supports_hide_empty_middle_packages: bool,
    pub supports_manual_order: bool,
    pub supports_show_excluded_files: bool,
    pub supports_show_library_contents: bool,
    pub supports_show_modules: bool,
    pub supports_sort_by_type: bool,
}

impl PaneCapabilities {
    /// Every capability switched on; typical for a project-structure view.
    pub fn all() -> Self {
        Self {
            supports_abbreviate_package_names: true,
            supports_compact_directories: true,
            supports_flatten_modules: true,
            supports_folders_always_on_top: true,
            supports_hide_empty_middle_packages: true,
            supports_manual_order: true,
            supports_show_excluded_files: true,
            supports_show_library_contents: true,
            supports_show_modules: true,
            supports_sort_by_type: true,
        }
    }
}

/// A file shown in an editor or represented by a pane node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Something a pane can select: a whole file or a node inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceElement {
    File(SourceFile),
    Node {
        file: SourceFile,
        /// Offset of the node in the document text.
        offset: usize,
        /// Display name of the node (function, class, section).
        label: String,
    },
}

impl SourceElement {
    /// The file containing this element.
    pub fn file(&self) -> &SourceFile {
        match self {
            SourceElement::File(file) => file,
            SourceElement::Node { file, .. } => file,
        }
    }
}
