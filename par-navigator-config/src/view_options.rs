//! Per-project toggle state for the navigator view.
//!
//! One `ViewOptions` value lives per project session, a second one serves as
//! the template for newly opened projects. Both are plain data; the option
//! table in the main crate decides which pane a flag applies to.

use crate::defaults;
use serde::{Deserialize, Serialize};

/// Every boolean toggle the navigator view knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    #[serde(default = "defaults::bool_false")]
    pub abbreviate_package_names: bool,
    #[serde(default = "defaults::bool_false")]
    pub autoscroll_from_source: bool,
    #[serde(default = "defaults::bool_false")]
    pub autoscroll_to_source: bool,
    #[serde(default = "defaults::bool_false")]
    pub compact_directories: bool,
    #[serde(default = "defaults::bool_false")]
    pub flatten_modules: bool,
    #[serde(default = "defaults::bool_false")]
    pub flatten_packages: bool,
    #[serde(default = "defaults::bool_true")]
    pub folders_always_on_top: bool,
    #[serde(default = "defaults::bool_true")]
    pub hide_empty_middle_packages: bool,
    #[serde(default = "defaults::bool_false")]
    pub manual_order: bool,
    #[serde(default = "defaults::bool_true")]
    pub show_excluded_files: bool,
    #[serde(default = "defaults::bool_true")]
    pub show_library_contents: bool,
    #[serde(default = "defaults::bool_false")]
    pub show_members: bool,
    #[serde(default = "defaults::bool_true")]
    pub show_modules: bool,
    #[serde(default = "defaults::bool_false")]
    pub show_visibility_icons: bool,
    #[serde(default = "defaults::bool_false")]
    pub sort_by_type: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            abbreviate_package_names: false,
            autoscroll_from_source: false,
            autoscroll_to_source: false,
            compact_directories: false,
            flatten_modules: false,
            flatten_packages: false,
            folders_always_on_top: true,
            hide_empty_middle_packages: true,
            manual_order: false,
            show_excluded_files: true,
            show_library_contents: true,
            show_members: false,
            show_modules: true,
            show_visibility_icons: false,
            sort_by_type: false,
        }
    }
}
