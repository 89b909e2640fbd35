//! The navigator's toggles as one data table.
//!
//! Every toggle is an [`OptionSpec`]: how to read and write it, which panes
//! it applies to, and what a change does to the panes. Stored values live in
//! [`OptionStores`]; a read is only meaningful together with
//! [`OptionSpec::is_enabled`] for the pane in question.

mod stores;

pub use stores::OptionStores;

use crate::pane::PaneCapabilities;
use par_navigator_config::{EnvironmentCapabilities, SharedSettings, ViewOptions};

/// Every toggle the navigator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    AbbreviatePackageNames,
    AutoscrollFromSource,
    AutoscrollToSource,
    OpenInPreviewTab,
    CompactDirectories,
    FlattenModules,
    FlattenPackages,
    FoldersAlwaysOnTop,
    HideEmptyMiddlePackages,
    ManualOrder,
    ShowExcludedFiles,
    ShowLibraryContents,
    ShowMembers,
    ShowModules,
    ShowVisibilityIcons,
    SortByType,
}

impl OptionKind {
    pub const ALL: [OptionKind; 16] = [
        OptionKind::AbbreviatePackageNames,
        OptionKind::AutoscrollFromSource,
        OptionKind::AutoscrollToSource,
        OptionKind::OpenInPreviewTab,
        OptionKind::CompactDirectories,
        OptionKind::FlattenModules,
        OptionKind::FlattenPackages,
        OptionKind::FoldersAlwaysOnTop,
        OptionKind::HideEmptyMiddlePackages,
        OptionKind::ManualOrder,
        OptionKind::ShowExcludedFiles,
        OptionKind::ShowLibraryContents,
        OptionKind::ShowMembers,
        OptionKind::ShowModules,
        OptionKind::ShowVisibilityIcons,
        OptionKind::SortByType,
    ];

    pub fn spec(self) -> &'static OptionSpec {
        // Table order matches `ALL`
        &OPTION_TABLE[self as usize]
    }
}

/// What the panes need after a stored value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    None,
    /// `update_from_root(false)`
    Rebuild,
    /// `update_from_root(true)`: node order changed
    RebuildWithComparator,
}

/// Where a toggle's value is kept.
#[derive(Clone, Copy)]
pub enum OptionSlot {
    /// A field of [`ViewOptions`], mirrored into all three stores
    View {
        get: fn(&ViewOptions) -> bool,
        set: fn(&mut ViewOptions, bool),
    },
    /// `open_in_preview_tab`, which only exists in the shared store
    PreviewTab,
}

/// Inputs to an enablement predicate besides the pane.
pub struct OptionContext<'a> {
    pub options: &'a ViewOptions,
    pub environment: &'a EnvironmentCapabilities,
}

/// One row of the toggle table.
pub struct OptionSpec {
    pub kind: OptionKind,
    pub name: &'static str,
    pub slot: OptionSlot,
    enabled: fn(&OptionContext<'_>, &PaneCapabilities) -> bool,
    pub refresh: Refresh,
}

impl OptionSpec {
    pub fn is_enabled(&self, ctx: &OptionContext<'_>, caps: &PaneCapabilities) -> bool {
        (self.enabled)(ctx, caps)
    }

    /// Read from the project store (or the shared store for the preview tab).
    pub fn read(&self, project: &ViewOptions, shared: &SharedSettings) -> bool {
        match self.slot {
            OptionSlot::View { get, .. } => get(project),
            OptionSlot::PreviewTab => shared.open_in_preview_tab,
        }
    }

    /// Label for menus. Hide-empty reads differently once packages are
    /// flattened.
    pub fn display_name(&self, options: &ViewOptions) -> &'static str {
        match self.kind {
            OptionKind::HideEmptyMiddlePackages if !options.flatten_packages => {
                "Compact Middle Packages"
            }
            _ => self.name,
        }
    }
}

fn always(_: &OptionContext<'_>, _: &PaneCapabilities) -> bool {
    true
}

fn flatten_packages_enabled(ctx: &OptionContext<'_>, _: &PaneCapabilities) -> bool {
    ctx.environment.supports_flatten_packages
}

macro_rules! view_slot {
    ($field:ident) => {
        OptionSlot::View {
            get: |o| o.$field,
            set: |o, v| o.$field = v,
        }
    };
}

static OPTION_TABLE: [OptionSpec; 16] = [
    OptionSpec {
        kind: OptionKind::AbbreviatePackageNames,
        name: "Abbreviate Qualified Package Names",
        slot: view_slot!(abbreviate_package_names),
        enabled: |ctx, caps| {
            ctx.options.flatten_packages
                && flatten_packages_enabled(ctx, caps)
                && caps.supports_abbreviate_package_names
        },
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::AutoscrollFromSource,
        name: "Always Select Opened File",
        slot: view_slot!(autoscroll_from_source),
        enabled: always,
        refresh: Refresh::None,
    },
    OptionSpec {
        kind: OptionKind::AutoscrollToSource,
        name: "Navigate with Single Click",
        slot: view_slot!(autoscroll_to_source),
        enabled: always,
        refresh: Refresh::None,
    },
    OptionSpec {
        kind: OptionKind::OpenInPreviewTab,
        name: "Enable Preview Tab",
        slot: OptionSlot::PreviewTab,
        enabled: always,
        refresh: Refresh::None,
    },
    OptionSpec {
        kind: OptionKind::CompactDirectories,
        name: "Compact Middle Directories",
        slot: view_slot!(compact_directories),
        enabled: |_, caps| caps.supports_compact_directories,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::FlattenModules,
        name: "Flatten Modules",
        slot: view_slot!(flatten_modules),
        enabled: |_, caps| caps.supports_flatten_modules,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::FlattenPackages,
        name: "Flatten Packages",
        slot: view_slot!(flatten_packages),
        enabled: flatten_packages_enabled,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::FoldersAlwaysOnTop,
        name: "Folders Always on Top",
        slot: view_slot!(folders_always_on_top),
        enabled: |_, caps| caps.supports_folders_always_on_top,
        refresh: Refresh::RebuildWithComparator,
    },
    OptionSpec {
        kind: OptionKind::HideEmptyMiddlePackages,
        name: "Hide Empty Middle Packages",
        slot: view_slot!(hide_empty_middle_packages),
        enabled: |ctx, caps| {
            caps.supports_hide_empty_middle_packages
                && ctx.environment.supports_hide_empty_middle_packages
        },
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::ManualOrder,
        name: "Manual Order",
        slot: view_slot!(manual_order),
        enabled: |_, caps| caps.supports_manual_order,
        refresh: Refresh::RebuildWithComparator,
    },
    OptionSpec {
        kind: OptionKind::ShowExcludedFiles,
        name: "Show Excluded Files",
        slot: view_slot!(show_excluded_files),
        enabled: |_, caps| caps.supports_show_excluded_files,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::ShowLibraryContents,
        name: "Show External Libraries",
        slot: view_slot!(show_library_contents),
        enabled: |_, caps| caps.supports_show_library_contents,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::ShowMembers,
        name: "Show Members",
        slot: view_slot!(show_members),
        enabled: |ctx, _| ctx.environment.show_members_supported,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::ShowModules,
        name: "Show Modules",
        slot: view_slot!(show_modules),
        enabled: |_, caps| caps.supports_show_modules,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::ShowVisibilityIcons,
        name: "Show Visibility Icons",
        slot: view_slot!(show_visibility_icons),
        enabled: |ctx, _| ctx.environment.show_visibility_icons_applicable,
        refresh: Refresh::Rebuild,
    },
    OptionSpec {
        kind: OptionKind::SortByType,
        name: "Sort by Type",
        slot: view_slot!(sort_by_type),
        enabled: |_, caps| caps.supports_sort_by_type,
        refresh: Refresh::RebuildWithComparator,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_kinds() {
        for kind in OptionKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_abbreviate_requires_flatten_selected() {
        let environment = EnvironmentCapabilities::default();
        let mut options = ViewOptions::default();
        let caps = PaneCapabilities::all();
        let spec = OptionKind::AbbreviatePackageNames.spec();

        let ctx = OptionContext {
            options: &options,
            environment: &environment,
        };
        assert!(!spec.is_enabled(&ctx, &caps));

        options.flatten_packages = true;
        let ctx = OptionContext {
            options: &options,
            environment: &environment,
        };
        assert!(spec.is_enabled(&ctx, &caps));
        assert!(!spec.is_enabled(&ctx, &PaneCapabilities::default()));
    }

    #[test]
    fn test_environment_gates() {
        let environment = EnvironmentCapabilities {
            show_members_supported: false,
            ..Default::default()
        };
        let options = ViewOptions::default();
        let ctx = OptionContext {
            options: &options,
            environment: &environment,
        };
        let caps = PaneCapabilities::all();
        assert!(!OptionKind::ShowMembers.spec().is_enabled(&ctx, &caps));
        assert!(OptionKind::ShowVisibilityIcons.spec().is_enabled(&ctx, &caps));
    }

    #[test]
    fn test_comparator_refreshes() {
        let with_comparator: Vec<OptionKind> = OptionKind::ALL
            .into_iter()
            .filter(|k| k.spec().refresh == Refresh::RebuildWithComparator)
            .collect();
        assert_eq!(
            with_comparator,
            vec![
                OptionKind::FoldersAlwaysOnTop,
                OptionKind::ManualOrder,
                OptionKind::SortByType
            ]
        );
    }

    #[test]
    fn test_hide_empty_display_name() {
        let spec = OptionKind::HideEmptyMiddlePackages.spec();
        let mut options = ViewOptions::default();
        assert_eq!(spec.display_name(&options), "Compact Middle Packages");
        options.flatten_packages = true;
        assert_eq!(spec.display_name(&options), "Hide Empty Middle Packages");
    }
}
