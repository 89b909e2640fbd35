//! Persisted navigator state.
//!
//! Saved on shutdown (or on demand) and read once at startup. The schema is a
//! `navigator` node with the active pane and layout proportions, optional
//! project view options, and a `panes` list holding one opaque fragment per
//! pane id. Fragments for panes that never registered this session are
//! carried through unchanged.

pub mod storage;

use crate::pane::PaneFragment;
use par_navigator_config::ViewOptions;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml_ng::Value;

/// Top-level persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigatorState {
    /// Timestamp when the state was saved (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigator: Option<NavigatorElement>,
    /// Project-level toggle values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ViewOptions>,
    #[serde(default, deserialize_with = "lenient_panes")]
    pub panes: Vec<PaneStateEntry>,
}

/// Active view and layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigatorElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_view: Option<String>,
    /// Only meaningful together with `current_view`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_sub_view: Option<String>,
    /// Splitter proportions, each in `0.0..=1.0`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proportions: Vec<f32>,
}

impl NavigatorElement {
    pub fn is_empty(&self) -> bool {
        self.current_view.is_none() && self.proportions.is_empty()
    }
}

/// One pane's opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneStateEntry {
    pub id: String,
    #[serde(default = "null_fragment")]
    pub state: PaneFragment,
}

fn null_fragment() -> PaneFragment {
    PaneFragment::from_value(Value::Null)
}

/// Parse `panes` entry by entry so one broken entry doesn't sink the rest.
fn lenient_panes<'de, D>(deserializer: D) -> Result<Vec<PaneStateEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let items = match raw {
        Value::Sequence(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            log::warn!("Ignoring persisted panes node of unexpected shape: {:?}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_yaml_ng::from_value::<PaneStateEntry>(item) {
            Ok(entry) if !entry.id.trim().is_empty() => Some(entry),
            Ok(_) => {
                log::warn!("Ignoring persisted pane state with a blank id");
                None
            }
            Err(e) => {
                log::warn!("Ignoring malformed persisted pane state: {}", e);
                None
            }
        })
        .collect())
}
