//! Opaque per-pane state payload.
//!
//! The navigator never interprets a fragment: it stores what a pane hands
//! out on save and gives it back on load, buffering it when the pane has not
//! registered yet.

use crate::error::PaneStateError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneFragment(Value);

impl PaneFragment {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Serialize a pane's typed state into a fragment.
    pub fn encode<T: Serialize>(pane_id: &str, state: &T) -> Result<Self, PaneStateError> {
        serde_yaml_ng::to_value(state)
            .map(Self)
            .map_err(|e| PaneStateError::Serialize {
                pane_id: pane_id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Decode the fragment into a pane's typed state.
    pub fn decode<T: DeserializeOwned>(&self, pane_id: &str) -> Result<T, PaneStateError> {
        serde_yaml_ng::from_value(self.0.clone()).map_err(|e| PaneStateError::Malformed {
            pane_id: pane_id.to_string(),
            reason: e.to_string(),
        })
    }
}
