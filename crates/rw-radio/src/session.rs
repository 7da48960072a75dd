//! Per-document transform state.

use rw_radio_common::DEFAULT_GROUP_PREFIX;
use uuid::Uuid;

use crate::slug::Slugger;

/// State of one transform pass over one document.
///
/// Created by [`RadioTransform::session`](crate::RadioTransform::session) and
/// dropped when the pass ends, so stable ids are unique within a pass and
/// nothing accumulates across documents.
#[derive(Debug)]
pub struct TransformSession {
    run_id: u64,
    slugger: Slugger,
}

impl TransformSession {
    /// Create a session with the given run id.
    #[must_use]
    pub fn new(run_id: u64) -> Self {
        Self {
            run_id,
            slugger: Slugger::new(),
        }
    }

    /// Sequence number of this pass within its transform.
    #[must_use]
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Stable id for an option, unique within this session.
    pub fn stable_id(&mut self, seed: &str) -> String {
        self.slugger.slug(seed)
    }

    /// Group for a radio list written without `group=`.
    #[must_use]
    pub fn default_group(&self) -> String {
        format!("{DEFAULT_GROUP_PREFIX}{}", unique_token())
    }

    /// Element id for an option panel.
    #[must_use]
    pub fn panel_id(&self) -> String {
        format!("rw-radio-panel-{}", unique_token())
    }
}

fn unique_token() -> String {
    Uuid::new_v4().simple().to_string()
}
