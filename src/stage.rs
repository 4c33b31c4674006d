//! Active Stage Selector
//!
//! Picks the stage of a deployment to highlight when it is first shown: the
//! running stage if there is one, otherwise the latest stage that has started.

use serde::{Deserialize, Serialize};

/// Lifecycle of a pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    #[default]
    StageNotStartedYet,
    StageRunning,
    StageSuccess,
    StageFailure,
    StageCancelled,
    StageSkipped,
    StageExited,
}

impl StageStatus {
    pub fn has_started(self) -> bool {
        self != StageStatus::StageNotStartedYet
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub visible: bool,
    pub status: StageStatus,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub completed_at: i64,
}

/// Records carrying an ordered list of stages
pub trait HasStages {
    fn stages(&self) -> &[Stage];
}

/// Stage to highlight for `record`, or `None` when nothing visible has started
pub fn select_active_stage<R: HasStages + ?Sized>(record: Option<&R>) -> Option<&Stage> {
    let record = record?;
    let started = record
        .stages()
        .iter()
        .filter(|stage| stage.visible && stage.status.has_started());

    let mut latest = None;
    for stage in started {
        if stage.status == StageStatus::StageRunning {
            return Some(stage);
        }
        latest = Some(stage);
    }
    latest
}
