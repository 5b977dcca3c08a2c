//! Flows, stages and the step topology of the report dialogues.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level dialogue type: reporting a lost item or a found one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Lost,
    Found,
}

impl Flow {
    pub const ALL: [Flow; 2] = [Flow::Lost, Flow::Found];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Lost => "lost",
            Flow::Found => "found",
        }
    }

    /// Parse the wire name of a flow; `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<Flow> {
        match name {
            "lost" => Some(Flow::Lost),
            "found" => Some(Flow::Found),
            _ => None,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage within a flow. Both flows share this linear topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Category,
    Attributes,
    Photo,
    Location,
    Secrets,
    Confirm,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Category,
        Stage::Attributes,
        Stage::Photo,
        Stage::Location,
        Stage::Secrets,
        Stage::Confirm,
    ];

    /// The following stage in the chain; `None` after `Confirm`.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Category => Some(Stage::Attributes),
            Stage::Attributes => Some(Stage::Photo),
            Stage::Photo => Some(Stage::Location),
            Stage::Location => Some(Stage::Secrets),
            Stage::Secrets => Some(Stage::Confirm),
            Stage::Confirm => None,
        }
    }
}

/// A dialogue step: one member per (flow, stage) pair plus the global `Idle`.
///
/// The snake_case string form is what the state store persists, so renaming a
/// variant is a data migration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Idle,
    LostCategory,
    LostAttributes,
    LostPhoto,
    LostLocation,
    LostSecrets,
    LostConfirm,
    FoundCategory,
    FoundAttributes,
    FoundPhoto,
    FoundLocation,
    FoundSecrets,
    FoundConfirm,
}

impl Step {
    /// Compose the step for a (flow, stage) pair.
    pub fn for_flow(flow: Flow, stage: Stage) -> Step {
        match (flow, stage) {
            (Flow::Lost, Stage::Category) => Step::LostCategory,
            (Flow::Lost, Stage::Attributes) => Step::LostAttributes,
            (Flow::Lost, Stage::Photo) => Step::LostPhoto,
            (Flow::Lost, Stage::Location) => Step::LostLocation,
            (Flow::Lost, Stage::Secrets) => Step::LostSecrets,
            (Flow::Lost, Stage::Confirm) => Step::LostConfirm,
            (Flow::Found, Stage::Category) => Step::FoundCategory,
            (Flow::Found, Stage::Attributes) => Step::FoundAttributes,
            (Flow::Found, Stage::Photo) => Step::FoundPhoto,
            (Flow::Found, Stage::Location) => Step::FoundLocation,
            (Flow::Found, Stage::Secrets) => Step::FoundSecrets,
            (Flow::Found, Stage::Confirm) => Step::FoundConfirm,
        }
    }

    /// The flow a step belongs to; `None` only for `Idle`.
    pub fn flow(&self) -> Option<Flow> {
        match self {
            Step::Idle => None,
            Step::LostCategory
            | Step::LostAttributes
            | Step::LostPhoto
            | Step::LostLocation
            | Step::LostSecrets
            | Step::LostConfirm => Some(Flow::Lost),
            Step::FoundCategory
            | Step::FoundAttributes
            | Step::FoundPhoto
            | Step::FoundLocation
            | Step::FoundSecrets
            | Step::FoundConfirm => Some(Flow::Found),
        }
    }

    /// The stage of a step; `None` only for `Idle`.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Step::Idle => None,
            Step::LostCategory | Step::FoundCategory => Some(Stage::Category),
            Step::LostAttributes | Step::FoundAttributes => Some(Stage::Attributes),
            Step::LostPhoto | Step::FoundPhoto => Some(Stage::Photo),
            Step::LostLocation | Step::FoundLocation => Some(Stage::Location),
            Step::LostSecrets | Step::FoundSecrets => Some(Stage::Secrets),
            Step::LostConfirm | Step::FoundConfirm => Some(Stage::Confirm),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Step::Idle)
    }
}
