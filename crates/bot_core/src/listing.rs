//! The listing draft accumulated across dialogue steps.

use serde::{Deserialize, Serialize};

use crate::flow::Flow;

/// Hard cap on the number of secret marks a draft may carry.
pub const MAX_SECRETS: usize = 3;

/// Listing type as published to the feed; matches the flow that produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingType {
    Lost,
    Found,
}

impl From<Flow> for ListingType {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Lost => ListingType::Lost,
            Flow::Found => ListingType::Found,
        }
    }
}

impl ListingType {
    pub fn label(&self) -> &'static str {
        match self {
            ListingType::Lost => "Потеряно",
            ListingType::Found => "Найдено",
        }
    }
}

/// A geographic point attached to a draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters when the platform reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            precision: None,
        }
    }
}

/// The progressively filled listing record, not yet published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingDraft {
    #[serde(rename = "type")]
    pub kind: ListingType,

    /// Category id from the fixed catalog; `None` until the category step.
    pub category: Option<String>,

    #[serde(default)]
    pub details: String,

    /// Photo attachments are collected but not uploaded anywhere yet.
    #[serde(default)]
    pub photos: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    #[serde(default)]
    pub location_note: String,

    /// Ordered secret marks, at most [`MAX_SECRETS`].
    #[serde(default)]
    pub secrets: Vec<String>,
}

impl ListingDraft {
    pub fn new(flow: Flow) -> Self {
        Self {
            kind: flow.into(),
            category: None,
            details: String::new(),
            photos: Vec::new(),
            location: None,
            location_note: String::new(),
            secrets: Vec::new(),
        }
    }
}
