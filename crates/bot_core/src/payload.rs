//! The per-user draft payload and its typed copy-on-mutate operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::Flow;
use crate::listing::{GeoPoint, ListingDraft, MAX_SECRETS};

/// Metadata carried alongside the draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftMeta {
    pub started_at: DateTime<Utc>,
}

/// Everything the state store persists for a user mid-flow.
///
/// Step handlers receive the payload read-only and produce a new value via
/// the `with_*` operations below; the persisted copy is never mutated in
/// place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftPayload {
    pub flow: Flow,
    pub listing: ListingDraft,
    pub meta: DraftMeta,
}

impl DraftPayload {
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            listing: ListingDraft::new(flow),
            meta: DraftMeta {
                started_at: Utc::now(),
            },
        }
    }

    /// Copy with the category set.
    pub fn with_category(&self, category: &str) -> Self {
        let mut next = self.clone();
        next.listing.category = Some(category.to_string());
        next
    }

    /// Copy with the free-text description replaced.
    pub fn with_details(&self, details: &str) -> Self {
        let mut next = self.clone();
        next.listing.details = details.to_string();
        next
    }

    /// Copy with the location point and/or note replaced.
    pub fn with_location(&self, point: Option<GeoPoint>, note: Option<&str>) -> Self {
        let mut next = self.clone();
        next.listing.location = point;
        next.listing.location_note = note.unwrap_or_default().to_string();
        next
    }

    /// Copy with the secret marks replaced, capped at [`MAX_SECRETS`].
    pub fn with_secrets(&self, secrets: Vec<String>) -> Self {
        let mut next = self.clone();
        next.listing.secrets = secrets;
        next.listing.secrets.truncate(MAX_SECRETS);
        next
    }
}
