//! Shared fixtures for handler unit tests.

use chrono::Utc;
use uuid::Uuid;

use bot_core::{DraftPayload, Flow};

use crate::users::UserRecord;

pub(crate) fn test_user() -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        platform_id: "peer_test".to_string(),
        phone: None,
        created_at: Utc::now(),
    }
}

pub(crate) fn runtime_parts(flow: Flow) -> (UserRecord, DraftPayload) {
    (test_user(), DraftPayload::new(flow))
}
