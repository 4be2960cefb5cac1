//! Calendar events: `users/{uid}/calendarEvents`.

use ascend_core::error::DataError;
use ascend_core::model::CalendarEvent;
use ascend_core::store::Fields;
use crate::Repository;
use crate::paths::{self, CALENDAR_EVENTS};

impl Repository {
    pub async fn create_calendar_event(
        &self,
        uid: &str,
        mut event: CalendarEvent,
    ) -> Result<String, DataError> {
        event.owner_id = Some(uid.to_string());
        self.push_record(&paths::user_collection(uid, CALENDAR_EVENTS)?, &event)
            .await
    }

    pub async fn read_calendar_events(&self, uid: &str) -> Result<Vec<CalendarEvent>, DataError> {
        self.read_collection(&paths::user_collection(uid, CALENDAR_EVENTS)?)
            .await
    }

    /// Partial merge: only the given fields change.
    pub async fn update_calendar_event(
        &self,
        uid: &str,
        event_id: &str,
        fields: Fields,
    ) -> Result<(), DataError> {
        self.merge(&paths::user_record(uid, CALENDAR_EVENTS, event_id)?, fields)
            .await
    }

    pub async fn delete_calendar_event(&self, uid: &str, event_id: &str) -> Result<(), DataError> {
        self.delete(&paths::user_record(uid, CALENDAR_EVENTS, event_id)?)
            .await
    }
}
