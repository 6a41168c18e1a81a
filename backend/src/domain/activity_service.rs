//! Activity catalog: owner-scoped CRUD over reusable earning templates.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::activity::{Activity, ActivityChanges};
use crate::error::DomainError;
use crate::storage::ActivityStorage;

/// Icon tag applied when the caller does not pick one.
const DEFAULT_ICON: &str = "zap";

#[derive(Clone)]
pub struct ActivityService {
    activities: Arc<dyn ActivityStorage>,
}

impl ActivityService {
    pub fn new(activities: Arc<dyn ActivityStorage>) -> Self {
        Self { activities }
    }

    /// List the owner's activities, oldest first.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Activity>, DomainError> {
        self.activities.list_activities(owner_id).await
    }

    pub async fn create(
        &self,
        owner_id: &str,
        name: &str,
        value: i64,
        icon: Option<String>,
    ) -> Result<Activity, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Activity name is required".into()));
        }
        if value <= 0 {
            return Err(DomainError::Validation(
                "Activity value must be a positive integer".into(),
            ));
        }

        let activity = Activity {
            id: shared::Activity::generate_id(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            value,
            icon: icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: Utc::now().to_rfc3339(),
        };
        self.activities.store_activity(&activity).await?;
        info!("Created activity {} for {}", activity.id, owner_id);

        Ok(activity)
    }

    /// Apply changes to an owned activity.
    ///
    /// A cross-owner or unknown id fails with the same `NotFound`, so callers
    /// cannot probe for other users' activities.
    pub async fn update(
        &self,
        owner_id: &str,
        activity_id: &str,
        changes: ActivityChanges,
    ) -> Result<Activity, DomainError> {
        let mut activity = self
            .activities
            .get_activity(owner_id, activity_id)
            .await?
            .ok_or(DomainError::NotFound("Activity"))?;

        if let Some(name) = changes.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::Validation("Activity name is required".into()));
            }
            activity.name = name;
        }
        if let Some(value) = changes.value {
            if value <= 0 {
                return Err(DomainError::Validation(
                    "Activity value must be a positive integer".into(),
                ));
            }
            activity.value = value;
        }
        if let Some(icon) = changes.icon {
            activity.icon = icon;
        }

        if !self.activities.update_activity(&activity).await? {
            return Err(DomainError::NotFound("Activity"));
        }
        info!("Updated activity {} for {}", activity_id, owner_id);

        Ok(activity)
    }

    /// Delete an owned activity. Historical log entries that reference it are
    /// left untouched.
    pub async fn delete(&self, owner_id: &str, activity_id: &str) -> Result<(), DomainError> {
        if !self.activities.delete_activity(owner_id, activity_id).await? {
            return Err(DomainError::NotFound("Activity"));
        }
        info!("Deleted activity {} for {}", activity_id, owner_id);
        Ok(())
    }
}
