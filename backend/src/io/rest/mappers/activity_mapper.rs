use crate::domain::models::activity::Activity as DomainActivity;
use shared::Activity;

pub struct ActivityMapper;

impl ActivityMapper {
    /// Owner scoping is carried by the authenticated request, so the owner id
    /// stays internal.
    pub fn to_dto(activity: DomainActivity) -> Activity {
        Activity {
            id: activity.id,
            name: activity.name,
            value: activity.value,
            icon: activity.icon,
            created_at: activity.created_at,
        }
    }
}
