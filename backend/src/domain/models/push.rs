/// A stored browser push subscription, unique per (owner, endpoint).
#[derive(Debug, Clone, PartialEq)]
pub struct PushSubscription {
    pub owner_id: String,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}
