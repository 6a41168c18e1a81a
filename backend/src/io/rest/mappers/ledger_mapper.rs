use crate::domain::models::ledger::{DailyBucket, LogEntry as DomainLogEntry, Redemption as DomainRedemption};
use shared::{DailyLogStat, DailyRedemptionStat, LogEntry, Redemption};

pub struct LedgerMapper;

impl LedgerMapper {
    pub fn log_to_dto(entry: DomainLogEntry) -> LogEntry {
        LogEntry {
            id: entry.id,
            activity_id: entry.activity_id,
            activity_name: entry.activity_name,
            points: entry.points,
            timestamp: entry.timestamp,
        }
    }

    pub fn redemption_to_dto(redemption: DomainRedemption) -> Redemption {
        Redemption {
            id: redemption.id,
            reward_name: redemption.reward_name,
            cost: redemption.cost,
            timestamp: redemption.timestamp,
        }
    }

    pub fn log_bucket_to_dto(bucket: DailyBucket) -> DailyLogStat {
        DailyLogStat {
            day: bucket.day,
            count: bucket.count,
            points: bucket.total,
        }
    }

    pub fn redemption_bucket_to_dto(bucket: DailyBucket) -> DailyRedemptionStat {
        DailyRedemptionStat {
            day: bucket.day,
            count: bucket.count,
            cost: bucket.total,
        }
    }
}
