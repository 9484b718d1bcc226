use chrono::SubsecRound;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current time truncated to microseconds, the precision PostgreSQL
/// `TIMESTAMPTZ` stores. Entities stamped with this value round-trip through
/// the relational backend unchanged.
pub fn now() -> Timestamp {
    chrono::Utc::now().trunc_subsecs(6)
}
