//! Column decoding helpers shared by the row wrappers.

use estore_domain::Timestamp;
use estore_domain::id::Identifier;

/// Parse a textual id column into its typed id.
pub(crate) fn id<T: Identifier>(value: &str) -> Result<T, sqlx::Error> {
    value
        .parse::<T>()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse an RFC 3339 column written by [`encode_timestamp`].
pub(crate) fn timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_order_encoded_timestamps_like_instants() {
        let earlier = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(1);
        assert!(encode_timestamp(earlier) < encode_timestamp(later));
        assert_eq!(encode_timestamp(earlier), "2024-01-01T09:00:00.000000Z");
    }

    #[test]
    fn should_round_trip_encoded_timestamp() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(timestamp(&encode_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn should_reject_malformed_id() {
        let result: Result<estore_domain::id::UserId, _> = id("not-a-uuid");
        assert!(matches!(result, Err(sqlx::Error::Decode(_))));
    }
}
