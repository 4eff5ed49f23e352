use time::format_description::well_known::Rfc3339;
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::FormatItem,
    macros::format_description,
};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Naive ISO-8601 as produced by the assistant backend (no offset).
const NAIVE_ISO_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Local wall-clock time for a message timestamp, `None` if unparseable.
///
/// Offset-less timestamps are taken to already be in local time.
pub fn format_message_timestamp(raw: &str) -> Option<String> {
    if let Ok(mut datetime) = OffsetDateTime::parse(raw, &Rfc3339) {
        if let Ok(offset) = UtcOffset::current_local_offset() {
            datetime = datetime.to_offset(offset);
        }
        return datetime.format(MESSAGE_TIME_FORMAT).ok();
    }
    PrimitiveDateTime::parse(raw, NAIVE_ISO_FORMAT)
        .ok()?
        .format(MESSAGE_TIME_FORMAT)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_timestamps_round_trip() {
        let stamp = now_rfc3339();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
        assert!(format_message_timestamp(&stamp).is_some());
    }

    #[test]
    fn naive_backend_timestamps_render_as_is() {
        assert_eq!(
            format_message_timestamp("2024-05-01T14:05:09.123456").as_deref(),
            Some("02:05 PM")
        );
        assert_eq!(
            format_message_timestamp("2024-05-01T09:30:00").as_deref(),
            Some("09:30 AM")
        );
    }

    #[test]
    fn garbage_is_ignored() {
        assert_eq!(format_message_timestamp("yesterday"), None);
        assert_eq!(format_message_timestamp(""), None);
    }
}
