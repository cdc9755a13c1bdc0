use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse the `--at` value of `water`.
///
/// Accepts a full RFC 3339 timestamp or a plain `YYYY-MM-DD`, the latter
/// taken as local noon so the calendar day survives the UTC conversion.
/// Today's date before noon resolves to `now`. Anything after `now` is
/// rejected.
pub fn parse_watered_at(s: &str) -> AppResult<DateTime<Utc>> {
    parse_watered_at_from(s, Utc::now())
}

pub(crate) fn parse_watered_at_from(s: &str, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    let at = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => local_noon(s)?.min(now),
    };

    if at > now {
        return Err(AppError::InvalidDate(format!("{s} is in the future")));
    }
    Ok(at)
}

fn local_noon(s: &str) -> AppResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))?;

    Local
        .from_local_datetime(&noon)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        let dt = parse_watered_at("2025-06-01T08:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-06-01T06:30:00+00:00");

        let d = parse_watered_at("2025-06-01").unwrap();
        assert_eq!(d.with_timezone(&Local).date_naive().to_string(), "2025-06-01");

        assert!(matches!(
            parse_watered_at("yesterday"),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn future_dates_are_rejected() {
        assert!(matches!(
            parse_watered_at("2099-01-01"),
            Err(AppError::InvalidDate(_))
        ));

        let ahead = (Utc::now() + Duration::hours(2)).to_rfc3339();
        assert!(matches!(
            parse_watered_at(&ahead),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn today_before_noon_is_clamped_to_now() {
        let noon = local_noon("2025-06-01").unwrap();
        let morning = noon - Duration::hours(3);

        let at = parse_watered_at_from("2025-06-01", morning).unwrap();
        assert_eq!(at, morning);

        let evening = noon + Duration::hours(6);
        assert_eq!(parse_watered_at_from("2025-06-01", evening).unwrap(), noon);
    }
}
