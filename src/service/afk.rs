//! AFK status service.
//!
//! Validates `/afk` input, stores the status, and answers the two questions the message
//! listener asks: "was the author AFK?" and "which mentioned users are AFK?".

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{afk::AfkRepository, user::UserRepository},
    error::{command::CommandError, AppError},
    model::{
        afk::{AfkConfirmation, AfkMention, AfkRequest, AfkStatus, SetAfkParam},
        user::UpsertUserParam,
    },
};

/// Smallest and largest accepted timezone offsets in hours.
const MIN_TIMEZONE_OFFSET: i32 = -12;
const MAX_TIMEZONE_OFFSET: i32 = 14;

pub struct AfkService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AfkService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets or refreshes the AFK status of the requesting user.
    ///
    /// All input is validated before anything is written.
    ///
    /// # Arguments
    /// - `request` - Raw `/afk` arguments
    /// - `now` - Current time, used for `set_at` and as the base of `expected_back`
    ///
    /// # Returns
    /// - `Ok(AfkConfirmation)` - Stored status and the validated display offset
    /// - `Err(AppError::CommandErr)` - Malformed duration or timezone offset
    /// - `Err(AppError::DbErr)` - Database error while storing the user or status
    pub async fn set_afk(
        &self,
        request: AfkRequest,
        now: DateTime<Utc>,
    ) -> Result<AfkConfirmation, AppError> {
        let expected_back = match request.expected_back.as_deref() {
            Some(raw) => {
                let delta = parse_time_delta(raw).ok_or(CommandError::InvalidTimeFormat)?;
                Some(
                    now.checked_add_signed(delta)
                        .ok_or(CommandError::InvalidTimeFormat)?,
                )
            }
            None => None,
        };

        let timezone_offset = request
            .timezone_offset
            .as_deref()
            .map(parse_timezone_offset)
            .transpose()?;

        UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                user_id: request.user_id,
                discord_name: request.user_name,
            })
            .await?;

        let status = AfkRepository::new(self.db)
            .upsert(SetAfkParam {
                user_id: request.user_id,
                reason: request.reason,
                expected_back,
                set_at: now,
            })
            .await?;

        tracing::info!(
            "User {} set AFK status. Reason: {:?}, Expected back: {:?}",
            status.user_id,
            status.reason,
            status.expected_back
        );

        Ok(AfkConfirmation {
            status,
            timezone_offset,
        })
    }

    /// Clears the AFK status of a user who just sent a message.
    ///
    /// # Returns
    /// - `Ok(Some(duration))` - The user was AFK for `duration`; the status is removed
    /// - `Ok(None)` - The user was not AFK
    pub async fn clear_on_return(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<TimeDelta>, AppError> {
        let repo = AfkRepository::new(self.db);

        let Some(status) = repo.find_by_user(user_id).await? else {
            return Ok(None);
        };

        repo.delete_by_user(user_id).await?;
        tracing::info!("Removed AFK status for user {}", user_id);

        Ok(Some(status.elapsed(now)))
    }

    /// Returns the AFK status of each mentioned user that has one, in mention order.
    pub async fn mentioned_afk(&self, user_ids: &[u64]) -> Result<Vec<AfkMention>, AppError> {
        let repo = AfkRepository::new(self.db);
        let mut mentions = Vec::new();

        for &user_id in user_ids {
            if let Some(status) = repo.find_by_user(user_id).await? {
                mentions.push(AfkMention { user_id, status });
            }
        }

        Ok(mentions)
    }
}

/// Parses a duration like `2h`, `30m` or `1d`.
///
/// The unit is case-insensitive and surrounding whitespace is ignored. Amounts must be
/// positive and small enough to represent.
pub fn parse_time_delta(raw: &str) -> Option<TimeDelta> {
    let normalized = raw.trim().to_lowercase();
    let unit = normalized.chars().last()?;
    let amount: i64 = normalized[..normalized.len() - unit.len_utf8()]
        .trim()
        .parse()
        .ok()?;

    if amount <= 0 {
        return None;
    }

    match unit {
        'm' => TimeDelta::try_minutes(amount),
        'h' => TimeDelta::try_hours(amount),
        'd' => TimeDelta::try_days(amount),
        _ => None,
    }
}

/// Parses a whole-hour offset from UTC such as `+8` or `-5`.
pub fn parse_timezone_offset(raw: &str) -> Result<i32, CommandError> {
    let offset: i32 = raw
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidTimezoneFormat)?;

    if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
        return Err(CommandError::TimezoneOutOfRange);
    }

    Ok(offset)
}

/// Renders an instant in the given offset as `YYYY-MM-DD hh:mm AM (UTC+8)`.
///
/// Without an offset the time is shown in UTC and labelled `(UTC)`.
pub fn format_expected_back(expected_back: DateTime<Utc>, offset_hours: Option<i32>) -> String {
    const FORMAT: &str = "%Y-%m-%d %I:%M %p";

    match offset_hours.and_then(|hours| FixedOffset::east_opt(hours * 3600).map(|o| (hours, o))) {
        Some((hours, offset)) => format!(
            "{} (UTC{:+})",
            expected_back.with_timezone(&offset).format(FORMAT),
            hours
        ),
        None => format!("{} (UTC)", expected_back.format(FORMAT)),
    }
}

/// Describes when an AFK user is expected back, relative to `now`.
pub fn describe_expected_back(status: &AfkStatus, now: DateTime<Utc>) -> Option<String> {
    let expected_back = status.expected_back?;

    if expected_back > now {
        Some(format!(
            "in ~{}",
            crate::util::time::format_short(expected_back - now)
        ))
    } else {
        Some("Should be back soon".to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_utils::builder::TestBuilder;

    use super::*;

    #[test]
    fn parses_supported_units() {
        assert_eq!(parse_time_delta("2h"), Some(TimeDelta::hours(2)));
        assert_eq!(parse_time_delta(" 30M "), Some(TimeDelta::minutes(30)));
        assert_eq!(parse_time_delta("1d"), Some(TimeDelta::days(1)));
    }

    #[test]
    fn rejects_malformed_durations() {
        for raw in ["", "h", "2", "2w", "two h", "-1h", "1.5h", "0h", "0m", "0d"] {
            assert_eq!(parse_time_delta(raw), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn timezone_offset_bounds() {
        assert_eq!(parse_timezone_offset("+14"), Ok(14));
        assert_eq!(parse_timezone_offset("-12"), Ok(-12));
        assert_eq!(
            parse_timezone_offset("15"),
            Err(CommandError::TimezoneOutOfRange)
        );
        assert_eq!(
            parse_timezone_offset("eight"),
            Err(CommandError::InvalidTimezoneFormat)
        );
    }

    #[test]
    fn formats_expected_back_in_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap();

        assert_eq!(
            format_expected_back(instant, Some(8)),
            "2026-03-02 02:30 AM (UTC+8)"
        );
        assert_eq!(
            format_expected_back(instant, None),
            "2026-03-01 06:30 PM (UTC)"
        );
    }

    #[test]
    fn describes_pending_and_overdue_returns() {
        let now = Utc::now();
        let mut status = AfkStatus {
            user_id: 1,
            reason: None,
            expected_back: Some(now + TimeDelta::minutes(90) + TimeDelta::seconds(30)),
            set_at: now,
        };

        assert_eq!(
            describe_expected_back(&status, now).as_deref(),
            Some("in ~1h 30m")
        );

        status.expected_back = Some(now - TimeDelta::minutes(1));
        assert_eq!(
            describe_expected_back(&status, now).as_deref(),
            Some("Should be back soon")
        );
    }

    #[tokio::test]
    async fn invalid_input_changes_nothing() {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = AfkService::new(db);

        let result = service
            .set_afk(
                AfkRequest {
                    user_id: 1,
                    user_name: "alice".to_string(),
                    expected_back: Some("soon".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::CommandErr(CommandError::InvalidTimeFormat))
        ));
        assert!(UserRepository::new(db).find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_return_reports_duration() {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = AfkService::new(db);
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();

        let confirmation = service
            .set_afk(
                AfkRequest {
                    user_id: 1,
                    user_name: "alice".to_string(),
                    reason: Some("lunch".to_string()),
                    expected_back: Some("2h".to_string()),
                    timezone_offset: Some("-5".to_string()),
                },
                now,
            )
            .await
            .unwrap();

        assert_eq!(confirmation.timezone_offset, Some(-5));
        assert_eq!(
            confirmation.status.expected_back,
            Some(now + TimeDelta::hours(2))
        );

        let mentions = service.mentioned_afk(&[2, 1]).await.unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].user_id, 1);

        let away = service
            .clear_on_return(1, now + TimeDelta::minutes(75))
            .await
            .unwrap();
        assert_eq!(away, Some(TimeDelta::minutes(75)));
        assert_eq!(service.clear_on_return(1, now).await.unwrap(), None);
    }
}
