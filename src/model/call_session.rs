//! Voice call session models and aggregate statistics.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::id::from_db_id};

/// One stay of a user in a voice channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSession {
    pub session_id: i32,
    pub user_id: u64,
    pub channel_id: u64,
    pub join_ts: DateTime<Utc>,
    /// `None` while the user is still in the channel.
    pub leave_ts: Option<DateTime<Utc>>,
    /// Length of the session in seconds, set when it is closed.
    pub duration: Option<i64>,
}

impl CallSession {
    pub fn from_entity(entity: entity::call_session::Model) -> Result<Self, AppError> {
        Ok(Self {
            session_id: entity.session_id,
            user_id: from_db_id(entity.user_id)?,
            channel_id: from_db_id(entity.channel_id)?,
            join_ts: entity.join_ts,
            leave_ts: entity.leave_ts,
            duration: entity.duration,
        })
    }
}

/// Totals over a user's closed call sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallStats {
    /// Sum of all closed session durations in seconds.
    pub total_seconds: i64,
    /// Number of sessions with a recorded, non-zero duration.
    pub sessions: i64,
    pub longest_seconds: i64,
}

impl CallStats {
    /// Aggregates closed sessions; open sessions and zero-length sessions are skipped.
    pub fn from_sessions(sessions: &[CallSession]) -> Self {
        sessions
            .iter()
            .filter_map(|session| session.duration.filter(|d| *d > 0))
            .fold(Self::default(), |mut stats, duration| {
                stats.total_seconds += duration;
                stats.sessions += 1;
                stats.longest_seconds = stats.longest_seconds.max(duration);
                stats
            })
    }

    /// Average session length in whole seconds, if any session was closed.
    pub fn average_seconds(&self) -> Option<i64> {
        (self.sessions > 0).then(|| self.total_seconds / self.sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(duration: Option<i64>) -> CallSession {
        CallSession {
            session_id: 1,
            user_id: 1,
            channel_id: 2,
            join_ts: Utc::now(),
            leave_ts: duration.map(|_| Utc::now()),
            duration,
        }
    }

    #[test]
    fn aggregates_closed_sessions_only() {
        let stats =
            CallStats::from_sessions(&[session(Some(60)), session(None), session(Some(180))]);

        assert_eq!(stats.total_seconds, 240);
        assert_eq!(stats.sessions, 2);
        assert_eq!(stats.longest_seconds, 180);
        assert_eq!(stats.average_seconds(), Some(120));
    }

    #[test]
    fn no_closed_sessions_has_no_average() {
        let stats = CallStats::from_sessions(&[session(None)]);

        assert_eq!(stats, CallStats::default());
        assert_eq!(stats.average_seconds(), None);
    }
}
