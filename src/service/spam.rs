//! Heuristic spam classifier.
//!
//! Messages are checked against three rules in fixed priority order and classified under
//! the first that matches:
//!
//! 1. A single character repeated consecutively (case-insensitive)
//! 2. A high ratio of uppercase letters in a longer message
//! 3. The same content sent repeatedly inside a sliding time window
//!
//! The repeated-message window is per user and only sees messages that rules 1 and 2 let
//! through.

use std::{
    collections::{HashMap, VecDeque},
    time::Instant,
};

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::{config::SpamConfig, model::spam::SpamType};

/// Messages of this many characters or fewer are never caps spam.
const CAPS_MIN_LENGTH: usize = 10;

type ContentHash = [u8; 32];

pub struct SpamDetector {
    config: SpamConfig,
    /// Recently seen message hashes per user, oldest first.
    windows: Mutex<HashMap<u64, VecDeque<(ContentHash, Instant)>>>,
}

impl SpamDetector {
    pub fn new(config: SpamConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Classifies a message, returning the first matching spam category.
    ///
    /// # Arguments
    /// - `user_id` - Author of the message, selects the repeated-message window
    /// - `content` - Raw message content
    /// - `now` - Arrival time used for the sliding window
    pub async fn classify(&self, user_id: u64, content: &str, now: Instant) -> Option<SpamType> {
        if self.is_char_repetition(content) {
            Some(SpamType::CharRepetition)
        } else if self.is_caps_spam(content) {
            Some(SpamType::CapsSpam)
        } else if self.is_repeated_message(user_id, content, now).await {
            Some(SpamType::RepeatedMessages)
        } else {
            None
        }
    }

    /// Whether any character repeats consecutively at least the configured number of times.
    ///
    /// Comparison ignores case, so `aAaAa` is a run of five. Line breaks never form or
    /// continue a run.
    pub fn is_char_repetition(&self, content: &str) -> bool {
        let threshold = self.config.char_repetition_threshold;
        let mut previous: Option<char> = None;
        let mut run = 0usize;

        for c in content.chars() {
            if c == '\n' {
                previous = None;
                run = 0;
                continue;
            }

            let folded = fold_case(c);
            if previous == Some(folded) {
                run += 1;
            } else {
                previous = Some(folded);
                run = 1;
            }

            if run >= threshold {
                return true;
            }
        }

        false
    }

    /// Whether a message longer than ten characters is mostly uppercase.
    ///
    /// Spaces are ignored and the ratio is uppercase letters over alphabetic characters,
    /// so messages without letters never match.
    pub fn is_caps_spam(&self, content: &str) -> bool {
        if content.chars().count() <= CAPS_MIN_LENGTH {
            return false;
        }

        let (upper, letters) = content
            .chars()
            .filter(|c| *c != ' ')
            .fold((0usize, 0usize), |(upper, letters), c| {
                (
                    upper + usize::from(c.is_uppercase()),
                    letters + usize::from(c.is_alphabetic()),
                )
            });

        if letters == 0 {
            return false;
        }

        upper as f64 / letters as f64 >= self.config.caps_ratio_threshold
    }

    /// Records a message in the user's window and checks it against earlier copies.
    ///
    /// Entries older than the window are dropped first, together with every user whose
    /// newest entry has expired. Identical entries are then counted before the current
    /// message is appended.
    ///
    /// # Returns
    /// - `true` - At least the configured number of identical messages were already in the window
    /// - `false` - Otherwise
    pub async fn is_repeated_message(&self, user_id: u64, content: &str, now: Instant) -> bool {
        let hash: ContentHash = Sha256::digest(content.as_bytes()).into();
        let window = self.config.repeated_msg_window;

        let mut windows = self.windows.lock().await;
        windows.retain(|_, entries| {
            entries
                .back()
                .is_some_and(|(_, seen)| now.saturating_duration_since(*seen) < window)
        });

        let entries = windows.entry(user_id).or_default();
        entries.retain(|(_, seen)| now.saturating_duration_since(*seen) < window);

        let count = entries.iter().filter(|(h, _)| *h == hash).count();
        entries.push_back((hash, now));

        count >= self.config.repeated_msg_count
    }

    #[cfg(test)]
    async fn tracked_users(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Single-character lowercase mapping; characters with multi-char lowercase forms keep
/// their first char.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
