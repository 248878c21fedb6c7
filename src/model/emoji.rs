//! Emoji usage counters persisted to the emoji statistics file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Emoji usage of a single user.
///
/// Serialized as-is into the statistics file, keyed by the user's id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmojiStats {
    #[serde(default)]
    pub unicode_emojis: HashMap<String, u64>,
    #[serde(default)]
    pub text_emoticons: HashMap<String, u64>,
    /// Custom guild emoji counted by name.
    #[serde(default)]
    pub custom_emojis: HashMap<String, u64>,
    #[serde(default)]
    pub total_emojis: u64,
    #[serde(default)]
    pub last_updated: String,
}

impl EmojiStats {
    /// Adds one message's worth of usage to the counters.
    pub fn apply(&mut self, usage: &EmojiUsage) {
        for emoji in &usage.unicode {
            *self.unicode_emojis.entry(emoji.clone()).or_insert(0) += 1;
        }
        for (emoticon, count) in &usage.emoticons {
            *self.text_emoticons.entry(emoticon.clone()).or_insert(0) += count;
        }
        for name in &usage.custom {
            *self.custom_emojis.entry(name.clone()).or_insert(0) += 1;
        }
        self.total_emojis += usage.total();
    }

    /// All three categories merged; later categories win on identical keys.
    pub fn combined(&self) -> HashMap<String, u64> {
        self.unicode_emojis
            .iter()
            .chain(self.text_emoticons.iter())
            .chain(self.custom_emojis.iter())
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

/// Emoji found in a single message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmojiUsage {
    /// Each unicode emoji occurrence, in order.
    pub unicode: Vec<String>,
    /// Normalized emoticon with its number of occurrences.
    pub emoticons: Vec<(String, u64)>,
    /// Name of each custom emoji occurrence.
    pub custom: Vec<String>,
}

impl EmojiUsage {
    pub fn total(&self) -> u64 {
        self.unicode.len() as u64
            + self.emoticons.iter().map(|(_, count)| count).sum::<u64>()
            + self.custom.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Highest counts first, ties broken by key so output is stable.
pub fn top_n(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_accumulates_every_category() {
        let mut stats = EmojiStats::default();
        let usage = EmojiUsage {
            unicode: vec!["😀".to_string(), "😀".to_string()],
            emoticons: vec![(":)".to_string(), 3)],
            custom: vec!["pepe".to_string()],
        };

        stats.apply(&usage);
        stats.apply(&usage);

        assert_eq!(stats.unicode_emojis["😀"], 4);
        assert_eq!(stats.text_emoticons[":)"], 6);
        assert_eq!(stats.custom_emojis["pepe"], 2);
        assert_eq!(stats.total_emojis, 12);
    }

    #[test]
    fn top_n_orders_by_count_then_key() {
        let counts: HashMap<String, u64> = [("b", 2), ("a", 2), ("c", 5), ("d", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let top = top_n(&counts, 3);

        assert_eq!(
            top,
            vec![
                ("c".to_string(), 5),
                ("a".to_string(), 2),
                ("b".to_string(), 2)
            ]
        );
    }
}
