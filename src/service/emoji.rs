//! Extraction of unicode emoji, text emoticons and custom emoji from message content.

use regex::Regex;

use crate::{error::AppError, model::emoji::EmojiUsage};

/// A unicode emoji: flag pairs, keycaps, or a pictograph with optional variation
/// selector, skin tone and zero-width-joiner continuations.
const UNICODE_EMOJI_PATTERN: &str = concat!(
    r"[\x{1F1E6}-\x{1F1FF}]{2}",
    r"|[0-9#*]\x{FE0F}?\x{20E3}",
    r"|\p{Extended_Pictographic}[\x{FE0F}\x{1F3FB}-\x{1F3FF}]*",
    r"(?:\x{200D}\p{Extended_Pictographic}[\x{FE0F}\x{1F3FB}-\x{1F3FF}]*)*",
);

/// Guild emoji as they appear in raw content: `<:name:id>` or `<a:name:id>`.
const CUSTOM_EMOJI_PATTERN: &str = r"<a?:(\w+):(\d+)>";

/// Text emoticons and the form they are counted under.
///
/// Every pattern is matched independently, so content can count towards more than one
/// emoticon.
const EMOTICON_PATTERNS: &[(&str, &str)] = &[
    (r":-?\)", ":)"),
    (r":-?D", ":D"),
    (r"=\)", "=)"),
    (r"=D", "=D"),
    (r":3", ":3"),
    (r"\^_\^", "^_^"),
    (r"\^-\^", "^-^"),
    (r"\^\^", "^^"),
    (r":>", ":>"),
    (r"c:", "c:"),
    (r":-?\(", ":("),
    (r":'?\(", ":("),
    (r"=\(", "=("),
    (r"\):", "):"),
    (r";-?\)", ";)"),
    (r";-?D", ";D"),
    (r":O", ":O"),
    (r":o", ":o"),
    (r"o_O", "o_O"),
    (r"O_o", "O_o"),
    (r"<3", "<3"),
    (r":-?\|", ":|"),
    (r"=\|", "=|"),
    (r":-?/", ":/"),
    (r":-?\\", r":\"),
    (r"-_-", "-_-"),
    (r">:-?\(", ">:("),
    (r">:-?\)", ">:)"),
    (r"[Xx]D", "XD"),
    (r"uwu", "uwu"),
    (r"owo", "owo"),
    (r">w<", ">w<"),
];

pub struct EmojiExtractor {
    unicode: Regex,
    custom: Regex,
    emoticons: Vec<(Regex, &'static str)>,
}

impl EmojiExtractor {
    /// Compiles the matchers.
    ///
    /// # Returns
    /// - `Ok(EmojiExtractor)` - All patterns compiled
    /// - `Err(AppError::RegexErr)` - A pattern is invalid
    pub fn new() -> Result<Self, AppError> {
        let emoticons = EMOTICON_PATTERNS
            .iter()
            .map(|(pattern, normalized)| Ok((Regex::new(pattern)?, *normalized)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            unicode: Regex::new(UNICODE_EMOJI_PATTERN)?,
            custom: Regex::new(CUSTOM_EMOJI_PATTERN)?,
            emoticons,
        })
    }

    /// Finds every emoji in a message.
    pub fn extract(&self, content: &str) -> EmojiUsage {
        let unicode = self
            .unicode
            .find_iter(content)
            .map(|m| m.as_str().to_string())
            .collect();

        let mut emoticons: Vec<(String, u64)> = Vec::new();
        for (pattern, normalized) in &self.emoticons {
            let count = pattern.find_iter(content).count() as u64;
            if count == 0 {
                continue;
            }
            match emoticons.iter_mut().find(|(name, _)| name == normalized) {
                Some((_, total)) => *total += count,
                None => emoticons.push((normalized.to_string(), count)),
            }
        }

        let custom = self
            .custom
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).map(|name| name.as_str().to_string()))
            .collect();

        EmojiUsage {
            unicode,
            emoticons,
            custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EmojiExtractor {
        EmojiExtractor::new().unwrap()
    }

    #[test]
    fn finds_unicode_emoji_sequences() {
        let usage = extractor().extract("nice 👍🏽 party 🎉🎉 family 👨‍👩‍👧 flag 🇿🇦");

        assert_eq!(
            usage.unicode,
            vec!["👍🏽", "🎉", "🎉", "👨‍👩‍👧", "🇿🇦"]
        );
    }

    #[test]
    fn counts_emoticons_under_normalized_form() {
        let usage = extractor().extract("hi :) :-) <3 xD");

        assert!(usage.emoticons.contains(&(":)".to_string(), 2)));
        assert!(usage.emoticons.contains(&("<3".to_string(), 1)));
        assert!(usage.emoticons.contains(&("XD".to_string(), 1)));
    }

    #[test]
    fn sad_face_patterns_share_a_counter() {
        let usage = extractor().extract("oh no :(");

        // Both sad-face patterns match the same text
        assert_eq!(usage.emoticons, vec![(":(".to_string(), 2)]);
    }

    #[test]
    fn captures_custom_emoji_names() {
        let usage = extractor().extract("<:pepe:123456> and <a:dance:789>");

        assert_eq!(usage.custom, vec!["pepe", "dance"]);
    }

    #[test]
    fn plain_text_has_no_emoji() {
        let usage = extractor().extract("just a normal sentence");

        assert!(usage.is_empty());
    }
}
