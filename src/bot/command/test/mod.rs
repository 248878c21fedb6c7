use chrono::{DateTime, TimeZone, Utc};

use super::{ArgValue, CommandUser, Invocation};
use crate::bot::reply::{EmbedReply, Reply};

mod ping;
mod stats;

pub const GUILD_ID: u64 = 42;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 18, 30, 0).unwrap()
}

pub fn command_user(id: u64, name: &str) -> CommandUser {
    CommandUser {
        id,
        name: name.to_string(),
        display_name: name.to_string(),
        avatar_url: Some(format!("https://cdn.example/avatars/{}.png", id)),
    }
}

/// Guild invocation by a regular member with the given text arguments.
pub fn invocation(user_id: u64, args: &[(&str, &str)]) -> Invocation {
    let mut invocation = Invocation::new(command_user(user_id, "tester"), Some(GUILD_ID), fixed_now());
    for (name, value) in args {
        invocation
            .args
            .insert(name.to_string(), ArgValue::Text(value.to_string()));
    }
    invocation
}

pub fn expect_embed(reply: Reply) -> EmbedReply {
    match reply {
        Reply::Embed(embed) => embed,
        Reply::Text(text) => panic!("expected an embed, got text: {}", text),
    }
}

pub fn expect_text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        Reply::Embed(embed) => panic!("expected text, got embed: {}", embed.title),
    }
}
