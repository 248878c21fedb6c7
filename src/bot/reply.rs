//! Platform-neutral command replies and their conversion into serenity builders.

use std::time::Duration;

use serenity::all::{
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseFollowup, CreateMessage,
};

pub const ORANGE: u32 = 0xE67E22;
pub const GREEN: u32 = 0x2ECC71;
pub const BLUE: u32 = 0x3498DB;
pub const RED: u32 = 0xE74C3C;

/// What a command or listener answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(EmbedReply),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Red "❌ Error" embed carrying a user-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Embed(EmbedReply::new("❌ Error", RED).description(message))
    }

    /// How long after sending the reply should be deleted, if at all.
    pub fn delete_after(&self) -> Option<Duration> {
        match self {
            Self::Text(_) => None,
            Self::Embed(embed) => embed.delete_after,
        }
    }

    pub fn to_message(&self) -> CreateMessage {
        match self {
            Self::Text(content) => CreateMessage::new().content(content),
            Self::Embed(embed) => CreateMessage::new().embed(embed.to_embed()),
        }
    }

    pub fn to_followup(&self) -> CreateInteractionResponseFollowup {
        match self {
            Self::Text(content) => CreateInteractionResponseFollowup::new().content(content),
            Self::Embed(embed) => CreateInteractionResponseFollowup::new().embed(embed.to_embed()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedReply {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    /// Name, value and whether the field is inline.
    pub fields: Vec<(String, String, bool)>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
    pub delete_after: Option<Duration>,
}

impl EmbedReply {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
            delete_after: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push((name.into(), value.into(), inline));
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }

    pub fn delete_after(mut self, after: Duration) -> Self {
        self.delete_after = Some(after);
        self
    }

    /// Looks up a field value by name.
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _, _)| field == name)
            .map(|(_, value, _)| value.as_str())
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .color(self.color)
            .fields(self.fields.clone());

        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        if let Some(thumbnail) = &self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }

        embed
    }
}

impl From<EmbedReply> for Reply {
    fn from(embed: EmbedReply) -> Self {
        Self::Embed(embed)
    }
}
