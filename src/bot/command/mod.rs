//! Command registry and dispatch.
//!
//! Every command declares its argument schema through [`CommandSpec`]. The same schema
//! drives slash-command registration and the parsing of `!` prefix messages, so both
//! entry points hand commands an already-validated [`Invocation`].

pub mod afk;
pub mod config;
pub mod currency;
pub mod ping;
pub mod stats;

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::{
    bot::reply::Reply,
    error::{command::CommandError, AppError},
    state::BotContext,
};

/// Prefix for text commands.
pub const PREFIX: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Slash,
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Text,
    User,
}

#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ArgKind,
    pub required: bool,
    /// Accepted values; empty accepts anything.
    pub choices: &'static [&'static str],
    /// Whether the command answers autocomplete requests for this argument.
    pub autocomplete: bool,
}

impl ArgSpec {
    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ArgKind::Text,
            required: false,
            choices: &[],
            autocomplete: false,
        }
    }

    pub fn user(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: ArgKind::User,
            ..Self::text(name, description)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub fn autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
    /// Only members with the Administrator permission may run the command.
    pub admin_only: bool,
    /// The command is rejected outside of guilds.
    pub guild_only: bool,
    pub args: Vec<ArgSpec>,
}

impl CommandSpec {
    pub fn new(name: &'static str, description: &'static str, kind: CommandKind) -> Self {
        Self {
            name,
            description,
            kind,
            admin_only: false,
            guild_only: false,
            args: Vec::new(),
        }
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self.guild_only = true;
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Slash-command registration built from the argument schema.
    pub fn to_create_command(&self) -> CreateCommand {
        self.args.iter().fold(
            CreateCommand::new(self.name).description(self.description),
            |command, arg| {
                let kind = match arg.kind {
                    ArgKind::Text => CommandOptionType::String,
                    ArgKind::User => CommandOptionType::User,
                };
                let option = arg.choices.iter().fold(
                    CreateCommandOption::new(kind, arg.name, arg.description)
                        .required(arg.required)
                        .set_autocomplete(arg.autocomplete),
                    |option, choice| option.add_string_choice(*choice, *choice),
                );
                command.add_option(option)
            },
        )
    }
}

/// The user a command was invoked by or pointed at.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandUser {
    pub id: u64,
    pub name: String,
    /// Global display name, falling back to the username.
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    User(CommandUser),
}

/// A validated command call.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub user: CommandUser,
    pub guild_id: Option<u64>,
    /// Whether the invoking member has the Administrator permission in the guild.
    pub is_admin: bool,
    pub args: HashMap<String, ArgValue>,
    pub now: DateTime<Utc>,
    /// Heartbeat latency of the shard that delivered the command, when known.
    pub latency: Option<Duration>,
}

impl Invocation {
    pub fn new(user: CommandUser, guild_id: Option<u64>, now: DateTime<Utc>) -> Self {
        Self {
            user,
            guild_id,
            is_admin: false,
            args: HashMap::new(),
            now,
            latency: None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.args.get(name) {
            Some(ArgValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn user_arg(&self, name: &str) -> Option<&CommandUser> {
        match self.args.get(name) {
            Some(ArgValue::User(user)) => Some(user),
            _ => None,
        }
    }

    /// The user named by `name`, or the invoking user when the argument was omitted.
    pub fn target_user(&self, name: &str) -> &CommandUser {
        self.user_arg(name).unwrap_or(&self.user)
    }
}

#[async_trait]
pub trait Command: Send + Sync {
    fn spec(&self) -> CommandSpec;

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError>;

    /// Suggestions for a partially typed argument value.
    fn autocomplete(&self, _arg: &str, _current: &str) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every command the bot ships.
    pub fn with_default_commands() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(afk::AfkCommand));
        registry.register(Arc::new(currency::ConvertCommand));
        registry.register(Arc::new(ping::PingCommand));
        registry.register(Arc::new(stats::EmojiStatsCommand));
        registry.register(Arc::new(stats::SpamStatsCommand));
        registry.register(Arc::new(stats::CallStatsCommand));
        registry.register(Arc::new(stats::GraphCommand));
        registry.register(Arc::new(config::ConfigCommand));
        registry.register(Arc::new(config::OptOutCommand));
        registry.register(Arc::new(config::OptInCommand));
        registry
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.spec().name, command);
    }

    /// Finds a command by name and entry point.
    pub fn get(&self, name: &str, kind: CommandKind) -> Option<Arc<dyn Command>> {
        self.commands
            .get(name)
            .filter(|command| command.spec().kind == kind)
            .cloned()
    }

    pub fn slash_commands(&self) -> Vec<CreateCommand> {
        self.commands
            .values()
            .map(|command| command.spec())
            .filter(|spec| spec.kind == CommandKind::Slash)
            .map(|spec| spec.to_create_command())
            .collect()
    }

    /// Splits a `!name arg ...` message into a registered prefix command and its tokens.
    ///
    /// Returns `None` for messages without the prefix or naming an unknown command.
    pub fn parse_prefix<'c>(&self, content: &'c str) -> Option<(Arc<dyn Command>, Vec<&'c str>)> {
        let rest = content.trim_start().strip_prefix(PREFIX)?;
        let mut tokens = rest.split_whitespace();
        let name = tokens.next()?.to_lowercase();

        let command = self.get(&name, CommandKind::Prefix)?;
        Some((command, tokens.collect()))
    }
}

/// Binds prefix tokens to the declared arguments in order.
///
/// # Arguments
/// - `spec` - Argument schema of the command
/// - `tokens` - Whitespace separated words following the command name
/// - `mentions` - Users mentioned in the message, used to resolve user arguments
///
/// # Returns
/// - `Ok(args)` - Every token bound and validated
/// - `Err(CommandError)` - A required argument is missing, a value is outside its
///   choices, or a user argument is not a mention of the message
pub fn bind_prefix_args(
    spec: &CommandSpec,
    tokens: &[&str],
    mentions: &[CommandUser],
) -> Result<HashMap<String, ArgValue>, CommandError> {
    let mut args = HashMap::new();
    let mut tokens = tokens.iter();

    for arg in &spec.args {
        let Some(token) = tokens.next() else {
            if arg.required {
                return Err(CommandError::MissingArgument(arg.name.to_string()));
            }
            continue;
        };

        let value = match arg.kind {
            ArgKind::Text => ArgValue::Text(check_choice(arg, token)?),
            ArgKind::User => ArgValue::User(resolve_mention(token, mentions)?),
        };
        args.insert(arg.name.to_string(), value);
    }

    Ok(args)
}

/// Validates a text value against the argument's choices.
pub fn check_choice(arg: &ArgSpec, value: &str) -> Result<String, CommandError> {
    if arg.choices.is_empty() {
        return Ok(value.to_string());
    }

    let lowered = value.to_lowercase();
    if arg.choices.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(CommandError::InvalidChoice {
            name: arg.name.to_string(),
            value: value.to_string(),
            options: arg.choices.iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// Resolves `<@id>` or `<@!id>` against the users mentioned in the message.
fn resolve_mention(token: &str, mentions: &[CommandUser]) -> Result<CommandUser, CommandError> {
    token
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|id| id.trim_start_matches('!'))
        .and_then(|id| id.parse::<u64>().ok())
        .and_then(|id| mentions.iter().find(|user| user.id == id))
        .cloned()
        .ok_or_else(|| CommandError::UnknownUser(token.to_string()))
}

/// Runs a command after the permission checks its spec asks for.
///
/// Never fails: command errors are shown to the user, anything else is logged and
/// replaced with a generic error reply.
pub async fn execute(ctx: &BotContext, command: &dyn Command, invocation: &Invocation) -> Reply {
    let spec = command.spec();

    let result: Result<Reply, AppError> = if spec.guild_only && invocation.guild_id.is_none() {
        Err(CommandError::GuildOnly.into())
    } else if spec.admin_only && !invocation.is_admin {
        Err(CommandError::MissingPermissions.into())
    } else {
        command.run(ctx, invocation).await
    };

    match result {
        Ok(reply) => reply,
        Err(AppError::CommandErr(e)) => {
            tracing::debug!(
                "Rejected {} from {}: {}",
                spec.name,
                invocation.user.id,
                e
            );
            Reply::error(e.to_string())
        }
        Err(e) => {
            tracing::error!(
                "Command {} failed for user {} ({}): {}",
                spec.name,
                invocation.user.name,
                invocation.user.id,
                e
            );
            Reply::error(e.user_message())
        }
    }
}

#[cfg(test)]
pub(crate) mod test;
