use thiserror::Error;

/// Validation failures caused by what the user typed.
///
/// The `Display` text of each variant is shown to the user inside a red error embed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Invalid time format! Use '2h', '30m', or '1d' format.")]
    InvalidTimeFormat,

    #[error("Invalid timezone offset! Use format like '+8' or '-5'.")]
    InvalidTimezoneFormat,

    #[error("Invalid timezone offset! Must be between -12 and +14.")]
    TimezoneOutOfRange,

    #[error("Invalid source currency: `{0}`. Supported: {supported}", supported = crate::model::currency::Currency::supported_list())]
    UnsupportedSourceCurrency(String),

    #[error("Invalid target currency: `{0}`. Supported: {supported}", supported = crate::model::currency::Currency::supported_list())]
    UnsupportedTargetCurrency(String),

    #[error("Source and target currencies cannot be the same!")]
    SameCurrency,

    #[error("Invalid amount: `{0}`")]
    InvalidAmount(String),

    #[error("Amount must be greater than 0!")]
    NonPositiveAmount,

    #[error("Amount is too large to convert!")]
    AmountTooLarge,

    #[error("Invalid graph type. Options: activity, emoji, spam")]
    InvalidGraphType(String),

    /// A value outside the declared choices of a command argument.
    #[error("Invalid {name}. Valid options: {}", options.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        options: Vec<String>,
    },

    #[error("Missing required argument: `{0}`")]
    MissingArgument(String),

    /// A user argument that is neither a mention nor a known member.
    #[error("Could not find user `{0}`.")]
    UnknownUser(String),

    #[error("You need the Administrator permission to use this command.")]
    MissingPermissions,

    #[error("This command can only be used in a server.")]
    GuildOnly,
}
