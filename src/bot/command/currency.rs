use async_trait::async_trait;
use crate::{
    bot::{
        command::{ArgSpec, Command, CommandKind, CommandSpec, Invocation},
        reply::{self, EmbedReply, Reply},
    },
    error::{command::CommandError, AppError},
    service::currency::{autocomplete_currencies, convert, format_money, ConversionRequest},
    state::BotContext,
};

/// `/convert amount from_currency to_currency`
pub struct ConvertCommand;

#[async_trait]
impl Command for ConvertCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "convert",
            "Convert an amount between currencies",
            CommandKind::Slash,
        )
        .arg(ArgSpec::text("amount", "Amount to convert").required())
        .arg(
            ArgSpec::text("from_currency", "Currency to convert from")
                .required()
                .autocomplete(),
        )
        .arg(
            ArgSpec::text("to_currency", "Currency to convert to")
                .required()
                .autocomplete(),
        )
    }

    async fn run(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, AppError> {
        let arg = |name: &str| {
            invocation
                .text(name)
                .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
        };

        let request =
            ConversionRequest::parse(arg("amount")?, arg("from_currency")?, arg("to_currency")?)?;

        let rates = ctx.rate_cache.get_rates(invocation.now).await;
        let conversion = convert(&request, &rates)?;

        Ok(EmbedReply::new("💱 Currency Conversion", reply::BLUE)
            .field("From", format_money(conversion.amount, conversion.from), true)
            .field("To", format_money(conversion.converted, conversion.to), true)
            .field(
                "Rate",
                format!(
                    "1 {} = {:.4} {}",
                    conversion.from, conversion.rate, conversion.to
                ),
                false,
            )
            .footer(format!(
                "Rates last updated: {}",
                conversion.rates_updated_at.format("%Y-%m-%d %H:%M UTC")
            ))
            .into())
    }

    fn autocomplete(&self, arg: &str, current: &str) -> Vec<String> {
        match arg {
            "from_currency" | "to_currency" => autocomplete_currencies(current)
                .into_iter()
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}
