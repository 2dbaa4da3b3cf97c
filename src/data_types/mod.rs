pub mod openmensa_data_types;

use teloxide::{
    dispatching::dialogue::InMemStorage, prelude::Dialogue, utils::command::BotCommands,
};
use thiserror::Error;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show this text")]
    Help,
    #[command(description = "search and select a canteen")]
    Canteen(String),
    #[command(description = "open days of the selected canteen")]
    Days,
    #[command(description = "menu of the selected canteen [YYYY-MM-DD]")]
    Menu(String),
    #[command(description = "menu of any canteen <id> [YYYY-MM-DD]")]
    Fetch(String),
    #[command(hide)]
    Cancel,
    #[command(hide)]
    Start,
}

#[derive(Clone, Default)]
pub enum DialogueState {
    #[default]
    Default,
    AwaitCanteenSearch,
    AwaitFetchCanteenId,
}

pub type DialogueType = Dialogue<DialogueState, InMemStorage<DialogueState>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgParseError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid canteen ID '{0}'")]
    InvalidCanteenId(String),
    #[error("No canteen ID provided.")]
    NoCanteenId,
}
