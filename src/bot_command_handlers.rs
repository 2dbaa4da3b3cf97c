use crate::bot_command_helpers::{
    fetch_and_send_markdown, parse_date_arg, parse_fetch_args, search_and_show_canteens,
};
use crate::constants::{CANTEEN_SEARCH_PROMPT, FETCH_ID_PROMPT, NO_CANTEEN_MSG};
use crate::data_backend::openmensa_parser::OpenMensaClient;
use crate::data_types::{ArgParseError, Command, DialogueState, DialogueType, HandlerResult};
use crate::shared_main::{
    make_commands_keyrow, selected_canteen, selected_canteen_or_report, send_days_list,
    send_menu_for_day,
};

use chrono::Utc;
use teloxide::{prelude::*, utils::command::BotCommands};

pub async fn start(bot: Bot, msg: Message, dialogue: DialogueType) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .reply_markup(make_commands_keyrow())
        .await?;

    match selected_canteen(msg.chat.id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            bot.send_message(msg.chat.id, CANTEEN_SEARCH_PROMPT).await?;
            dialogue.update(DialogueState::AwaitCanteenSearch).await?;
        }
        Err(e) => {
            log::error!("Reading selection of chat {} failed: {}", msg.chat.id.0, e);
            bot.send_message(msg.chat.id, format!("Error reading selected canteen: {}", e))
                .await?;
        }
    }
    Ok(())
}

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .reply_markup(make_commands_keyrow())
        .await?;
    Ok(())
}

pub async fn change_canteen(
    bot: Bot,
    msg: Message,
    dialogue: DialogueType,
    query: String,
    client: OpenMensaClient,
) -> HandlerResult {
    if query.trim().is_empty() {
        bot.send_message(msg.chat.id, CANTEEN_SEARCH_PROMPT).await?;
        dialogue.update(DialogueState::AwaitCanteenSearch).await?;
        return Ok(());
    }

    dialogue.exit().await?;
    search_and_show_canteens(&bot, msg.chat.id, &client, &query).await
}

pub async fn reply_canteen_search(
    bot: Bot,
    msg: Message,
    dialogue: DialogueType,
    client: OpenMensaClient,
) -> HandlerResult {
    match msg.text().map(str::trim) {
        Some(query) if !query.is_empty() => {
            dialogue.exit().await?;
            search_and_show_canteens(&bot, msg.chat.id, &client, query).await
        }
        _ => {
            bot.send_message(
                msg.chat.id,
                format!("That is not a search text.\n{}", CANTEEN_SEARCH_PROMPT),
            )
            .await?;
            Ok(())
        }
    }
}

pub async fn days_cmd(bot: Bot, msg: Message, client: OpenMensaClient) -> HandlerResult {
    match selected_canteen_or_report(&bot, msg.chat.id).await? {
        Some(canteen_id) => send_days_list(&bot, msg.chat.id, &client, canteen_id).await,
        None => Ok(()),
    }
}

pub async fn menu_cmd(
    bot: Bot,
    msg: Message,
    date: String,
    client: OpenMensaClient,
) -> HandlerResult {
    let Some(canteen_id) = selected_canteen_or_report(&bot, msg.chat.id).await? else {
        return Ok(());
    };

    match parse_date_arg(&date) {
        // no date given, let the user pick one of the open days
        Ok(None) => send_days_list(&bot, msg.chat.id, &client, canteen_id).await,
        Ok(Some(date)) => send_menu_for_day(&bot, msg.chat.id, &client, canteen_id, date).await,
        Err(e) => {
            bot.send_message(msg.chat.id, e.to_string()).await?;
            Ok(())
        }
    }
}

pub async fn fetch_cmd(
    bot: Bot,
    msg: Message,
    dialogue: DialogueType,
    args: String,
    client: OpenMensaClient,
) -> HandlerResult {
    if args.trim().is_empty() {
        bot.send_message(msg.chat.id, FETCH_ID_PROMPT).await?;
        dialogue.update(DialogueState::AwaitFetchCanteenId).await?;
        return Ok(());
    }

    dialogue.exit().await?;
    fetch_with_args(&bot, msg.chat.id, &client, &args).await
}

pub async fn reply_fetch_canteen_id(
    bot: Bot,
    msg: Message,
    dialogue: DialogueType,
    client: OpenMensaClient,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(
            msg.chat.id,
            format!("That is not text.\n{}", FETCH_ID_PROMPT),
        )
        .await?;
        return Ok(());
    };

    dialogue.exit().await?;
    fetch_with_args(&bot, msg.chat.id, &client, text).await
}

async fn fetch_with_args(
    bot: &Bot,
    chat_id: ChatId,
    client: &OpenMensaClient,
    args: &str,
) -> HandlerResult {
    match parse_fetch_args(args, Utc::now().date_naive()) {
        Ok((canteen_id, date)) => {
            fetch_and_send_markdown(bot, chat_id, client, canteen_id, date).await
        }
        Err(e @ ArgParseError::NoCanteenId) => {
            bot.send_message(chat_id, e.to_string()).await?;
            Ok(())
        }
        Err(e) => {
            bot.send_message(chat_id, format!("Error fetching menu: {}", e))
                .await?;
            Ok(())
        }
    }
}

pub async fn cancel(bot: Bot, msg: Message, dialogue: DialogueType) -> HandlerResult {
    let text = match dialogue.get().await? {
        Some(DialogueState::AwaitCanteenSearch) => NO_CANTEEN_MSG.to_string(),
        Some(DialogueState::AwaitFetchCanteenId) => ArgParseError::NoCanteenId.to_string(),
        _ => "Nothing to cancel.".to_string(),
    };

    dialogue.exit().await?;
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

pub async fn invalid_cmd(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Unknown command, /help lists all commands.")
        .await?;
    Ok(())
}
