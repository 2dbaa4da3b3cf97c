use std::{env, time::Instant};

use chrono::NaiveDate;
use teloxide::{
    prelude::*,
    RequestError,
    types::{
        InlineKeyboardButton, InlineKeyboardMarkup, InputFile, KeyboardButton, KeyboardMarkup,
        ParseMode,
    },
};

use crate::{
    constants::{NO_CANTEEN_MSG, PICK_DAY_MSG},
    data_backend::{
        api_date_fmt,
        openmensa_parser::{build_day_menu, OpenMensaClient},
        parse_api_date,
    },
    data_types::{
        openmensa_data_types::{Canteen, DayEntry},
        HandlerResult,
    },
    db_operations::{db_connect, get_selected_canteen, set_selected_canteen},
};

pub fn logger_init(module_path: &str) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module_path,
            if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}

pub fn selected_canteen(chat_id: ChatId) -> rusqlite::Result<Option<u32>> {
    let conn = db_connect()?;
    get_selected_canteen(&conn, chat_id.0)
}

pub fn store_selected_canteen(chat_id: ChatId, canteen_id: u32) -> rusqlite::Result<()> {
    let conn = db_connect()?;
    set_selected_canteen(&conn, chat_id.0, canteen_id)
}

/// `None` when nothing is selected or the db can't be read, the chat is told either way.
pub async fn selected_canteen_or_report(
    bot: &Bot,
    chat_id: ChatId,
) -> Result<Option<u32>, RequestError> {
    match selected_canteen(chat_id) {
        Ok(Some(canteen_id)) => Ok(Some(canteen_id)),
        Ok(None) => {
            bot.send_message(chat_id, NO_CANTEEN_MSG).await?;
            Ok(None)
        }
        Err(e) => {
            log::error!("Reading selection of chat {} failed: {}", chat_id.0, e);
            bot.send_message(chat_id, format!("Error reading selected canteen: {}", e))
                .await?;
            Ok(None)
        }
    }
}

pub fn make_canteen_keyboard(canteens: &[Canteen]) -> InlineKeyboardMarkup {
    let keyboard: Vec<[InlineKeyboardButton; 1]> = canteens
        .iter()
        .map(|canteen| {
            [InlineKeyboardButton::callback(
                format!("{} (ID: {})", canteen.name, canteen.id),
                format!("c_sel:{}", canteen.id),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_days_keyboard(days: &[DayEntry]) -> InlineKeyboardMarkup {
    let keyboard: Vec<[InlineKeyboardButton; 1]> = days
        .iter()
        .map(|day| {
            [InlineKeyboardButton::callback(
                &day.label,
                format!("day:{}", day.raw_date),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_commands_keyrow() -> KeyboardMarkup {
    let keyboard = vec![
        vec![KeyboardButton::new("/days"), KeyboardButton::new("/menu")],
        vec![
            KeyboardButton::new("/canteen"),
            KeyboardButton::new("/fetch"),
        ],
    ];
    KeyboardMarkup::new(keyboard).resize_keyboard()
}

/// The open days of a canteen, one button each.
pub async fn send_days_list(
    bot: &Bot,
    chat_id: ChatId,
    client: &OpenMensaClient,
    canteen_id: u32,
) -> HandlerResult {
    match client.get_open_days(canteen_id).await {
        Ok(days) if days.is_empty() => {
            bot.send_message(chat_id, "No open days found.").await?;
        }
        Ok(days) => {
            bot.send_message(chat_id, PICK_DAY_MSG)
                .reply_markup(make_days_keyboard(&days))
                .await?;
        }
        Err(e) => {
            log::warn!("Fetching days of canteen {} failed: {}", canteen_id, e);
            bot.send_message(chat_id, format!("Error fetching days: {}", e))
                .await?;
        }
    }

    Ok(())
}

pub async fn send_menu_for_day(
    bot: &Bot,
    chat_id: ChatId,
    client: &OpenMensaClient,
    canteen_id: u32,
    date: NaiveDate,
) -> HandlerResult {
    log::debug!("Fetching meals for canteen {}, date {}", canteen_id, date);
    let now = Instant::now();

    match build_day_menu(client, canteen_id, date).await {
        Ok(None) => {
            bot.send_message(chat_id, format!("No meals found for {}.", api_date_fmt(date)))
                .await?;
        }
        Ok(Some(menu)) => {
            log::debug!("Build '{}': {:.2?}", menu.title, now.elapsed());
            let now = Instant::now();

            // a rejected message must not keep the page from being sent
            if let Err(e) = bot
                .send_message(chat_id, menu.message)
                .parse_mode(ParseMode::MarkdownV2)
                .await
            {
                log::warn!("Sending menu message failed: {}", e);
                bot.send_message(chat_id, format!("Error sending menu: {}", e))
                    .await?;
            }

            let page = InputFile::memory(menu.html.into_bytes()).file_name(format!(
                "menu-{}-{}.html",
                canteen_id,
                api_date_fmt(date)
            ));
            bot.send_document(chat_id, page).await?;

            log::debug!("Send menu: {:.2?}", now.elapsed());
        }
        Err(e) => {
            log::warn!("Fetching menu of canteen {} failed: {}", canteen_id, e);
            bot.send_message(chat_id, format!("Error fetching menu: {}", e))
                .await?;
        }
    }

    Ok(())
}

pub async fn callback_handler(bot: Bot, q: CallbackQuery, client: OpenMensaClient) -> HandlerResult {
    if let Some(q_data) = q.data {
        // acknowledge callback query to remove the loading alert
        bot.answer_callback_query(q.id).await?;

        if let Some(message) = q.message {
            let chat_id = message.chat().id;

            let Some((cmd, arg)) = q_data.split_once(':') else {
                log::warn!("Malformed callback data: {}", q_data);
                return Ok(());
            };

            match cmd {
                "c_sel" => {
                    let Ok(canteen_id) = arg.parse::<u32>() else {
                        log::warn!("Invalid canteen in callback: {}", arg);
                        return Ok(());
                    };

                    // drop the selection keyboard
                    bot.edit_message_reply_markup(chat_id, message.id()).await?;

                    if let Err(e) = store_selected_canteen(chat_id, canteen_id) {
                        log::error!("Storing selection of chat {} failed: {}", chat_id.0, e);
                        bot.send_message(chat_id, format!("Error changing canteen: {}", e))
                            .await?;
                        return Ok(());
                    }
                    log::info!("Chat {} selected canteen {}", chat_id.0, canteen_id);

                    bot.send_message(chat_id, "Canteen changed successfully.")
                        .await?;
                    send_days_list(&bot, chat_id, &client, canteen_id).await?;
                }
                "day" => {
                    let Some(date) = parse_api_date(arg) else {
                        bot.send_message(chat_id, "No date selected.").await?;
                        return Ok(());
                    };
                    if let Some(canteen_id) = selected_canteen_or_report(&bot, chat_id).await? {
                        send_menu_for_day(&bot, chat_id, &client, canteen_id, date).await?;
                    }
                }
                _ => log::warn!("Unknown callback query command: {}", cmd),
            }
        }
    }

    Ok(())
}
