use crate::constants::{MAX_CANTEEN_BUTTONS, NO_CANTEEN_MSG, PICK_CANTEEN_MSG};
use crate::data_backend::menu_render::build_menu_markdown;
use crate::data_backend::openmensa_parser::OpenMensaClient;
use crate::data_backend::{api_date_fmt, parse_api_date};
use crate::data_types::openmensa_data_types::Canteen;
use crate::data_types::{ArgParseError, HandlerResult};
use crate::shared_main::make_canteen_keyboard;

use chrono::NaiveDate;
use std::time::Instant;
use teloxide::{prelude::*, types::InputFile};

/// Case-insensitive name search, an exact numeric ID matches too.
pub fn filter_canteens(canteens: &[Canteen], query: &str) -> Vec<Canteen> {
    let query = query.trim().to_lowercase();
    let id_query = query.parse::<u32>().ok();

    canteens
        .iter()
        .filter(|canteen| {
            Some(canteen.id) == id_query || canteen.name.to_lowercase().contains(&query)
        })
        .take(MAX_CANTEEN_BUTTONS)
        .cloned()
        .collect()
}

/// Empty argument means "let the user pick".
pub fn parse_date_arg(arg: &str) -> Result<Option<NaiveDate>, ArgParseError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(None);
    }

    parse_api_date(arg)
        .map(Some)
        .ok_or_else(|| ArgParseError::InvalidDate(arg.to_string()))
}

/// `<canteen id> [YYYY-MM-DD]`, date defaults to `today`.
pub fn parse_fetch_args(args: &str, today: NaiveDate) -> Result<(u32, NaiveDate), ArgParseError> {
    let mut parts = args.split_whitespace();

    let canteen_id = match parts.next() {
        Some(id) => id
            .parse::<u32>()
            .map_err(|_| ArgParseError::InvalidCanteenId(id.to_string()))?,
        None => return Err(ArgParseError::NoCanteenId),
    };

    let date = parse_date_arg(parts.next().unwrap_or_default())?.unwrap_or(today);

    Ok((canteen_id, date))
}

pub async fn search_and_show_canteens(
    bot: &Bot,
    chat_id: ChatId,
    client: &OpenMensaClient,
    query: &str,
) -> HandlerResult {
    let now = Instant::now();

    match client.get_all_canteens().await {
        Ok(canteens) => {
            let matches = filter_canteens(&canteens, query);
            log::debug!(
                "Canteen search '{}': {} of {} ({:.2?})",
                query,
                matches.len(),
                canteens.len(),
                now.elapsed()
            );

            if matches.is_empty() {
                bot.send_message(
                    chat_id,
                    format!("{} Nothing matched '{}'.", NO_CANTEEN_MSG, query.trim()),
                )
                .await?;
            } else {
                bot.send_message(chat_id, PICK_CANTEEN_MSG)
                    .reply_markup(make_canteen_keyboard(&matches))
                    .await?;
            }
        }
        Err(e) => {
            log::warn!("Fetching canteens failed: {}", e);
            bot.send_message(chat_id, format!("Error fetching canteens: {}", e))
                .await?;
        }
    }

    Ok(())
}

/// Sends the menu of any canteen as a markdown document, the stored selection stays untouched.
pub async fn fetch_and_send_markdown(
    bot: &Bot,
    chat_id: ChatId,
    client: &OpenMensaClient,
    canteen_id: u32,
    date: NaiveDate,
) -> HandlerResult {
    match client.get_meals(canteen_id, date).await {
        Ok(meals) if meals.is_empty() => {
            bot.send_message(chat_id, format!("No meals found for {}.", api_date_fmt(date)))
                .await?;
        }
        Ok(meals) => {
            let document = InputFile::memory(build_menu_markdown(&meals).into_bytes()).file_name(
                format!("menu-{}-{}.md", canteen_id, api_date_fmt(date)),
            );
            bot.send_document(chat_id, document).await?;
        }
        Err(e) => {
            log::warn!("Fetching menu of canteen {} failed: {}", canteen_id, e);
            bot.send_message(chat_id, format!("Error fetching menu: {}", e))
                .await?;
        }
    }

    Ok(())
}
