use crate::constants::TELEGRAM_MSG_LIMIT;
use crate::data_backend::{english_date_fmt, parse_api_date, EMOJIS};
use crate::data_types::openmensa_data_types::Meal;

use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;
use teloxide::utils::{html, markdown};

pub fn day_label(raw_date: &str) -> String {
    parse_api_date(raw_date)
        .map(english_date_fmt)
        .unwrap_or_else(|| raw_date.to_string())
}

pub fn menu_title(date: NaiveDate, canteen_name: &str) -> String {
    format!("Menu for {} - {}", english_date_fmt(date), canteen_name)
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => price.to_string(),
        None => "N/A".to_string(),
    }
}

fn join_notes(notes: &[String], fallback: &str) -> String {
    if notes.is_empty() {
        fallback.to_string()
    } else {
        notes.join(", ")
    }
}

/// Plain markdown listing, sent as a `.md` document.
pub fn build_menu_markdown(meals: &[Meal]) -> String {
    meals
        .iter()
        .map(|meal| {
            format!(
                "**{}** ({})\nPrices: Students: {}€, Employees: {}€\nNotes: {}\n\n",
                meal.name,
                meal.category,
                format_price(meal.prices.students),
                format_price(meal.prices.employees),
                join_notes(&meal.notes, "No additional notes"),
            )
        })
        .collect()
}

/// Standalone HTML page with one card per meal.
pub fn build_menu_html(meals: &[Meal], title: &str) -> String {
    let meal_cards: String = meals
        .iter()
        .map(|meal| {
            let prices = &meal.prices;
            format!(
                r#"
      <div class="card">
        <h3>{}</h3>
        <p><strong>Category:</strong> {}</p>
        <p><strong>Students Price:</strong> {}</p>
        <p><strong>Employees Price:</strong> {}</p>
        <p><strong>Pupils Price:</strong> {}</p>
        <p><strong>Others Price:</strong> {}</p>
        <p><strong>Notes:</strong> {}</p>
      </div>
"#,
                html::escape(&meal.name),
                html::escape(&meal.category),
                format_price(prices.students),
                format_price(prices.employees),
                format_price(prices.pupils),
                format_price(prices.others),
                html::escape(&join_notes(&meal.notes, "None")),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    body {{
      margin: 20pt;
      font-family: sans-serif;
    }}
    h1 {{
      margin-bottom: 20pt;
    }}
    .card {{
      border: 1pt solid #8884;
      border-radius: 8pt;
      padding: 20pt;
      margin-bottom: 20pt;
      box-shadow: 0 2pt 5pt #0002;
    }}
    .card h3 {{
      margin-top: 0;
    }}
    .card p {{
      margin: 5pt 0;
    }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <div id="meal-cards">
{meal_cards}
  </div>
</body>
</html>
"#,
        title = html::escape(title),
        meal_cards = meal_cards,
    )
}

/// MarkdownV2 chat message, meals grouped by category.
/// Groups that no longer fit into one telegram message are left out,
/// the attached HTML page always has the full menu.
pub fn build_menu_message(meals: &[Meal], title: &str) -> String {
    let rand_emoji = EMOJIS[rand::thread_rng().gen_range(0..EMOJIS.len())];
    let mut msg = format!(
        "{} {} {}\n",
        rand_emoji,
        markdown::bold(&markdown::escape(title)),
        rand_emoji
    );

    let mut structured_meals: BTreeMap<&str, Vec<&Meal>> = BTreeMap::new();
    for meal in meals {
        structured_meals
            .entry(meal.category.as_str())
            .or_default()
            .push(meal);
    }

    let truncated_note = format!(
        "\n{}",
        markdown::italic(&markdown::escape("… see the attached page"))
    );
    for (category, group) in structured_meals {
        let mut chunk = format!("\n{}\n", markdown::bold(&markdown::escape(category)));

        for meal in group {
            chunk += &format!(" • {}\n", markdown::underline(&markdown::escape(&meal.name)));
            for note in &meal.notes {
                chunk += &format!(
                    "     {} {}\n",
                    markdown::escape("+"),
                    markdown::italic(&markdown::escape(note))
                );
            }
            chunk += &markdown::escape(&format!(
                "   Students: {} | Employees: {} | Pupils: {} | Others: {}\n",
                format_price(meal.prices.students),
                format_price(meal.prices.employees),
                format_price(meal.prices.pupils),
                format_price(meal.prices.others),
            ));
        }

        if msg.chars().count() + chunk.chars().count() + truncated_note.chars().count()
            > TELEGRAM_MSG_LIMIT
        {
            msg += &truncated_note;
            break;
        }
        msg += &chunk;
    }

    msg
}
