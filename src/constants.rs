use std::sync::OnceLock;

pub const DEFAULT_API_URL: &str = "https://openmensa.org/api/v2";
pub const DEFAULT_DB: &str = "openmensa.sqlite";

pub static DB_FILENAME: OnceLock<String> = OnceLock::new();

// upper bound for the canteen pagination loop
pub const MAX_CANTEEN_PAGES: u32 = 100;
pub const MAX_CANTEEN_BUTTONS: usize = 30;
pub const TELEGRAM_MSG_LIMIT: usize = 4096;

pub const NO_CANTEEN_MSG: &str = "No canteen selected.";
pub const CANTEEN_SEARCH_PROMPT: &str = "Enter part of a canteen name (or its ID):";
pub const FETCH_ID_PROMPT: &str =
    "Enter the OpenMensa Canteen ID (e.g. 229), optionally followed by a date (YYYY-MM-DD):";
pub const PICK_CANTEEN_MSG: &str = "Select a canteen:";
pub const PICK_DAY_MSG: &str = "Pick a day to view the menu:";
