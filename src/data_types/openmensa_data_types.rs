use serde::{Deserialize, Serialize};

// GET /canteens?page=n
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Canteen {
    pub id: u32,
    pub name: String,
    // city: String,
    // address: String,
    // coordinates: Option<[f64; 2]>,
}

// GET /canteens/{id}
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CanteenDetails {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// GET /canteens/{id}/days
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Day {
    pub date: String,
    pub closed: bool,
}

/// All prices are in EUR, any group may be missing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Prices {
    #[serde(default)]
    pub students: Option<f64>,
    #[serde(default)]
    pub employees: Option<f64>,
    #[serde(default)]
    pub pupils: Option<f64>,
    #[serde(default)]
    pub others: Option<f64>,
}

// GET /canteens/{id}/days/{date}/meals
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// An open day, ready to be shown as a button.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    pub raw_date: String,
    pub label: String,
}

/// A rendered day menu: the chat message and the standalone page.
#[derive(Debug, Clone)]
pub struct DayMenu {
    pub title: String,
    pub message: String,
    pub html: String,
}
