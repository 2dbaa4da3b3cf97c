use crate::constants::MAX_CANTEEN_PAGES;
use crate::data_backend::api_date_fmt;
use crate::data_backend::menu_render::{
    build_menu_html, build_menu_message, day_label, menu_title,
};
use crate::data_types::openmensa_data_types::{
    Canteen, CanteenDetails, Day, DayEntry, DayMenu, Meal,
};

use anyhow::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Instant;

/// Thin wrapper around the OpenMensa v2 REST API.
#[derive(Debug, Clone)]
pub struct OpenMensaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMensaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("Fetching data from: {}", url);

        let now = Instant::now();
        let resp = self.client.get(&url).send().await?;
        log::debug!(
            "OpenMensa response status: {} ({:.2?})",
            resp.status(),
            now.elapsed()
        );

        Ok(resp.error_for_status()?.json::<T>().await?)
    }

    /// Walks `/canteens?page=n` starting at 1 until an empty page comes back.
    pub async fn get_all_canteens(&self) -> Result<Vec<Canteen>> {
        let mut canteens: Vec<Canteen> = Vec::new();
        let now = Instant::now();

        for page in 1..=MAX_CANTEEN_PAGES {
            let data: Vec<Canteen> = self.get_json(&format!("/canteens?page={}", page)).await?;
            if data.is_empty() {
                log::info!(
                    "Fetched {} canteens from {} pages: {:.2?}",
                    canteens.len(),
                    page - 1,
                    now.elapsed()
                );
                return Ok(canteens);
            }
            canteens.extend(data);
        }

        log::warn!(
            "Canteen list did not end after {} pages, keeping {} canteens",
            MAX_CANTEEN_PAGES,
            canteens.len()
        );
        Ok(canteens)
    }

    pub async fn get_canteen(&self, canteen_id: u32) -> Result<CanteenDetails> {
        self.get_json(&format!("/canteens/{}", canteen_id)).await
    }

    pub async fn get_canteen_name(&self, canteen_id: u32) -> Result<String> {
        Ok(self.get_canteen(canteen_id).await?.name)
    }

    pub async fn get_days(&self, canteen_id: u32) -> Result<Vec<Day>> {
        self.get_json(&format!("/canteens/{}/days", canteen_id))
            .await
    }

    pub async fn get_open_days(&self, canteen_id: u32) -> Result<Vec<DayEntry>> {
        Ok(open_day_entries(self.get_days(canteen_id).await?))
    }

    pub async fn get_meals(&self, canteen_id: u32, date: NaiveDate) -> Result<Vec<Meal>> {
        let now = Instant::now();
        let meals: Vec<Meal> = self
            .get_json(&format!(
                "/canteens/{}/days/{}/meals",
                canteen_id,
                api_date_fmt(date)
            ))
            .await?;
        log::info!(
            "Meals for canteen {} on {}: {} ({:.2?})",
            canteen_id,
            date,
            meals.len(),
            now.elapsed()
        );

        Ok(meals)
    }
}

/// Meals of one day plus the canteen name for the title.
/// `None` when the canteen serves nothing that day.
pub async fn build_day_menu(
    client: &OpenMensaClient,
    canteen_id: u32,
    date: NaiveDate,
) -> Result<Option<DayMenu>> {
    let meals = client.get_meals(canteen_id, date).await?;
    if meals.is_empty() {
        return Ok(None);
    }

    let canteen_name = client.get_canteen_name(canteen_id).await?;
    let title = menu_title(date, &canteen_name);

    Ok(Some(DayMenu {
        message: build_menu_message(&meals, &title),
        html: build_menu_html(&meals, &title),
        title,
    }))
}

/// Drops closed days and attaches the display label, keeping API order.
pub fn open_day_entries(days: Vec<Day>) -> Vec<DayEntry> {
    days.into_iter()
        .filter(|day| !day.closed)
        .map(|day| DayEntry {
            label: day_label(&day.date),
            raw_date: day.date,
        })
        .collect()
}
