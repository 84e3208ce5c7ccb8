//! Local, unsaved form state.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use shared::{
    domain::{Genre, VideoGameId},
    protocol::{CreateVideoGameRequest, UpdateVideoGameRequest, VideoGame},
};
use thiserror::Error;

/// Calendar components as a date picker holds them. The triple may be impossible
/// (February 30th); [`DatePickerValue::to_date`] reports that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePickerValue {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DatePickerValue {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn to_iso(&self) -> String {
        format!("{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for DatePickerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a date as YYYY-MM-DD, got '{0}'")]
pub struct DateInputError(pub String);

impl FromStr for DatePickerValue {
    type Err = DateInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateInputError(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let month = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let day = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        Ok(Self::new(year, month, day))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameDraft {
    pub title: String,
    pub publisher: String,
    pub developer: String,
    pub release_date: Option<DatePickerValue>,
    pub genre: Option<Genre>,
    pub price: Option<f64>,
    pub description: String,
    pub rating: Option<i64>,
    pub cover_image_url: String,
    /// Only sent on update.
    pub is_active: bool,
}

impl Default for GameDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            publisher: String::new(),
            developer: String::new(),
            release_date: None,
            genre: Some(Genre::Action),
            price: Some(0.0),
            description: String::new(),
            rating: Some(0),
            cover_image_url: String::new(),
            is_active: true,
        }
    }
}

impl GameDraft {
    pub fn from_game(game: &VideoGame) -> Self {
        let mut draft = Self::default();
        draft.apply_game(game);
        draft
    }

    /// Overwrites every editable field with the stored record.
    pub fn apply_game(&mut self, game: &VideoGame) {
        self.title = game.title.clone();
        self.publisher = game.publisher.clone();
        self.developer = game.developer.clone();
        self.release_date = Some(DatePickerValue::from_date(game.release_date));
        self.genre = Some(game.genre);
        self.price = Some(game.price);
        self.description = game.description.clone().unwrap_or_default();
        self.rating = Some(i64::from(game.rating));
        self.cover_image_url = game.cover_image_url.clone().unwrap_or_default();
        self.is_active = game.is_active;
    }

    /// `None` when a required value is missing or unusable; callers validate first.
    pub fn create_request(&self) -> Option<CreateVideoGameRequest> {
        Some(CreateVideoGameRequest {
            title: self.title.clone(),
            publisher: self.publisher.clone(),
            developer: self.developer.clone(),
            release_date: self.release_date?.to_date()?,
            genre: self.genre?,
            price: self.price?,
            description: self.description.clone(),
            rating: i32::try_from(self.rating?).ok()?,
            cover_image_url: self.cover_image_url.clone(),
        })
    }

    pub fn update_request(&self, id: VideoGameId) -> Option<UpdateVideoGameRequest> {
        let create = self.create_request()?;
        Some(UpdateVideoGameRequest {
            id,
            title: create.title,
            publisher: create.publisher,
            developer: create.developer,
            release_date: create.release_date,
            genre: create.genre,
            price: create.price,
            description: create.description,
            rating: create.rating,
            cover_image_url: create.cover_image_url,
            is_active: self.is_active,
        })
    }
}
