use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Genre, VideoGameId},
    time_format,
};

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGame {
    pub id: VideoGameId,
    pub title: String,
    pub publisher: String,
    pub developer: String,
    #[serde(with = "time_format::calendar_date")]
    pub release_date: NaiveDate,
    pub genre: Genre,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_name: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    pub is_active: bool,
    #[serde(with = "time_format::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "time_format::option_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> PagedResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based inclusive range of items on this page, `(0, 0)` when nothing is shown.
    pub fn showing_range(&self) -> (u64, u64) {
        showing_range(self.page_number, self.page_size, self.total_count)
    }
}

pub fn showing_range(page_number: u32, page_size: u32, total_count: u64) -> (u64, u64) {
    if total_count == 0 || page_size == 0 || page_number == 0 {
        return (0, 0);
    }
    let start = u64::from(page_number - 1) * u64::from(page_size) + 1;
    if start > total_count {
        return (0, 0);
    }
    let end = (u64::from(page_number) * u64::from(page_size)).min(total_count);
    (start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoGameRequest {
    pub title: String,
    pub publisher: String,
    pub developer: String,
    #[serde(with = "time_format::calendar_date")]
    pub release_date: NaiveDate,
    pub genre: Genre,
    pub price: f64,
    pub description: String,
    pub rating: i32,
    pub cover_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoGameRequest {
    pub id: VideoGameId,
    pub title: String,
    pub publisher: String,
    pub developer: String,
    #[serde(with = "time_format::calendar_date")]
    pub release_date: NaiveDate,
    pub genre: Genre,
    pub price: f64,
    pub description: String,
    pub rating: i32,
    pub cover_image_url: String,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_backend_record() {
        let game: VideoGame = serde_json::from_value(json!({
            "id": 7,
            "title": "Hollow Knight",
            "publisher": "Team Cherry",
            "developer": "Team Cherry",
            "releaseDate": "2017-02-24T00:00:00",
            "genre": 12,
            "genreName": "Platformer",
            "price": 14.99,
            "description": null,
            "rating": 90,
            "coverImageUrl": null,
            "isActive": true,
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": null
        }))
        .expect("decode");

        assert_eq!(game.id, VideoGameId(7));
        assert_eq!(game.genre, Genre::Platformer);
        assert_eq!(game.release_date, NaiveDate::from_ymd_opt(2017, 2, 24).expect("date"));
        assert!(game.description.is_none());
        assert!(game.updated_at.is_none());
    }

    #[test]
    fn create_request_writes_iso_date_and_omits_identity() {
        let request = CreateVideoGameRequest {
            title: "Celeste".into(),
            publisher: "Maddy Makes Games".into(),
            developer: "Extremely OK Games".into(),
            release_date: NaiveDate::from_ymd_opt(2018, 1, 5).expect("date"),
            genre: Genre::Platformer,
            price: 19.99,
            description: String::new(),
            rating: 94,
            cover_image_url: String::new(),
        };
        let value = serde_json::to_value(&request).expect("encode");
        assert_eq!(value["releaseDate"], "2018-01-05");
        assert_eq!(value["genre"], 12);
        assert!(value.get("id").is_none());
        assert!(value.get("isActive").is_none());
    }

    #[test]
    fn unknown_genre_does_not_fail_the_page() {
        let record = |id: i64, genre: i64| {
            json!({
                "id": id,
                "title": format!("Game {id}"),
                "publisher": "Team Cherry",
                "developer": "Team Cherry",
                "releaseDate": "2017-02-24",
                "genre": genre,
                "price": 14.99,
                "rating": 90,
                "isActive": true,
                "createdAt": "2024-03-01T10:00:00Z"
            })
        };
        let page: PagedResult<VideoGame> = serde_json::from_value(json!({
            "items": [record(1, 12), record(2, 13)],
            "pageNumber": 1,
            "pageSize": 10,
            "totalCount": 2,
            "totalPages": 1
        }))
        .expect("decode");

        assert!(!page.is_empty());
        assert_eq!(page.items[0].genre, Genre::Platformer);
        assert_eq!(page.items[1].genre, Genre::Other);
        assert_eq!(page.items[1].genre.badge().css_class(), "bg-secondary");
    }

    #[test]
    fn empty_page_reports_empty() {
        let page: PagedResult<VideoGame> = PagedResult {
            items: Vec::new(),
            page_number: 1,
            page_size: 10,
            total_count: 0,
            total_pages: 0,
        };
        assert!(page.is_empty());
        assert_eq!(page.showing_range(), (0, 0));
    }

    #[test]
    fn showing_range_clamps_last_page() {
        assert_eq!(showing_range(1, 10, 0), (0, 0));
        assert_eq!(showing_range(1, 10, 25), (1, 10));
        assert_eq!(showing_range(3, 10, 25), (21, 25));
        assert_eq!(showing_range(4, 10, 25), (0, 0));
    }
}
