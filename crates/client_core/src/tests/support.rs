use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use shared::{
    domain::{Genre, VideoGameId},
    protocol::{
        CreateVideoGameRequest, PageRequest, PagedResult, UpdateVideoGameRequest, VideoGame,
    },
};

use crate::{
    navigation::{Confirm, Navigator},
    routes::Route,
    CatalogApi, CatalogError,
};

pub fn sample_game(id: i64) -> VideoGame {
    VideoGame {
        id: VideoGameId(id),
        title: format!("Game {id}"),
        publisher: "Nintendo".to_string(),
        developer: "Retro Studios".to_string(),
        release_date: NaiveDate::from_ymd_opt(2002, 11, 17).expect("date"),
        genre: Genre::Shooter,
        genre_name: Some("Shooter".to_string()),
        price: 19.99,
        description: Some("Bounty hunter on Tallon IV".to_string()),
        rating: 97,
        cover_image_url: None,
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().expect("ts"),
        updated_at: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(PageRequest),
    Get(VideoGameId),
    Create(CreateVideoGameRequest),
    Update(VideoGameId, UpdateVideoGameRequest),
    Delete(VideoGameId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    NotFound,
    ServerError,
    /// Sleep on the tokio clock, then succeed.
    Delay(Duration),
}

pub struct FakeCatalog {
    calls: Mutex<Vec<Call>>,
    list: Behavior,
    get: Behavior,
    save: Behavior,
    delete: Behavior,
    total_count: u64,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            list: Behavior::Succeed,
            get: Behavior::Succeed,
            save: Behavior::Succeed,
            delete: Behavior::Succeed,
            total_count: 42,
        }
    }

    pub fn with_list(mut self, behavior: Behavior) -> Self {
        self.list = behavior;
        self
    }

    pub fn with_get(mut self, behavior: Behavior) -> Self {
        self.get = behavior;
        self
    }

    pub fn with_save(mut self, behavior: Behavior) -> Self {
        self.save = behavior;
        self
    }

    pub fn with_delete(mut self, behavior: Behavior) -> Self {
        self.delete = behavior;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    async fn run(behavior: Behavior) -> Result<(), CatalogError> {
        match behavior {
            Behavior::Succeed => Ok(()),
            Behavior::NotFound => Err(CatalogError::NotFound),
            Behavior::ServerError => Err(CatalogError::Status {
                status: 500,
                detail: "boom".to_string(),
            }),
            Behavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}

/// Page `n` holds two items with ids `n * 10 + 1` and `n * 10 + 2`.
pub fn page_of(page: PageRequest, total_count: u64) -> PagedResult<VideoGame> {
    let base = i64::from(page.page_number) * 10;
    PagedResult {
        items: vec![sample_game(base + 1), sample_game(base + 2)],
        page_number: page.page_number,
        page_size: page.page_size,
        total_count,
        total_pages: total_count.div_ceil(u64::from(page.page_size.max(1))) as u32,
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list(&self, page: PageRequest) -> Result<PagedResult<VideoGame>, CatalogError> {
        self.record(Call::List(page));
        Self::run(self.list).await?;
        Ok(page_of(page, self.total_count))
    }

    async fn get(&self, id: VideoGameId) -> Result<VideoGame, CatalogError> {
        self.record(Call::Get(id));
        Self::run(self.get).await?;
        Ok(sample_game(id.0))
    }

    async fn create(&self, request: &CreateVideoGameRequest) -> Result<VideoGame, CatalogError> {
        self.record(Call::Create(request.clone()));
        Self::run(self.save).await?;
        let mut game = sample_game(101);
        game.title = request.title.clone();
        Ok(game)
    }

    async fn update(
        &self,
        id: VideoGameId,
        request: &UpdateVideoGameRequest,
    ) -> Result<VideoGame, CatalogError> {
        self.record(Call::Update(id, request.clone()));
        Self::run(self.save).await?;
        let mut game = sample_game(id.0);
        game.title = request.title.clone();
        game.is_active = request.is_active;
        Ok(game)
    }

    async fn delete(&self, id: VideoGameId) -> Result<(), CatalogError> {
        self.record(Call::Delete(id));
        Self::run(self.delete).await
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("routes lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().expect("routes lock").push(route);
    }
}

pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        self.answer
    }
}
