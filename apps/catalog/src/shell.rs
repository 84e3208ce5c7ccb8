//! Terminal router: resolves routes, drives the matching view and follows the
//! navigation requests the views emit.

use std::{io::Write, sync::Arc};

use anyhow::Result;
use client_core::{
    draft::GameDraft,
    form_view::{DeleteOutcome, FormPhase, FormView, LoadOutcome, SubmitOutcome},
    list_view::ListView,
    navigation::{ChannelNavigator, Confirm, Navigator},
    routes::Route,
    validation::Field,
    CatalogApi,
};
use shared::protocol::DEFAULT_PAGE_NUMBER;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::render;

pub struct Shell<W: Write> {
    api: Arc<dyn CatalogApi>,
    page_size: u32,
    navigator: Arc<dyn Navigator>,
    routes: mpsc::UnboundedReceiver<Route>,
    out: W,
    color: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(api: Arc<dyn CatalogApi>, page_size: u32, out: W, color: bool) -> Self {
        let (navigator, routes) = ChannelNavigator::new();
        Self {
            api,
            page_size,
            navigator: Arc::new(navigator),
            routes,
            out,
            color,
        }
    }

    /// Pages below 1 are clamped; pages past the end render an empty table.
    pub async fn list(&mut self, page: u32) -> Result<bool> {
        let mut view = ListView::new(self.page_size);
        let page = page.max(DEFAULT_PAGE_NUMBER);
        if page == DEFAULT_PAGE_NUMBER {
            view.load(self.api.as_ref()).await;
        } else {
            view.change_page(self.api.as_ref(), page).await;
        }
        self.write(&render::list(&view, self.color))?;
        Ok(view.error().is_none())
    }

    pub async fn open(&mut self, path: &str) -> Result<bool> {
        let route = Route::parse(path);
        info!(path, resolved = %route.path(), "shell: opening route");
        self.show(route).await
    }

    async fn show(&mut self, route: Route) -> Result<bool> {
        if !route.is_form() {
            return self.list(DEFAULT_PAGE_NUMBER).await;
        }
        let mut form = FormView::for_route(&route, Arc::clone(&self.navigator));
        form.load(self.api.as_ref()).await;
        self.write(&render::form(&form, self.color))?;
        Ok(form.error().is_none())
    }

    pub async fn create(&mut self, edit: impl FnOnce(&mut GameDraft) -> Vec<Field>) -> Result<bool> {
        let form = FormView::for_route(&Route::NewGame, Arc::clone(&self.navigator));
        self.save(form, edit).await
    }

    /// Loads the record first; edits are only applied to a successfully loaded form.
    pub async fn edit(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut GameDraft) -> Vec<Field>,
    ) -> Result<bool> {
        let mut form = FormView::for_route(
            &Route::EditGame(id.to_string()),
            Arc::clone(&self.navigator),
        );
        let loaded = form.load(self.api.as_ref()).await;
        if form.phase() == FormPhase::Invalid || loaded != LoadOutcome::Loaded {
            self.write(&render::form(&form, self.color))?;
            return Ok(false);
        }
        self.save(form, edit).await
    }

    async fn save(
        &mut self,
        mut form: FormView,
        edit: impl FnOnce(&mut GameDraft) -> Vec<Field>,
    ) -> Result<bool> {
        for field in edit(form.draft_mut()) {
            form.touch(field);
        }
        let outcome = form.submit(self.api.as_ref()).await;
        self.write(&render::form(&form, self.color))?;
        match outcome {
            SubmitOutcome::Saved(game) => {
                info!(id = game.id.0, "shell: saved, waiting for redirect");
                self.follow_navigation(&mut form).await?;
                Ok(true)
            }
            SubmitOutcome::Blocked(report) => {
                debug!(
                    invalid = report.invalid_fields().count(),
                    "shell: submission blocked by validation"
                );
                Ok(false)
            }
            SubmitOutcome::Failed | SubmitOutcome::Busy | SubmitOutcome::Unavailable => Ok(false),
        }
    }

    pub async fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool> {
        let mut form = FormView::for_route(
            &Route::EditGame(id.to_string()),
            Arc::clone(&self.navigator),
        );
        form.load(self.api.as_ref()).await;
        self.write(&render::form(&form, self.color))?;

        match form.delete(self.api.as_ref(), confirm).await {
            DeleteOutcome::Deleted => {
                self.write(&format!("Deleted video game #{id}.\n"))?;
                self.follow_navigation(&mut form).await?;
                Ok(true)
            }
            DeleteOutcome::Declined => {
                self.write("Delete cancelled.\n")?;
                Ok(true)
            }
            DeleteOutcome::Failed => {
                self.write(&render::status(&form, self.color))?;
                Ok(false)
            }
            DeleteOutcome::Busy | DeleteOutcome::Unavailable => Ok(false),
        }
    }

    /// Waits out any scheduled redirect, then shows the last requested route.
    async fn follow_navigation(&mut self, form: &mut FormView) -> Result<()> {
        if let Some(redirect) = form.take_redirect() {
            redirect.await?;
        }
        let mut next = None;
        while let Ok(route) = self.routes.try_recv() {
            next = Some(route);
        }
        if let Some(route) = next {
            debug!(path = %route.path(), "shell: following navigation");
            self.show(route).await?;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }
}
