use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::{info, warn};

use crate::routes::Route;

pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this video game?";

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forwards navigation requests to whoever owns the receiving end (the app shell).
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        info!(path = %route.path(), "navigation: requested");
        if self.tx.send(route).is_err() {
            warn!("navigation: receiver dropped, request discarded");
        }
    }
}

/// The deadline is fixed at call time, not when the spawned task first runs.
pub fn schedule_navigation(
    navigator: Arc<dyn Navigator>,
    route: Route,
    delay: Duration,
) -> JoinHandle<()> {
    let deadline = Instant::now() + delay;
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        navigator.navigate(route);
    })
}

/// Explicit human confirmation before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
