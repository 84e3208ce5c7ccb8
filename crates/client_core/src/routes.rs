//! Client-side route table: `/games`, `/games/new`, `/games/{id}/edit`.

use shared::domain::VideoGameId;
use tracing::debug;

pub const LIST_PATH: &str = "/games";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    NewGame,
    /// Raw identifier segment; the form view decides whether it is usable.
    EditGame(String),
}

impl Route {
    /// Unmatched paths redirect to the list.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["games"] => Route::List,
            ["games", "new"] => Route::NewGame,
            ["games", id, "edit"] => Route::EditGame((*id).to_string()),
            [] => Route::List,
            _ => {
                debug!(path, "routes: unmatched path, redirecting to {LIST_PATH}");
                Route::List
            }
        }
    }

    pub fn edit(id: VideoGameId) -> Route {
        Route::EditGame(id.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::NewGame => format!("{LIST_PATH}/new"),
            Route::EditGame(id) => format!("{LIST_PATH}/{id}/edit"),
        }
    }

    pub fn is_form(&self) -> bool {
        !matches!(self, Route::List)
    }

    pub fn form_segment(&self) -> Option<&str> {
        match self {
            Route::EditGame(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_paths() {
        assert_eq!(Route::parse("/games"), Route::List);
        assert_eq!(Route::parse("/games/"), Route::List);
        assert_eq!(Route::parse("/games/new"), Route::NewGame);
        assert_eq!(Route::parse("/games/42/edit"), Route::EditGame("42".into()));
        assert_eq!(Route::parse("games/abc/edit?tab=1"), Route::EditGame("abc".into()));
    }

    #[test]
    fn unmatched_paths_redirect_to_list() {
        assert_eq!(Route::parse(""), Route::List);
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse("/settings"), Route::List);
        assert_eq!(Route::parse("/games/42"), Route::List);
        assert_eq!(Route::parse("/games/42/edit/extra"), Route::List);
    }

    #[test]
    fn renders_paths() {
        assert_eq!(Route::List.path(), "/games");
        assert_eq!(Route::NewGame.path(), "/games/new");
        assert_eq!(Route::edit(VideoGameId(7)).path(), "/games/7/edit");
        assert_eq!(Route::edit(VideoGameId(7)).form_segment(), Some("7"));
        assert_eq!(Route::NewGame.form_segment(), None);
    }
}
