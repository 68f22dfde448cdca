//! Search page handler

use crate::{
    server::UiState,
    view::{Action, SearchView, ViewSnapshot},
};
use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use starsearch_core::format::PersonCard;
use tracing::{debug, error};

/// Shown when the search form is submitted without a name
pub const EMPTY_NAME_HINT: &str = "Please enter a name to search.";

/// Query string of `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub name: Option<String>,
    pub popular: Option<String>,
    pub format: Option<String>,
}

impl PageQuery {
    fn text_mode(&self) -> bool {
        self.format.as_deref() == Some("text")
    }

    /// Action requested by the form, or a hint when the request cannot be run
    fn action(&self) -> Result<Option<Action>, &'static str> {
        if self.popular.as_deref().is_some_and(|v| !v.is_empty()) {
            return Ok(Some(Action::Popular));
        }
        match self.name.as_deref() {
            None => Ok(None),
            Some(name) if name.trim().is_empty() => Err(EMPTY_NAME_HINT),
            Some(name) => Ok(Some(Action::search(name))),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    name: String,
    text_mode: bool,
    hint: String,
    error: String,
    has_results: bool,
    text: String,
    cards: Vec<PersonCard>,
}

impl IndexTemplate {
    fn new(query: &PageQuery, hint: &str, snapshot: ViewSnapshot) -> Self {
        let (text, cards) = snapshot
            .results
            .map(|r| (r.text, r.cards))
            .unwrap_or_default();
        Self {
            name: query.name.clone().unwrap_or_default(),
            text_mode: query.text_mode(),
            hint: hint.to_string(),
            error: snapshot.error.unwrap_or_default(),
            has_results: !cards.is_empty(),
            text,
            cards,
        }
    }
}

/// `GET /`
pub async fn index(State(state): State<UiState>, Query(query): Query<PageQuery>) -> Response {
    let view = SearchView::new();
    let hint = match query.action() {
        Ok(Some(action)) => {
            view.run(&state.client, action).await;
            ""
        }
        Ok(None) => "",
        Err(hint) => {
            debug!("search submitted without a name");
            hint
        }
    };

    let template = IndexTemplate::new(&query, hint, view.snapshot());
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render search page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(name: Option<&str>, popular: Option<&str>) -> PageQuery {
        PageQuery {
            name: name.map(str::to_string),
            popular: popular.map(str::to_string),
            format: None,
        }
    }

    #[test]
    fn test_no_params_is_idle() {
        assert_eq!(query(None, None).action(), Ok(None));
    }

    #[test]
    fn test_name_triggers_search() {
        assert_eq!(
            query(Some("Tom Hanks"), None).action(),
            Ok(Some(Action::search("Tom Hanks")))
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(query(Some("   "), None).action(), Err(EMPTY_NAME_HINT));
        assert_eq!(query(Some(""), None).action(), Err(EMPTY_NAME_HINT));
    }

    #[test]
    fn test_popular_wins_over_name() {
        assert_eq!(query(Some(""), Some("1")).action(), Ok(Some(Action::Popular)));
    }

    #[test]
    fn test_text_mode() {
        let mut q = query(None, None);
        assert!(!q.text_mode());
        q.format = Some("text".to_string());
        assert!(q.text_mode());
    }
}
