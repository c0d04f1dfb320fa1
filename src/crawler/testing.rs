//! In-memory site used by the crawler's unit tests

use crate::crawler::{FetchedPage, Transport};
use crate::TransportError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How a route answers
#[derive(Debug, Clone)]
pub(crate) enum Route {
    Page { status: u16, body: String },
    /// GET works, HEAD answers 405
    NoHead { status: u16 },
    /// GET works, HEAD fails to connect
    HeadFails { status: u16 },
    /// HEAD and GET both fail to connect
    Down,
}

#[derive(Debug, Default)]
pub(crate) struct StaticSite {
    routes: HashMap<String, Route>,
    pub head_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Page {
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Page {
                status,
                body: String::new(),
            },
        );
        self
    }

    pub fn route(mut self, url: &str, route: Route) -> Self {
        self.routes.insert(url.to_string(), route);
        self
    }

    /// URLs fetched as pages, in request order
    pub fn fetched(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Transport for StaticSite {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, TransportError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        match self.routes.get(url) {
            Some(Route::Page { status, body }) => Ok(FetchedPage {
                status_code: *status,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: if *status == 200 { body.clone() } else { String::new() },
            }),
            Some(Route::NoHead { status }) | Some(Route::HeadFails { status }) => Ok(FetchedPage {
                status_code: *status,
                content_type: Some("text/html".to_string()),
                body: String::new(),
            }),
            Some(Route::Down) => Err(TransportError::Connect {
                url: url.to_string(),
            }),
            None => Ok(FetchedPage {
                status_code: 404,
                content_type: None,
                body: String::new(),
            }),
        }
    }

    async fn fetch_head(&self, url: &str) -> Result<u16, TransportError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);

        match self.routes.get(url) {
            Some(Route::Page { status, .. }) => Ok(*status),
            Some(Route::NoHead { .. }) => Ok(405),
            Some(Route::HeadFails { .. }) | Some(Route::Down) => Err(TransportError::Connect {
                url: url.to_string(),
            }),
            None => Ok(404),
        }
    }

    async fn fetch_status(&self, url: &str) -> Result<u16, TransportError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        match self.routes.get(url) {
            Some(Route::Page { status, .. })
            | Some(Route::NoHead { status })
            | Some(Route::HeadFails { status }) => Ok(*status),
            Some(Route::Down) => Err(TransportError::Connect {
                url: url.to_string(),
            }),
            None => Ok(404),
        }
    }
}
