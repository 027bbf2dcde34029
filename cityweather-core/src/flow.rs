//! Search-to-forecast resolution flow.
//!
//! Turns search-box keystrokes into a candidate list and a selected
//! candidate into a forecast. The result is published as a [`DisplayState`]
//! on a `watch` channel for whatever renders it.
//!
//! Overlapping searches are not sequenced: whichever response resolves last
//! overwrites the candidate list, even if it belongs to an older query.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    config::{Config, DEFAULT_CITY, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_QUERY_LEN},
    debounce::Debouncer,
    model::{FORECAST_HORIZON_DAYS, ForecastRequest, ForecastResult, LocationCandidate},
    provider::WeatherTransport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub default_city: String,
    pub forecast_days: u8,
    pub debounce: Duration,
    pub min_query_len: usize,
}

impl FlowSettings {
    /// Whether `text` is long enough to be sent to the search endpoint.
    pub fn accepts_query(&self, text: &str) -> bool {
        text.chars().count() > self.min_query_len
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            forecast_days: FORECAST_HORIZON_DAYS,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl From<&Config> for FlowSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_city: config.default_city.clone(),
            forecast_days: config.forecast_days,
            debounce: config.debounce(),
            min_query_len: config.min_query_len,
        }
    }
}

/// What the rendering layer shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub search_panel_open: bool,
    pub candidates: Vec<LocationCandidate>,
    /// `None` until the first successful forecast fetch.
    pub forecast: Option<ForecastResult>,
}

/// How one debounced search settled.
///
/// The receiver returned by [`ResolutionFlow::on_query_changed`] errors
/// instead when a later keystroke, a selection or closing the panel drops the
/// search before it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The text was too short to be sent.
    TooShort,
    /// The candidates this query produced, also written to the display state.
    Found(Vec<LocationCandidate>),
    /// The transport had nothing; the candidate list was left alone.
    NoData,
}

#[derive(Debug)]
pub struct ResolutionFlow {
    transport: Arc<dyn WeatherTransport>,
    settings: FlowSettings,
    state: Arc<watch::Sender<DisplayState>>,
    debouncer: Debouncer,
}

impl ResolutionFlow {
    pub fn new(transport: Arc<dyn WeatherTransport>, settings: FlowSettings) -> Self {
        let (state, _) = watch::channel(DisplayState::default());
        let debouncer = Debouncer::new(settings.debounce);

        Self { transport, settings, state: Arc::new(state), debouncer }
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Initial forecast for the default city.
    pub fn start(&self) -> JoinHandle<()> {
        let request =
            ForecastRequest::new(self.settings.default_city.clone(), self.settings.forecast_days);
        self.spawn_forecast(request)
    }

    pub fn on_panel_toggle(&mut self) {
        let mut closed = false;
        self.state.send_modify(|state| {
            state.search_panel_open = !state.search_panel_open;
            if !state.search_panel_open {
                state.candidates.clear();
                closed = true;
            }
        });

        if closed {
            self.debouncer.cancel();
        }
        debug!(open = !closed, "search panel toggled");
    }

    /// Called with the full search-box text after every keystroke.
    ///
    /// The returned receiver resolves with this query's own outcome, which is
    /// not necessarily what the display state ends up holding.
    pub fn on_query_changed(&mut self, text: &str) -> oneshot::Receiver<SearchOutcome> {
        let query = text.to_owned();
        let accepted = self.settings.accepts_query(&query);
        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let (settled, outcome) = oneshot::channel();

        self.debouncer.call(async move {
            let result = if !accepted {
                debug!(query = %query, "query too short; not searching");
                SearchOutcome::TooShort
            } else {
                match transport.search(&query).await {
                    Some(candidates) => {
                        debug!(query = %query, count = candidates.len(), "search resolved");
                        state.send_modify(|state| state.candidates = candidates.clone());
                        SearchOutcome::Found(candidates)
                    }
                    None => {
                        debug!(query = %query, "search returned no data; keeping candidates");
                        SearchOutcome::NoData
                    }
                }
            };
            let _ = settled.send(result);
        });

        outcome
    }

    /// Clears the candidate list, closes the panel and fetches the forecast
    /// for `candidate`. The returned handle resolves once the fetch settles.
    pub fn on_candidate_selected(&mut self, candidate: &LocationCandidate) -> JoinHandle<()> {
        debug!(location = %candidate, "candidate selected");

        self.debouncer.cancel();
        self.state.send_modify(|state| {
            state.candidates.clear();
            state.search_panel_open = false;
        });

        self.spawn_forecast(ForecastRequest::new(
            candidate.name.clone(),
            self.settings.forecast_days,
        ))
    }

    fn spawn_forecast(&self, request: ForecastRequest) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            match transport.forecast(&request).await {
                Some(forecast) => {
                    debug!(city = %request.city_name, "forecast loaded");
                    state.send_modify(|state| state.forecast = Some(forecast));
                }
                None => debug!(city = %request.city_name, "no forecast; keeping previous"),
            }
        })
    }
}
