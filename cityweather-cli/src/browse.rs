//! Interactive front end over [`ResolutionFlow`].
//!
//! The prompt plays the role of the search box: each submitted line is one
//! query change, the picker is the candidate list.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use cityweather_core::{
    Config, FlowSettings, LocationCandidate, ResolutionFlow, SearchOutcome, WeatherApiClient,
};
use inquire::{InquireError, Select, Text};
use tokio::time::timeout;

use crate::render;

/// Upper bound on a search request once the debounce has elapsed; the
/// transport itself sets no timeout.
const RESPONSE_WAIT: Duration = Duration::from_secs(10);

pub async fn run(client: WeatherApiClient, config: &Config) -> anyhow::Result<()> {
    let mut flow = ResolutionFlow::new(Arc::new(client), FlowSettings::from(config));

    flow.start().await.context("Startup forecast task failed")?;
    show_forecast(&flow);

    loop {
        let query = Text::new("Search city:")
            .with_help_message("empty input quits")
            .prompt_skippable()
            .context("Failed to read search input")?;
        let Some(query) = query.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()) else {
            break;
        };

        if !flow.snapshot().search_panel_open {
            flow.on_panel_toggle();
        }

        let search = flow.on_query_changed(&query);
        let wait = flow.settings().debounce + RESPONSE_WAIT;
        let candidates = match timeout(wait, search).await {
            Ok(Ok(SearchOutcome::Found(candidates))) => candidates,
            Ok(Ok(SearchOutcome::TooShort)) => {
                println!("Type at least {} characters.", flow.settings().min_query_len + 1);
                continue;
            }
            Ok(Ok(SearchOutcome::NoData)) | Ok(Err(_)) | Err(_) => {
                println!("Search for '{query}' returned no data.");
                continue;
            }
        };

        if candidates.is_empty() {
            println!("No matching locations.");
            flow.on_panel_toggle();
            continue;
        }

        let labels: Vec<String> = candidates.iter().map(LocationCandidate::label).collect();
        let choice = match Select::new("Pick a location:", labels).raw_prompt() {
            Ok(picked) => Ok(Some(picked)),
            Err(InquireError::OperationCanceled) => Ok(None),
            Err(err) => Err(err),
        }
        .context("Failed to read location choice")?;
        match choice.and_then(|picked| candidates.get(picked.index)) {
            Some(candidate) => {
                flow.on_candidate_selected(candidate).await.context("Forecast task failed")?;
                show_forecast(&flow);
            }
            None => flow.on_panel_toggle(),
        }
    }

    Ok(())
}

fn show_forecast(flow: &ResolutionFlow) {
    match flow.snapshot().forecast {
        Some(forecast) => print!("{}", render::forecast(&forecast)),
        None => println!("No forecast loaded."),
    }
}
