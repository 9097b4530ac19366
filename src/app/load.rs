//! Chart data loading

use super::App;
use crate::chart::ChartState;
use crate::fetch;
use eframe::egui;
use tracing::{debug, error, info, warn};

const CHART_RESULT_KEY: &str = "chart_result";

impl App {
    /// Kick off the one-shot fetch. Gated so the update loop can call it
    /// every frame; only the first call (or a reload) does work.
    pub fn load_chart_data(&mut self, ctx: &egui::Context) {
        if self.load_started {
            return;
        }
        self.load_started = true;

        let ctx = ctx.clone();
        let url = self.endpoint.clone();
        info!(url = %url, "Fetching word frequency data");

        self.runtime.spawn(async move {
            let client = reqwest::Client::new();
            let result = fetch::fetch_word_frequencies(&client, &url).await;

            let state = match result {
                Ok(entries) => {
                    debug!(count = entries.len(), "Word frequency data received");
                    let state = ChartState::from_fetch(Ok(entries));
                    if state == ChartState::NoData {
                        warn!("No word data received from the server");
                    }
                    state
                }
                Err(e) => {
                    error!(error = %e, "Failed to create word cloud chart");
                    ChartState::from_fetch(Err(e))
                }
            };

            ctx.memory_mut(|mem| mem.data.insert_temp(egui::Id::new(CHART_RESULT_KEY), state));
            ctx.request_repaint();
        });
    }

    /// Pick up the background fetch result, if one landed.
    pub fn poll_chart_result(&mut self, ctx: &egui::Context) {
        if let Some(state) =
            ctx.memory(|mem| mem.data.get_temp::<ChartState>(egui::Id::new(CHART_RESULT_KEY)))
        {
            ctx.memory_mut(|mem| mem.data.remove::<ChartState>(egui::Id::new(CHART_RESULT_KEY)));
            self.chart_state = state;
        }
    }

    /// Re-run the load from scratch, same as reloading the page.
    pub fn reload_chart_data(&mut self, ctx: &egui::Context) {
        info!("Reloading chart data");
        self.chart_state = ChartState::Loading;
        self.load_started = false;
        self.load_chart_data(ctx);
    }
}
