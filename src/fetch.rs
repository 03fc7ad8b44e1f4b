//! Background fetching
//!
//! Each user action spawns one tokio task that calls an upstream client and
//! reports back over an mpsc channel. The UI loop drains the channel without
//! blocking and decides, via the session's request ids, whether to apply a
//! result.

use chrono::{Datelike, NaiveDate, Utc};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::data::{
    Coordinates, ForecastClient, ForecastPayload, GeocodingClient, Place, PlaceCandidate,
    PvgisClient,
};
use crate::pipeline::{effective_peak_kwc, seven_day_outlook};
use crate::session::{RequestId, SolarOutlook};

/// A fetch the application wants performed
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Places {
        id: RequestId,
        query: String,
        auto_pick: bool,
    },
    Forecast {
        id: RequestId,
        place: Place,
    },
    Solar {
        id: RequestId,
        coordinates: Coordinates,
        peak_kwc: f64,
    },
}

/// Messages sent from fetch tasks to the main loop
#[derive(Debug, Clone)]
pub enum FetchMessage {
    /// Geocoding finished
    Places {
        id: RequestId,
        query: String,
        /// Load the best match without asking
        auto_pick: bool,
        result: Result<Vec<PlaceCandidate>, String>,
    },
    /// Forecast finished for `place`
    Forecast {
        id: RequestId,
        place: Place,
        result: Result<ForecastPayload, String>,
    },
    /// PV series fetched and aggregated
    Solar {
        id: RequestId,
        result: Result<SolarOutlook, String>,
    },
}

/// The three upstream clients, cloned into each task
#[derive(Debug, Clone, Default)]
pub struct Clients {
    pub geocoding: GeocodingClient,
    pub forecast: ForecastClient,
    pub pvgis: PvgisClient,
}

impl Clients {
    /// Production clients for the given forecast timezone and name language
    pub fn new(timezone: &str, language: &str) -> Self {
        Self {
            geocoding: GeocodingClient::new().with_language(language),
            forecast: ForecastClient::new().with_timezone(timezone),
            pvgis: PvgisClient::new(),
        }
    }
}

/// Handle for spawning fetches and receiving their results
pub struct FetchHandle {
    /// Channel for receiving fetch results
    pub receiver: mpsc::Receiver<FetchMessage>,
    sender: mpsc::Sender<FetchMessage>,
    clients: Clients,
}

impl FetchHandle {
    pub fn new(clients: Clients) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self {
            receiver,
            sender,
            clients,
        }
    }

    /// Spawns the task serving `request`
    pub fn dispatch(&self, request: FetchRequest) {
        debug!(?request, "dispatching fetch");
        match request {
            FetchRequest::Places {
                id,
                query,
                auto_pick,
            } => self.search(id, query, auto_pick),
            FetchRequest::Forecast { id, place } => self.forecast(id, place),
            FetchRequest::Solar {
                id,
                coordinates,
                peak_kwc,
            } => self.solar(id, coordinates, peak_kwc),
        }
    }

    /// Looks up place candidates for `query`
    pub fn search(&self, id: RequestId, query: String, auto_pick: bool) {
        let client = self.clients.geocoding.clone();
        let tx = self.sender.clone();
        tokio::spawn(async move {
            let result = client.search(&query).await.map_err(|e| {
                warn!(error = %e, query = %query, "place search failed");
                e.to_string()
            });
            let _ = tx
                .send(FetchMessage::Places {
                    id,
                    query,
                    auto_pick,
                    result,
                })
                .await;
        });
    }

    /// Fetches the forecast for `place`
    pub fn forecast(&self, id: RequestId, place: Place) {
        let client = self.clients.forecast.clone();
        let tx = self.sender.clone();
        tokio::spawn(async move {
            let result = client.fetch_forecast(place.coordinates).await.map_err(|e| {
                warn!(error = %e, place = %place.label, "forecast fetch failed");
                e.to_string()
            });
            let _ = tx.send(FetchMessage::Forecast { id, place, result }).await;
        });
    }

    /// Fetches this year's PV series and folds it into a seven-day outlook
    pub fn solar(&self, id: RequestId, coordinates: Coordinates, peak_kwc: f64) {
        let client = self.clients.pvgis.clone();
        let tx = self.sender.clone();
        let today = Utc::now().date_naive();
        tokio::spawn(async move {
            let result = load_outlook(&client, coordinates, peak_kwc, today).await;
            let _ = tx.send(FetchMessage::Solar { id, result }).await;
        });
    }
}

/// Fetches the PV series for `today`'s year and aggregates it
pub async fn load_outlook(
    client: &PvgisClient,
    coordinates: Coordinates,
    peak_kwc: f64,
    today: NaiveDate,
) -> Result<SolarOutlook, String> {
    let peak_kwc = effective_peak_kwc(peak_kwc);
    let series = client
        .fetch_series(coordinates, peak_kwc, today.year())
        .await
        .map_err(|e| {
            warn!(error = %e, "PVGIS fetch failed");
            e.to_string()
        })?;
    debug!(samples = series.samples.len(), %today, "aggregating PV outlook");
    Ok(SolarOutlook {
        peak_kwc,
        days: seven_day_outlook(&series.samples, peak_kwc, today),
    })
}

/// Checks for a pending fetch result without blocking
///
/// # Returns
/// * `Some(FetchMessage)` if a result was available
/// * `None` if nothing is pending
pub fn try_recv(handle: &mut FetchHandle) -> Option<FetchMessage> {
    handle.receiver.try_recv().ok()
}
