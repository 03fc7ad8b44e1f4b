//! Display-session cache
//!
//! Holds the last forecast, the place it belongs to and the last PV outlook,
//! together with one request sequence per fetch kind. A response is applied
//! only when it answers the most recent request of its kind.

use tracing::debug;

use crate::data::{Coordinates, ForecastPayload, Place};
use crate::pipeline::PvDailyAggregate;

/// Identifier handed out for each outgoing request
pub type RequestId = u64;

/// Kinds of request that race independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Forecast,
    Solar,
}

/// Monotonic id source for one request kind
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: RequestId,
}

impl RequestSequence {
    /// Issues the next id; it supersedes every earlier one
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.latest
    }

    /// Whether `id` is the most recently issued id
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest != 0 && id == self.latest
    }
}

/// PV outlook computed for a given peak
#[derive(Debug, Clone, PartialEq)]
pub struct SolarOutlook {
    /// Effective peak in kWc the outlook was computed with
    pub peak_kwc: f64,
    pub days: Vec<PvDailyAggregate>,
}

/// Everything the dashboard currently shows
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    searches: RequestSequence,
    forecasts: RequestSequence,
    solar: RequestSequence,
    place: Option<Place>,
    forecast: Option<ForecastPayload>,
    outlook: Option<SolarOutlook>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn sequence_mut(&mut self, kind: RequestKind) -> &mut RequestSequence {
        match kind {
            RequestKind::Search => &mut self.searches,
            RequestKind::Forecast => &mut self.forecasts,
            RequestKind::Solar => &mut self.solar,
        }
    }

    fn sequence(&self, kind: RequestKind) -> &RequestSequence {
        match kind {
            RequestKind::Search => &self.searches,
            RequestKind::Forecast => &self.forecasts,
            RequestKind::Solar => &self.solar,
        }
    }

    /// Issues a new request id of `kind`
    pub fn issue(&mut self, kind: RequestKind) -> RequestId {
        self.sequence_mut(kind).issue()
    }

    /// Whether a response with `id` should still be acted on.
    ///
    /// Stale responses are logged and should be dropped by the caller.
    pub fn is_current(&self, kind: RequestKind, id: RequestId) -> bool {
        let current = self.sequence(kind).is_latest(id);
        if !current {
            debug!(?kind, id, "discarding stale response");
        }
        current
    }

    /// Stores a forecast if it answers the latest forecast request.
    ///
    /// Returns whether the session changed. The place and its coordinates are
    /// only replaced together with the forecast.
    pub fn apply_forecast(&mut self, id: RequestId, place: Place, payload: ForecastPayload) -> bool {
        if !self.is_current(RequestKind::Forecast, id) {
            return false;
        }
        let place_changed = self
            .place
            .as_ref()
            .map_or(true, |p| p.coordinates != place.coordinates);
        if place_changed {
            // Outlook and any PV request in flight belong to the previous location
            self.outlook = None;
            self.solar.issue();
        }
        self.place = Some(place);
        self.forecast = Some(payload);
        true
    }

    /// Stores a PV outlook if it answers the latest PV request
    pub fn apply_outlook(&mut self, id: RequestId, outlook: SolarOutlook) -> bool {
        if !self.is_current(RequestKind::Solar, id) {
            return false;
        }
        self.outlook = Some(outlook);
        true
    }

    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.place.as_ref().map(|p| p.coordinates)
    }

    pub fn forecast(&self) -> Option<&ForecastPayload> {
        self.forecast.as_ref()
    }

    pub fn outlook(&self) -> Option<&SolarOutlook> {
        self.outlook.as_ref()
    }
}
