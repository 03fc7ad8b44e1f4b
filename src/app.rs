//! Application state management for meteodash
//!
//! This module contains the dashboard state, keyboard handling, and the
//! transitions driven by fetch results. The app never performs I/O itself:
//! it queues [`FetchRequest`]s that the main loop hands to the fetcher, and
//! applies [`FetchMessage`]s through the session's request sequences.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info};

use crate::cli::{StartLocation, StartupConfig};
use crate::data::{Place, PlaceCandidate};
use crate::fetch::{FetchMessage, FetchRequest};
use crate::pipeline::pv::MIN_PEAK_KWC;
use crate::pipeline::{effective_peak_kwc, format_number};
use crate::session::{RequestKind, SessionState};
use crate::view::{ChartStyle, RowToggles, WindSeries};

/// Peak adjustment per `+`/`-` key press, in kWc
const PEAK_STEP_KWC: f64 = 0.5;

/// Dashboard tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    WeekMap,
    WeekHours,
    Sun,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::WeekMap, Tab::WeekHours, Tab::Sun];

    /// Parses a tab name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overview" | "now" => Some(Tab::Overview),
            "week" | "weekmap" | "week-map" => Some(Tab::WeekMap),
            "hours" | "weekhours" | "week-hours" => Some(Tab::WeekHours),
            "sun" | "solar" | "pv" => Some(Tab::Sun),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::WeekMap => "Week map",
            Tab::WeekHours => "Week by hour",
            Tab::Sun => "Sun",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// What keystrokes currently edit
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing a place name
    Search { query: String },
    /// Choosing among several geocoding matches
    Pick {
        candidates: Vec<PlaceCandidate>,
        selected: usize,
    },
}

/// Severity of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Main application struct managing state and data
pub struct App {
    pub tab: Tab,
    pub mode: InputMode,
    /// Last fetched forecast, place and PV outlook
    pub session: SessionState,
    pub chart_style: ChartStyle,
    pub wind_series: WindSeries,
    /// Day shown on the week-by-hour tab, as an index into the daily series
    pub selected_day: usize,
    pub row_toggles: RowToggles,
    /// Peak used for the next PV request
    pub peak_kwc: f64,
    pub status: Option<StatusMessage>,
    /// Timestamp of the last applied forecast
    pub last_updated: Option<DateTime<Local>>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Fetches waiting to be dispatched
    pending: Vec<FetchRequest>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new App instance with default state and no pending fetch
    pub fn new() -> Self {
        Self {
            tab: Tab::Overview,
            mode: InputMode::Normal,
            session: SessionState::new(),
            chart_style: ChartStyle::default(),
            wind_series: WindSeries::default(),
            selected_day: 0,
            row_toggles: RowToggles::default(),
            peak_kwc: effective_peak_kwc(crate::cli::DEFAULT_PEAK_KWC),
            status: None,
            last_updated: None,
            show_help: false,
            should_quit: false,
            pending: Vec::new(),
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// The initial place search (or forecast, for fixed coordinates) is queued.
    pub fn with_startup_config(config: &StartupConfig) -> Self {
        let mut app = Self::new();
        app.tab = config.initial_tab;
        app.peak_kwc = effective_peak_kwc(config.peak_kwc);
        match &config.location {
            StartLocation::Search(query) => app.search_places(query.clone(), true),
            StartLocation::Fixed(place) => app.load_place(place.clone()),
        }
        app
    }

    /// Drains the fetches queued since the last call
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    /// Number of days in the current forecast
    pub fn day_count(&self) -> usize {
        self.session
            .forecast()
            .map(|f| f.daily.time.len())
            .unwrap_or(0)
    }

    /// Queues a geocoding request for `query`
    ///
    /// With `auto_pick` the best match loads directly, as at startup.
    pub fn search_places(&mut self, query: String, auto_pick: bool) {
        let query = query.trim().to_string();
        if query.is_empty() {
            return;
        }
        let id = self.session.issue(RequestKind::Search);
        self.set_status(StatusLevel::Info, format!("Searching for \"{}\"...", query));
        self.pending.push(FetchRequest::Places {
            id,
            query,
            auto_pick,
        });
    }

    /// Queues a forecast request for `place`
    pub fn load_place(&mut self, place: Place) {
        let id = self.session.issue(RequestKind::Forecast);
        info!(place = %place.label, "loading forecast");
        self.set_status(
            StatusLevel::Info,
            format!("Loading forecast for {}...", place.label),
        );
        self.pending.push(FetchRequest::Forecast { id, place });
    }

    /// Queues a PV request for the current place, if one is known
    pub fn request_solar(&mut self) {
        match self.session.coordinates() {
            Some(coordinates) => {
                let id = self.session.issue(RequestKind::Solar);
                self.set_status(StatusLevel::Info, "Loading PVGIS...");
                self.pending.push(FetchRequest::Solar {
                    id,
                    coordinates,
                    peak_kwc: self.peak_kwc,
                });
            }
            None => self.set_status(StatusLevel::Warn, "Location unknown."),
        }
    }

    /// Switches tab; the Sun tab loads PV data, the others render from cache
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab == Tab::Sun {
            self.request_solar();
        }
    }

    /// Applies a fetch result, dropping it when a newer request of the same
    /// kind has been issued since.
    pub fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Places {
                id,
                query,
                auto_pick,
                result,
            } => {
                if !self.session.is_current(RequestKind::Search, id) {
                    return;
                }
                match result {
                    Err(e) => self.set_status(StatusLevel::Error, format!("Geocoding error: {}", e)),
                    Ok(mut candidates) => {
                        if candidates.is_empty() {
                            self.set_status(
                                StatusLevel::Warn,
                                format!("No place found for \"{}\".", query),
                            );
                        } else if auto_pick || candidates.len() == 1 {
                            let best = candidates.swap_remove(0);
                            self.load_place(best.into_place());
                        } else {
                            self.set_status(
                                StatusLevel::Info,
                                format!("{} places match \"{}\"", candidates.len(), query),
                            );
                            self.mode = InputMode::Pick {
                                candidates,
                                selected: 0,
                            };
                        }
                    }
                }
            }
            FetchMessage::Forecast { id, place, result } => match result {
                Err(e) => {
                    if self.session.is_current(RequestKind::Forecast, id) {
                        self.set_status(
                            StatusLevel::Error,
                            format!("Could not fetch the forecast: {}", e),
                        );
                    }
                }
                Ok(payload) => {
                    let label = place.label.clone();
                    if self.session.apply_forecast(id, place, payload) {
                        let now = Local::now();
                        self.last_updated = Some(now);
                        self.selected_day = 0;
                        debug!(place = %label, "forecast applied");
                        self.set_status(
                            StatusLevel::Ok,
                            format!("{}: up to date at {}", label, now.format("%H:%M")),
                        );
                        if self.tab == Tab::Sun {
                            self.request_solar();
                        }
                    }
                }
            },
            FetchMessage::Solar { id, result } => match result {
                Err(e) => {
                    if self.session.is_current(RequestKind::Solar, id) {
                        self.set_status(StatusLevel::Error, format!("PVGIS error: {}", e));
                    }
                }
                Ok(outlook) => {
                    if self.session.apply_outlook(id, outlook) {
                        self.set_status(StatusLevel::Ok, "PVGIS loaded.");
                    }
                }
            },
        }
    }

    /// Handles keyboard input events
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `?`: Toggle help overlay
    /// - `1`-`4`, `Tab`, `BackTab`: Switch tab
    /// - `/`: Search for a place
    /// - `c`: Line/bar chart, `g`: mean wind/gusts
    /// - `R`: Refetch the forecast
    /// - `←`/`→`, `t`/`r`/`w` (Week by hour): Day and row toggles
    /// - `+`/`-`, `r` (Sun): Adjust peak and reload PVGIS
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match &mut self.mode {
            InputMode::Search { query } => {
                match key_event.code {
                    KeyCode::Esc => self.mode = InputMode::Normal,
                    KeyCode::Enter => {
                        let query = std::mem::take(query);
                        self.mode = InputMode::Normal;
                        self.search_places(query, false);
                    }
                    KeyCode::Backspace => {
                        query.pop();
                    }
                    KeyCode::Char(c) => query.push(c),
                    _ => {}
                }
                return;
            }
            InputMode::Pick {
                candidates,
                selected,
            } => {
                match key_event.code {
                    KeyCode::Esc => self.mode = InputMode::Normal,
                    KeyCode::Up | KeyCode::Char('k') => {
                        *selected = if *selected == 0 {
                            candidates.len().saturating_sub(1)
                        } else {
                            *selected - 1
                        };
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        *selected = if *selected + 1 >= candidates.len() {
                            0
                        } else {
                            *selected + 1
                        };
                    }
                    KeyCode::Enter => {
                        let choice = candidates.get(*selected).cloned();
                        self.mode = InputMode::Normal;
                        if let Some(choice) = choice {
                            self.load_place(choice.into_place());
                        }
                    }
                    _ => {}
                }
                return;
            }
            InputMode::Normal => {}
        }

        match key_event.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('1') => self.set_tab(Tab::Overview),
            KeyCode::Char('2') => self.set_tab(Tab::WeekMap),
            KeyCode::Char('3') => self.set_tab(Tab::WeekHours),
            KeyCode::Char('4') => self.set_tab(Tab::Sun),
            KeyCode::Tab => self.set_tab(self.tab.next()),
            KeyCode::BackTab => self.set_tab(self.tab.previous()),
            KeyCode::Char('/') => {
                self.mode = InputMode::Search {
                    query: String::new(),
                }
            }
            KeyCode::Char('c') => self.chart_style = self.chart_style.toggle(),
            KeyCode::Char('g') => self.wind_series = self.wind_series.toggle(),
            KeyCode::Char('R') => self.refetch(),
            code => match self.tab {
                Tab::WeekHours => self.handle_week_hours_key(code),
                Tab::Sun => self.handle_sun_key(code),
                Tab::Overview | Tab::WeekMap => {}
            },
        }
    }

    fn refetch(&mut self) {
        match self.session.place().cloned() {
            Some(place) => self.load_place(place),
            None => self.set_status(StatusLevel::Warn, "Location unknown."),
        }
    }

    fn handle_week_hours_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_day = self.selected_day.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_day + 1 < self.day_count() {
                    self.selected_day += 1;
                }
            }
            KeyCode::Char('t') => self.row_toggles.temperature = !self.row_toggles.temperature,
            KeyCode::Char('r') => self.row_toggles.rain = !self.row_toggles.rain,
            KeyCode::Char('w') => self.row_toggles.wind = !self.row_toggles.wind,
            _ => {}
        }
    }

    fn handle_sun_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_peak(PEAK_STEP_KWC),
            KeyCode::Char('-') => self.adjust_peak(-PEAK_STEP_KWC),
            KeyCode::Char('r') => self.request_solar(),
            _ => {}
        }
    }

    fn adjust_peak(&mut self, delta: f64) {
        self.peak_kwc = effective_peak_kwc((self.peak_kwc + delta).max(MIN_PEAK_KWC));
        self.set_status(
            StatusLevel::Info,
            format!(
                "Peak {} kWc, press r to reload",
                format_number(Some(self.peak_kwc), 1)
            ),
        );
    }
}
