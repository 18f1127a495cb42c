//! Dashboard state machine.
//!
//! The controller owns the current location and the published
//! [`DashboardState`]. Observers read it through [`DashboardController::subscribe`];
//! only the transition methods here ever replace it.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    ForecastError, ForecastSnapshot, Location, geo::GeoResolver, provider::ForecastProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Error(String),
    Ready { location: Location, snapshot: ForecastSnapshot },
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    fn from_fetch(location: Location, result: Result<ForecastSnapshot, ForecastError>) -> Self {
        match result {
            Ok(snapshot) => Self::Ready { location, snapshot },
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// What happened to a fetch once it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result became the published state.
    Applied,
    /// A newer request was made meanwhile; the result was dropped.
    Superseded,
}

#[derive(Debug)]
struct Session {
    location: Location,
    /// Bumped by every mount, refresh and search, before any await.
    requested: u64,
    /// Bumped when a fetch actually starts.
    generation: u64,
}

#[derive(Debug)]
pub struct DashboardController {
    resolver: GeoResolver,
    forecasts: Arc<dyn ForecastProvider>,
    session: Mutex<Session>,
    state: watch::Sender<DashboardState>,
}

impl DashboardController {
    /// Starts in `Loading` at `default_location`. Nothing is fetched until
    /// [`mount`](Self::mount).
    pub fn new(
        resolver: GeoResolver,
        forecasts: Arc<dyn ForecastProvider>,
        default_location: Location,
    ) -> Self {
        let (state, _) = watch::channel(DashboardState::Loading);
        Self {
            resolver,
            forecasts,
            session: Mutex::new(Session { location: default_location, requested: 0, generation: 0 }),
            state,
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn location(&self) -> Location {
        self.session.lock().location.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub async fn mount(&self) -> FetchOutcome {
        tracing::info!(place = %self.location().display_name, "dashboard mounted");
        self.refresh().await
    }

    /// Fetches again for the current location.
    pub async fn refresh(&self) -> FetchOutcome {
        let request = self.claim_request();
        let Some((generation, location)) = self.begin_fetch(request, None) else {
            return FetchOutcome::Superseded;
        };
        let result = self.forecasts.fetch(&location).await;
        self.complete_fetch(generation, location, result)
    }

    /// Resolves `query` and, on a match, switches to that location and
    /// fetches its forecast. Returns `None` when nothing matched; state and
    /// location are then left untouched. A match that arrives after a newer
    /// request was made is dropped as `Superseded`.
    pub async fn search(&self, query: &str) -> Option<FetchOutcome> {
        let request = self.claim_request();
        let found = self.resolver.resolve(query).await?;
        let Some((generation, location)) = self.begin_fetch(request, Some(found)) else {
            return Some(FetchOutcome::Superseded);
        };
        let result = self.forecasts.fetch(&location).await;
        Some(self.complete_fetch(generation, location, result))
    }

    fn claim_request(&self) -> u64 {
        let mut session = self.session.lock();
        session.requested += 1;
        session.requested
    }

    /// Switches location and enters `Loading`, unless `request` is no longer
    /// the latest one made.
    fn begin_fetch(&self, request: u64, new_location: Option<Location>) -> Option<(u64, Location)> {
        let mut session = self.session.lock();
        if request != session.requested {
            tracing::debug!(
                request,
                latest = session.requested,
                "dropping superseded location change"
            );
            return None;
        }
        if let Some(location) = new_location {
            session.location = location;
        }
        session.generation += 1;
        self.state.send_replace(DashboardState::Loading);

        tracing::debug!(
            generation = session.generation,
            place = %session.location.display_name,
            "forecast fetch started"
        );
        Some((session.generation, session.location.clone()))
    }

    fn complete_fetch(
        &self,
        generation: u64,
        location: Location,
        result: Result<ForecastSnapshot, ForecastError>,
    ) -> FetchOutcome {
        // Held until publish so a newer fetch cannot start in between.
        let session = self.session.lock();
        if generation != session.generation {
            tracing::debug!(
                generation,
                latest = session.generation,
                place = %location.display_name,
                "discarding superseded forecast"
            );
            return FetchOutcome::Superseded;
        }

        if let Err(e) = &result {
            tracing::warn!(place = %location.display_name, error = %e, "forecast fetch failed");
        }
        self.state.send_replace(DashboardState::from_fetch(location, result));
        FetchOutcome::Applied
    }
}
