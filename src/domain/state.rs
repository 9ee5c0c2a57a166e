use std::sync::Arc;

use crate::domain::{
    errors::AppError,
    market_data::{ChartPoint, Symbol},
};

/// Whether a load is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
}

/// What to do with a response whose request has been superseded.
///
/// Requests are never cancelled, so responses can arrive out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Whatever resolves last is shown, even for an older symbol.
    #[default]
    LastResolvedWins,
    /// Only the newest request may publish data.
    LatestRequestOnly,
}

/// Handle for one issued load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub symbol: Symbol,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Applied { point_count: usize, stale: bool },
    RetainedAfterError(AppError),
    DiscardedStale,
}

/// View state of the dashboard: requested symbol, displayed points and the
/// load phase. Points are replaced wholesale, never patched.
#[derive(Debug, Clone)]
pub struct DashboardState {
    symbol: Symbol,
    points: Arc<Vec<ChartPoint>>,
    loaded_symbol: Option<Symbol>,
    phase: LoadPhase,
    generation: u64,
    in_flight: usize,
    policy: RefreshPolicy,
}

impl DashboardState {
    pub fn new(symbol: Symbol, policy: RefreshPolicy) -> Self {
        Self {
            symbol,
            points: Arc::new(Vec::new()),
            loaded_symbol: None,
            phase: LoadPhase::Idle,
            generation: 0,
            in_flight: 0,
            policy,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn points(&self) -> Arc<Vec<ChartPoint>> {
        Arc::clone(&self.points)
    }

    /// Symbol the displayed points were fetched for
    pub fn loaded_symbol(&self) -> Option<&Symbol> {
        self.loaded_symbol.as_ref()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Enter `Loading` for `symbol` and hand out the ticket the response
    /// must be resolved with.
    pub fn request(&mut self, symbol: Symbol) -> LoadTicket {
        self.generation += 1;
        self.in_flight += 1;
        self.symbol = symbol.clone();
        self.phase = LoadPhase::Loading;
        LoadTicket { symbol, generation: self.generation }
    }

    /// Apply a finished load. Errors keep the previous points.
    pub fn resolve(&mut self, ticket: &LoadTicket, result: Result<Vec<ChartPoint>, AppError>) -> ResolveOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.phase = LoadPhase::Idle;
        }

        let stale = ticket.generation != self.generation;
        match result {
            Ok(_) if stale && self.policy == RefreshPolicy::LatestRequestOnly => ResolveOutcome::DiscardedStale,
            Ok(points) => {
                let point_count = points.len();
                self.points = Arc::new(points);
                self.loaded_symbol = Some(ticket.symbol.clone());
                ResolveOutcome::Applied { point_count, stale }
            }
            Err(error) => ResolveOutcome::RetainedAfterError(error),
        }
    }
}
