use std::cell::RefCell;
use std::rc::Rc;

use super::use_cases::LoadChartDataUseCase;
use crate::domain::{
    errors::AppError,
    logging::{LogComponent, LogEntry, LogLevel, get_logger},
    market_data::{DateFormatter, Symbol, repositories::ChartDataRepository},
    state::{DashboardState, LoadTicket, RefreshPolicy, ResolveOutcome},
};

const COMPONENT: LogComponent = LogComponent::Application("DashboardCoordinator");

/// Drives dashboard refreshes: owns the view state and the loader.
///
/// Everything runs on the browser event loop, so the state lives in an
/// `Rc<RefCell<_>>` and no borrow is held across an `.await`.
pub struct DashboardCoordinator<R: ChartDataRepository, F: DateFormatter> {
    state: Rc<RefCell<DashboardState>>,
    load_chart_data: LoadChartDataUseCase<R, F>,
}

impl<R: ChartDataRepository, F: DateFormatter> DashboardCoordinator<R, F> {
    pub fn new(load_chart_data: LoadChartDataUseCase<R, F>, symbol: Symbol, policy: RefreshPolicy) -> Self {
        crate::log_info!(COMPONENT, "Creating dashboard coordinator for {} ({:?})", symbol, policy);

        Self {
            state: Rc::new(RefCell::new(DashboardState::new(symbol, policy))),
            load_chart_data,
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn use_case(&self) -> &LoadChartDataUseCase<R, F> {
        &self.load_chart_data
    }

    /// Enter `Loading` for `symbol`. The returned ticket goes to [`Self::complete`].
    pub fn begin(&self, symbol: Symbol) -> LoadTicket {
        let ticket = self.state.borrow_mut().request(symbol);
        crate::log_debug!(COMPONENT, "🔄 Refresh #{} for {}", ticket.generation, ticket.symbol);
        ticket
    }

    /// Run the load for `ticket` and fold the result into the state.
    pub async fn complete(&self, ticket: LoadTicket) -> ResolveOutcome {
        let result = self.load_chart_data.execute(&ticket.symbol).await;
        let outcome = self.state.borrow_mut().resolve(&ticket, result);
        if let Some(entry) = outcome_entry(&ticket, &outcome) {
            get_logger().log(entry);
        }
        outcome
    }

    pub async fn refresh(&self, symbol: Symbol) -> ResolveOutcome {
        let ticket = self.begin(symbol);
        self.complete(ticket).await
    }
}

/// Log entry describing how a load ended. Fresh data needs none.
fn outcome_entry(ticket: &LoadTicket, outcome: &ResolveOutcome) -> Option<LogEntry> {
    let entry = match outcome {
        ResolveOutcome::Applied { stale: false, .. } => return None,
        ResolveOutcome::Applied { point_count, stale: true } => {
            LogEntry::new(LogLevel::Warn, COMPONENT, "Late response replaced newer state")
                .with_field("points", point_count)
        }
        ResolveOutcome::RetainedAfterError(error) => failure_entry(error),
        ResolveOutcome::DiscardedStale => LogEntry::new(LogLevel::Debug, COMPONENT, "Dropped superseded response"),
    };
    Some(entry.with_field("symbol", &ticket.symbol).with_field("generation", ticket.generation))
}

fn failure_entry(error: &AppError) -> LogEntry {
    let entry = LogEntry::new(LogLevel::Error, COMPONENT, "Could not load stock data");
    match error {
        AppError::HttpStatus { status, .. } => entry.with_field("status", status),
        other => entry.with_field("error", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        errors::{AppError, NetworkResult},
        market_data::{BarTimestamp, RawBar, RawBarPoint},
        state::LoadPhase,
    };
    use futures::executor::block_on;
    use std::cell::Cell;

    struct Dates;

    impl DateFormatter for Dates {
        fn format_date(&self, _: &BarTimestamp) -> String {
            "d".to_string()
        }
    }

    /// Returns one bar per symbol letter and counts calls
    #[derive(Default)]
    struct CountingRepo {
        calls: Cell<usize>,
        failing: Cell<bool>,
    }

    impl ChartDataRepository for CountingRepo {
        async fn fetch_bars(&self, symbol: &Symbol) -> NetworkResult<Vec<RawBarPoint>> {
            self.calls.set(self.calls.get() + 1);
            if self.failing.get() {
                return Err(AppError::Network("connection refused".into()));
            }
            Ok((0..symbol.len())
                .map(|i| RawBarPoint {
                    bar: RawBar {
                        timestamp: BarTimestamp::from(i as u64),
                        open: 1.0,
                        high: 1.0,
                        low: 1.0,
                        close: 1.0,
                        volume: 1.0,
                    },
                    indicators: None,
                })
                .collect())
        }
    }

    fn coordinator(policy: RefreshPolicy) -> DashboardCoordinator<CountingRepo, Dates> {
        DashboardCoordinator::new(
            LoadChartDataUseCase::new(CountingRepo::default(), Dates),
            Symbol::from("AAPL"),
            policy,
        )
    }

    #[test]
    fn refresh_fetches_once() {
        let c = coordinator(RefreshPolicy::default());
        let outcome = block_on(c.refresh(Symbol::from("MSFT")));
        assert_eq!(outcome, ResolveOutcome::Applied { point_count: 4, stale: false });
        assert_eq!(c.use_case().repository().calls.get(), 1);
        assert_eq!(c.snapshot().phase(), LoadPhase::Idle);
    }

    #[test]
    fn failure_keeps_previous_points() {
        let c = coordinator(RefreshPolicy::default());
        block_on(c.refresh(Symbol::from("AAPL")));
        c.use_case().repository().failing.set(true);

        let outcome = block_on(c.refresh(Symbol::from("MSFT")));
        assert!(matches!(outcome, ResolveOutcome::RetainedAfterError(_)));
        let state = c.snapshot();
        assert_eq!(state.points().len(), 4);
        assert_eq!(state.loaded_symbol(), Some(&Symbol::from("AAPL")));
        assert_eq!(state.phase(), LoadPhase::Idle);
    }

    #[test]
    fn failed_load_is_logged_with_status() {
        let ticket = LoadTicket { symbol: Symbol::from("TSLA"), generation: 3 };
        let outcome = ResolveOutcome::RetainedAfterError(AppError::HttpStatus {
            status: 500,
            status_text: "Internal Server Error".into(),
        });

        let entry = outcome_entry(&ticket, &outcome).unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.field("status"), Some("500"));
        assert!(entry.format_line().ends_with("| Could not load stock data status=500 symbol=TSLA generation=3"));

        let network = ResolveOutcome::RetainedAfterError(AppError::Network("offline".into()));
        let entry = outcome_entry(&ticket, &network).unwrap();
        assert_eq!(entry.field("status"), None);
        assert!(entry.field("error").is_some_and(|e| e.contains("offline")));
    }

    #[test]
    fn only_unusual_outcomes_are_logged() {
        let ticket = LoadTicket { symbol: Symbol::from("AAPL"), generation: 1 };
        assert!(outcome_entry(&ticket, &ResolveOutcome::Applied { point_count: 4, stale: false }).is_none());

        let late = outcome_entry(&ticket, &ResolveOutcome::Applied { point_count: 4, stale: true }).unwrap();
        assert_eq!(late.level, LogLevel::Warn);
        assert_eq!(late.field("points"), Some("4"));
        assert_eq!(outcome_entry(&ticket, &ResolveOutcome::DiscardedStale).unwrap().level, LogLevel::Debug);
    }

    #[test]
    fn late_response_overwrites_by_default() {
        let c = coordinator(RefreshPolicy::LastResolvedWins);
        let first = c.begin(Symbol::from("AAPL"));
        let second = c.begin(Symbol::from("GOOGL"));

        block_on(c.complete(second));
        let outcome = block_on(c.complete(first));

        assert_eq!(outcome, ResolveOutcome::Applied { point_count: 4, stale: true });
        let state = c.snapshot();
        assert_eq!(state.symbol(), &Symbol::from("GOOGL"));
        assert_eq!(state.loaded_symbol(), Some(&Symbol::from("AAPL")));
    }

    #[test]
    fn latest_only_drops_late_response() {
        let c = coordinator(RefreshPolicy::LatestRequestOnly);
        let first = c.begin(Symbol::from("AAPL"));
        let second = c.begin(Symbol::from("GOOGL"));

        block_on(c.complete(second));
        assert_eq!(block_on(c.complete(first)), ResolveOutcome::DiscardedStale);
        assert_eq!(c.snapshot().loaded_symbol(), Some(&Symbol::from("GOOGL")));
        assert_eq!(c.snapshot().points().len(), 5);
    }
}
