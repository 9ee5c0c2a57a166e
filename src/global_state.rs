use crate::app::TooltipData;
use crate::config::DEFAULT_SYMBOL;
use crate::domain::{
    market_data::{ChartPoint, Symbol},
    state::LoadPhase,
};
use leptos::*;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Reactive mirror of the dashboard state
pub struct Globals {
    pub current_symbol: RwSignal<Symbol>,
    pub chart_points: RwSignal<Arc<Vec<ChartPoint>>>,
    pub load_phase: RwSignal<LoadPhase>,
    pub tooltip_data: RwSignal<Option<TooltipData>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        current_symbol: create_rw_signal(Symbol::from(DEFAULT_SYMBOL)),
        chart_points: create_rw_signal(Arc::new(Vec::new())),
        load_phase: create_rw_signal(LoadPhase::Idle),
        tooltip_data: create_rw_signal(None),
    })
}
