use leptos::html::Canvas;
use leptos::*;
use std::rc::Rc;
use std::sync::Arc;

use crate::{
    application::{DashboardCoordinator, LoadChartDataUseCase},
    config::DashboardConfig,
    domain::{
        chart::{ChartGeometryService, PanelKind, PanelLayout, PanelSpec},
        logging::LogComponent,
        market_data::{ChartPoint, Symbol},
        state::{LoadPhase, ResolveOutcome},
    },
    global_signals,
    infrastructure::{http::ChartApiClient, rendering::PanelRenderer, services::BrowserDateFormatter},
};

global_signals! {
    pub current_symbol => current_symbol: Symbol,
    pub chart_points => chart_points: Arc<Vec<ChartPoint>>,
    pub load_phase => load_phase: LoadPhase,
    pub tooltip_data => tooltip_data: Option<TooltipData>,
}

type BrowserCoordinator = DashboardCoordinator<ChartApiClient, BrowserDateFormatter>;

/// Hover tooltip for one panel
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipData {
    pub panel: PanelKind,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
}

impl TooltipData {
    pub fn new(panel: &PanelSpec, index: usize, point: &ChartPoint, x: f64, y: f64) -> Self {
        Self {
            panel: panel.kind,
            index,
            x,
            y,
            lines: ChartGeometryService::new().tooltip_lines(panel, point),
        }
    }

    pub fn formatted_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Root component: header with symbol selector, then the three panels
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let coordinator: Rc<BrowserCoordinator> = Rc::new(DashboardCoordinator::new(
        LoadChartDataUseCase::new(ChartApiClient::new(&config.api_base_url), BrowserDateFormatter),
        config.default_symbol.clone(),
        config.refresh_policy,
    ));

    current_symbol().set(config.default_symbol.clone());

    // Runs on mount and again on every symbol change.
    create_effect(move |_| {
        let symbol = current_symbol().get();
        let ticket = coordinator.begin(symbol);
        load_phase().set(LoadPhase::Loading);

        let coordinator = Rc::clone(&coordinator);
        spawn_local(async move {
            let outcome = coordinator.complete(ticket).await;
            let state = coordinator.snapshot();
            if let ResolveOutcome::Applied { .. } = outcome {
                tooltip_data().set(None);
                chart_points().set(state.points());
            }
            load_phase().set(state.phase());
        });
    });

    let width = config.fallback_panel_width;

    view! {
        <style>
            {r#"
            .stock-dashboard {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                max-width: 1000px;
                margin: 0 auto;
                padding: 20px;
                color: #333;
            }

            .dashboard-header {
                display: flex;
                align-items: center;
                justify-content: space-between;
                margin-bottom: 20px;
            }

            .chart-panel {
                position: relative;
                margin-bottom: 24px;
            }

            .chart-panel h3 {
                margin: 0 0 8px 0;
                font-size: 16px;
            }

            .tooltip {
                position: absolute;
                background: rgba(255, 255, 255, 0.95);
                border: 1px solid #ccc;
                padding: 6px 10px;
                font-size: 12px;
                white-space: pre;
                pointer-events: none;
                z-index: 10;
            }
            "#}
        </style>
        <div class="stock-dashboard" aria-busy=move || (load_phase().get() == LoadPhase::Loading).to_string()>
            <Header symbols=config.symbols />
            <ChartPanel kind=PanelKind::Price fallback_width=width />
            <ChartPanel kind=PanelKind::Rsi fallback_width=width />
            <ChartPanel kind=PanelKind::Macd fallback_width=width />
        </div>
    }
}

#[component]
fn Header(symbols: Vec<Symbol>) -> impl IntoView {
    let on_change = move |ev: ev::Event| match Symbol::new(event_target_value(&ev)) {
        Ok(symbol) => {
            if symbol != current_symbol().get_untracked() {
                crate::log_info!(LogComponent::Presentation("Header"), "Symbol changed to {}", symbol);
                current_symbol().set(symbol);
            }
        }
        Err(e) => crate::log_warn!(LogComponent::Presentation("Header"), "{}", e),
    };

    view! {
        <div class="dashboard-header">
            <h1>{move || format!("Stock Dashboard – {}", current_symbol().get())}</h1>
            <select
                prop:value=move || current_symbol().get().to_string()
                on:change=on_change
            >
                {symbols
                    .into_iter()
                    .map(|symbol| {
                        let value = symbol.to_string();
                        view! { <option value=value.clone()>{value}</option> }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// One canvas panel, as wide as its container. Redrawn when the points,
/// its hover index or the window size change.
#[component]
fn ChartPanel(kind: PanelKind, fallback_width: u32) -> impl IntoView {
    let spec = store_value(PanelSpec::for_kind(kind));
    let canvas_ref = create_node_ref::<Canvas>();
    let drawn_width = create_rw_signal(fallback_width);
    let resized = create_trigger();

    let resize_listener = window_event_listener(ev::resize, move |_| resized.notify());
    on_cleanup(move || resize_listener.remove());

    create_effect(move |_| {
        resized.track();
        let points = chart_points().get();
        let hover = tooltip_data().with(|t| t.as_ref().filter(|t| t.panel == kind).map(|t| t.index));
        let Some(canvas) = canvas_ref.get() else {
            return;
        };

        let container = canvas.parent_element().map(|p| p.client_width()).unwrap_or(0);
        let width = PanelLayout::fitted_width(container, fallback_width);
        drawn_width.set_untracked(width);

        let result = spec.with_value(|spec| {
            PanelRenderer::new(&canvas, width, spec).and_then(|renderer| renderer.render(spec, &points, hover))
        });
        if let Err(e) = result {
            crate::log_error!(LogComponent::Presentation("ChartPanel"), "❌ {} render failed: {}", kind, e);
        }
    });

    let on_mouse_move = move |event: ev::MouseEvent| {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;
        let width = drawn_width.get_untracked();
        let data = spec.with_value(|spec| {
            let layout = PanelLayout::new(width as f64, spec.height as f64, spec.show_legend);
            chart_points().with_untracked(|points| {
                layout
                    .index_at(x, points.len())
                    .map(|index| TooltipData::new(spec, index, &points[index], x + 12.0, y + 12.0))
            })
        });
        if tooltip_data().get_untracked() != data {
            tooltip_data().set(data);
        }
    };

    let on_mouse_leave = move |_: ev::MouseEvent| {
        if tooltip_data().with_untracked(|t| t.as_ref().is_some_and(|t| t.panel == kind)) {
            tooltip_data().set(None);
        }
    };

    let tooltip = move || tooltip_data().get().filter(|t| t.panel == kind);

    view! {
        <div class="chart-panel">
            <h3>{kind.to_string()}</h3>
            <canvas
                id=format!("{}-panel", kind.as_ref())
                node_ref=canvas_ref
                style="display: block; cursor: crosshair;"
                on:mousemove=on_mouse_move
                on:mouseleave=on_mouse_leave
            />
            <div
                class="tooltip"
                style:display=move || if tooltip().is_some() { "block" } else { "none" }
                style:left=move || tooltip().map(|t| format!("{}px", t.x)).unwrap_or_default()
                style:top=move || tooltip().map(|t| format!("{}px", t.y + 30.0)).unwrap_or_default()
            >
                {move || tooltip().map(|t| t.formatted_text()).unwrap_or_default()}
            </div>
        </div>
    }
}
