//! Month view endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{Local, NaiveDate};
use eventcal_core::Event;
use eventcal_core::date_range::{MonthWindow, parse_month};
use eventcal_core::grid::{DEFAULT_VISIBLE_EVENTS, DayCell, build_month_grid};
use serde::{Deserialize, Serialize};

use crate::routes::{AppError, OrFail};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar", get(month_grid))
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    /// YYYY-MM, defaults to the current month
    pub month: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellResponse {
    pub date: NaiveDate,
    pub is_same_month: bool,
    pub events: Vec<Event>,
    /// Events past the visible limit, shown as "+N more"
    pub hidden: usize,
}

impl CellResponse {
    fn from_cell(cell: &DayCell) -> Self {
        CellResponse {
            date: cell.date,
            is_same_month: cell.is_same_month,
            events: cell.events.clone(),
            hidden: cell.overflow(DEFAULT_VISIBLE_EVENTS),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub success: bool,
    pub month: MonthWindow,
    pub title: String,
    /// How many events a cell shows before "+N more"
    pub visible_limit: usize,
    pub grid_start: NaiveDate,
    pub grid_end: NaiveDate,
    /// Rows of seven cells, Sunday first
    pub weeks: Vec<Vec<CellResponse>>,
}

/// GET /api/calendar?month=YYYY-MM - Week-aligned grid with every event per day
async fn month_grid(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let current_month = match query.month.as_deref() {
        Some(raw) => parse_month(raw)?.start,
        None => Local::now().date_naive(),
    };

    let events = state
        .store
        .read()
        .await
        .list()
        .or_fail("Failed to fetch events")?;

    let grid = build_month_grid(current_month, &events, &state.expand_options);

    let weeks = grid
        .weeks()
        .map(|week| week.iter().map(CellResponse::from_cell).collect())
        .collect();

    Ok(Json(CalendarResponse {
        success: true,
        month: grid.month,
        title: grid.month.title(),
        visible_limit: DEFAULT_VISIBLE_EVENTS,
        grid_start: grid.grid_start,
        grid_end: grid.grid_end,
        weeks,
    }))
}
