//! Model-level metrics, one row per tick.
//!
//! All "amount" columns look at the cars currently held by users, i.e. the
//! fleet in use.  Cars waiting at a garage are not counted.

use ce_core::{AgentKind, Component, PartState, Tick};
use ce_behavior::World;
use ce_goods::Car;

/// Column names in output order.
pub const COLUMNS: [&str; 8] = [
    "amount virgin",
    "amount recyclate high",
    "amount recyclate low",
    "amount reused parts",
    "amount standard parts",
    "amount leakage",
    "price virgin",
    "price recyclate",
];

/// The metrics recorded at the end of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub tick: Tick,
    pub year: i32,
    /// Virgin plastic embedded in the fleet in use.
    pub amount_virgin:         f64,
    pub amount_recyclate_high: f64,
    pub amount_recyclate_low:  f64,
    pub amount_reused_parts:   u64,
    pub amount_standard_parts: u64,
    /// Sum of `current_leakage` over recyclers.
    pub amount_leakage:        f64,
    /// Mean virgin price over refiners.
    pub price_virgin:          f64,
    /// Mean of both recyclate grades' prices over recyclers.
    pub price_recyclate:       f64,
}

impl MetricsRow {
    /// Measure `pop` as it stands after the update stage of `tick`.
    pub fn collect(tick: Tick, year: i32, pop: &World) -> Self {
        let mut row = MetricsRow {
            tick,
            year,
            amount_virgin:         0.0,
            amount_recyclate_high: 0.0,
            amount_recyclate_low:  0.0,
            amount_reused_parts:   0,
            amount_standard_parts: 0,
            amount_leakage:        0.0,
            price_virgin:          0.0,
            price_recyclate:       0.0,
        };

        for car in fleet_in_use(pop) {
            for part in &car.parts {
                let r = part.plastic_ratio();
                row.amount_virgin += r.virgin;
                row.amount_recyclate_high += r.recyclate_high;
                row.amount_recyclate_low += r.recyclate_low;
                match part.state {
                    PartState::Reused   => row.amount_reused_parts += 1,
                    PartState::Standard => row.amount_standard_parts += 1,
                }
            }
        }

        row.amount_leakage = pop
            .iter_kind(AgentKind::Recycler)
            .filter_map(|a| a.role.as_recycler())
            .map(|s| s.current_leakage)
            .sum();

        row.price_virgin = mean(
            pop.iter_kind(AgentKind::Refiner)
                .map(|a| a.ledger.prices[Component::Virgin]),
        );
        row.price_recyclate = mean(pop.iter_kind(AgentKind::Recycler).flat_map(|a| {
            [a.ledger.prices[Component::RecyclateHigh], a.ledger.prices[Component::RecyclateLow]]
        }));
        row
    }

    /// The value of a named column.
    pub fn get(&self, column: &str) -> Option<f64> {
        let i = COLUMNS.iter().position(|&c| c == column)?;
        Some(self.values()[i])
    }

    /// All metric values in [`COLUMNS`] order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.amount_virgin,
            self.amount_recyclate_high,
            self.amount_recyclate_low,
            self.amount_reused_parts as f64,
            self.amount_standard_parts as f64,
            self.amount_leakage,
            self.price_virgin,
            self.price_recyclate,
        ]
    }
}

fn fleet_in_use(pop: &World) -> impl Iterator<Item = &Car> {
    pop.iter_kind(AgentKind::User)
        .filter_map(|a| a.ledger.cars(Component::Cars).ok())
        .filter_map(|cars| cars.front())
}

/// Arithmetic mean; `NaN` for an empty sequence.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

// ── TimeSeries ────────────────────────────────────────────────────────────────

/// The rows recorded over a run, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    rows: Vec<MetricsRow>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: MetricsRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&MetricsRow> {
        self.rows.last()
    }

    /// One column across all ticks, or `None` for an unknown name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let i = COLUMNS.iter().position(|&c| c == name)?;
        Some(self.rows.iter().map(|r| r.values()[i]).collect())
    }
}

impl IntoIterator for TimeSeries {
    type Item = MetricsRow;
    type IntoIter = std::vec::IntoIter<MetricsRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
