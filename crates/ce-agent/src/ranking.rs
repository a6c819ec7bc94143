//! Supplier preference ranking.

use ce_core::{AgentId, Component};

use crate::Population;

/// Order `suppliers` cheapest first by their price for `component`.
///
/// Suppliers that do not sell `component` (price `+∞`) or are unknown to
/// the population rank last.  The sort is stable, so equal prices keep
/// their input order.
pub fn rank_suppliers<R>(pop: &Population<R>, suppliers: &[AgentId], component: Component) -> Vec<AgentId> {
    let price = |id: AgentId| {
        pop.get(id)
            .map(|a| a.ledger.prices[component])
            .unwrap_or(f64::INFINITY)
    };
    let mut ranked: Vec<(f64, AgentId)> = suppliers.iter().map(|&id| (price(id), id)).collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, id)| id).collect()
}
