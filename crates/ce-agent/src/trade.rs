//! Transfer primitives and the greedy trading loop.

use ce_core::{AgentId, Component};
use log::trace;

use crate::{AgentResult, Ledger, Population};

/// Move up to `amount` units of `component` from `supplier` to `recipient`.
///
/// The paired provide/receive happens inside one call, so no partial
/// transfer is ever observable.  Returns the units actually moved.
pub fn transfer(
    supplier:  &mut Ledger,
    recipient: &mut Ledger,
    component: Component,
    amount:    f64,
) -> AgentResult<f64> {
    let shipment = supplier.stock[component].take(amount);
    let moved = shipment.quantity();
    recipient.stock[component].give(component, shipment)?;
    Ok(moved)
}

/// Buy `component` from `suppliers`, visited in the given order.
///
/// Each supplier hands over either all that is still wanted or all it has,
/// whichever is smaller; the loop stops when nothing more is wanted or the
/// list is exhausted.  Partial fulfilment is silent.
///
/// With `amount = None` the buyer's outstanding demand is what is wanted
/// and is decremented as goods arrive.  With `Some(n)` exactly `n` more
/// units are sought (`+∞` for take-everything buyers) and the standing
/// demand is reduced by what arrives, never below zero.
///
/// A supplier that prices `component` (finite price) registers every
/// transfer as a sale, including an empty one.  The buyer is skipped if it
/// appears among its own suppliers.
///
/// Returns the total units received.
pub fn get_component_from_suppliers<R>(
    pop:       &mut Population<R>,
    buyer:     AgentId,
    suppliers: &[AgentId],
    component: Component,
    amount:    Option<f64>,
) -> AgentResult<f64> {
    let mut rest = amount.unwrap_or(pop.get(buyer)?.ledger.demand[component]);
    if !component.is_continuous() {
        rest = rest.floor();
    }

    let mut received = 0.0;
    for &supplier in suppliers {
        if rest <= 0.0 {
            break;
        }
        if supplier == buyer {
            continue;
        }
        let (b, s) = pop.pair_mut(buyer, supplier)?;

        let available = s.ledger.stock[component].available();
        if available.is_infinite() && rest.is_infinite() {
            continue;
        }
        let moved = transfer(&mut s.ledger, &mut b.ledger, component, rest.min(available))?;

        if s.ledger.prices[component].is_finite() {
            s.ledger.sold_volume.register(moved);
        }
        let demand = &mut b.ledger.demand[component];
        *demand = (*demand - moved).max(0.0);

        trace!("{supplier} -> {buyer}: {moved} {component}");
        rest -= moved;
        received += moved;
    }
    Ok(received)
}
