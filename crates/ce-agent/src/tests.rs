//! Unit tests for ledgers, ranking, trading, and price adjustment.

#[cfg(test)]
mod helpers {
    use ce_core::{AgentId, AgentKind, Component, SalesMemory};

    use crate::{Ledger, Population};

    /// A population of plastic suppliers `(price, stock)` followed by one
    /// buyer demanding `demand` units of VIRGIN.
    pub fn market(suppliers: &[(f64, f64)], demand: f64) -> (Population<()>, Vec<AgentId>, AgentId) {
        let mut pop = Population::new();
        let ids = suppliers
            .iter()
            .map(|&(price, stock)| {
                let mut l = Ledger::new(SalesMemory::PerTransaction);
                l.offer(Component::Virgin, price, price);
                *l.scalar_mut(Component::Virgin).unwrap() = stock;
                pop.push(AgentKind::Refiner, l, ())
            })
            .collect();
        let mut buyer = Ledger::new(SalesMemory::PerTransaction);
        buyer.set_default_demand(Component::Virgin, demand);
        let buyer = pop.push(AgentKind::PartsManufacturer, buyer, ());
        (pop, ids, buyer)
    }

    pub fn total_virgin(pop: &Population<()>) -> f64 {
        pop.iter().map(|a| a.ledger.scalar(Component::Virgin).unwrap()).sum()
    }
}

#[cfg(test)]
mod stock {
    use ce_core::Component;
    use ce_goods::{Part, PlasticRatio};

    use crate::{AgentError, Shipment, Stock};

    #[test]
    fn shapes_follow_component() {
        assert!(matches!(Stock::empty_for(Component::RecyclateLow), Stock::Scalar(_)));
        assert!(matches!(Stock::empty_for(Component::PartsForRecycler), Stock::Parts(_)));
        assert!(matches!(Stock::empty_for(Component::CarsForDismantler), Stock::Cars(_)));
    }

    #[test]
    fn take_is_fifo_and_clamped() {
        let mut s = Stock::empty_for(Component::Parts);
        let parts: Vec<Part> = (1..=3)
            .map(|i| Part::standard(PlasticRatio::new(i as f64 / 10.0, 0.0, 0.0)))
            .collect();
        s.give(Component::Parts, Shipment::Parts(parts)).unwrap();

        let Shipment::Parts(out) = s.take(2.7) else { panic!("wrong shape") };
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].plastic_ratio().virgin, 0.1);
        assert_eq!(s.available(), 1.0);

        let Shipment::Parts(out) = s.take(10.0) else { panic!("wrong shape") };
        assert_eq!(out.len(), 1);
        assert_eq!(s.available(), 0.0);
    }

    #[test]
    fn infinite_scalar_stays_infinite() {
        let mut s = Stock::Scalar(f64::INFINITY);
        assert_eq!(s.take(50.0), Shipment::Scalar(50.0));
        assert!(s.available().is_infinite());
    }

    #[test]
    fn mismatched_shipment_rejected() {
        let mut s = Stock::empty_for(Component::Virgin);
        let err = s.give(Component::Virgin, Shipment::Cars(vec![])).unwrap_err();
        assert_eq!(err, AgentError::ShapeMismatch { component: Component::Virgin });
    }
}

#[cfg(test)]
mod ledger {
    use ce_core::{Component, SalesMemory};

    use crate::{Ledger, SoldVolume};

    #[test]
    fn unpriced_components_are_not_for_sale() {
        let l = Ledger::new(SalesMemory::PerTransaction);
        assert!(Component::ALL.iter().all(|&c| l.prices[c].is_infinite()));
    }

    #[test]
    fn per_transaction_memory_shifts_every_sale() {
        let mut s = SoldVolume::new(SalesMemory::PerTransaction);
        s.register(3.0);
        s.register(5.0);
        assert_eq!((s.last, s.second_last), (5.0, 3.0));
        s.roll();
        assert_eq!((s.last, s.second_last), (5.0, 3.0));
        assert_eq!(s.ratio(), Some(5.0 / 3.0));
    }

    #[test]
    fn per_tick_memory_accumulates_until_roll() {
        let mut s = SoldVolume::new(SalesMemory::PerTick);
        s.register(3.0);
        s.register(5.0);
        assert_eq!(s.last, 0.0);
        s.roll();
        assert_eq!((s.last, s.second_last, s.pending), (8.0, 0.0, 0.0));
        assert_eq!(s.ratio(), None);
    }

    #[test]
    fn planned_demand_survives_trading() {
        let mut l = Ledger::new(SalesMemory::PerTransaction);
        l.set_default_demand(Component::Parts, 10.0);
        l.demand[Component::Parts] = 0.0;
        l.restore_demand();
        assert_eq!(l.demand[Component::Parts], 10.0);
    }
}

#[cfg(test)]
mod ranking {
    use ce_core::{AgentId, Component};

    use super::helpers::market;
    use crate::rank_suppliers;

    #[test]
    fn cheapest_first_stable_on_ties() {
        let (pop, ids, _) = market(&[(3.0, 1.0), (2.0, 1.0), (3.0, 1.0), (f64::INFINITY, 1.0)], 0.0);
        let ranked = rank_suppliers(&pop, &ids, Component::Virgin);
        assert_eq!(ranked, vec![ids[1], ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn unknown_supplier_ranks_last() {
        let (pop, ids, _) = market(&[(2.0, 1.0)], 0.0);
        let ranked = rank_suppliers(&pop, &[AgentId(99), ids[0]], Component::Virgin);
        assert_eq!(ranked, vec![ids[0], AgentId(99)]);
    }

    #[test]
    fn unpriced_component_keeps_input_order() {
        let (pop, ids, _) = market(&[(3.0, 1.0), (2.0, 1.0)], 0.0);
        assert_eq!(rank_suppliers(&pop, &ids, Component::Parts), ids);
    }
}

#[cfg(test)]
mod trade {
    use ce_core::{AgentKind, Component, SalesMemory};

    use super::helpers::{market, total_virgin};
    use crate::{Ledger, Population, get_component_from_suppliers, rank_suppliers};

    #[test]
    fn infinite_supplier_fills_demand() {
        let (mut pop, ids, buyer) = market(&[(2.5, f64::INFINITY)], 50.0);
        let got = get_component_from_suppliers(&mut pop, buyer, &ids, Component::Virgin, None).unwrap();
        assert_eq!(got, 50.0);
        assert_eq!(pop[buyer].ledger.scalar(Component::Virgin).unwrap(), 50.0);
        assert_eq!(pop[buyer].ledger.demand[Component::Virgin], 0.0);
        assert_eq!(pop[ids[0]].ledger.sold_volume.last, 50.0);
        assert!(pop[ids[0]].ledger.scalar(Component::Virgin).unwrap().is_infinite());
    }

    #[test]
    fn greedy_partial_allocation_over_ranked_suppliers() {
        let (mut pop, ids, buyer) = market(&[(3.0, 10.0), (2.0, 10.0)], 15.0);
        let ranked = rank_suppliers(&pop, &ids, Component::Virgin);
        get_component_from_suppliers(&mut pop, buyer, &ranked, Component::Virgin, None).unwrap();

        assert_eq!(pop[buyer].ledger.scalar(Component::Virgin).unwrap(), 15.0);
        assert_eq!(pop[ids[1]].ledger.sold_volume.last, 10.0);
        assert_eq!(pop[ids[0]].ledger.sold_volume.last, 5.0);
        assert_eq!(pop[ids[1]].ledger.scalar(Component::Virgin).unwrap(), 0.0);
        assert_eq!(pop[ids[0]].ledger.scalar(Component::Virgin).unwrap(), 5.0);
        assert_eq!(total_virgin(&pop), 20.0);
    }

    #[test]
    fn shortfall_is_silent() {
        let (mut pop, ids, buyer) = market(&[(2.0, 4.0)], 10.0);
        let got = get_component_from_suppliers(&mut pop, buyer, &ids, Component::Virgin, None).unwrap();
        assert_eq!(got, 4.0);
        assert_eq!(pop[buyer].ledger.demand[Component::Virgin], 6.0);
    }

    #[test]
    fn explicit_amount_reduces_standing_demand() {
        let (mut pop, ids, buyer) = market(&[(2.0, 100.0)], 10.0);
        get_component_from_suppliers(&mut pop, buyer, &ids, Component::Virgin, Some(4.0)).unwrap();
        assert_eq!(pop[buyer].ledger.demand[Component::Virgin], 6.0);
        get_component_from_suppliers(&mut pop, buyer, &ids, Component::Virgin, Some(20.0)).unwrap();
        assert_eq!(pop[buyer].ledger.demand[Component::Virgin], 0.0);
        assert_eq!(pop[buyer].ledger.scalar(Component::Virgin).unwrap(), 24.0);
    }

    #[test]
    fn take_everything_skips_infinite_stock() {
        let (mut pop, ids, buyer) = market(&[(2.0, f64::INFINITY), (2.5, 7.0)], 0.0);
        let got = get_component_from_suppliers(&mut pop, buyer, &ids, Component::Virgin, Some(f64::INFINITY)).unwrap();
        assert_eq!(got, 7.0);
    }

    #[test]
    fn pickups_of_unpriced_goods_are_not_sales() {
        let mut pop: Population<()> = Population::new();
        let supplier = pop.push(AgentKind::Garage, Ledger::new(SalesMemory::PerTransaction), ());
        let buyer = pop.push(AgentKind::Recycler, Ledger::new(SalesMemory::PerTransaction), ());
        *pop[supplier].ledger.scalar_mut(Component::RecyclateLow).unwrap() = 3.0;
        pop[supplier].ledger.sold_volume.push(9.0);

        get_component_from_suppliers(&mut pop, buyer, &[supplier], Component::RecyclateLow, Some(f64::INFINITY))
            .unwrap();
        assert_eq!(pop[buyer].ledger.scalar(Component::RecyclateLow).unwrap(), 3.0);
        assert_eq!(pop[supplier].ledger.sold_volume.last, 9.0);
    }

    #[test]
    fn buyer_never_buys_from_itself() {
        let (mut pop, mut ids, buyer) = market(&[(2.0, 5.0)], 10.0);
        *pop[buyer].ledger.scalar_mut(Component::Virgin).unwrap() = 100.0;
        ids.insert(0, buyer);
        let got = get_component_from_suppliers(&mut pop, buyer, &ids, Component::Virgin, None).unwrap();
        assert_eq!(got, 5.0);
    }

    #[test]
    fn discrete_demand_is_floored() {
        use ce_goods::{Part, PlasticRatio};

        let mut pop: Population<()> = Population::new();
        let mut supplier = Ledger::new(SalesMemory::PerTransaction);
        supplier.offer(Component::Parts, 2.0, 2.0);
        supplier
            .parts_mut(Component::Parts)
            .unwrap()
            .extend((0..5).map(|_| Part::standard(PlasticRatio::virgin_only())));
        let supplier = pop.push(AgentKind::PartsManufacturer, supplier, ());
        let mut buyer = Ledger::new(SalesMemory::PerTransaction);
        buyer.set_default_demand(Component::Parts, 2.9);
        let buyer = pop.push(AgentKind::Garage, buyer, ());

        let got = get_component_from_suppliers(&mut pop, buyer, &[supplier], Component::Parts, None).unwrap();
        assert_eq!(got, 2.0);
        assert_eq!(pop[buyer].ledger.parts(Component::Parts).unwrap().len(), 2);
        assert_eq!(pop[supplier].ledger.parts(Component::Parts).unwrap().len(), 3);
    }
}

#[cfg(test)]
mod pricing {
    use ce_core::{Component, PricingParams, SalesMemory, SimRng};

    use crate::{Ledger, adjust_future_demand, adjust_future_price, scaling_factor};

    fn quiet() -> PricingParams {
        PricingParams { noise_sd: 0.0, ..PricingParams::default() }
    }

    fn seller(last: f64, second_last: f64) -> Ledger {
        let mut l = Ledger::new(SalesMemory::PerTransaction);
        l.offer(Component::Virgin, 2.0, 2.5);
        l.set_default_demand(Component::Parts, 40.0);
        l.sold_volume.push(second_last);
        l.sold_volume.push(last);
        l
    }

    #[test]
    fn factor_is_clamped() {
        assert_eq!(scaling_factor(10.0, 1.0, 0.95, 1.1), 1.1);
        assert_eq!(scaling_factor(0.1, 1.0, 0.95, 1.1), 0.95);
        assert_eq!(scaling_factor(1.05, 1.0, 0.95, 1.1), 1.05);
    }

    #[test]
    fn price_follows_sales_growth() {
        let mut rng = SimRng::new(0);
        let mut l = seller(21.0, 20.0);
        adjust_future_price(&mut l, Component::Virgin, &quiet(), &mut rng);
        assert!((l.prices[Component::Virgin] - 2.1).abs() < 1e-12);
    }

    #[test]
    fn no_signal_resets_price_near_baseline() {
        let mut rng = SimRng::new(1);
        let mut l = seller(0.0, 20.0);
        adjust_future_price(&mut l, Component::Virgin, &quiet(), &mut rng);
        let p = l.prices[Component::Virgin];
        assert!(p >= 0.0 && (p - 2.5).abs() < 2.0, "{p}");
    }

    #[test]
    fn unsold_component_keeps_infinite_price() {
        let mut rng = SimRng::new(2);
        let mut l = seller(0.0, 0.0);
        adjust_future_price(&mut l, Component::Cars, &quiet(), &mut rng);
        assert!(l.prices[Component::Cars].is_infinite());
    }

    #[test]
    fn demand_scales_plan_and_rounds_discrete() {
        let mut rng = SimRng::new(3);
        let mut l = seller(30.0, 20.0);
        l.demand[Component::Parts] = 0.0;
        adjust_future_demand(&mut l, Component::Parts, &quiet(), &mut rng);
        assert_eq!(l.planned[Component::Parts], 60.0);
        assert_eq!(l.demand[Component::Parts], 60.0);
    }

    #[test]
    fn no_signal_restores_default_demand() {
        let mut rng = SimRng::new(4);
        let mut l = seller(30.0, 0.0);
        l.set_planned_demand(Component::Parts, 77.0);
        adjust_future_demand(&mut l, Component::Parts, &quiet(), &mut rng);
        assert_eq!(l.demand[Component::Parts], 40.0);
    }
}

#[cfg(test)]
mod properties {
    use ce_core::{Component, PricingParams, SalesMemory, SimRng};
    use proptest::prelude::*;

    use super::helpers::{market, total_virgin};
    use crate::{Ledger, adjust_future_price, get_component_from_suppliers, rank_suppliers};

    proptest! {
        #[test]
        fn fulfilment_never_overshoots(
            suppliers in proptest::collection::vec((0.1f64..10.0, 0.0f64..50.0), 0..6),
            demand in 0.0f64..200.0,
        ) {
            let (mut pop, ids, buyer) = market(&suppliers, demand);
            let before = total_virgin(&pop);
            let ranked = rank_suppliers(&pop, &ids, Component::Virgin);
            let got = get_component_from_suppliers(&mut pop, buyer, &ranked, Component::Virgin, None).unwrap();

            prop_assert!(pop[buyer].ledger.demand[Component::Virgin] >= 0.0);
            prop_assert!(got <= demand + 1e-9);
            prop_assert!((total_virgin(&pop) - before).abs() < 1e-6);
            for a in pop.iter() {
                prop_assert!(a.ledger.scalar(Component::Virgin).unwrap() >= -1e-9);
            }
        }

        #[test]
        fn price_step_stays_within_clamp(
            last in 1.0f64..1_000.0,
            second_last in 1.0f64..1_000.0,
            seed in any::<u64>(),
        ) {
            let params = PricingParams::default();
            let mut l = Ledger::new(SalesMemory::PerTransaction);
            l.offer(Component::Virgin, 1.0, 1.0);
            l.sold_volume.push(second_last);
            l.sold_volume.push(last);

            // Replay the noise draw on a twin stream to isolate the factor.
            let mut rng = SimRng::new(seed);
            let mut twin = SimRng::new(seed);
            adjust_future_price(&mut l, Component::Virgin, &params, &mut rng);
            let noise = twin.normal(1.0, params.noise_sd).max(0.0);

            let p = l.prices[Component::Virgin];
            prop_assert!(p >= params.min_price_scaling * noise - 1e-12);
            prop_assert!(p <= params.max_price_scaling * noise + 1e-12);
        }
    }
}
