use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};

use orderdesk_catalog::Catalog;
use orderdesk_core::{DomainError, DomainResult};
use orderdesk_offers::{OfferBook, OfferCondition};

use crate::order::{Order, OrderLine, OrderLog};

/// Store object owning the three registries of the service.
///
/// All order placement goes through [`OrderEngine::place_order`]; the
/// management surface reaches the registries through the accessors. The
/// engine is single-threaded and synchronous; a multi-threaded host must
/// serialize access to it (one lock around the whole engine keeps the
/// stock invariant and id uniqueness intact).
#[derive(Debug, Clone, Default)]
pub struct OrderEngine {
    catalog: Catalog,
    offers: OfferBook,
    log: OrderLog,
}

impl OrderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine pre-loaded with the demo catalog and offer book the service
    /// starts with. Nothing persists across restarts; every process begins
    /// from this state.
    pub fn seeded() -> Self {
        let mut engine = Self::new();
        engine
            .catalog
            .upsert(None, "Laptop".to_string(), Decimal::new(999_99, 2), 10);
        engine
            .catalog
            .upsert(None, "Phone".to_string(), Decimal::new(499_99, 2), 20);
        engine.offers.upsert(
            None,
            "Multi-item discount".to_string(),
            OfferCondition::MinItems { count: 2 },
            Decimal::new(10, 2),
        );
        engine.offers.upsert(
            None,
            "Laptop discount".to_string(),
            OfferCondition::SpecificItem { item_id: 1 },
            Decimal::new(5, 2),
        );
        engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn offers(&self) -> &OfferBook {
        &self.offers
    }

    pub fn offers_mut(&mut self) -> &mut OfferBook {
        &mut self.offers
    }

    pub fn orders(&self) -> &OrderLog {
        &self.log
    }

    /// Place an order against current stock.
    ///
    /// Gates run in strict order: line shape, item existence, stock
    /// sufficiency, then pricing. The first failure aborts with **zero**
    /// state mutation; stock is only deducted once every gate has passed.
    pub fn place_order(&mut self, lines: Vec<OrderLine>) -> DomainResult<Order> {
        if lines.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one line",
            ));
        }
        for line in &lines {
            if line.quantity == 0 {
                return Err(DomainError::validation("quantity must be positive"));
            }
        }

        for line in &lines {
            if self.catalog.get(line.item_id).is_none() {
                return Err(DomainError::ItemNotFound(line.item_id));
            }
        }

        // Exhaustive stock check before any deduction. Quantities are
        // accumulated per item so duplicate lines of one item must jointly
        // fit within its stock.
        let mut requested: HashMap<u64, u64> = HashMap::new();
        for line in &lines {
            let cumulative = requested.entry(line.item_id).or_insert(0);
            // Quantities are client-supplied; a sum past u64::MAX can never
            // fit any stock, and must not wrap the gate instead.
            *cumulative = cumulative
                .checked_add(line.quantity)
                .ok_or(DomainError::InsufficientStock(line.item_id))?;

            let item = self
                .catalog
                .get(line.item_id)
                .ok_or(DomainError::ItemNotFound(line.item_id))?;
            if item.stock < *cumulative {
                return Err(DomainError::InsufficientStock(line.item_id));
            }
        }

        let mut subtotal = Decimal::ZERO;
        for line in &lines {
            let item = self
                .catalog
                .get(line.item_id)
                .ok_or(DomainError::ItemNotFound(line.item_id))?;
            let line_total = item
                .price
                .checked_mul(Decimal::from(line.quantity))
                .ok_or_else(|| DomainError::validation("order subtotal is too large"))?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or_else(|| DomainError::validation("order subtotal is too large"))?;
        }

        // Matching offers stack multiplicatively in book order: each one
        // scales the running total by (1 - discount). Two offers of 0.10
        // and 0.05 on 100 therefore yield 85.5, not 85.
        let total_quantity = lines
            .iter()
            .try_fold(0u64, |acc, line| acc.checked_add(line.quantity))
            .ok_or_else(|| DomainError::validation("total quantity is too large"))?;
        let item_ids: Vec<u64> = lines.iter().map(|line| line.item_id).collect();

        let mut total = subtotal;
        let mut applied_offers = Vec::new();
        for offer in self.offers.list() {
            if offer.condition.matches(total_quantity, &item_ids) {
                total *= Decimal::ONE - offer.discount;
                applied_offers.push(offer.name.clone());
            }
        }
        let total = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        // Every gate passed; deduction cannot fail from here.
        for (&item_id, &quantity) in &requested {
            let item = self
                .catalog
                .get_mut(item_id)
                .ok_or_else(|| DomainError::internal(format!("item {item_id} vanished mid-placement")))?;
            item.stock -= quantity;
        }

        let order = Order {
            id: self.log.next_id(),
            lines,
            total,
            applied_offers,
            placed_at: Utc::now(),
        };
        self.log.append(order.clone());
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(item_id: u64, quantity: u64) -> OrderLine {
        OrderLine { item_id, quantity }
    }

    fn stock_of(engine: &OrderEngine, id: u64) -> u64 {
        engine.catalog().get(id).unwrap().stock
    }

    #[test]
    fn seeded_engine_matches_demo_state() {
        let engine = OrderEngine::seeded();

        assert_eq!(engine.catalog().len(), 2);
        assert_eq!(engine.catalog().get(1).unwrap().price, dec!(999.99));
        assert_eq!(engine.catalog().get(2).unwrap().price, dec!(499.99));
        assert_eq!(engine.offers().len(), 2);
        assert!(engine.orders().is_empty());
    }

    #[test]
    fn both_seed_offers_stack_on_a_two_item_order() {
        let mut engine = OrderEngine::seeded();

        let order = engine.place_order(vec![line(1, 1), line(2, 1)]).unwrap();

        // 1499.98 * 0.9 * 0.95 = 1282.4829, rounded to 2dp.
        assert_eq!(order.total, dec!(1282.48));
        assert_eq!(
            order.applied_offers,
            vec!["Multi-item discount".to_string(), "Laptop discount".to_string()]
        );
        assert_eq!(stock_of(&engine, 1), 9);
        assert_eq!(stock_of(&engine, 2), 19);
    }

    #[test]
    fn offers_apply_multiplicatively_not_additively() {
        let mut engine = OrderEngine::new();
        engine
            .catalog_mut()
            .upsert(None, "Widget".to_string(), dec!(100.00), 100);
        engine.offers_mut().upsert(
            None,
            "Ten off".to_string(),
            OfferCondition::MinItems { count: 1 },
            dec!(0.10),
        );
        engine.offers_mut().upsert(
            None,
            "Five off".to_string(),
            OfferCondition::MinItems { count: 1 },
            dec!(0.05),
        );

        let order = engine.place_order(vec![line(1, 1)]).unwrap();
        assert_eq!(order.total, dec!(85.50));
    }

    #[test]
    fn non_matching_offers_are_skipped() {
        let mut engine = OrderEngine::seeded();

        // One phone: the bulk offer needs 2 units, the laptop offer needs
        // item 1. Neither matches.
        let order = engine.place_order(vec![line(2, 1)]).unwrap();

        assert_eq!(order.total, dec!(499.99));
        assert!(order.applied_offers.is_empty());
    }

    #[test]
    fn empty_order_is_rejected() {
        let mut engine = OrderEngine::seeded();
        let err = engine.place_order(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let mut engine = OrderEngine::seeded();
        let err = engine.place_order(vec![line(1, 0)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(stock_of(&engine, 1), 10);
    }

    #[test]
    fn unknown_item_is_rejected_before_any_stock_check() {
        let mut engine = OrderEngine::seeded();
        let err = engine.place_order(vec![line(1, 1), line(99, 1)]).unwrap_err();
        assert_eq!(err, DomainError::ItemNotFound(99));
        assert_eq!(stock_of(&engine, 1), 10);
    }

    #[test]
    fn insufficient_stock_on_a_later_line_leaves_earlier_lines_untouched() {
        let mut engine = OrderEngine::seeded();

        // Line 1 fits, line 2 does not; nothing may be deducted.
        let err = engine.place_order(vec![line(1, 1), line(2, 21)]).unwrap_err();

        assert_eq!(err, DomainError::InsufficientStock(2));
        assert_eq!(stock_of(&engine, 1), 10);
        assert_eq!(stock_of(&engine, 2), 20);
        assert!(engine.orders().is_empty());
    }

    #[test]
    fn duplicate_lines_of_one_item_must_jointly_fit_stock() {
        let mut engine = OrderEngine::seeded();

        // Each line fits on its own (6 <= 10), together they do not.
        let err = engine.place_order(vec![line(1, 6), line(1, 6)]).unwrap_err();

        assert_eq!(err, DomainError::InsufficientStock(1));
        assert_eq!(stock_of(&engine, 1), 10);
    }

    #[test]
    fn duplicate_lines_that_fit_are_deducted_once_per_line() {
        let mut engine = OrderEngine::seeded();

        let order = engine.place_order(vec![line(1, 4), line(1, 6)]).unwrap();

        assert_eq!(stock_of(&engine, 1), 0);
        assert_eq!(order.lines.len(), 2);
    }

    #[test]
    fn quantity_overflow_across_duplicate_lines_is_insufficient_stock() {
        let mut engine = OrderEngine::seeded();

        // The cumulative requested quantity wraps past u64::MAX; the gate
        // must reject, not wrap and pass.
        let err = engine
            .place_order(vec![line(1, 1), line(1, u64::MAX)])
            .unwrap_err();

        assert_eq!(err, DomainError::InsufficientStock(1));
        assert_eq!(stock_of(&engine, 1), 10);
        assert!(engine.orders().is_empty());
    }

    #[test]
    fn total_quantity_overflow_across_items_is_rejected() {
        let mut engine = OrderEngine::new();
        engine
            .catalog_mut()
            .upsert(None, "Bolt".to_string(), dec!(1.00), u64::MAX);
        engine
            .catalog_mut()
            .upsert(None, "Nut".to_string(), dec!(1.00), u64::MAX);

        // Each line fits its own stock; the order-wide quantity does not
        // fit a u64.
        let err = engine
            .place_order(vec![line(1, u64::MAX), line(2, u64::MAX)])
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(stock_of(&engine, 1), u64::MAX);
        assert_eq!(stock_of(&engine, 2), u64::MAX);
    }

    #[test]
    fn exact_stock_order_succeeds_and_drains_the_item() {
        let mut engine = OrderEngine::seeded();

        engine.place_order(vec![line(2, 20)]).unwrap();
        assert_eq!(stock_of(&engine, 2), 0);

        let err = engine.place_order(vec![line(2, 1)]).unwrap_err();
        assert_eq!(err, DomainError::InsufficientStock(2));
    }

    #[test]
    fn order_ids_are_sequential() {
        let mut engine = OrderEngine::seeded();

        let first = engine.place_order(vec![line(2, 1)]).unwrap();
        let second = engine.place_order(vec![line(2, 1)]).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(engine.orders().len(), 2);
    }

    #[test]
    fn other_items_are_untouched_by_a_successful_order() {
        let mut engine = OrderEngine::seeded();

        engine.place_order(vec![line(2, 3)]).unwrap();

        assert_eq!(stock_of(&engine, 1), 10);
        assert_eq!(stock_of(&engine, 2), 17);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn discount_strategy() -> impl Strategy<Value = Decimal> {
            // Fractions in [0, 1] with two decimal places.
            (0u32..=100).prop_map(|pct| Decimal::new(pct as i64, 2))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: with every discount in [0, 1], the total never
            /// exceeds the undiscounted subtotal.
            #[test]
            fn total_never_exceeds_subtotal(
                discounts in proptest::collection::vec(discount_strategy(), 0..6),
                quantity in 1u64..10,
            ) {
                let mut engine = OrderEngine::new();
                engine.catalog_mut().upsert(
                    None,
                    "Widget".to_string(),
                    dec!(19.99),
                    1000,
                );
                for (i, discount) in discounts.iter().enumerate() {
                    engine.offers_mut().upsert(
                        None,
                        format!("Offer {i}"),
                        OfferCondition::MinItems { count: 1 },
                        *discount,
                    );
                }

                let subtotal = dec!(19.99) * Decimal::from(quantity);
                let order = engine.place_order(vec![line(1, quantity)]).unwrap();

                prop_assert!(order.total <= subtotal);
                prop_assert!(order.total >= Decimal::ZERO);
            }

            /// Property: a rejected placement changes no item's stock and
            /// appends nothing to the log.
            #[test]
            fn failed_placement_mutates_nothing(
                quantity in 11u64..100,
            ) {
                let mut engine = OrderEngine::seeded();
                let catalog_before = engine.catalog().clone();

                let result = engine.place_order(vec![line(1, quantity)]);

                prop_assert!(result.is_err());
                prop_assert_eq!(engine.catalog(), &catalog_before);
                prop_assert!(engine.orders().is_empty());
            }
        }
    }
}
