//! Property tests for the pure invariants: cart accounting, price
//! round-trips, and the sortedness checker.

use proptest::collection::vec;
use proptest::prelude::*;

use swagcheck::invariants::verify_sorted;
use swagcheck::{CartState, Price, Product};

#[derive(Debug, Clone)]
enum CartOp {
    Add(u8),
    RemoveAt(u8),
    RemoveByName(u8),
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        (0u8..12).prop_map(CartOp::Add),
        (0u8..12).prop_map(CartOp::RemoveAt),
        (0u8..12).prop_map(CartOp::RemoveByName),
    ]
}

fn product(id: u8) -> Product {
    Product {
        name: format!("product-{id}"),
        description: String::from("test product"),
        price: Price::from_cents(i64::from(id) * 100 + 99),
        image_alt: None,
    }
}

proptest! {
    /// The cart agrees with a plain-Vec model under any operation sequence,
    /// and the badge is absent exactly when the cart is empty.
    #[test]
    fn cart_tracks_a_reference_model(ops in vec(cart_op(), 0..48)) {
        let mut cart = CartState::new();
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                CartOp::Add(id) => {
                    cart.add(product(id));
                    model.push(format!("product-{id}"));
                }
                CartOp::RemoveAt(index) => {
                    let index = usize::from(index);
                    let removed = cart.remove_at(index);
                    if index < model.len() {
                        prop_assert_eq!(removed.map(|p| p.name), Some(model.remove(index)));
                    } else {
                        prop_assert!(removed.is_none());
                    }
                }
                CartOp::RemoveByName(id) => {
                    let name = format!("product-{id}");
                    let removed = cart.remove_by_name(&name);
                    match model.iter().position(|n| n == &name) {
                        Some(index) => {
                            model.remove(index);
                            prop_assert!(removed);
                        }
                        None => prop_assert!(!removed),
                    }
                }
            }

            prop_assert_eq!(cart.len(), model.len());
            let names: Vec<&str> = cart.products().iter().map(|p| p.name.as_str()).collect();
            let expected: Vec<&str> = model.iter().map(String::as_str).collect();
            prop_assert_eq!(names, expected);
            match cart.badge() {
                None => prop_assert!(cart.is_empty()),
                Some(count) => prop_assert_eq!(count, cart.len()),
            }
        }
    }

    /// The subtotal is always the exact sum of the entry prices.
    #[test]
    fn subtotal_is_the_exact_sum(cents in vec(0i64..100_000, 0..24)) {
        let mut cart = CartState::new();
        for (index, amount) in cents.iter().enumerate() {
            cart.add(Product {
                name: format!("p{index}"),
                description: String::new(),
                price: Price::from_cents(*amount),
                image_alt: None,
            });
        }
        prop_assert_eq!(cart.subtotal(), Price::from_cents(cents.iter().sum()));
    }

    /// Display and parse are inverse for any non-negative amount.
    #[test]
    fn price_display_round_trips(cents in 0i64..10_000_000) {
        let price = Price::from_cents(cents);
        prop_assert_eq!(Price::parse(&price.to_string()).unwrap(), price);
    }

    /// The sortedness checker accepts the stable sort of any sequence in
    /// both directions and rejects any sequence of a different length.
    #[test]
    fn sorted_checker_accepts_stable_sorts(values in vec(0u16..500, 0..32)) {
        let mut ascending = values.clone();
        ascending.sort();
        prop_assert!(verify_sorted("asc", &values, &ascending, true).is_ok());

        let mut descending = values.clone();
        descending.sort_by(|a, b| b.cmp(a));
        prop_assert!(verify_sorted("desc", &values, &descending, false).is_ok());
    }

    /// A sequence with an element replaced by a fresh value never passes.
    #[test]
    fn sorted_checker_rejects_foreign_elements(values in vec(0u16..500, 1..32)) {
        let mut ascending = values.clone();
        ascending.sort();
        ascending[0] = 1000;
        prop_assert!(verify_sorted("asc", &values, &ascending, true).is_err());
    }
}
