//! Property-based tests for list operations

use super::*;
use proptest::prelude::*;

fn arb_item() -> impl Strategy<Value = Item> {
    ("[a-z ]{0,12}", any::<bool>()).prop_map(|(name, acquired)| Item { name, acquired })
}

fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    proptest::collection::vec(arb_item(), 0..12)
}

/// A non-empty list plus a valid index into it
fn arb_items_with_index() -> impl Strategy<Value = (Vec<Item>, usize)> {
    proptest::collection::vec(arb_item(), 1..12).prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..len)
    })
}

proptest! {
    #[test]
    fn prune_is_idempotent(items in arb_items()) {
        let once = prune_acquired(items);
        prop_assert_eq!(prune_acquired(once.clone()), once);
    }

    #[test]
    fn prune_leaves_no_acquired_items(items in arb_items()) {
        let unacquired = items.iter().filter(|i| !i.acquired).count();
        let pruned = prune_acquired(items);
        prop_assert!(pruned.iter().all(|i| !i.acquired));
        prop_assert_eq!(pruned.len(), unacquired);
    }

    #[test]
    fn clear_always_empties(items in arb_items()) {
        prop_assert!(clear(items).is_empty());
    }

    #[test]
    fn toggle_is_an_involution((items, index) in arb_items_with_index()) {
        let twice = toggle(toggle(items.clone(), index).unwrap(), index).unwrap();
        prop_assert_eq!(twice, items);
    }

    #[test]
    fn toggle_past_end_is_rejected(items in arb_items(), extra in 0usize..5) {
        let len = items.len();
        let index = len + extra;
        prop_assert_eq!(
            toggle(items, index),
            Err(ListError::IndexOutOfRange { index, len })
        );
    }

    #[test]
    fn append_adds_one_item_per_line(
        items in arb_items(),
        lines in proptest::collection::vec("[a-z]{0,6}", 1..6),
    ) {
        let before = items.clone();
        let text = lines.join("\n");
        let appended = append_lines(items, &text);
        prop_assert_eq!(appended.len(), before.len() + lines.len());
        prop_assert_eq!(&appended[..before.len()], &before[..]);
        for (item, line) in appended[before.len()..].iter().zip(&lines) {
            prop_assert_eq!(&item.name, line);
            prop_assert!(!item.acquired);
        }
    }
}
