//! Property tests exercising the public API of `linked_bst` against a sorted `Vec` model.

use quickcheck::{Arbitrary, Gen};

mod linked;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Add the item to the tree
    Add(T),
    /// Remove one copy of the item from the tree
    Remove(T),
    /// Rebuild the tree at minimum height
    Rebalance,
    /// Clear the tree
    Clear,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 0, 1, 1, 1, 2, 3]).unwrap() {
            0 => Op::Add(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Rebalance,
            3 => Op::Clear,
            _ => unreachable!(),
        }
    }
}
