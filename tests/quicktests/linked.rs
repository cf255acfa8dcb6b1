use linked_bst::{Error, Tree};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a sorted `Vec`.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same items, duplicates included, in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, model: &mut Vec<T>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Add(item) => {
                bst.add(item.clone());
                let at = model.partition_point(|x| x <= item);
                model.insert(at, item.clone());
            }
            Op::Remove(item) => {
                let expected = match model.binary_search(item) {
                    Ok(at) => Ok(model.remove(at)),
                    Err(_) => Err(Error::NotFound),
                };
                assert_eq!(bst.remove(item), expected);
            }
            Op::Rebalance => bst.rebalance(),
            Op::Clear => {
                bst.clear();
                model.clear();
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);
    tree.len() == model.len() && tree.inorder().eq(model.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x) && tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| !tree.contains(x) && tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut still_present = xs;

    for delete in &deletes {
        let len = tree.len();
        match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                if tree.remove(delete) != Ok(*delete) || tree.len() != len - 1 {
                    return false;
                }
            }
            None => {
                if tree.remove(delete) != Err(Error::NotFound) || tree.len() != len {
                    return false;
                }
            }
        }
    }

    still_present.iter().all(|x| tree.contains(x)) && tree.len() == still_present.len()
}

#[quickcheck]
fn rebalance_keeps_sorted_items(xs: Vec<i32>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    tree.rebalance();

    let mut sorted = xs;
    sorted.sort();
    tree.inorder().eq(sorted.iter())
        && tree.len() == sorted.len()
        && tree.height() as f64 <= ((sorted.len() + 1) as f64).log2().ceil()
        && tree.is_balanced()
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    let mut expected: Vec<_> = xs.iter().filter(|&&x| low <= x && x <= high).collect();
    expected.sort();
    tree.range_find(&low, &high) == expected
}

#[quickcheck]
fn traversals_visit_every_item(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    let mut sorted = xs;
    sorted.sort();
    let sorted_copy = |items: Vec<&i8>| {
        let mut items: Vec<i8> = items.into_iter().copied().collect();
        items.sort();
        items
    };

    sorted_copy(tree.preorder().collect()) == sorted
        && sorted_copy(tree.postorder().collect()) == sorted
        && sorted_copy(tree.levelorder().collect()) == sorted
        && tree.into_iter().collect::<Vec<_>>() == sorted
}
