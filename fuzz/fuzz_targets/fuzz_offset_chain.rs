#![no_main]

use libfuzzer_sys::fuzz_target;
use spotlight_core::geometry::{Offset, Rect, Sides};
use spotlight_layout::{Contribution, LayoutTree};

fuzz_target!(|data: &[u8]| {
    // Each 3-byte record appends a container: parent selector, padding, top inset.
    let mut tree = LayoutTree::default();
    let mut nodes = vec![tree.root()];
    for record in data.chunks_exact(3).take(64) {
        let parent = nodes[usize::from(record[0]) % nodes.len()];
        let contribution = Contribution::padded(Sides::all(f32::from(record[1])))
            .inset(Sides::top(f32::from(record[2])));
        let Ok(id) = tree.push(parent, contribution) else {
            return;
        };
        nodes.push(id);
    }

    let local = Rect::new(3.0, 5.0, 10.0, 10.0);
    for &node in &nodes {
        let chain = tree.chain(node).expect("pushed node has a chain");
        let total = chain.translation();

        // Post-conditions that must always hold:
        assert_eq!(chain.partial(chain.len()), total, "partial(len) != translation");
        let summed: Offset = chain.decompose().into_iter().sum();
        assert_eq!(summed, total, "decompose does not sum to translation");
        let resolved = chain.resolve(local);
        assert_eq!(resolved.size(), local.size(), "resolve changed size");
        assert_eq!(tree.origin(node).expect("origin"), total, "origin disagrees with chain");
    }
});
