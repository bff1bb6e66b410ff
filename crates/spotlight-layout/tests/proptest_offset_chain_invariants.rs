//! Property-based invariant tests for offset accumulation.
//!
//! 1. Resolved bounds equal local bounds plus the exact vector sum of every
//!    ancestor contribution, at any depth.
//! 2. Decomposed per-link offsets reconstruct the directly measured position.
//! 3. Resolution never changes the size.
//! 4. A tree-built chain agrees with a hand-built chain of the same links.
//! 5. Registered geometry is only served for the current settled pass.

use proptest::prelude::*;
use spotlight_layout::{
    AnchorRegistry, Contribution, LayoutTree, Offset, OffsetChain, Rect, Sides,
};

// ── Strategies ──────────────────────────────────────────────────────────

/// Integral values keep the float sums exact.
fn coord() -> impl Strategy<Value = f32> {
    (-500i32..500).prop_map(|v| v as f32)
}

fn spacing() -> impl Strategy<Value = f32> {
    (0i32..64).prop_map(|v| v as f32)
}

fn sides() -> impl Strategy<Value = Sides> {
    (spacing(), spacing(), spacing(), spacing())
        .prop_map(|(top, right, bottom, left)| Sides::new(top, right, bottom, left))
}

fn contribution() -> impl Strategy<Value = Contribution> {
    (coord(), coord(), sides(), sides(), coord(), coord()).prop_map(
        |(dx, dy, padding, inset, sx, sy)| {
            Contribution::translate(dx, dy)
                .padding(padding)
                .inset(inset)
                .scroll(sx, sy)
        },
    )
}

fn local_bounds() -> impl Strategy<Value = Rect> {
    (coord(), coord(), 0i32..400, 0i32..400)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w as f32, h as f32))
}

fn expected_shift(links: &[Contribution]) -> Offset {
    let mut dx = 0.0;
    let mut dy = 0.0;
    for link in links {
        dx += link.offset.dx + link.padding.left + link.inset.left - link.scroll.dx;
        dy += link.offset.dy + link.padding.top + link.inset.top - link.scroll.dy;
    }
    Offset::new(dx, dy)
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. Chain resolution
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolved_equals_local_plus_vector_sum(
        links in prop::collection::vec(contribution(), 0..12),
        local in local_bounds(),
    ) {
        let chain: OffsetChain = links.iter().copied().collect();
        let shift = expected_shift(&links);
        let global = chain.resolve(local);
        prop_assert_eq!(global.x, local.x + shift.dx);
        prop_assert_eq!(global.y, local.y + shift.dy);
        prop_assert_eq!(global.width, local.width);
        prop_assert_eq!(global.height, local.height);
    }

    #[test]
    fn decomposed_offsets_reconstruct_position(
        links in prop::collection::vec(contribution(), 0..12),
        local in local_bounds(),
    ) {
        let chain: OffsetChain = links.into_iter().collect();
        let mut position = local.origin();
        for step in chain.decompose() {
            position = position.translate(step);
        }
        prop_assert_eq!(position, chain.resolve(local).origin());
    }

    #[test]
    fn stopping_early_misses_exactly_the_remaining_layers(
        links in prop::collection::vec(contribution(), 1..10),
        cut in 0usize..10,
    ) {
        let chain: OffsetChain = links.iter().copied().collect();
        let cut = cut.min(links.len());
        let missing = expected_shift(&links[cut..]);
        prop_assert_eq!(chain.translation() - chain.partial(cut), missing);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Tree chains
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tree_chain_matches_manual_chain(
        window in contribution(),
        links in prop::collection::vec(contribution(), 0..10),
        local in local_bounds(),
    ) {
        let mut tree = LayoutTree::new(window);
        let mut parent = tree.root();
        for link in &links {
            parent = tree.push(parent, *link).unwrap();
        }

        let manual: OffsetChain = std::iter::once(window).chain(links.iter().copied()).collect();
        let mut registry = AnchorRegistry::new();
        registry.begin_layout_pass();
        let geometry = registry.register_in_tree(0, local, &tree, parent).unwrap();
        prop_assert_eq!(geometry.bounds(), manual.resolve(local));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Freshness
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn only_current_pass_is_served(
        passes in 1usize..6,
        registered_in in 0usize..6,
    ) {
        let mut registry = AnchorRegistry::with_step_count(1);
        for pass in 0..passes {
            registry.begin_layout_pass();
            if pass == registered_in {
                registry
                    .register(0, Rect::new(0.0, 0.0, 4.0, 4.0), &OffsetChain::new())
                    .unwrap();
            }
            registry.settle();
        }
        let expected = registered_in == passes - 1;
        prop_assert_eq!(registry.is_fresh(0), expected);
    }
}
