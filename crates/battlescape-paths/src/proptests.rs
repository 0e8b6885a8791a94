use battlescape_core::{Battlefield, InputState, Position};
use battlescape_map::{BattleMap, Layout, Soldier};
use proptest::prelude::*;

use crate::{DEFAULT_MAX_COST, NoReservation, PathOptions, Pathfinder, Reachable, chebyshev};

const W: i32 = 12;
const H: i32 = 12;

fn plan(blocked: &[bool]) -> String {
    (0..H)
        .map(|y| {
            (0..W)
                .map(|x| if blocked[(y * W + x) as usize] { 'x' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn open_map() -> BattleMap {
    Layout::parse(&plan(&[false; (W * H) as usize]))
        .unwrap()
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn line_path_walks_back_to_destination(ax in 0..W, ay in 0..H, bx in 0..W, by in 0..H) {
        prop_assume!((ax, ay) != (bx, by));
        let map = open_map();
        let unit = Soldier::new(1, Position::new(ax, ay, 0));
        let dest = Position::new(bx, by, 0);
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());

        prop_assert!(pf.calculate(&map, &unit, dest, None, DEFAULT_MAX_COST, InputState::NONE));
        let end = pf.path().iter().fold(unit.pos, |p, d| p + d.to_vector());
        prop_assert_eq!(end, dest);
        prop_assert_eq!(pf.path_len() as i32, chebyshev(unit.pos, dest));
    }

    #[test]
    fn reachable_is_sorted_bounded_and_passable(
        blocked in prop::collection::vec(prop::bool::weighted(0.25), (W * H) as usize),
        ox in 0..W,
        oy in 0..H,
        max_tu in 0..60i32,
    ) {
        let mut blocked = blocked;
        blocked[(oy * W + ox) as usize] = false;
        let map = Layout::parse(&plan(&blocked)).unwrap().build();
        let origin = Position::new(ox, oy, 0);
        let unit = Soldier::new(1, origin);
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());

        let r = pf.find_reachable(&map, &unit, max_tu);
        prop_assert_eq!(r[0], Reachable { pos: origin, cost: 0 });
        for w in r.windows(2) {
            prop_assert!(w[0].cost <= w[1].cost);
        }
        for e in &r {
            prop_assert!(e.cost <= max_tu);
            prop_assert!(!blocked[(e.pos.y * W + e.pos.x) as usize]);
        }
        let mut seen: Vec<_> = r.iter().map(|e| e.pos).collect();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), r.len());
    }

    #[test]
    fn preview_then_remove_leaves_no_markers(bx in 0..W, by in 0..H) {
        prop_assume!((bx, by) != (0, 0));
        let mut map = open_map();
        let unit = Soldier::new(1, Position::ZERO);
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());

        prop_assert!(pf.calculate(&map, &unit, Position::new(bx, by, 0), None, DEFAULT_MAX_COST, InputState::NONE));
        prop_assert!(pf.preview_path(&mut map, &unit, &NoReservation));
        prop_assert_eq!(map.marked().count(), pf.path_len());
        prop_assert!(pf.remove_preview(&mut map));
        prop_assert_eq!(map.marked().count(), 0);
    }
}
