//! Unit tests for rg-grid.
//!
//! All tests use hand-crafted maps so the expected distances can be read off
//! the sketches.

#[cfg(test)]
mod helpers {
    use rg_core::Position;

    use crate::cells::{STRAIGHT_EW, STRAIGHT_NS};
    use crate::{RailCell, TransitionMap, TransitionMapBuilder};

    /// `1 × n` east–west corridor.
    pub fn corridor(n: i32) -> TransitionMap {
        let mut b = TransitionMapBuilder::new(1, n as usize);
        b.set_row_run(0, 0..n, STRAIGHT_EW).unwrap();
        b.build()
    }

    /// `1 × 3`: dead end (open east) at col 0, straights at cols 1–2.
    pub fn dead_end_corridor() -> TransitionMap {
        let mut b = TransitionMapBuilder::new(1, 3);
        b.set(Position::new(0, 0), RailCell::DeadEnd.rotated(-1)).unwrap();
        b.set_row_run(0, 1..3, STRAIGHT_EW).unwrap();
        b.build()
    }

    /// `1 × 4`: straight at col 0, buffer stop open east at col 1 (closed
    /// towards col 0), straights at cols 2–3.
    pub fn buffer_stop_line() -> TransitionMap {
        let mut b = TransitionMapBuilder::new(1, 4);
        b.set(Position::new(0, 0), STRAIGHT_EW).unwrap();
        b.set(Position::new(0, 1), RailCell::DeadEnd.rotated(-1)).unwrap();
        b.set_row_run(0, 2..4, STRAIGHT_EW).unwrap();
        b.build()
    }

    /// `n × 2`: north–south line in col 1, col 0 empty.
    pub fn column(n: i32) -> TransitionMap {
        let mut b = TransitionMapBuilder::new(n as usize, 2);
        b.set_col_run(1, 0..n, STRAIGHT_NS).unwrap();
        b.build()
    }

    /// Ring around a 3×3 block with a spur off the east side:
    ///
    /// ```text
    ///   ┌ ─ ┐ .
    ///   │ . ├ ╡      (1,2) switch, (1,3) dead end open west
    ///   └ ─ ┘ .
    /// ```
    pub fn ring_with_spur() -> TransitionMap {
        let mut b = TransitionMapBuilder::new(3, 4);
        b.set(Position::new(0, 0), RailCell::Curve.rotated(0)).unwrap();
        b.set(Position::new(0, 1), STRAIGHT_EW).unwrap();
        b.set(Position::new(0, 2), RailCell::Curve.rotated(1)).unwrap();
        b.set(Position::new(1, 2), RailCell::Switch.rotated(0)).unwrap();
        b.set(Position::new(1, 3), RailCell::DeadEnd.rotated(1)).unwrap();
        b.set(Position::new(2, 2), RailCell::Curve.rotated(2)).unwrap();
        b.set(Position::new(2, 1), STRAIGHT_EW).unwrap();
        b.set(Position::new(2, 0), RailCell::Curve.rotated(3)).unwrap();
        b.set(Position::new(1, 0), STRAIGHT_NS).unwrap();
        b.build()
    }
}

// ── Cell masks ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cells {
    use rg_core::Direction::{self, *};

    use crate::cells::*;
    use crate::RailCell;

    #[test]
    fn bit_layout() {
        assert_eq!(transition_bit(North, North), 1);
        assert_eq!(transition_bit(East, South), 1 << 6);
        assert_eq!(transition_bit(West, West), 1 << 15);
    }

    #[test]
    fn mask_from_pairs_matches_presets() {
        assert_eq!(mask_from_pairs(&[(North, North), (South, South)]), STRAIGHT_NS);
        assert_eq!(mask_from_pairs(&[(North, South)]), DEAD_END_SOUTH);
        assert_eq!(mask_from_pairs(&[]), EMPTY);
    }

    #[test]
    fn rotation_by_four_is_identity() {
        for cell in [RailCell::Straight, RailCell::DeadEnd, RailCell::Curve, RailCell::Switch] {
            assert_eq!(cell.rotated(4), cell.mask());
            assert_eq!(cell.rotated(1), rotate_mask(cell.rotated(-3), 0));
        }
    }

    #[test]
    fn straight_rotates_to_straight() {
        assert_eq!(rotate_mask(STRAIGHT_NS, 1), STRAIGHT_EW);
        assert_eq!(rotate_mask(CROSSING, 1), CROSSING);
    }

    #[test]
    fn curve_rotation_moves_open_sides_clockwise() {
        // south–east curve rotated once connects west and south.
        let mask = RailCell::Curve.rotated(1);
        assert_eq!(mask, transition_bit(East, South) | transition_bit(North, West));
    }

    #[test]
    fn exit_directions_in_encoding_order() {
        let dirs: Vec<Direction> = exit_directions(0b1010).collect();
        assert_eq!(dirs, vec![East, West]);
    }
}

// ── TransitionMap ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod transition_map {
    use rg_core::Direction::*;
    use rg_core::Position;

    use crate::cells::{STRAIGHT_EW, STRAIGHT_NS, SWITCH_NS_EAST, mask_from_pairs};
    use crate::{GridError, TransitionMap, TransitionMapBuilder};

    #[test]
    fn from_cells_checks_length() {
        assert!(TransitionMap::from_cells(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            TransitionMap::from_cells(2, 2, vec![0; 3]),
            Err(GridError::DimensionMismatch { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn builder_rejects_out_of_bounds() {
        let mut b = TransitionMapBuilder::new(2, 2);
        assert!(b.set(Position::new(2, 0), STRAIGHT_EW).is_err());
        assert!(b.set(Position::new(0, -1), STRAIGHT_EW).is_err());
    }

    #[test]
    fn col_run_lays_a_vertical_line() {
        let rail = super::helpers::column(3);
        assert_eq!(rail.rail_cell_count(), 3);
        for row in 0..3 {
            assert_eq!(rail.transitions(Position::new(row, 1)), STRAIGHT_NS);
            assert_eq!(rail.transitions(Position::new(row, 0)), 0);
        }

        // A run that leaves the grid stops at the first bad cell.
        let mut b = TransitionMapBuilder::new(3, 2);
        assert!(matches!(
            b.set_col_run(0, 1..4, STRAIGHT_NS),
            Err(GridError::OutOfBounds { .. })
        ));
        let rail = b.build();
        assert_eq!(rail.transitions(Position::new(2, 0)), STRAIGHT_NS);
    }

    #[test]
    fn out_of_bounds_queries_are_empty() {
        let rail = super::helpers::corridor(3);
        assert_eq!(rail.transitions(Position::new(-1, 0)), 0);
        assert_eq!(rail.transitions(Position::new(0, 3)), 0);
        assert_eq!(rail.transitions_for_entry(Position::new(5, 5), East), 0);
        assert!(!rail.is_transition_allowed(Position::new(0, 3), East, East));
        assert!(!rail.is_valid_cell(Position::new(0, 3)));
    }

    #[test]
    fn entry_masks() {
        let mut b = TransitionMapBuilder::new(1, 1);
        b.set(Position::new(0, 0), SWITCH_NS_EAST).unwrap();
        let rail = b.build();
        let p = Position::new(0, 0);
        assert_eq!(rail.transitions_for_entry(p, North), 0b0011); // N or E
        assert_eq!(rail.transitions_for_entry(p, East), 0);
        assert_eq!(rail.transitions_for_entry(p, South), 0b0100);
        assert_eq!(rail.transitions_for_entry(p, West), 0b0100);
        assert!(rail.is_transition_allowed(p, North, East));
        assert!(!rail.is_transition_allowed(p, North, West));
    }

    #[test]
    fn dead_end_detection_and_reversal() {
        let rail = super::helpers::dead_end_corridor();
        let end = Position::new(0, 0);
        assert!(rail.is_dead_end(end));
        assert!(!rail.is_dead_end(Position::new(0, 1)));
        // Arriving westbound: the encoded transition sends the agent back east.
        assert_eq!(rail.exits(end, West), 1 << East.index());
        // Any other heading leaves through the open side.
        assert_eq!(rail.exits(end, North), 1 << East.index());
        assert_eq!(rail.exits(end, East), 1 << East.index());
        // Outside dead ends there is no fallback.
        assert_eq!(rail.exits(Position::new(0, 1), North), 0);
    }

    #[test]
    fn buffer_stop_never_exits_through_its_closed_side() {
        let rail = super::helpers::buffer_stop_line();
        let stop = Position::new(0, 1);
        assert!(rail.is_dead_end(stop));
        for h in [North, East, South, West] {
            assert_eq!(rail.exits(stop, h), 1 << East.index(), "heading {h}");
        }
    }

    #[test]
    fn two_way_reversal_cell_is_not_a_dead_end() {
        // Both entries reverse: two bits set, so only the encoded exits apply.
        let mut b = TransitionMapBuilder::new(1, 1);
        b.set(Position::new(0, 0), mask_from_pairs(&[(East, West), (West, East)])).unwrap();
        let rail = b.build();
        let p = Position::new(0, 0);
        assert!(!rail.is_dead_end(p));
        assert_eq!(rail.exits(p, East), 1 << West.index());
        assert_eq!(rail.exits(p, West), 1 << East.index());
        assert_eq!(rail.exits(p, North), 0);
    }

    #[test]
    fn rotation_roundtrip() {
        let rail = super::helpers::ring_with_spur();
        let r1 = rail.rotated_cw();
        assert_eq!((r1.height, r1.width), (rail.width, rail.height));
        let r4 = r1.rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(r4, rail);
    }

    #[test]
    fn rotated_position_keeps_its_cell() {
        let rail = super::helpers::ring_with_spur();
        let rot = rail.rotated_cw();
        let p = Position::new(1, 3);
        let q = rail.rotate_position_cw(p);
        assert_eq!(q, Position::new(3, 1));
        assert!(rot.is_dead_end(q));
        // The spur's westbound exit becomes a northbound exit.
        assert!(rot.is_transition_allowed(q, South, North));
    }

    #[test]
    fn counts() {
        let rail = super::helpers::ring_with_spur();
        assert_eq!(rail.cell_count(), 12);
        assert_eq!(rail.rail_cell_count(), 9);
        assert_eq!(rail.position_of(7), Position::new(1, 3));
        assert_eq!(rail.cell_index(Position::new(1, 3)), Some(7));
    }
}

// ── DistanceMap ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod distance_map {
    use std::collections::VecDeque;

    use rg_core::Direction::{self, *};
    use rg_core::{AgentId, Position};

    use crate::{DistanceMap, StateBitset, TransitionMap};

    /// Forward BFS from a single state; the reference the backward search
    /// must agree with.
    fn brute_force(rail: &TransitionMap, from: Position, heading: Direction, target: Position) -> f32 {
        if from == target {
            return 0.0;
        }
        let mut seen = std::collections::HashSet::new();
        let mut queue = VecDeque::from([(from, heading, 0u32)]);
        seen.insert((from, heading));
        while let Some((pos, h, d)) = queue.pop_front() {
            for exit in crate::cells::exit_directions(rail.exits(pos, h)) {
                let next = pos.step(exit);
                if next == target {
                    return (d + 1) as f32;
                }
                if seen.insert((next, exit)) {
                    queue.push_back((next, exit, d + 1));
                }
            }
        }
        f32::INFINITY
    }

    #[test]
    fn corridor_distances() {
        let rail = super::helpers::corridor(3);
        let dm = DistanceMap::build(&rail, &[Position::new(0, 2)]);
        let a = AgentId(0);
        for h in Direction::ALL {
            assert_eq!(dm.get(a, Position::new(0, 2), h), 0.0);
        }
        assert_eq!(dm.get(a, Position::new(0, 1), East), 1.0);
        assert_eq!(dm.get(a, Position::new(0, 0), East), 2.0);
        // Westbound agents run off the western edge.
        assert_eq!(dm.get(a, Position::new(0, 1), West), f32::INFINITY);
        assert_eq!(dm.get(a, Position::new(0, 0), West), f32::INFINITY);
        assert_eq!(dm.max_distance(a), 2);
    }

    #[test]
    fn column_distances() {
        let rail = super::helpers::column(3);
        let dm = DistanceMap::build(&rail, &[Position::new(2, 1)]);
        let a = AgentId(0);
        assert_eq!(dm.get(a, Position::new(0, 1), South), 2.0);
        assert_eq!(dm.get(a, Position::new(1, 1), South), 1.0);
        assert_eq!(dm.get(a, Position::new(0, 1), North), f32::INFINITY);
        assert_eq!(dm.get(a, Position::new(1, 0), South), f32::INFINITY);
    }

    #[test]
    fn dead_end_is_reachable_by_reversal() {
        let rail = super::helpers::dead_end_corridor();
        let dm = DistanceMap::build(&rail, &[Position::new(0, 2)]);
        let a = AgentId(0);
        assert_eq!(dm.get(a, Position::new(0, 1), East), 1.0);
        assert_eq!(dm.get(a, Position::new(0, 0), West), 2.0);
        assert_eq!(dm.get(a, Position::new(0, 1), West), 3.0);
        // An agent already facing out of the dead end just drives on.
        assert_eq!(dm.get(a, Position::new(0, 0), East), 2.0);
        assert_eq!(dm.get(a, Position::new(0, 0), North), 2.0);
    }

    #[test]
    fn buffer_stop_blocks_the_cell_behind_it() {
        let rail = super::helpers::buffer_stop_line();
        let dm = DistanceMap::build(&rail, &[Position::new(0, 3), Position::new(0, 0)]);
        let (ahead, behind) = (AgentId(0), AgentId(1));
        // Spawned on the stop facing out: straight ahead to col 3.
        assert_eq!(dm.get(ahead, Position::new(0, 1), East), 2.0);
        assert_eq!(dm.get(ahead, Position::new(0, 1), West), 2.0);
        // Nothing crosses the closed side into col 0.
        for h in Direction::ALL {
            assert_eq!(dm.get(behind, Position::new(0, 1), h), f32::INFINITY);
            assert_eq!(dm.get(behind, Position::new(0, 2), h), f32::INFINITY);
        }
    }

    #[test]
    fn matches_exhaustive_traversal() {
        let rail = super::helpers::ring_with_spur();
        let rail_cells: Vec<Position> = (0..rail.cell_count())
            .map(|i| rail.position_of(i))
            .filter(|&p| rail.is_valid_cell(p))
            .collect();

        let dm = DistanceMap::build(&rail, &rail_cells);
        assert_eq!(dm.agent_count(), rail_cells.len());

        for (i, &target) in rail_cells.iter().enumerate() {
            for &from in &rail_cells {
                for h in Direction::ALL {
                    let expected = brute_force(&rail, from, h, target);
                    let got = dm.get(AgentId(i as u32), from, h);
                    assert_eq!(got, expected, "target {target}, state {from} {h}");
                }
            }
        }
    }

    #[test]
    fn spur_round_trip_counts_reversal() {
        let rail = super::helpers::ring_with_spur();
        // Target on the spur's dead end.  Northbound at the switch: one step east.
        let dm = DistanceMap::build(&rail, &[Position::new(1, 3)]);
        let a = AgentId(0);
        assert_eq!(dm.get(a, Position::new(1, 2), North), 1.0);
        // Southbound traffic circles the ring clockwise and always re-enters
        // the switch southbound, so it never reaches the spur.
        assert_eq!(dm.get(a, Position::new(1, 2), South), f32::INFINITY);
        // Westbound out of the spur joins the southbound flow.
        assert_eq!(dm.get(a, Position::new(1, 3), West), 0.0);
    }

    #[test]
    fn target_outside_grid_is_all_infinite() {
        let rail = super::helpers::corridor(3);
        let dm = DistanceMap::build(&rail, &[Position::new(4, 4)]);
        assert!(dm.layer(AgentId(0)).iter().all(|d| d.is_infinite()));
        assert_eq!(dm.max_distance(AgentId(0)), 0);
    }

    #[test]
    fn unknown_agent_and_cell_read_infinite() {
        let rail = super::helpers::corridor(3);
        let dm = DistanceMap::build(&rail, &[Position::new(0, 2)]);
        assert_eq!(dm.get(AgentId(3), Position::new(0, 0), East), f32::INFINITY);
        assert_eq!(dm.get(AgentId(0), Position::new(0, -1), East), f32::INFINITY);
        assert_eq!(DistanceMap::empty(1, 3).agent_count(), 0);
    }

    #[test]
    fn bitset_basics() {
        let mut bits = StateBitset::new(130);
        assert!(bits.is_empty());
        assert!(bits.insert(0));
        assert!(bits.insert(129));
        assert!(!bits.insert(129));
        assert!(bits.contains(129));
        assert!(!bits.contains(64));
        assert_eq!(bits.len(), 2);
    }
}

// ── OccupancyGrid ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use rg_core::Position;

    use crate::OccupancyGrid;

    #[test]
    fn add_remove_and_free() {
        let mut g = OccupancyGrid::new(2, 2);
        let p = Position::new(1, 1);
        assert!(g.is_free(p));
        g.add(p);
        g.add(p);
        assert_eq!(g.count(p), 2);
        g.remove(p);
        assert!(!g.is_free(p));
        g.remove(p);
        g.remove(p); // saturates at zero
        assert!(g.is_free(p));
    }

    #[test]
    fn out_of_bounds_is_never_free() {
        let g = OccupancyGrid::new(2, 2);
        assert!(!g.is_free(Position::new(-1, 0)));
        assert_eq!(g.count(Position::new(2, 2)), 0);
    }

    #[test]
    fn move_and_totals() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let mut g = OccupancyGrid::from_positions(1, 2, [a, Position::new(9, 9)]);
        assert_eq!(g.total(), 1);
        g.move_from_to(a, b);
        assert!(g.is_free(a));
        assert_eq!(g.count(b), 1);
        g.clear();
        assert_eq!(g.total(), 0);
    }

    #[test]
    fn others_exclude_self() {
        let a = Position::new(0, 0);
        let mut g = OccupancyGrid::from_positions(1, 2, [a]);
        assert!(!g.occupied_by_others(a, a));
        assert!(g.occupied_by_others(a, Position::new(0, 1)));
        g.add(a);
        assert!(g.occupied_by_others(a, a));
    }
}
