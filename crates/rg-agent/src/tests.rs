//! Unit tests for rg-agent.

#[cfg(test)]
mod helpers {
    use rg_core::{Direction, Position};

    use crate::{AgentStatic, AgentStore, AgentStoreBuilder};

    pub fn two_agents() -> AgentStore {
        AgentStoreBuilder::with_capacity(2)
            .agent(AgentStatic::new(Position::new(0, 0), Direction::East, Position::new(0, 2)))
            .agent(AgentStatic::new(Position::new(1, 1), Direction::West, Position::new(1, 1)).with_speed(0.25))
            .build()
    }
}

// ── AgentStatic ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn {
    use rg_core::{Direction, Position};

    use crate::AgentStatic;

    #[test]
    fn default_speed_is_one() {
        let s = AgentStatic::new(Position::new(0, 0), Direction::North, Position::new(3, 3));
        assert_eq!(s.speed, 1.0);
        assert!(s.has_valid_speed());
    }

    #[test]
    fn speed_bounds() {
        let s = AgentStatic::new(Position::new(0, 0), Direction::North, Position::new(3, 3));
        assert!(s.with_speed(0.5).has_valid_speed());
        assert!(!s.with_speed(0.0).has_valid_speed());
        assert!(!s.with_speed(1.5).has_valid_speed());
        assert!(!s.with_speed(f32::NAN).has_valid_speed());
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use rg_core::{AgentId, Direction, Position, RailAction};

    use super::helpers::two_agents;
    use crate::{AgentStatic, AgentStore, AgentStoreBuilder};

    #[test]
    fn build_places_agents_at_start() {
        let store = two_agents();
        assert_eq!(store.count, 2);
        assert_eq!(store.position, vec![Position::new(0, 0), Position::new(1, 1)]);
        assert_eq!(store.direction, vec![Direction::East, Direction::West]);
        assert!(store.moving.iter().all(|&m| !m));
        assert!(store.exit_action.iter().all(Option::is_none));
        assert_eq!(store.speed[1], 0.25);
    }

    #[test]
    fn every_array_has_count_elements() {
        let store = two_agents();
        let n = store.count;
        assert_eq!(store.start.len(), n);
        assert_eq!(store.start_direction.len(), n);
        assert_eq!(store.target.len(), n);
        assert_eq!(store.position_fraction.len(), n);
        assert_eq!(store.old_position.len(), n);
        assert_eq!(store.old_direction.len(), n);
    }

    #[test]
    fn agent_ids_ascending() {
        let ids: Vec<AgentId> = two_agents().agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn push_returns_next_handle() {
        let mut store = AgentStoreBuilder::new().build();
        assert!(store.is_empty());
        let id = store.push(AgentStatic::new(Position::new(2, 2), Direction::South, Position::new(0, 0)));
        assert_eq!(id, AgentId(0));
        assert_eq!(store.count, 1);
        assert_eq!(store.position[0], Position::new(2, 2));
    }

    #[test]
    fn target_queries() {
        let store = two_agents();
        assert!(!store.is_at_target(AgentId(0)));
        assert!(store.is_at_target(AgentId(1)));
        assert!(!store.all_at_target());
        assert!(AgentStore::default().all_at_target());
    }

    #[test]
    fn restart_clears_dynamic_state() {
        let mut store = two_agents();
        store.position[0] = Position::new(0, 1);
        store.direction[0] = Direction::South;
        store.moving[0] = true;
        store.position_fraction[0] = 0.5;
        store.exit_action[0] = Some(RailAction::MoveLeft);

        assert!(!store.is_at_boundary(AgentId(0)));
        store.restart();

        assert_eq!(store.position[0], Position::new(0, 0));
        assert_eq!(store.direction[0], Direction::East);
        assert!(!store.moving[0]);
        assert!(store.is_at_boundary(AgentId(0)));
        assert_eq!(store.exit_action[0], None);
    }

    #[test]
    fn remember_previous_snapshots_state() {
        let mut store = two_agents();
        store.position[0] = Position::new(0, 1);
        store.remember_previous(AgentId(0));
        store.position[0] = Position::new(0, 2);
        assert_eq!(store.old_position[0], Position::new(0, 1));
        assert_eq!(store.old_position[1], Position::new(1, 1));
    }

    #[test]
    fn statics_round_trip() {
        let store = two_agents();
        let rebuilt = AgentStoreBuilder::new().agents(store.statics()).build();
        assert_eq!(rebuilt.statics(), store.statics());
        assert_eq!(store.static_of(AgentId(1)).speed, 0.25);
    }
}
