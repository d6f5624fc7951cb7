//! Names of the model's variables and derived predicates. The verification
//! layer reads results back in terms of these names, so they are fixed.

use sk_domain::*;

pub const MOVE: &str = "move";
pub const AGENT_COL: &str = "man_c";
pub const AGENT_ROW: &str = "man_r";
pub const WALLS: &str = "walls";
pub const WIN: &str = "win";

fn axis_suffix(axis: Axis) -> &'static str {
    match axis {
        Axis::Col => "c",
        Axis::Row => "r",
    }
}

pub fn agent(axis: Axis) -> SKPath {
    match axis {
        Axis::Col => SKPath::from(AGENT_COL),
        Axis::Row => SKPath::from(AGENT_ROW),
    }
}

pub fn box_coord(id: BoxId, axis: Axis) -> SKPath {
    SKPath::from(format!("box_{}_{}", id, axis_suffix(axis)))
}

pub fn goal_coord(id: GoalId, axis: Axis) -> SKPath {
    SKPath::from(format!("goal_{}_{}", id, axis_suffix(axis)))
}

/// Box `id` is right next to the agent in direction `d`.
pub fn adjacent(id: BoxId, d: Direction) -> SKPath {
    SKPath::from(format!("box_{}_on_{}", id, d.side()))
}

/// Box `id` is two cells from the agent in direction `d`.
pub fn beyond(id: BoxId, d: Direction) -> SKPath {
    SKPath::from(format!("box_{}_on_{}p1", id, d.side()))
}

pub fn walk(d: Direction) -> SKPath {
    SKPath::from(format!("mv_{}", d.symbol()))
}

pub fn push(d: Direction) -> SKPath {
    SKPath::from(format!("push_{}", d.symbol()))
}

pub fn walls() -> SKPath {
    SKPath::from(WALLS)
}

pub fn win() -> SKPath {
    SKPath::from(WIN)
}

pub fn move_var() -> SKPath {
    SKPath::from(MOVE)
}

#[cfg(test)]
mod test_naming {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(box_coord(BoxId(2), Axis::Row).as_str(), "box_2_r");
        assert_eq!(goal_coord(GoalId(1), Axis::Col).as_str(), "goal_1_c");
        assert_eq!(adjacent(BoxId(1), Direction::Up).as_str(), "box_1_on_t");
        assert_eq!(beyond(BoxId(3), Direction::Down).as_str(), "box_3_on_bp1");
        assert_eq!(walk(Direction::Left).as_str(), "mv_l");
        assert_eq!(push(Direction::Right).as_str(), "push_r");
    }
}
