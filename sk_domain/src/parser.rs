//! Turns a board into the entities the compiler works with.
//!
//! Cell notation: `@`/`+` agent (on floor / on goal), `$`/`*` box (on floor /
//! on goal), `.` goal, `#` wall. Everything else is floor. A cell can feed
//! several entity sets, a `*` is both a box and a goal.

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Box identity, 1-based, fixed at parse time in row-major first-seen order.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(pub usize);

/// Goal identity, 1-based, fixed at parse time in row-major first-seen order.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoalId(pub usize);

impl fmt::Display for BoxId {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{}", self.0)
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Entity<I> {
    pub id: I,
    pub position: Position,
}

pub type BoxEntity = Entity<BoxId>;
pub type GoalEntity = Entity<GoalId>;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ParsedEntities {
    pub agent: Position,
    pub boxes: Vec<BoxEntity>,
    pub goals: Vec<GoalEntity>,
    pub walls: BTreeSet<Position>,
}

impl ParsedEntities {
    pub fn box_ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes.iter().map(|b| b.id)
    }

    pub fn has_box(&self, id: BoxId) -> bool {
        self.boxes.iter().any(|b| b.id == id)
    }

    pub fn is_wall(&self, p: Position) -> bool {
        self.walls.contains(&p)
    }
}

pub fn is_agent(cell: char) -> bool {
    cell == '@' || cell == '+'
}

pub fn is_box(cell: char) -> bool {
    cell == '$' || cell == '*'
}

pub fn is_goal(cell: char) -> bool {
    cell == '.' || cell == '*' || cell == '+'
}

pub fn is_wall(cell: char) -> bool {
    cell == '#'
}

/// One pass over all cells. A board without an agent, or with more than
/// one, is rejected here so no model is ever built for it.
pub fn parse_board(board: &Board) -> SKResult<ParsedEntities> {
    let mut agent: Option<Position> = None;
    let mut boxes = vec![];
    let mut goals = vec![];
    let mut walls = BTreeSet::new();

    for (p, cell) in board.iter() {
        if is_agent(cell) {
            if let Some(first) = agent {
                return Err(SKError::MultipleAgents(first, p));
            }
            agent = Some(p);
        }
        if is_box(cell) {
            boxes.push(Entity {
                id: BoxId(boxes.len() + 1),
                position: p,
            });
        }
        if is_goal(cell) {
            goals.push(Entity {
                id: GoalId(goals.len() + 1),
                position: p,
            });
        }
        if is_wall(cell) {
            walls.insert(p);
        }
    }

    let agent = agent.ok_or(SKError::NoAgent)?;
    Ok(ParsedEntities {
        agent,
        boxes,
        goals,
        walls,
    })
}

#[cfg(test)]
mod test_parser {
    use super::*;

    #[test]
    fn single_push_board() {
        let b = Board::new(&["#####", "#@$.#", "#####"]).unwrap();
        let e = parse_board(&b).unwrap();
        assert_eq!(e.agent, Position::new(2, 2));
        assert_eq!(
            e.boxes,
            vec![Entity {
                id: BoxId(1),
                position: Position::new(3, 2)
            }]
        );
        assert_eq!(
            e.goals,
            vec![Entity {
                id: GoalId(1),
                position: Position::new(4, 2)
            }]
        );
        assert_eq!(e.walls.len(), 12);
        assert!(e.is_wall(Position::new(1, 1)));
        assert!(!e.is_wall(Position::new(2, 2)));
    }

    #[test]
    fn cells_feed_several_sets() {
        let b = Board::new(&["#####", "#+*$#", "#####"]).unwrap();
        let e = parse_board(&b).unwrap();
        assert_eq!(e.agent, Position::new(2, 2));
        let boxes: Vec<_> = e.boxes.iter().map(|b| (b.id, b.position)).collect();
        assert_eq!(
            boxes,
            vec![
                (BoxId(1), Position::new(3, 2)),
                (BoxId(2), Position::new(4, 2))
            ]
        );
        let goals: Vec<_> = e.goals.iter().map(|g| (g.id, g.position)).collect();
        assert_eq!(
            goals,
            vec![
                (GoalId(1), Position::new(2, 2)),
                (GoalId(2), Position::new(3, 2))
            ]
        );
    }

    #[test]
    fn boxes_are_numbered_row_major() {
        let b = Board::new(&["#####", "# $ #", "#$@$#", "#####"]).unwrap();
        let e = parse_board(&b).unwrap();
        let positions: Vec<_> = e.boxes.iter().map(|b| b.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(3, 2),
                Position::new(2, 3),
                Position::new(4, 3)
            ]
        );
        assert_eq!(e.box_ids().collect::<Vec<_>>(), vec![BoxId(1), BoxId(2), BoxId(3)]);
    }

    #[test]
    fn agent_is_required_and_unique() {
        let b = Board::new(&["#####", "# $.#", "#####"]).unwrap();
        assert!(matches!(parse_board(&b), Err(SKError::NoAgent)));

        let b = Board::new(&["#####", "#@$+#", "#####"]).unwrap();
        match parse_board(&b) {
            Err(SKError::MultipleAgents(a, b)) => {
                assert_eq!(a, Position::new(2, 2));
                assert_eq!(b, Position::new(4, 2));
            }
            other => panic!("expected MultipleAgents, got {other:?}"),
        }
    }
}
