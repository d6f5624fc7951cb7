//! Board entities to transition system.
//!
//! The agent moves one cell per step in the direction chosen by the free
//! `move` variable. A step either walks into an empty cell or pushes the one
//! box next to the agent into the cell beyond it.

use crate::naming;
use crate::*;
use sk_domain::*;
use tracing::{debug, warn};

/// Parse and compile in one go.
pub fn compile_board(board: &Board, target: WinTarget) -> SKResult<CompiledModel> {
    let entities = parse_board(board)?;
    compile(board, &entities, target)
}

/// Builds the model for `entities` on a board of `board`'s size. The result
/// is validated before it is returned.
pub fn compile(
    board: &Board,
    entities: &ParsedEntities,
    target: WinTarget,
) -> SKResult<CompiledModel> {
    let c = ModelCompiler::new(board.rows(), board.cols(), entities)?;
    let model = c.compile(target)?;
    model.validate()?;
    debug!(
        rows = model.rows,
        cols = model.cols,
        boxes = model.boxes.len(),
        goals = model.goals.len(),
        win_target = %target,
        "compiled model"
    );
    Ok(model)
}

struct ModelCompiler<'a> {
    rows: usize,
    cols: usize,
    entities: &'a ParsedEntities,
}

fn and(mut xs: Vec<Predicate>) -> Predicate {
    if xs.len() == 1 {
        xs.remove(0)
    } else {
        Predicate::AND(xs)
    }
}

fn or(mut xs: Vec<Predicate>) -> Predicate {
    if xs.len() == 1 {
        xs.remove(0)
    } else {
        Predicate::OR(xs)
    }
}

fn int(i: i64) -> PredicateValue {
    PredicateValue::value(SKValue::Int(i))
}

fn selected(d: Direction) -> Predicate {
    p!([naming::move_var()] == [SKValue::symbol(d.symbol())])
}

impl<'a> ModelCompiler<'a> {
    fn new(rows: usize, cols: usize, entities: &'a ParsedEntities) -> SKResult<Self> {
        let on_board = |p: Position| p.col >= 1 && p.col <= cols && p.row >= 1 && p.row <= rows;
        let positions = std::iter::once(entities.agent)
            .chain(entities.boxes.iter().map(|b| b.position))
            .chain(entities.goals.iter().map(|g| g.position))
            .chain(entities.walls.iter().copied());
        for p in positions {
            if !on_board(p) {
                return Err(SKError::invariant(format!(
                    "entity at {p} lies outside the {cols}x{rows} board"
                )));
            }
        }
        for (k, b) in entities.boxes.iter().enumerate() {
            if b.id != BoxId(k + 1) {
                return Err(SKError::invariant(format!("box {} is out of order", b.id)));
            }
        }
        for (k, g) in entities.goals.iter().enumerate() {
            if g.id != GoalId(k + 1) {
                return Err(SKError::invariant(format!("goal {} is out of order", g.id)));
            }
        }
        Ok(ModelCompiler {
            rows,
            cols,
            entities,
        })
    }

    fn dim(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Col => self.cols as i64,
            Axis::Row => self.rows as i64,
        }
    }

    fn compile(&self, target: WinTarget) -> SKResult<CompiledModel> {
        let boxes: Vec<BoxId> = self.entities.box_ids().collect();
        let goals: Vec<GoalId> = self.entities.goals.iter().map(|g| g.id).collect();

        let mut state_predicates = vec![];
        for d in Direction::ALL {
            state_predicates.push(NamedPredicate::new(naming::walk(d), self.walk(d)));
        }
        for b in &boxes {
            for d in Direction::ALL {
                state_predicates.push(NamedPredicate::new(
                    naming::adjacent(*b, d),
                    self.box_at_distance(*b, d, 1),
                ));
                state_predicates.push(NamedPredicate::new(
                    naming::beyond(*b, d),
                    self.box_at_distance(*b, d, 2),
                ));
            }
        }
        for d in Direction::ALL {
            state_predicates.push(NamedPredicate::new(naming::push(d), self.push(d)));
        }
        state_predicates.push(NamedPredicate::new(naming::win(), self.win(target)?));

        Ok(CompiledModel {
            name: "main".into(),
            rows: self.rows,
            cols: self.cols,
            target,
            boxes,
            goals,
            vars: self.vars(),
            init: self.init(),
            constants: self.constants(),
            tables: vec![(naming::walls(), self.wall_table())],
            transitions: self.transitions(),
            state_predicates,
            property: TemporalProperty::NeverEventually(naming::win()),
        })
    }

    fn vars(&self) -> Vec<Variable> {
        let cols = self.cols as i64;
        let rows = self.rows as i64;
        let symbols: Vec<&str> = Direction::ALL.iter().map(|d| d.symbol()).collect();
        let mut vars = vec![
            Variable::new_enum(naming::MOVE, &symbols),
            Variable::new_range(naming::AGENT_COL, 1, cols),
            Variable::new_range(naming::AGENT_ROW, 1, rows),
        ];
        for b in &self.entities.boxes {
            vars.push(Variable::new_range(naming::box_coord(b.id, Axis::Col).as_str(), 1, cols));
            vars.push(Variable::new_range(naming::box_coord(b.id, Axis::Row).as_str(), 1, rows));
        }
        for g in &self.entities.goals {
            vars.push(Variable::new_range(naming::goal_coord(g.id, Axis::Col).as_str(), 1, cols));
            vars.push(Variable::new_range(naming::goal_coord(g.id, Axis::Row).as_str(), 1, rows));
        }
        vars.push(Variable::new_table(naming::WALLS, self.rows, self.cols, 0, 1));
        vars
    }

    fn init(&self) -> Vec<Action> {
        let a = self.entities.agent;
        let mut init = vec![
            Action::assign(naming::agent(Axis::Col), int(a.col as i64)),
            Action::assign(naming::agent(Axis::Row), int(a.row as i64)),
        ];
        for b in &self.entities.boxes {
            init.push(Action::assign(
                naming::box_coord(b.id, Axis::Col),
                int(b.position.col as i64),
            ));
            init.push(Action::assign(
                naming::box_coord(b.id, Axis::Row),
                int(b.position.row as i64),
            ));
        }
        init
    }

    fn constants(&self) -> Vec<Action> {
        let mut constants = vec![];
        for g in &self.entities.goals {
            constants.push(Action::assign(
                naming::goal_coord(g.id, Axis::Col),
                int(g.position.col as i64),
            ));
            constants.push(Action::assign(
                naming::goal_coord(g.id, Axis::Row),
                int(g.position.row as i64),
            ));
        }
        constants
    }

    fn wall_table(&self) -> Table {
        let cells = (1..=self.rows)
            .map(|row| {
                (1..=self.cols)
                    .map(|col| self.entities.is_wall(Position::new(col, row)) as i64)
                    .collect()
            })
            .collect();
        Table::new(cells)
    }

    /// The agent coordinate `k` cells away in direction `d`, on `axis`.
    fn agent_ahead(&self, axis: Axis, d: Direction, k: i64) -> PredicateValue {
        let step = if d.axis() == axis { d.step() * k } else { 0 };
        PredicateValue::offset(naming::agent(axis), step)
    }

    /// The cell `k` cells away from the agent in direction `d` is on the board.
    fn in_bounds(&self, d: Direction, k: i64) -> Predicate {
        let coord = naming::agent(d.axis());
        if d.step() < 0 {
            p!([coord] > [k])
        } else {
            p!([coord] < [self.dim(d.axis()) - k + 1])
        }
    }

    /// The cell `k` cells away from the agent in direction `d` is no wall.
    fn clear(&self, d: Direction, k: i64) -> Predicate {
        let cell = PredicateValue::cell(
            naming::walls(),
            self.agent_ahead(Axis::Row, d, k),
            self.agent_ahead(Axis::Col, d, k),
        );
        p!([cell] == [0])
    }

    fn box_at_distance(&self, b: BoxId, d: Direction, k: i64) -> Predicate {
        p!([[self.agent_ahead(Axis::Col, d, k)] == [naming::box_coord(b, Axis::Col)]]
            && [[self.agent_ahead(Axis::Row, d, k)] == [naming::box_coord(b, Axis::Row)]])
    }

    fn walk(&self, d: Direction) -> Predicate {
        let mut xs = vec![selected(d), self.in_bounds(d, 1), self.clear(d, 1)];
        for b in self.entities.box_ids() {
            xs.push(p!(!naming::adjacent(b, d)));
        }
        and(xs)
    }

    /// Exactly one box is next to the agent and nothing is where it lands.
    fn push(&self, d: Direction) -> Predicate {
        let ids: Vec<BoxId> = self.entities.box_ids().collect();
        let candidates = ids
            .iter()
            .map(|i| {
                let mut xs = vec![Predicate::DEF(naming::adjacent(*i, d))];
                for j in ids.iter().filter(|j| *j != i) {
                    xs.push(p!(!naming::beyond(*j, d)));
                }
                and(xs)
            })
            .collect();
        and(vec![
            selected(d),
            self.in_bounds(d, 2),
            self.clear(d, 2),
            or(candidates),
        ])
    }

    fn on_some_goal(&self, b: BoxId) -> Predicate {
        or(self
            .entities
            .goals
            .iter()
            .map(|g| {
                p!([[naming::box_coord(b, Axis::Col)] == [naming::goal_coord(g.id, Axis::Col)]]
                    && [[naming::box_coord(b, Axis::Row)] == [naming::goal_coord(g.id, Axis::Row)]])
            })
            .collect())
    }

    fn win(&self, target: WinTarget) -> SKResult<Predicate> {
        let boxes = self.entities.boxes.len();
        let goals = self.entities.goals.len();
        match target {
            WinTarget::SingleBox(id) => {
                if !self.entities.has_box(id) {
                    return Err(SKError::invariant(format!(
                        "box {id} is not on the board ({boxes} boxes)"
                    )));
                }
                Ok(self.on_some_goal(id))
            }
            WinTarget::AllBoxes if boxes == 0 => Ok(Predicate::FALSE),
            WinTarget::AllBoxes if boxes > goals => {
                warn!(boxes, goals, "more boxes than goals, the board can not be won");
                Ok(Predicate::FALSE)
            }
            WinTarget::AllBoxes => Ok(and(self
                .entities
                .box_ids()
                .map(|b| self.on_some_goal(b))
                .collect())),
        }
    }

    /// Agent coordinates move when a walk or push in that direction is
    /// allowed. Box coordinates move when the push is allowed and that box
    /// is the one next to the agent.
    fn transitions(&self) -> Vec<Action> {
        let mut ts = vec![];
        for axis in [Axis::Col, Axis::Row] {
            let coord = naming::agent(axis);
            let mut cases = vec![];
            for d in Direction::ALL.iter().filter(|d| d.axis() == axis) {
                let guard = p!([selected(*d)]
                    && [[naming::walk(*d)] || [naming::push(*d)]]
                    && [self.in_bounds(*d, 1)]);
                cases.push((guard, PredicateValue::offset(coord.clone(), d.step())));
            }
            cases.push((Predicate::TRUE, PredicateValue::path(coord.clone())));
            ts.push(Action::new(coord, Compute::Function(cases)));
        }

        for b in self.entities.box_ids() {
            for axis in [Axis::Col, Axis::Row] {
                let coord = naming::box_coord(b, axis);
                let mut cases = vec![];
                for d in Direction::ALL.iter().filter(|d| d.axis() == axis) {
                    let room = if d.step() < 0 {
                        p!([coord.clone()] > [1])
                    } else {
                        p!([coord.clone()] < [self.dim(axis)])
                    };
                    let guard = p!([naming::push(*d)] && [naming::adjacent(b, *d)] && [room]);
                    cases.push((guard, PredicateValue::offset(coord.clone(), d.step())));
                }
                cases.push((Predicate::TRUE, PredicateValue::path(coord.clone())));
                ts.push(Action::new(coord, Compute::Function(cases)));
            }
        }
        ts
    }
}

#[cfg(test)]
mod test_compiler {
    use super::*;

    fn one_push() -> Board {
        Board::new(&["#####", "#@$.#", "#####"]).unwrap()
    }

    #[test]
    fn guards_in_engine_syntax() {
        let m = compile_board(&one_push(), WinTarget::AllBoxes).unwrap();
        let def = |n: &str| m.state_predicate(&n.into()).unwrap().predicate.to_string();
        assert_eq!(
            def("mv_r"),
            "(move = r) & (man_c < 5) & (walls[man_r][man_c + 1] = 0) & !box_1_on_r"
        );
        assert_eq!(
            def("push_l"),
            "(move = l) & (man_c > 2) & (walls[man_r][man_c - 2] = 0) & box_1_on_l"
        );
        assert_eq!(def("box_1_on_t"), "(man_c = box_1_c) & (man_r - 1 = box_1_r)");
        assert_eq!(def("box_1_on_rp1"), "(man_c + 2 = box_1_c) & (man_r = box_1_r)");
        assert_eq!(def("win"), "(box_1_c = goal_1_c) & (box_1_r = goal_1_r)");
    }

    #[test]
    fn pushes_exclude_the_other_boxes() {
        let b = Board::new(&["#@$$.#"]).unwrap();
        let m = compile_board(&b, WinTarget::SingleBox(BoxId(2))).unwrap();
        let push_r = &m.state_predicate(&"push_r".into()).unwrap().predicate;
        assert_eq!(
            push_r.to_string(),
            "(move = r) & (man_c < 5) & (walls[man_r][man_c + 2] = 0) & \
             ((box_1_on_r & !box_2_on_rp1) | (box_2_on_r & !box_1_on_rp1))"
        );
    }

    #[test]
    fn rejects_missing_target_box() {
        let r = compile_board(&one_push(), WinTarget::SingleBox(BoxId(2)));
        assert!(matches!(r, Err(SKError::Invariant(_))));
    }

    #[test]
    fn rejects_entities_from_a_larger_board() {
        let big = Board::new(&["#######", "#   @ #", "#######"]).unwrap();
        let e = parse_board(&big).unwrap();
        assert!(compile(&one_push(), &e, WinTarget::AllBoxes).is_err());
    }

    #[test]
    fn more_boxes_than_goals_never_wins() {
        let b = Board::new(&["#@$$.#"]).unwrap();
        let m = compile_board(&b, WinTarget::AllBoxes).unwrap();
        assert_eq!(m.win().unwrap().predicate, Predicate::FALSE);
    }
}
