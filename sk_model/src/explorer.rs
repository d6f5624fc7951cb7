//! Exhaustive breadth-first exploration of a compiled model. Only practical
//! for tiny boards, where it serves as an engine-free oracle.

use crate::naming;
use crate::*;
use rustc_hash::{FxHashMap, FxHashSet};
use sk_domain::*;

pub struct Explorer<'a> {
    model: &'a CompiledModel,
    tables: FxHashMap<SKPath, Table>,
    defines: FxHashMap<SKPath, Predicate>,
    constants: SKState,
    mutable: Vec<SKPath>,
    moves: Vec<SKValue>,
}

/// Everything reachable within some number of steps.
#[derive(Debug, Clone, Default)]
pub struct Exploration {
    /// Reachable states in breadth-first order, the initial state first.
    pub states: Vec<SKState>,
    /// The fewest steps after which the win predicate holds.
    pub first_win: Option<usize>,
    /// The number of steps explored.
    pub depth: usize,
}

impl Exploration {
    pub fn is_winnable(&self) -> bool {
        self.first_win.is_some()
    }
}

impl<'a> Explorer<'a> {
    pub fn new(model: &'a CompiledModel) -> SKResult<Explorer<'a>> {
        model.validate()?;
        let mut constants = SKState::new();
        for a in &model.constants {
            constants.add_variable(a.var.clone(), a.next(&SKState::new())?);
        }
        let moves = model
            .move_var()
            .map(|v| v.values())
            .ok_or_else(|| SKError::invariant("the model has no move variable"))?;

        Ok(Explorer {
            model,
            tables: model.tables.iter().cloned().collect(),
            defines: model
                .state_predicates
                .iter()
                .map(|p| (p.path.clone(), p.predicate.clone()))
                .collect(),
            constants,
            mutable: model.mutable_vars(),
            moves,
        })
    }

    fn frame<'b>(&'b self, state: &'b SKState) -> Frame<'b> {
        Frame {
            state,
            tables: &self.tables,
            defines: &self.defines,
        }
    }

    fn with(&self, values: impl IntoIterator<Item = (SKPath, SKValue)>) -> SKResult<SKState> {
        let mut s = self.constants.clone();
        for (p, v) in values {
            let in_domain = self.model.var(&p).map(|var| var.contains(&v)).unwrap_or(false);
            if !in_domain {
                return Err(SKError::invariant(format!("{p} = {v} is outside its domain")));
            }
            s.add_variable(p, v);
        }
        Ok(s)
    }

    pub fn initial_state(&self) -> SKResult<SKState> {
        let empty = SKState::new();
        let mut values = vec![];
        for p in &self.mutable {
            let a = self
                .model
                .init
                .iter()
                .find(|a| &a.var == p)
                .ok_or_else(|| SKError::invariant(format!("{p} has no initial value")))?;
            values.push((p.clone(), a.next(&empty)?));
        }
        self.with(values)
    }

    /// One successor per move symbol, in the order the symbols are declared.
    /// Moves that are not allowed leave the state unchanged.
    pub fn successors(&self, state: &SKState) -> SKResult<Vec<SKState>> {
        let mut result = vec![];
        for m in &self.moves {
            let mut current = state.clone();
            current.add_variable(naming::move_var(), m.clone());
            let frame = self.frame(&current);
            let mut values = vec![];
            for a in &self.model.transitions {
                values.push((a.var.clone(), a.next(&frame)?));
            }
            result.push(self.with(values)?);
        }
        Ok(result)
    }

    pub fn is_win(&self, state: &SKState) -> SKResult<bool> {
        let win = self
            .model
            .win()
            .ok_or_else(|| SKError::invariant("the model has no win predicate"))?;
        win.predicate.eval(&self.frame(state))
    }

    /// Breadth first up to `depth` steps.
    pub fn explore(&self, depth: usize) -> SKResult<Exploration> {
        let init = self.initial_state()?;
        let mut seen: FxHashSet<Vec<SKValue>> = FxHashSet::default();
        seen.insert(init.projection(&self.mutable));
        let mut first_win = if self.is_win(&init)? { Some(0) } else { None };
        let mut states = vec![init.clone()];
        let mut layer = vec![init];

        for step in 1..=depth {
            let mut next_layer = vec![];
            for s in &layer {
                for n in self.successors(s)? {
                    if seen.insert(n.projection(&self.mutable)) {
                        if first_win.is_none() && self.is_win(&n)? {
                            first_win = Some(step);
                        }
                        states.push(n.clone());
                        next_layer.push(n);
                    }
                }
            }
            if next_layer.is_empty() {
                break;
            }
            layer = next_layer;
        }

        Ok(Exploration {
            states,
            first_win,
            depth,
        })
    }

    /// The cell of `b` in `state`.
    pub fn box_position(&self, state: &SKState, b: BoxId) -> Option<Position> {
        let col = state.int_from_path(&naming::box_coord(b, Axis::Col))?;
        let row = state.int_from_path(&naming::box_coord(b, Axis::Row))?;
        Some(Position::new(col as usize, row as usize))
    }

    pub fn agent_position(&self, state: &SKState) -> Option<Position> {
        let col = state.int_from_path(&naming::agent(Axis::Col))?;
        let row = state.int_from_path(&naming::agent(Axis::Row))?;
        Some(Position::new(col as usize, row as usize))
    }
}

#[cfg(test)]
mod test_explorer {
    use super::*;

    #[test]
    fn a_push_moves_agent_and_box() {
        let b = Board::new(&["#####", "#@$.#", "#####"]).unwrap();
        let m = compile_board(&b, WinTarget::AllBoxes).unwrap();
        let e = Explorer::new(&m).unwrap();
        let init = e.initial_state().unwrap();
        let next = e.successors(&init).unwrap();
        // l, u, r, d
        assert_eq!(next.len(), 4);
        assert_eq!(next[0], init);
        assert_eq!(next[1], init);
        assert_eq!(e.agent_position(&next[2]), Some(Position::new(3, 2)));
        assert_eq!(e.box_position(&next[2], BoxId(1)), Some(Position::new(4, 2)));
        assert!(e.is_win(&next[2]).unwrap());
        assert_eq!(next[3], init);
    }

    #[test]
    fn walking_does_not_move_boxes() {
        let b = Board::new(&["#######", "# @ $.#", "#######"]).unwrap();
        let m = compile_board(&b, WinTarget::AllBoxes).unwrap();
        let e = Explorer::new(&m).unwrap();
        let init = e.initial_state().unwrap();
        let left = &e.successors(&init).unwrap()[0];
        assert_eq!(e.agent_position(left), Some(Position::new(2, 2)));
        assert_eq!(e.box_position(left, BoxId(1)), Some(Position::new(5, 2)));

        let x = e.explore(2).unwrap();
        assert_eq!(x.first_win, Some(2));
    }
}
