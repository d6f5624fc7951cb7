use proptest::prelude::*;
use sk_domain::*;

/// Interior cells of a walled board, exactly one of which is the agent.
fn board_strategy() -> impl Strategy<Value = Vec<String>> {
    (1usize..5, 1usize..6)
        .prop_flat_map(|(rows, cols)| {
            let cells = proptest::collection::vec(
                prop::sample::select(vec![' ', ' ', '#', '$', '.', '*']),
                rows * cols,
            );
            (Just(rows), Just(cols), cells, 0..rows * cols)
        })
        .prop_map(|(rows, cols, mut cells, agent)| {
            cells[agent] = if cells[agent] == '.' { '+' } else { '@' };
            let mut lines = vec!["#".repeat(cols + 2)];
            for r in 0..rows {
                let inner: String = cells[r * cols..(r + 1) * cols].iter().collect();
                lines.push(format!("#{inner}#"));
            }
            lines.push("#".repeat(cols + 2));
            lines
        })
}

proptest! {
    #[test]
    fn entity_counts_match_the_notation(lines in board_strategy()) {
        let board = Board::new(&lines).unwrap();
        let e = parse_board(&board).unwrap();
        let count = |f: fn(char) -> bool| lines.iter().flat_map(|l| l.chars()).filter(|c| f(*c)).count();

        prop_assert_eq!(e.boxes.len(), count(is_box));
        prop_assert_eq!(e.goals.len(), count(is_goal));
        prop_assert_eq!(e.walls.len(), count(is_wall));
        prop_assert_eq!(board.cell(e.agent).map(is_agent), Some(true));

        // ids are 1..=n in row-major order
        for (i, b) in e.boxes.iter().enumerate() {
            prop_assert_eq!(b.id, BoxId(i + 1));
            prop_assert!(board.cell(b.position).map(is_box).unwrap_or(false));
        }
        for w in e.boxes.windows(2) {
            let key = |p: Position| (p.row, p.col);
            prop_assert!(key(w[0].position) < key(w[1].position));
        }
    }

    #[test]
    fn parsing_is_deterministic(lines in board_strategy()) {
        let board = Board::new(&lines).unwrap();
        prop_assert_eq!(parse_board(&board).unwrap(), parse_board(&board).unwrap());
    }
}

#[test]
fn level_from_text_with_ragged_rows() {
    let rows = ["#######", "#@ $ .#", "####"];
    assert!(Board::new(&rows).is_err());
    let board = Board::padded(&rows).unwrap();
    let e = parse_board(&board).unwrap();
    assert_eq!(board.cols(), 7);
    assert_eq!(e.boxes.len(), 1);
    assert_eq!(e.goals[0].position, Position::new(6, 2));
}
