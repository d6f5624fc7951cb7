use sk_domain::*;
use sk_model::*;

fn board(rows: &[&str]) -> Board {
    Board::new(rows).unwrap()
}

const ONE_ROW: &str = "\
MODULE main
VAR
    move : {l, u, r, d};
    man_c : 1..3;
    man_r : 1..1;
    box_1_c : 1..3;
    box_1_r : 1..1;
    goal_1_c : 1..3;
    goal_1_r : 1..1;
    walls : array 1..1 of array 1..3 of 0..1;
ASSIGN
    init(man_c) := 1;
    init(man_r) := 1;
    init(box_1_c) := 2;
    init(box_1_r) := 1;
    goal_1_c := 3;
    goal_1_r := 1;
    walls[1][1] := 0;
    walls[1][2] := 0;
    walls[1][3] := 0;
    next(man_c) :=
        case
            (move = l) & (mv_l | push_l) & (man_c > 1) : man_c - 1;
            (move = r) & (mv_r | push_r) & (man_c < 3) : man_c + 1;
            TRUE : man_c;
        esac;
    next(man_r) :=
        case
            (move = u) & (mv_u | push_u) & (man_r > 1) : man_r - 1;
            (move = d) & (mv_d | push_d) & (man_r < 1) : man_r + 1;
            TRUE : man_r;
        esac;
    next(box_1_c) :=
        case
            push_l & box_1_on_l & (box_1_c > 1) : box_1_c - 1;
            push_r & box_1_on_r & (box_1_c < 3) : box_1_c + 1;
            TRUE : box_1_c;
        esac;
    next(box_1_r) :=
        case
            push_u & box_1_on_t & (box_1_r > 1) : box_1_r - 1;
            push_d & box_1_on_b & (box_1_r < 1) : box_1_r + 1;
            TRUE : box_1_r;
        esac;
DEFINE
    mv_l := (move = l) & (man_c > 1) & (walls[man_r][man_c - 1] = 0) & !box_1_on_l;
    mv_u := (move = u) & (man_r > 1) & (walls[man_r - 1][man_c] = 0) & !box_1_on_t;
    mv_r := (move = r) & (man_c < 3) & (walls[man_r][man_c + 1] = 0) & !box_1_on_r;
    mv_d := (move = d) & (man_r < 1) & (walls[man_r + 1][man_c] = 0) & !box_1_on_b;
    box_1_on_l := (man_c - 1 = box_1_c) & (man_r = box_1_r);
    box_1_on_lp1 := (man_c - 2 = box_1_c) & (man_r = box_1_r);
    box_1_on_t := (man_c = box_1_c) & (man_r - 1 = box_1_r);
    box_1_on_tp1 := (man_c = box_1_c) & (man_r - 2 = box_1_r);
    box_1_on_r := (man_c + 1 = box_1_c) & (man_r = box_1_r);
    box_1_on_rp1 := (man_c + 2 = box_1_c) & (man_r = box_1_r);
    box_1_on_b := (man_c = box_1_c) & (man_r + 1 = box_1_r);
    box_1_on_bp1 := (man_c = box_1_c) & (man_r + 2 = box_1_r);
    push_l := (move = l) & (man_c > 2) & (walls[man_r][man_c - 2] = 0) & box_1_on_l;
    push_u := (move = u) & (man_r > 2) & (walls[man_r - 2][man_c] = 0) & box_1_on_t;
    push_r := (move = r) & (man_c < 2) & (walls[man_r][man_c + 2] = 0) & box_1_on_r;
    push_d := (move = d) & (man_r < 0) & (walls[man_r + 2][man_c] = 0) & box_1_on_b;
    win := (box_1_c = goal_1_c) & (box_1_r = goal_1_r);
LTLSPEC !(F win);
";

#[test]
fn serializes_the_whole_module() {
    let m = compile_board(&board(&["@$."]), WinTarget::AllBoxes).unwrap();
    assert_eq!(to_smv(&m), ONE_ROW);
}

#[test]
fn one_coordinate_pair_per_box_and_goal() {
    let b = board(&[
        "#######",
        "#.@ $ #",
        "#$ *  #",
        "#.   .#",
        "#######",
    ]);
    let e = parse_board(&b).unwrap();
    let m = compile(&b, &e, WinTarget::AllBoxes).unwrap();

    let count = |prefix: &str, suffix: &str| {
        m.vars
            .iter()
            .filter(|v| v.path.as_str().starts_with(prefix) && v.path.as_str().ends_with(suffix))
            .count()
    };
    assert_eq!(count("box_", "_c"), e.boxes.len());
    assert_eq!(count("box_", "_r"), e.boxes.len());
    assert_eq!(count("goal_", "_c"), e.goals.len());
    assert_eq!(count("goal_", "_r"), e.goals.len());
    assert_eq!(m.boxes.len(), 3);
    assert_eq!(m.goals.len(), 4);
    // the agent and every box change, goals never do
    assert_eq!(m.transitions.len(), 2 + 2 * e.boxes.len());
    assert_eq!(m.constants.len(), 2 * e.goals.len());
}

#[test]
fn compiling_twice_gives_the_same_model() {
    let b = board(&["#######", "#.@ $ #", "#$ *  #", "#.   .#", "#######"]);
    let e = parse_board(&b).unwrap();
    let first = compile(&b, &e, WinTarget::AllBoxes).unwrap();
    let second = compile(&b, &e, WinTarget::AllBoxes).unwrap();
    assert_eq!(first, second);
    assert_eq!(to_smv(&first), to_smv(&second));
}

#[test]
fn no_boxes_means_no_win() {
    let m = compile_board(&board(&["#####", "#@ .#", "#####"]), WinTarget::AllBoxes).unwrap();
    assert!(m.boxes.is_empty());
    assert_eq!(m.win().unwrap().predicate, Predicate::FALSE);
    assert!(to_smv(&m).contains("    win := FALSE;\n"));
    let x = Explorer::new(&m).unwrap().explore(4).unwrap();
    assert!(!x.is_winnable());
}

#[test]
fn a_box_without_goals_never_wins_alone() {
    let b = board(&["#####", "#@$ #", "#####"]);
    let m = compile_board(&b, WinTarget::SingleBox(BoxId(1))).unwrap();
    assert_eq!(m.win().unwrap().predicate, Predicate::OR(vec![]));
    assert!(to_smv(&m).contains("    win := FALSE;\n"));
}

#[test]
fn single_box_target_only_mentions_that_box() {
    let b = board(&["#######", "#@$ $.#", "#  .  #", "#######"]);
    let m = compile_board(&b, WinTarget::SingleBox(BoxId(2))).unwrap();
    let support = m.win().unwrap().predicate.support();
    assert!(support.contains(&SKPath::from("box_2_c")));
    assert!(!support.contains(&SKPath::from("box_1_c")));
    // the other box still moves and still blocks
    assert!(m.var(&SKPath::from("box_1_c")).is_some());
    assert!(m.transitions.iter().any(|a| a.var.as_str() == "box_1_r"));
}

#[test]
fn input_errors_come_before_compilation() {
    let r = compile_board(&board(&["#####", "# $.#", "#####"]), WinTarget::AllBoxes);
    assert!(matches!(r, Err(SKError::NoAgent)));
    let r = compile_board(&board(&["@ @"]), WinTarget::AllBoxes);
    assert!(matches!(r, Err(SKError::MultipleAgents(..))));
}

#[test]
fn write_smv_creates_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("sokoban_1.smv");
    let m = compile_board(&board(&["@$."]), WinTarget::AllBoxes).unwrap();
    write_smv(&m, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), ONE_ROW);
}
