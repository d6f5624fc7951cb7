//! Runs against a real nuXmv. Skipped when there is none on PATH.

use sk_domain::*;
use sk_formal::*;
use sk_model::*;
use std::sync::Arc;

fn installed() -> Option<NuXmv> {
    let settings = EngineSettings::default();
    match settings.resolve() {
        Ok(_) => Some(NuXmv::new(settings)),
        Err(e) => {
            eprintln!("skipping: {e}");
            None
        }
    }
}

async fn check(nuxmv: &NuXmv, rows: &[&str], strategy: Strategy, bound: u32) -> Verdict {
    let dir = tempfile::tempdir().unwrap();
    let board = Board::new(rows).unwrap();
    let model = compile_board(&board, WinTarget::AllBoxes).unwrap();
    let task = VerificationTask::new("sokoban_1", Arc::new(model), strategy, bound);
    nuxmv.run_task(&task, dir.path()).await.unwrap().verdict
}

#[tokio::test]
async fn one_push_is_solvable() {
    let Some(nuxmv) = installed() else { return };
    for strategy in [Strategy::Sat, Strategy::Bdd] {
        for bound in [1, 5] {
            let v = check(&nuxmv, &["#####", "#@$.#", "#####"], strategy, bound).await;
            assert_eq!(v, Verdict::SolvableWithinBound);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let board = Board::new(&["#####", "#@$.#", "#####"]).unwrap();
    let report = run_iterative(&nuxmv, 1, &board, Strategy::Sat, 5, dir.path())
        .await
        .unwrap();
    assert!(report.all_boxes_individually_reachable());
}

#[tokio::test]
async fn box_against_a_wall_is_not_found() {
    let Some(nuxmv) = installed() else { return };
    for bound in [0, 3, 6] {
        let v = check(&nuxmv, &["#####", "#@.$#", "#####"], Strategy::Sat, bound).await;
        assert_eq!(v, Verdict::NotFoundWithinBound);
    }
}
