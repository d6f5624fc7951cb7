use criterion::{criterion_group, criterion_main, Criterion};
use rand::seq::SliceRandom;
use rand::thread_rng;
use sk_domain::*;
use sk_model::*;

/// A walled `size` x `size` room with `boxes` boxes and as many goals
/// scattered over the floor.
fn random_board(size: usize, boxes: usize) -> Board {
    let inner = size * size;
    let mut cells = vec![' '; inner];
    for c in cells.iter_mut().take(boxes) {
        *c = '$';
    }
    for c in cells.iter_mut().skip(boxes).take(boxes) {
        *c = '.';
    }
    cells[2 * boxes] = '@';
    cells.shuffle(&mut thread_rng());

    let mut rows = vec!["#".repeat(size + 2)];
    for r in 0..size {
        let line: String = cells[r * size..(r + 1) * size].iter().collect();
        rows.push(format!("#{line}#"));
    }
    rows.push("#".repeat(size + 2));
    Board::new(&rows).unwrap_or_else(|e| panic!("bad bench board: {e}"))
}

fn bench_compile(boards: &[Board]) {
    for b in boards {
        let m = compile_board(b, WinTarget::AllBoxes).unwrap();
        criterion::black_box(to_smv(&m));
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let small: Vec<Board> = (0..20).map(|_| random_board(6, 3)).collect();
    let large: Vec<Board> = (0..5).map(|_| random_board(14, 12)).collect();
    c.bench_function("compile_small", |b| b.iter(|| bench_compile(&small)));
    c.bench_function("compile_large", |b| b.iter(|| bench_compile(&large)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
