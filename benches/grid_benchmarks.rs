use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessella::grid::{Grid, Position, Topology};

/// A size x size grid striped into `bands` horizontal bands, so flood fill
/// has long corridors to walk.
fn banded_grid(size: usize, bands: usize) -> Grid {
    let tokens: Vec<Vec<String>> = (0..size)
        .map(|r| (0..size).map(|_| (r % bands).to_string()).collect())
        .collect();
    Grid::from_tokens(&tokens).unwrap()
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for size in [16, 64, 128] {
        let grid = banded_grid(size, 4);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| {
                let region = grid.region_of(black_box(Position::new(0, 0))).unwrap();
                black_box(region.len())
            })
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let grid = banded_grid(64, 4);
    c.bench_function("neighbors_all_64", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for pos in grid.positions() {
                total += grid.neighbors(black_box(pos), Topology::All).len();
            }
            black_box(total)
        })
    });
}

fn bench_bijection(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_bijective");
    for size in [16, 64, 128] {
        let a = banded_grid(size, 8);
        // Shift every label by one band: a pure relabeling of the partition.
        let tokens: Vec<Vec<String>> = (0..size)
            .map(|r| (0..size).map(|_| ((r + 1) % 8).to_string()).collect())
            .collect();
        let b_grid = Grid::from_tokens(&tokens).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(a, b_grid),
            |bench, (a, b_grid)| bench.iter(|| black_box(a.is_bijective(b_grid))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_flood_fill, bench_neighbors, bench_bijection);
criterion_main!(benches);
