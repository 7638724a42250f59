use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pyxis_dggs::*;

/// Places every cell at the same point, so a circle through it touches everything.
struct Everywhere(GeoPoint);

impl CoordConverter for Everywhere {
  fn native_to_pyxis(&self, _point: &GeoPoint, _resolution: u8) -> Result<Index, DggsError> {
    Err(DggsError::InvalidIndex)
  }

  fn pyxis_to_native(&self, _index: &Index) -> GeoPoint {
    self.0
  }
}

fn bench_circle_traversal(c: &mut Criterion) {
  let radius_m = 10f64.to_radians() * constants::EARTH_RADIUS_M;
  let root: Index = "B-0".parse().unwrap();
  let mut group = c.benchmark_group("circle_traversal");
  for res in [4u8, 6, 8] {
    let test = CircleIntersectionTest::new(
      Everywhere(GeoPoint::new(0.0, 10.0)),
      TestConfig::new(res, res).unwrap(),
      GeoPoint::new(0.0, 0.0),
      radius_m,
    );
    group.bench_with_input(BenchmarkId::from_parameter(res), &res, |b, &r| {
      b.iter(|| Traverser::new(&test).traverse(Some(black_box(&root)), r));
    });
  }
  group.finish();
}

fn bench_tile_set(c: &mut Criterion) {
  let cells: Vec<Index> = DescendantIterator::new(&"C-0".parse().unwrap(), 7).step_by(3).collect();
  let mut set = TileSet::new();
  for cell in &cells {
    set.insert(cell, true).unwrap();
  }
  let bytes = set.to_bytes();

  let mut group = c.benchmark_group("tile_set");
  group.bench_function("insert", |b| {
    b.iter(|| {
      let mut fresh = TileSet::new();
      for cell in &cells {
        fresh.insert(black_box(cell), true).unwrap();
      }
      fresh
    });
  });
  group.bench_function("serialize", |b| b.iter(|| black_box(&set).to_bytes()));
  group.bench_function("deserialize", |b| b.iter(|| TileSet::from_bytes(black_box(&bytes))));
  group.bench_function("intersects", |b| {
    b.iter(|| cells.iter().filter(|cell| set.intersects(black_box(cell))).count());
  });
  group.finish();
}

criterion_group!(benches, bench_circle_traversal, bench_tile_set);
criterion_main!(benches);
