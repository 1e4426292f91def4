use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pagegrid_foundation::{
    IntRect, Orientation, PagerGridConfig, PagerGridHost, PagerGridLayoutManager, ViewHandle,
    Viewport,
};

const ITEM_COUNT: usize = 10_000;
const GRID_SAMPLES: &[(usize, usize)] = &[(1, 5), (4, 4), (8, 6)];
const VIEWPORT: Viewport = Viewport::new(1080, 1920);

/// Host that hands out handles and does nothing else.
struct NullHost {
    next_handle: u64,
}

impl PagerGridHost for NullHost {
    fn item_count(&self) -> usize {
        ITEM_COUNT
    }

    fn viewport(&self) -> Viewport {
        VIEWPORT
    }

    fn materialize_view(&mut self, _index: usize) -> ViewHandle {
        self.next_handle += 1;
        ViewHandle(self.next_handle)
    }

    fn layout_view(&mut self, handle: ViewHandle, frame: IntRect) {
        black_box((handle, frame));
    }

    fn release_view(&mut self, handle: ViewHandle) {
        black_box(handle);
    }

    fn schedule_animation_frame(&mut self) {}

    fn cancel_animation_frame(&mut self) {}
}

fn setup(rows: usize, columns: usize) -> (PagerGridLayoutManager, NullHost) {
    let config = PagerGridConfig::grid(rows, columns, Orientation::Horizontal);
    let mut manager = match PagerGridLayoutManager::new(config) {
        Ok(manager) => manager,
        Err(err) => panic!("bench config rejected: {err}"),
    };
    let mut host = NullHost { next_handle: 0 };
    manager.attach();
    manager.layout(&mut host);
    (manager, host)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &(rows, columns) in GRID_SAMPLES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{columns}")),
            &(rows, columns),
            |b, &(rows, columns)| {
                let (mut manager, mut host) = setup(rows, columns);
                b.iter(|| manager.layout(black_box(&mut host)));
            },
        );
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_across_pages");
    for &(rows, columns) in GRID_SAMPLES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{columns}")),
            &(rows, columns),
            |b, &(rows, columns)| {
                let (mut manager, mut host) = setup(rows, columns);
                manager.begin_drag(&mut host);
                let mut direction = 1;
                b.iter(|| {
                    // Bounce back and forth over the first few pages.
                    if manager.offset() >= 5 * 1080 {
                        direction = -1;
                    } else if manager.offset() == 0 {
                        direction = 1;
                    }
                    black_box(manager.drag_by(&mut host, direction * 24))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_drag);
criterion_main!(benches);
