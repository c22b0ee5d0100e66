use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mapcolor::assign::{assign, unassign};
use mapcolor::board::{Color, CountryId, CountryRegistry, MapState};
use mapcolor::protocol::svg::extract_regions;
use mapcolor::render::{sync, FillTable};

const PROVINCES: usize = 3000;

/// Builds a synthetic map document with `n` region paths.
fn synthetic_map(n: usize) -> String {
    let mut doc = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\"><g class=\"state\">");
    for i in 0..n {
        doc.push_str(&format!("<path id=\"P_{:04}\" d=\"M{} 0 L{} 10 Z\"/>", i, i, i + 1));
    }
    doc.push_str("</g></svg>");
    doc
}

fn populated_state() -> (MapState, Vec<String>) {
    let mut state = MapState::new(CountryRegistry::standard());
    let ids: Vec<String> = (0..PROVINCES).map(|i| format!("P_{:04}", i)).collect();
    for id in &ids {
        state.provinces.insert(id);
    }
    (state, ids)
}

fn bench_extract_regions(c: &mut Criterion) {
    let doc = synthetic_map(PROVINCES);
    c.bench_function("extract_3000_regions", |b| {
        b.iter(|| extract_regions(black_box(&doc), Some("state")))
    });
}

fn bench_assign_cycle(c: &mut Criterion) {
    let (mut state, ids) = populated_state();
    c.bench_function("assign_transfer_unassign", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let id = &ids[i % ids.len()];
            let _ = assign(&mut state, black_box(id), CountryId(1));
            let _ = assign(&mut state, black_box(id), CountryId(2));
            let _ = unassign(&mut state, black_box(id));
            i += 1;
        })
    });
}

fn bench_render_sync(c: &mut Criterion) {
    let (mut state, ids) = populated_state();
    for (i, id) in ids.iter().enumerate() {
        if i % 4 != 0 {
            let _ = assign(&mut state, id, CountryId((i % 3) as u32 + 1));
        }
    }
    let neutral = Color::neutral();
    c.bench_function("render_sync_3000", |b| {
        let mut table = FillTable::new();
        b.iter(|| sync(black_box(&state), &neutral, &mut table))
    });
}

criterion_group!(
    benches,
    bench_extract_regions,
    bench_assign_cycle,
    bench_render_sync
);
criterion_main!(benches);
