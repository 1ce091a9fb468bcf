use criterion::*;
use polyfix::flags::{DedupMode, Deduplicator};
use polyfix::*;

fn points(c: &mut Criterion) {
    c.bench_function("make points 10k", |b| {
        b.iter(|| make_points(10_000, 0.1, [0.0, 0.0]).scaled().count())
    });
    c.bench_function("circle area 10k", |b| {
        let p = CircleParams::new("circ").record(10_000).unwrap();
        b.iter(|| p.area())
    });
}

fn writing(c: &mut Criterion) {
    c.bench_function("write polygon 10k", |b| {
        let mut buf = Vec::with_capacity(1 << 20);
        b.iter(|| {
            buf.clear();
            write_polygon(&mut buf, "circ", make_points(10_000, 0.0, [0.0, 0.0])).unwrap();
            buf.len()
        })
    });
    c.bench_function("rotation fixture 10k", |b| {
        let plan = plan::rotation(10_000);
        b.iter(|| plan.build(0).unwrap().to_text().unwrap().len())
    });
}

fn flags(c: &mut Criterion) {
    let line = (0..200)
        .map(|i| format!("-DDEF_{}", i))
        .collect::<Vec<_>>()
        .join(" ");
    let line = format!("CXX_DEFINES = {}\n", line);

    c.bench_function("dedup first", |b| {
        let d = Deduplicator::new(DedupMode::First);
        b.iter(|| d.dedup_line(&line).len())
    });
    c.bench_function("dedup all", |b| {
        let d = Deduplicator::new(DedupMode::All);
        b.iter(|| d.dedup_line(&line).len())
    });
}

criterion_group!(benches, points, writing, flags);
criterion_main!(benches);
