use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cabwatch::cabs::{derive_records, roster};
use cabwatch::geo::DEFAULT_CENTER;

fn bench_derive_records(c: &mut Criterion) {
    let roster = roster::load_roster();
    c.bench_function("derive_roster", |b| {
        let mut rng = StdRng::seed_from_u64(99999);
        b.iter(|| derive_records(&roster, DEFAULT_CENTER, &mut rng));
    });
    c.bench_function("derive_mock_fallback", |b| {
        let mut rng = StdRng::seed_from_u64(99999);
        b.iter(|| derive_records(&[], DEFAULT_CENTER, &mut rng));
    });
}

criterion_group!(benches, bench_derive_records);
criterion_main!(benches);
