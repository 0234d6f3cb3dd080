//! Performance measurement for quadrat counting and permutation replicates

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use pointcorr::analysis::{QuadratAnalysis, QuadratConfig};
use pointcorr::spatial::{CategoricalLabel, Domain, LabelAttachment, PointSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn synthetic_domain() -> Option<Domain> {
    let mut rng = StdRng::seed_from_u64(12345);
    let mut coordinates = Vec::with_capacity(2000);
    let mut types = Vec::with_capacity(2000);
    for _ in 0..2000 {
        coordinates.push([rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)]);
        let name = match rng.random_range(0..3) {
            0 => "Tumour",
            1 => "Stroma",
            _ => "Immune",
        };
        types.push(name.to_string());
    }

    let points = PointSet::new(coordinates).ok()?;
    let mut domain = Domain::new("bench", points, None).ok()?;
    let label = LabelAttachment::Categorical(CategoricalLabel::from_values(&types));
    domain.attach_label("Cell type", label).ok()?;
    Some(domain)
}

/// Measures one permutation replicate: shuffle, recount, correlate
fn bench_replicate(c: &mut Criterion) {
    let Some(domain) = synthetic_domain() else {
        return;
    };
    let config = QuadratConfig {
        side: 100.0,
        min_observations: 5,
        permutations: 1000,
        seed: 42,
    };
    let Ok(mut analysis) = QuadratAnalysis::new(&domain, "Cell type", &config) else {
        return;
    };

    c.bench_function("quadrat_replicate", |b| {
        b.iter(|| black_box(analysis.run_replicate()));
    });
}

criterion_group!(benches, bench_replicate);
criterion_main!(benches);
