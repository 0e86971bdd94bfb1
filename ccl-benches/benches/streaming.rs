//! Streaming labeler benchmarks.
//!
//! Seeds a session with most of a mask, then measures inserting the
//! remaining pixels incrementally against relabeling the grown mask from
//! scratch, and separately measures materialisation of a full session.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use ccl_benches::{
    error::BenchSetupError,
    mask::{SyntheticMaskConfig, shuffled_arrivals},
    params::StreamingBenchParams,
};
use ccl_core::{BinaryImage, Connectivity, StreamingLabeler, StreamingLabelerBuilder, label_two_pass};

/// Seed used for all synthetic masks in this benchmark.
const SEED: u64 = 7;

/// Square mask side lengths to benchmark.
const SIDES: &[usize] = &[64, 256];

/// Foreground density of the final mask, in percent.
const DENSITY_PERCENT: u32 = 30;

/// Divisor selecting the share of pixels that arrive after seeding.
const LATE_SHARE: usize = 100;

struct Scenario {
    seeded: StreamingLabeler,
    late: Vec<(usize, usize)>,
    grown: BinaryImage,
    params: StreamingBenchParams,
}

fn scenario(side: usize) -> Result<Scenario, BenchSetupError> {
    let grown = SyntheticMaskConfig {
        height: side,
        width: side,
        density_percent: DENSITY_PERCENT,
        seed: SEED,
    }
    .generate()?;
    let mut arrivals = shuffled_arrivals(&grown, SEED);
    let split = arrivals.len().saturating_sub(arrivals.len().div_ceil(LATE_SHARE));
    let late = arrivals.split_off(split);

    let mut seeded = StreamingLabelerBuilder::new()
        .with_connectivity(Connectivity::Eight)
        .build(side, side)?;
    seeded.add_pixels(arrivals)?;

    let params = StreamingBenchParams {
        side,
        arrivals: late.len(),
    };
    Ok(Scenario {
        seeded,
        late,
        grown,
        params,
    })
}

fn streaming_update_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("streaming_update");
    group.sample_size(20);

    for &side in SIDES {
        let Scenario {
            seeded,
            late,
            grown,
            params,
        } = scenario(side)?;

        group.bench_with_input(
            BenchmarkId::new("incremental", params),
            &(&seeded, &late),
            |b, &(seeded, late)| {
                b.iter_batched(
                    || seeded.clone(),
                    |mut labeler| {
                        let inserted = labeler.add_pixels(late.iter().copied());
                        (inserted, labeler.component_count())
                    },
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(BenchmarkId::new("recompute", params), &grown, |b, grown| {
            b.iter(|| label_two_pass(grown, Connectivity::Eight));
        });
    }

    group.finish();
    Ok(())
}

fn streaming_materialize_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("streaming_materialize");
    group.sample_size(20);

    for &side in SIDES {
        let Scenario { seeded, params, .. } = scenario(side)?;
        group.bench_with_input(BenchmarkId::from_parameter(params), &seeded, |b, seeded| {
            b.iter_batched(
                || seeded.clone(),
                |mut labeler| labeler.materialize_labels(),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
    Ok(())
}

fn streaming_update(c: &mut Criterion) {
    if let Err(err) = streaming_update_impl(c) {
        panic!("streaming_update benchmark setup failed: {err}");
    }
}

fn streaming_materialize(c: &mut Criterion) {
    if let Err(err) = streaming_materialize_impl(c) {
        panic!("streaming_materialize benchmark setup failed: {err}");
    }
}

criterion_group!(benches, streaming_update, streaming_materialize);
criterion_main!(benches);
