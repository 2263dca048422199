use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::SamplingMode;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 120;
const LARGE_RUNTIME_MEASURE_MS: u64 = 360;
const RNG_SEED: u64 = 0x5EED_2026;

/// Inputs at or below this size use the small preset.
pub const SMALL_INPUT_LIMIT: usize = 8_192;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Auto);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Flat);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

pub fn apply_runtime_for_size<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size <= SMALL_INPUT_LIMIT {
        apply_small_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Per-input seed derived from the shared base seed.
pub fn seed_for(kind: u64, size: usize) -> u64 {
    RNG_SEED ^ ((size as u64) << 7) ^ kind
}

/// `len` push/pop operations: `Some(priority)` pushes, `None` pops. Roughly
/// two pushes per pop so the queue keeps growing.
pub fn heap_workload<R: Rng + ?Sized>(rng: &mut R, len: usize, max: u64) -> Vec<Option<u64>> {
    (0..len)
        .map(|_| {
            if rng.random_bool(2.0 / 3.0) {
                Some(rng.random_range(0..=max))
            } else {
                None
            }
        })
        .collect()
}
