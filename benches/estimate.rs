//! This bench measures a full estimate, including the projection and
//! lifetime summaries, for a batch of varied inputs.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rainharvest::{Estimator, RoofType, UseType, UserInput, WaterSource};

fn inputs() -> Vec<UserInput> {
    let mut inputs = Vec::new();
    for (offset, roof) in (0u32..).zip(RoofType::ALL) {
        for use_type in UseType::ALL {
            for source in WaterSource::ALL {
                for step in 0..25 {
                    let scale = f64::from(step) + f64::from(offset);
                    inputs.push(
                        UserInput::new(
                            40.0 * scale,
                            *roof,
                            1000.0 * scale,
                            *use_type,
                            *source,
                            500.0 + 100.0 * scale,
                            300.0 + 50.0 * scale,
                        )
                        .unwrap(),
                    );
                }
            }
        }
    }
    inputs
}

fn estimate_batch(c: &mut Criterion) {
    let estimator = Estimator::default();
    let inputs = inputs();

    c.bench_function("estimate batch", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(estimator.estimate(black_box(input)));
            }
        });
    });
}

criterion_group!(benches, estimate_batch);
criterion_main!(benches);
