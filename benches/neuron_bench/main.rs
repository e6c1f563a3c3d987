use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use neuron_performance::neuron::{Model, ModelKind, NeuronModel, Regime};


fn bench_neurons(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_step");
    let mut rng = StdRng::seed_from_u64(0);

    for kind in ModelKind::ALL {
        let mut neuron = NeuronModel::with_rng(kind, Regime::Bursting, 1000, &mut rng);

        group.bench_function(kind.label(), |b| {
            b.iter(|| {
                neuron.time_step();
                black_box(neuron.get_potential())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_neurons);
criterion_main!(benches);
