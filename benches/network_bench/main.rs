use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use neuron_performance::{
    graph::Topology,
    network::NetworkModel,
    neuron::{Model, ModelKind, Regime},
};


fn mean_field(kind: ModelKind, size: usize, parallel: bool) -> NetworkModel {
    let mut network = NetworkModel::with_rng(
        kind, Regime::Bursting, 1000, Topology::MeanField, size, 0.05, &mut StdRng::seed_from_u64(0),
    ).expect("Could not build network");
    network.parallel = parallel;

    network
}

fn bench_reg_vs_par(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean_field_izhikevich");

    for size in [5, 25, 100] {
        let mut regular = mean_field(ModelKind::Izhikevich, size, false);
        group.bench_with_input(BenchmarkId::new("reg", size), &size, |b, _| {
            b.iter(|| {
                regular.time_step();
                black_box(regular.get_potential())
            })
        });

        let mut parallel = mean_field(ModelKind::Izhikevich, size, true);
        group.bench_with_input(BenchmarkId::new("par", size), &size, |b, _| {
            b.iter(|| {
                parallel.time_step();
                black_box(parallel.get_potential())
            })
        });
    }

    group.finish();
}

fn bench_linear_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_chain");

    for kind in [ModelKind::KtzTanh, ModelKind::Rulkov, ModelKind::HodgkinHuxley] {
        let mut network = NetworkModel::with_rng(
            kind, Regime::Excitable, 1000, Topology::Linear, 10, 0.05, &mut StdRng::seed_from_u64(0),
        ).expect("Could not build network");

        group.bench_function(kind.label(), |b| {
            b.iter(|| {
                network.time_step();
                black_box(network.get_potential())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reg_vs_par, bench_linear_chains);
criterion_main!(benches);
