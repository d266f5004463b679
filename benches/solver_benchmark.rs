use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ksv_econ::core::country::Country;
use ksv_econ::core::ksv::{KsvEconomy, KsvParams};
use ksv_econ::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
use ksv_econ::equilibrium::world_rate::WorldRateSolver;
use ksv_econ::simulation::productivity::ProductivityDraw;
use ksv_econ::simulation::world::{simulate, SimulationOptions};

fn comparison_economy() -> MoralHazardEconomy {
    MoralHazardEconomy::new(MoralHazardParams {
        gamma: 0.4,
        alpha: 0.55,
        z: 10.0,
        p: 0.25,
    })
    .expect("valid calibration")
}

fn bench_world_rate(c: &mut Criterion) {
    let economy = comparison_economy();
    let solver = WorldRateSolver::default();

    c.bench_function("world_rate_moral_hazard", |b| {
        b.iter(|| solver.solve(black_box(&economy), 0.1, black_box(&economy), 0.9))
    });

    let x = KsvEconomy::new(KsvParams::default()).expect("valid calibration");
    let y = KsvEconomy::new(KsvParams {
        z: 3.0,
        ..Default::default()
    })
    .expect("valid calibration");

    c.bench_function("world_rate_ksv_asymmetric", |b| {
        b.iter(|| solver.solve(black_box(&x), 0.3, black_box(&y), 0.6))
    });
}

fn bench_simulate_100_periods(c: &mut Criterion) {
    let economy = comparison_economy();
    let options = SimulationOptions::default();

    c.bench_function("simulate_100_periods", |b| {
        b.iter(|| {
            let mut x = Country::new("X", economy.clone(), 0.1).expect("valid wage");
            let mut y = Country::new("Y", economy.clone(), 0.9).expect("valid wage");
            simulate(black_box(100), &mut x, &mut y, None, None, &options)
        })
    });
}

fn bench_simulate_stochastic(c: &mut Criterion) {
    let economy = MoralHazardEconomy::new(MoralHazardParams::default()).expect("valid calibration");
    let options = SimulationOptions {
        productivity: Some(ProductivityDraw::default()),
        seed: Some(17),
        ..Default::default()
    };

    c.bench_function("simulate_100_periods_stochastic", |b| {
        b.iter(|| {
            let mut x = Country::new("X", economy.clone(), 0.3).expect("valid wage");
            let mut y = Country::new("Y", economy.clone(), 0.6).expect("valid wage");
            simulate(black_box(100), &mut x, &mut y, None, None, &options)
        })
    });
}

criterion_group!(
    benches,
    bench_world_rate,
    bench_simulate_100_periods,
    bench_simulate_stochastic
);
criterion_main!(benches);
