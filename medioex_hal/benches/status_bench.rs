//! IoCore benchmarks against the simulation driver.
//!
//! Measures lock + validate + driver + shadow for single-pin operations and
//! the full status sweep.

use criterion::{Criterion, criterion_group, criterion_main};
use medioex_common::hal::config::ServiceConfig;
use medioex_common::io::{ChannelClass, ScaleRange};
use medioex_hal::core::IoCore;
use medioex_hal::driver_registry::DriverRegistry;
use medioex_hal::drivers::register_all_drivers;
use medioex_hal::request::Command;
use std::hint::black_box;

fn simulated_core() -> IoCore {
    let mut registry = DriverRegistry::new();
    register_all_drivers(&mut registry);
    IoCore::from_config(&ServiceConfig::default(), &registry, "simulation").unwrap()
}

fn bench_binary_write(c: &mut Criterion) {
    let core = simulated_core();
    c.bench_function("core_relay_write", |b| {
        b.iter(|| {
            core.write_binary_output(ChannelClass::Relay, black_box(14), black_box(1))
                .unwrap()
        });
    });
}

fn bench_analog_write(c: &mut Criterion) {
    let core = simulated_core();
    let range = ScaleRange::new(0.0, 10.0);
    c.bench_function("core_analog_write", |b| {
        b.iter(|| core.write_analog_output(black_box(2), black_box(7.5), range).unwrap());
    });
}

fn bench_status(c: &mut Criterion) {
    let core = simulated_core();
    c.bench_function("core_status_snapshot", |b| {
        b.iter(|| black_box(core.status().unwrap()));
    });
}

fn bench_route(c: &mut Criterion) {
    let core = simulated_core();
    c.bench_function("route_parse_and_execute", |b| {
        b.iter(|| {
            let command = Command::parse(black_box("/api/ao/1/write?val=50&start=0&end=100")).unwrap();
            core.execute(&command).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_binary_write,
    bench_analog_write,
    bench_status,
    bench_route
);
criterion_main!(benches);
