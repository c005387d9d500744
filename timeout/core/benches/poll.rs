use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tick_timeout_core::{TickConfig, TickCounter, TimeService};

static COUNTER: TickCounter = TickCounter::starting_at(u32::MAX - 1_000);

fn poll_benchmark(c: &mut Criterion) {
    let config = TickConfig::new(10_000, 10_000_000).expect("valid tick config");
    let time = TimeService::new(&config, &COUNTER);
    let seed = time.mark();

    c.bench_function("now_us", |b| b.iter(|| black_box(time.now_us())));

    c.bench_function("on_tick", |b| b.iter(|| COUNTER.on_tick()));

    c.bench_function("elapsed_us", |b| {
        b.iter(|| black_box(time.elapsed_us(black_box(1_000), black_box(seed))))
    });

    c.bench_function("timeout_is_expired", |b| {
        let timeout = time.timeout_ms(1_000);
        b.iter(|| black_box(timeout.is_expired(&time)))
    });
}

criterion_group!(benches, poll_benchmark);
criterion_main!(benches);
