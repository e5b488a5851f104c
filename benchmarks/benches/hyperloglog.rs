extern crate hllsketch;

extern crate rand;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

use hllsketch::{HyperLogLog, Sketch};

fn generate_strings(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();

    let mut workload: Vec<String> = (0..count)
        .map(|_| format!("- {} - {} -", rng.gen::<u64>(), rng.gen::<u64>()))
        .collect();

    workload.shuffle(&mut rng);

    workload
}

fn bench_insert(c: &mut Criterion) {
    let workload = generate_strings(2000);

    macro_rules! bench_impls {
        ($testname:expr, $precision:expr) => {
            c.bench_function($testname, |b| {
                b.iter(|| {
                    let mut hll = Sketch::new($precision).unwrap();

                    for val in &workload {
                        hll.insert(val);
                    }
                })
            });
        };
    }

    bench_impls!["sketch_insert_p4", 4];
    bench_impls!["sketch_insert_p8", 8];
    bench_impls!["sketch_insert_p14", 14];
    bench_impls!["sketch_insert_p16", 16];
}

fn bench_count(c: &mut Criterion) {
    macro_rules! bench_impls {
        ($testname:expr, $precision:expr, $count:expr) => {
            let workload = generate_strings($count);

            let mut hll = Sketch::new($precision).unwrap();

            for val in &workload {
                hll.insert(val);
            }

            c.bench_function($testname, |b| {
                b.iter(|| {
                    let val = hll.count();
                    black_box(val);
                })
            });
        };
    }

    bench_impls!["sketch_count_p8_linear", 8, 200];
    bench_impls!["sketch_count_p8_raw", 8, 20_000];
    bench_impls!["sketch_count_p14_linear", 14, 10_000];
    bench_impls!["sketch_count_p14_raw", 14, 100_000];
    bench_impls!["sketch_count_p16", 16, 1_000_000];
}

criterion_group!(benches, bench_insert, bench_count);

criterion_main!(benches);
