use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sysmon::format::table_text;
use sysmon::ranking::{SortKey, rank};
use sysmon::system::delta::{SamplingState, derive};
use sysmon::system::process::ProcessSample;
use sysmon::system::snapshot::SystemSample;

fn make_samples(n: usize, step: u64) -> Vec<ProcessSample> {
    (0..n)
        .map(|i| ProcessSample {
            pid: i as u32 + 1,
            owner: format!("u{}", i % 8),
            command: format!("proc_{i}"),
            cpu_ticks: (i as u64 % 97) * step,
            resident_pages: ((n - i) as u64 + 1) * 16,
            virtual_size_bytes: ((n - i) as u64 + 1) * 1_048_576,
        })
        .collect()
}

fn system(ticks: u64) -> SystemSample {
    SystemSample {
        total_cpu_ticks: ticks,
        total_memory_bytes: 16 * 1024 * 1024 * 1024,
        page_size_bytes: 4096,
        cpu_count: 8,
    }
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_500_1000_2000");
    for n in [500usize, 1000, 2000] {
        let first = make_samples(n, 1);
        let second = make_samples(n, 3);
        let (_, primed) = derive(SamplingState::default(), &system(100_000), &first);

        group.bench_with_input(BenchmarkId::from_parameter(n), &second, |b, second| {
            b.iter(|| {
                let (rows, next) = derive(primed.clone(), &system(108_000), black_box(second));
                black_box((rows, next));
            });
        });
    }
    group.finish();
}

fn bench_derive_and_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_rank_500_1000_2000");
    for n in [500usize, 1000, 2000] {
        let first = make_samples(n, 1);
        let second = make_samples(n, 3);
        let (_, primed) = derive(SamplingState::default(), &system(100_000), &first);

        for key in [SortKey::Cpu, SortKey::Memory, SortKey::Pid] {
            let id = BenchmarkId::new(key.label(), n);
            group.bench_with_input(id, &second, |b, second| {
                b.iter(|| {
                    let (rows, _) = derive(primed.clone(), &system(108_000), black_box(second));
                    black_box(rank(rows, key));
                });
            });
        }
    }
    group.finish();
}

fn bench_table_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_text_500_1000_2000");
    for n in [500usize, 1000, 2000] {
        let (rows, _) = derive(SamplingState::default(), &system(1), &make_samples(n, 1));
        let rows = rank(rows, SortKey::Memory);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(table_text(black_box(rows))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive, bench_derive_and_rank, bench_table_text);
criterion_main!(benches);
