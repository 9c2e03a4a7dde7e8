// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Benchmarks for the point service.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single-threaded charge/use processing
//! - Contended processing from many threads against one lock
//! - History lookup with a growing log

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use point_ledger::{PointService, UserId};
use rayon::prelude::*;

// =============================================================================
// Single-Threaded Benchmarks
// =============================================================================

fn bench_single_charge(c: &mut Criterion) {
    c.bench_function("single_charge", |b| {
        let service = PointService::new();
        b.iter(|| {
            service.charge(black_box(UserId(1)), black_box(1_000)).unwrap();
        })
    });
}

fn bench_charge_then_use(c: &mut Criterion) {
    c.bench_function("charge_then_use", |b| {
        let service = PointService::new();
        b.iter(|| {
            service.charge(UserId(1), 1_500).unwrap();
            service.use_points(black_box(UserId(1)), black_box(1_234)).unwrap();
        })
    });
}

fn bench_charge_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("charge_throughput");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let service = PointService::new();
                for i in 0..count {
                    service.charge(UserId(i % 64), 1_000).unwrap();
                }
                black_box(&service);
            })
        });
    }
    group.finish();
}

// =============================================================================
// Contended Benchmarks
// =============================================================================

fn bench_parallel_uses(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_uses");

    for count in [1_000u64, 10_000].iter() {
        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let service = PointService::new();
                service.charge(UserId(1), (count * 1_000) as i64).unwrap();
                (0..count).into_par_iter().for_each(|_| {
                    service.use_points(UserId(1), 1_000).unwrap();
                });
                black_box(&service);
            })
        });
    }
    group.finish();
}

fn bench_parallel_mixed_users(c: &mut Criterion) {
    c.bench_function("parallel_mixed_users", |b| {
        b.iter(|| {
            let service = PointService::new();
            (0..10_000u64).into_par_iter().for_each(|i| {
                let user = UserId(i % 128);
                if i % 2 == 0 {
                    service.charge(user, 1_000).unwrap();
                } else {
                    let _ = service.use_points(user, 1_000);
                }
            });
            black_box(&service);
        })
    });
}

// =============================================================================
// Read Benchmarks
// =============================================================================

fn bench_history_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_lookup");

    for entries in [10u64, 100, 1_000].iter() {
        let service = PointService::new();
        for i in 0..*entries {
            service.charge(UserId(i % 2), 1).unwrap();
        }
        group.bench_with_input(BenchmarkId::from_parameter(entries), entries, |b, _| {
            b.iter(|| black_box(service.get_history(UserId(0))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_charge,
    bench_charge_then_use,
    bench_charge_throughput,
    bench_parallel_uses,
    bench_parallel_mixed_users,
    bench_history_lookup,
);
criterion_main!(benches);
