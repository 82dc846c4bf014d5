// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use ember::{Multicast, PublishSubject, RefCountSubject};
use futures::{FutureExt, StreamExt};
use std::hint::black_box;

fn noop_subject() -> impl Multicast<Item = u64> {
    RefCountSubject::with_callbacks(PublishSubject::new(), || Ok(()), || Ok(()))
}

pub fn bench_activation_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("activation");

    // Full 0→1→0 cycle per iteration
    group.bench_function("subscribe_dispose_cycle", |bencher| {
        let subject = noop_subject();
        bencher.iter(|| {
            let observer = subject.subscribe();
            black_box(&observer);
            drop(observer);
        });
    });

    // Subscribe/dispose while an anchor keeps the subject active
    group.bench_function("subscribe_dispose_while_active", |bencher| {
        let subject = noop_subject();
        let _anchor = subject.subscribe();
        bencher.iter(|| {
            let observer = subject.subscribe();
            black_box(&observer);
            drop(observer);
        });
    });

    group.finish();
}

pub fn bench_publish_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");

    for &subs in &[1usize, 8, 64, 256] {
        group.throughput(Throughput::Elements(subs as u64));
        let id = BenchmarkId::from_parameter(format!("subs_{subs}"));
        group.bench_with_input(id, &subs, |bencher, &subs| {
            let subject = noop_subject();
            let mut observers: Vec<_> = (0..subs).map(|_| subject.subscribe()).collect();
            bencher.iter(|| {
                subject.publish(black_box(42)).unwrap();
                // Drain so the unbounded channels don't grow across iterations
                for observer in &mut observers {
                    black_box(observer.next().now_or_never());
                }
            });
            observers.clear();
        });
    }

    group.finish();
}
