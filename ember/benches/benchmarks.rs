// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::activation_bench::{bench_activation_churn, bench_publish_fanout};
use criterion::{criterion_group, criterion_main};

mod activation_bench;

criterion_group!(benches, bench_activation_churn, bench_publish_fanout);
criterion_main!(benches);
