// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for source resolution and the breakpoint walk.
//!
//! Measures the performance of:
//! - Resolving every breakpoint under both fallback policies
//! - A full mount and breakpoint sweep on the simulated platform

use background_video::config::{FallbackPolicy, MediaConfiguration, MediaSources};
use background_video::domain::breakpoint::Breakpoint;
use background_video::i18n::ControlLabels;
use background_video::infrastructure::{RecordingSurface, SimulatedPlatform};
use background_video::video_player::{resolve, BackgroundVideo, DocumentVisibilityHub};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn sparse_config(fallback: FallbackPolicy) -> MediaConfiguration {
    let mut config = MediaConfiguration::default();
    config.sources.fallback = fallback;
    config.sources.poster = Some("poster.jpg".into());
    config
        .sources
        .table
        .set(Breakpoint::Small, MediaSources::mp4("small.mp4"));
    config.sources.table.set(
        Breakpoint::XLarge,
        MediaSources {
            mp4: None,
            webm: Some("xlarge.webm".into()),
            poster: Some("xlarge.jpg".into()),
        },
    );
    config
}

/// Benchmark resolving all breakpoints.
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_resolution");

    for (name, policy) in [
        ("exact", FallbackPolicy::Exact),
        ("cascade", FallbackPolicy::Cascade),
    ] {
        let config = sparse_config(policy);
        group.bench_function(name, |b| {
            b.iter(|| {
                for bp in Breakpoint::ALL {
                    black_box(resolve(black_box(bp), &config.sources));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark mounting and walking through every breakpoint.
fn bench_breakpoint_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("breakpoint_sweep");
    let config = sparse_config(FallbackPolicy::Cascade);

    group.bench_function("mount_and_sweep", |b| {
        b.iter(|| {
            let mut video = BackgroundVideo::new(
                "bench",
                config.clone(),
                ControlLabels::default(),
                SimulatedPlatform::new(),
                RecordingSurface::new(),
                DocumentVisibilityHub::new(),
            );
            video.mount(Breakpoint::Small);
            for bp in Breakpoint::ALL.iter().rev() {
                black_box(video.on_breakpoint_changed(*bp));
            }
            video.unmount();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_breakpoint_sweep);
criterion_main!(benches);
