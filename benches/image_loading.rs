// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for decoding and precise-zoom resampling.

use criterion::{criterion_group, criterion_main, Criterion};
use handy_lens::media::{self, ResizeFilter};
use std::hint::black_box;
use tempfile::tempdir;

fn image_loading_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_loading");

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sample.png");
    image_rs::RgbImage::from_fn(512, 384, |x, y| {
        image_rs::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
    .save(&path)
    .expect("write sample");

    group.bench_function("load_sample_png", |b| {
        b.iter(|| black_box(media::load_image(&path).expect("decode")));
    });

    let image = media::load_image(&path).expect("decode");
    group.bench_function("precise_resample_1_5x", |b| {
        b.iter(|| black_box(image.resized(768, 576, ResizeFilter::Smooth).expect("resize")));
    });

    group.finish();
}

criterion_group!(benches, image_loading_benchmark);
criterion_main!(benches);
