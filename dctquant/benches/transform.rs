// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::hint::black_box;
use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dctquant::block::{BLOCK_SIZE, BlockGrid};
use dctquant::image::LumaPlane;
use dctquant::scheduler::compress_blocks;
use dctquant::tables::QuantMatrix;
use dctquant::transform::{ForwardTransform, InverseTransform};

fn bench_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("block");
    let forward = ForwardTransform::new(QuantMatrix::default());
    let inverse = InverseTransform::new(QuantMatrix::default());

    let samples: [f32; BLOCK_SIZE] = std::array::from_fn(|i| ((i * 37) % 255) as f32 - 128.0);
    group.bench_function("forward", |b| {
        b.iter(|| forward.transform_block(black_box(&samples)))
    });

    let coefficients = forward.transform_block(&samples).coefficients;
    group.bench_function("inverse", |b| {
        b.iter(|| inverse.reconstruct_block(black_box(&coefficients)))
    });
    group.finish();
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_blocks");
    let size = (512, 512);
    let data = (0..size.0 * size.1).map(|i| (i % 251) as u8).collect();
    let plane = LumaPlane::new(size, data).unwrap();
    let grid = BlockGrid::for_image_size(size).unwrap();
    let engine = ForwardTransform::new(QuantMatrix::default());

    for workers in [1, 2, 4, 8] {
        let worker_count = NonZeroUsize::new(workers).unwrap();
        group.bench_function(BenchmarkId::new("512x512", workers), |b| {
            b.iter(|| compress_blocks(&engine, &plane, grid, worker_count).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_blocks, bench_compress);
criterion_main!(benches);
