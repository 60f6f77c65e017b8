// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures serialization throughput for both wire layouts and the framing
//! path:
//! - Final layout encode/decode (messaging hot path)
//! - Standard layout encode/decode (pointer resolution + arena)
//! - Frame build + accumulator reassembly
//!
//! The fixture mixes fixed-width scalars with a string so both the inline
//! and the pointer paths are exercised.

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fbe::buffer::{ReadBuffer, WriteBuffer};
use fbe::codec::{FinalDecode, FinalEncode, StandardDecode, StandardEncode};
use fbe::model::{final_layout, standard, Record};
use fbe::proto::{build_frame, Receiver, Sender};
use fbe::Result;

#[derive(Debug, Clone, PartialEq)]
struct Telemetry {
    node: u32,
    sequence: u64,
    label: String,
    load: f64,
}

impl Record for Telemetry {
    const TYPE_ID: u32 = 500;
}

impl FinalEncode for Telemetry {
    const STATIC_SIZE: usize = 4 + 8 + 8;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        let mut at = self.node.encode_final(buf, offset)?;
        at += self.sequence.encode_final(buf, offset + at)?;
        at += self.label.encode_final(buf, offset + at)?;
        at += self.load.encode_final(buf, offset + at)?;
        Ok(at)
    }
}

impl FinalDecode for Telemetry {
    const STATIC_SIZE: usize = 4 + 8 + 8;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let (node, mut at) = u32::decode_final(buf, offset)?;
        let (sequence, used) = u64::decode_final(buf, offset + at)?;
        at += used;
        let (label, used) = String::decode_final(buf, offset + at)?;
        at += used;
        let (load, used) = f64::decode_final(buf, offset + at)?;
        at += used;
        Ok((
            Telemetry {
                node,
                sequence,
                label,
                load,
            },
            at,
        ))
    }
}

impl StandardEncode for Telemetry {
    const FIXED_SIZE: usize = 4 + 8 + 4 + 8;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        let mut extra = 0;
        extra += self.node.encode_standard(buf, offset)?;
        extra += self.sequence.encode_standard(buf, offset + 4)?;
        extra += self.label.encode_standard(buf, offset + 12)?;
        extra += self.load.encode_standard(buf, offset + 16)?;
        Ok(extra)
    }
}

impl StandardDecode for Telemetry {
    const FIXED_SIZE: usize = 4 + 8 + 4 + 8;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let mut extra = 0;
        let (node, used) = u32::decode_standard(buf, offset)?;
        extra += used;
        let (sequence, used) = u64::decode_standard(buf, offset + 4)?;
        extra += used;
        let (label, used) = String::decode_standard(buf, offset + 12)?;
        extra += used;
        let (load, used) = f64::decode_standard(buf, offset + 16)?;
        extra += used;
        Ok((
            Telemetry {
                node,
                sequence,
                label,
                load,
            },
            extra,
        ))
    }
}

fn sample() -> Telemetry {
    Telemetry {
        node: 7,
        sequence: 123_456_789,
        label: String::from("edge-rack-42/sensor-bay"),
        load: 0.7321,
    }
}

fn bench_final_layout(c: &mut Criterion) {
    let value = sample();

    c.bench_function("final_encode", |b| {
        let mut buf = WriteBuffer::new();
        b.iter(|| {
            buf.clear();
            black_box(final_layout::encode(black_box(&value), &mut buf).unwrap())
        });
    });

    let mut buf = WriteBuffer::new();
    final_layout::encode(&value, &mut buf).unwrap();
    let read = buf.freeze();
    c.bench_function("final_decode", |b| {
        b.iter(|| black_box(final_layout::decode::<Telemetry>(black_box(&read)).unwrap()));
    });
}

fn bench_standard_layout(c: &mut Criterion) {
    let value = sample();

    c.bench_function("standard_encode", |b| {
        let mut buf = WriteBuffer::new();
        b.iter(|| {
            buf.clear();
            black_box(standard::encode(black_box(&value), &mut buf).unwrap())
        });
    });

    let mut buf = WriteBuffer::new();
    standard::encode(&value, &mut buf).unwrap();
    let read = buf.freeze();
    c.bench_function("standard_decode", |b| {
        b.iter(|| black_box(standard::decode::<Telemetry>(black_box(&read)).unwrap()));
    });
}

fn bench_framing(c: &mut Criterion) {
    let mut buf = WriteBuffer::new();
    final_layout::encode(&sample(), &mut buf).unwrap();
    let payload = buf.into_vec();

    c.bench_function("frame_build", |b| {
        b.iter(|| black_box(build_frame(Telemetry::TYPE_ID, black_box(&payload))));
    });

    let frame = build_frame(Telemetry::TYPE_ID, &payload);
    let mut sender = Sender::new(Vec::new());
    for _ in 0..64 {
        sender.send_frame(&frame).unwrap();
    }
    let wire = sender.into_inner();

    c.bench_function("frame_reassemble_64", |b| {
        b.iter(|| {
            let mut rx = Receiver::new(std::io::empty());
            rx.feed(black_box(&wire));
            let mut count = 0u32;
            while let Some(f) = rx.poll_frame().unwrap() {
                black_box(f);
                count += 1;
            }
            assert_eq!(count, 64);
        });
    });
}

criterion_group!(
    benches,
    bench_final_layout,
    bench_standard_layout,
    bench_framing
);
criterion_main!(benches);
