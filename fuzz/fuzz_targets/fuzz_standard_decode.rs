// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use fbe::buffer::ReadBuffer;
use fbe::codec::StandardDecode;
use fbe::model::standard;
use fbe::types::Decimal;

fuzz_target!(|data: &[u8]| {
    // Standard-layout decoding of hostile buffers: arbitrary pointers,
    // counts, and size headers must fail cleanly, never over-read.
    let buf = ReadBuffer::from(data);
    let _ = standard::decode::<String>(&buf);
    let _ = standard::decode::<Vec<u64>>(&buf);
    let _ = standard::decode::<Vec<String>>(&buf);
    let _ = standard::decode::<Option<Decimal>>(&buf);
    let _ = String::decode_standard(&buf, 0);
});
