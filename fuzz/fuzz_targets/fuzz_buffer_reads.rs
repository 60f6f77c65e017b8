// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use fbe::buffer::ReadBuffer;

fuzz_target!(|data: &[u8]| {
    let buf = ReadBuffer::from(data);
    // Inline and pointer accessors at every plausible offset.
    for offset in 0..data.len().min(64) {
        let _ = buf.read_u64(offset);
        let _ = buf.read_string_inline(offset);
        let _ = buf.read_bytes_ptr(offset);
        let _ = buf.read_uuid(offset);
        let _ = buf.read_decimal(offset);
    }
});
