// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use fbe::proto::{parse_frame, Receiver};

fuzz_target!(|data: &[u8]| {
    // Reassemble arbitrary bytes in arbitrary chunk sizes; must never
    // panic or over-allocate past the configured maximum.
    let mut rx = Receiver::with_max_frame_size(std::io::empty(), 64 * 1024);
    let mut pos = 0;
    while pos < data.len() {
        let chunk = (data[pos] as usize % 17) + 1;
        let end = (pos + chunk).min(data.len());
        rx.feed(&data[pos..end]);
        pos = end;
        loop {
            match rx.poll_frame() {
                Ok(Some(frame)) => {
                    let _ = parse_frame(&frame);
                }
                Ok(None) => break,
                Err(_) => break,
            }
        }
    }
});
