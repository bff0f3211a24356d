//! Criterion benchmarks for keysym translation.
//!
//! Every viewer keystroke performs one [`Keymap::lookup`] on the transport
//! thread, so lookups must stay in the table-lookup cost class.  Table
//! construction happens once per process and is measured for reference.
//!
//! Run with:
//! ```bash
//! cargo bench --package vncbridge-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vncbridge_core::keymap::keysym;
use vncbridge_core::{Keymap, KeyboardLayout};

// ── Representative keysyms ────────────────────────────────────────────────────

/// Mix of letters, shifted symbols, AltGr symbols and named keys, plus one
/// keysym no layout maps.
const BENCH_KEYSYMS: &[u32] = &[
    0x0061, // a
    0x0041, // A
    0x007A, // z
    0x0040, // @
    0x007B, // {
    0x0031, // 1
    0x0021, // !
    keysym::RETURN,
    keysym::ESCAPE,
    keysym::BACKSPACE,
    keysym::TAB,
    keysym::LEFT,
    keysym::SHIFT_L,
    keysym::CONTROL_L,
    keysym::F1,
    keysym::KP_ENTER,
    keysym::EURO_SIGN,
    0x0100_0000, // unmapped
];

fn bench_keymap_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_build");

    for layout in [KeyboardLayout::Us, KeyboardLayout::De] {
        group.bench_with_input(
            BenchmarkId::new("new", layout.to_string()),
            &layout,
            |b, &layout| b.iter(|| Keymap::new(black_box(layout))),
        );
    }

    group.finish();
}

fn bench_keymap_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_lookup");

    for layout in [KeyboardLayout::Us, KeyboardLayout::De] {
        let keymap = Keymap::new(layout);

        group.bench_function(BenchmarkId::new("single", layout.to_string()), |b| {
            b.iter(|| keymap.lookup(black_box(0x0041)))
        });

        // Burst of keystrokes, including a miss
        group.bench_function(BenchmarkId::new("batch_18", layout.to_string()), |b| {
            b.iter(|| {
                BENCH_KEYSYMS
                    .iter()
                    .map(|&sym| keymap.lookup(black_box(sym)))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_keymap_build, bench_keymap_lookup);
criterion_main!(benches);
