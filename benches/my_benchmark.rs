use std::time::Duration;

use chip::{
    chip8::ChipSet,
    devices::{FrameBuffer, Keyboard},
    resources::Rom,
    Runner, RunnerConfig,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::mock::StepRng;

const ROM_NAME: &str = "SCATTER";

/// Draws random font glyphs all over the screen, forever.
const PROGRAM: [u8; 14] = [
    0xA0, 0x00, // I = glyph 0
    0xD0, 0x15, // draw at V0, V1
    0x70, 0x05, // V0 += 5
    0x71, 0x03, // V1 += 3
    0xC2, 0x0F, // V2 = random & 0xF
    0xF2, 0x29, // I = glyph V2
    0x12, 0x02, // loop
];

static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(|| {
    Rom::new(ROM_NAME, &PROGRAM).expect("The benchmark program fits into memory.")
});

/// will setup the default configured chip
fn get_default_chip() -> ChipSet<FrameBuffer, Keyboard> {
    ChipSet::new(BASE_ROM.clone(), FrameBuffer::new(), Keyboard::new())
        .with_rng(StepRng::new(0, 7))
}

pub fn print_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    for _ in 0..64 {
        let _ = chip.next();
    }
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

pub fn cycle_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("cycle_bench", |b| {
        b.iter(|| black_box(chip.next()));
    });
}

pub fn advance_bench(c: &mut Criterion) {
    let mut runner = Runner::new(get_default_chip(), RunnerConfig::default())
        .expect("The default configuration is valid.");
    // one second of emulated time per iteration
    c.bench_function("advance_bench", |b| {
        b.iter(|| black_box(runner.advance(Duration::from_secs(1))));
    });
}

criterion_group!(benches, print_bench, cycle_bench, advance_bench);
criterion_main!(benches);
