//! Alea PRNG (Johannes Baagøe's three-register generator)
//!
//! Used only to jitter intervals. Output must match other FSRS ports for the
//! same seed string, so every step mirrors the reference arithmetic exactly:
//! f64 registers, u32 wrapping in the Mash hash, 2^-32 scaling.

use serde::{Deserialize, Serialize};

/// 2^-32
const TWO_POW_NEG_32: f64 = 2.328_306_436_538_696_3e-10;

/// 2^-53, used to stitch two draws into one 53-bit double
const TWO_POW_NEG_53: f64 = 1.110_223_024_625_156_5e-16;

const MULTIPLIER: f64 = 2_091_639.0;

/// Snapshot of the generator registers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AleaState {
    pub c: f64,
    pub s0: f64,
    pub s1: f64,
    pub s2: f64,
}

/// Seeded Alea generator
#[derive(Debug, Clone)]
pub struct Alea {
    c: f64,
    s0: f64,
    s1: f64,
    s2: f64,
}

impl Alea {
    /// Seed the generator from arbitrary text
    pub fn new(seed: &str) -> Self {
        let mut mash = Mash::new();
        let mut s0 = mash.hash(" ");
        let mut s1 = mash.hash(" ");
        let mut s2 = mash.hash(" ");

        s0 -= mash.hash(seed);
        if s0 < 0.0 {
            s0 += 1.0;
        }
        s1 -= mash.hash(seed);
        if s1 < 0.0 {
            s1 += 1.0;
        }
        s2 -= mash.hash(seed);
        if s2 < 0.0 {
            s2 += 1.0;
        }

        Self { c: 1.0, s0, s1, s2 }
    }

    /// Next value in [0, 1) with 32 bits of randomness
    pub fn next_f64(&mut self) -> f64 {
        let t = MULTIPLIER * self.s0 + self.c * TWO_POW_NEG_32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.s2 = t - t.floor();
        self.c = t.floor();
        self.s2
    }

    /// Next value in [0, 1) with 53 bits of randomness (consumes two draws)
    pub fn double(&mut self) -> f64 {
        let hi = self.next_f64();
        let lo = self.next_f64();
        let part = (lo * 2_097_152.0) as u32; // 0x200000
        hi + part as f64 * TWO_POW_NEG_53
    }

    /// Current registers
    pub fn state(&self) -> AleaState {
        AleaState {
            c: self.c,
            s0: self.s0,
            s1: self.s1,
            s2: self.s2,
        }
    }

    /// Overwrite the registers
    pub fn set_state(&mut self, state: AleaState) {
        self.c = state.c;
        self.s0 = state.s0;
        self.s1 = state.s1;
        self.s2 = state.s2;
    }
}

impl From<AleaState> for Alea {
    fn from(state: AleaState) -> Self {
        Self {
            c: state.c,
            s0: state.s0,
            s1: state.s1,
            s2: state.s2,
        }
    }
}

/// Mash string hash. State carries over between calls on the same instance.
struct Mash {
    n: u32,
}

impl Mash {
    fn new() -> Self {
        Self { n: 0xefc8_249d }
    }

    fn hash(&mut self, data: &str) -> f64 {
        let mut n = self.n;
        // Reference ports hash UTF-16 code units truncated to a byte
        for unit in data.encode_utf16() {
            n = n.wrapping_add(u32::from(unit as u8));
            let mut h = 0.025_196_032_824_169_38 * f64::from(n);
            n = h as u32;
            h -= f64::from(n);
            h *= f64::from(n);
            n = h as u32;
            h -= f64::from(n);
            n = n.wrapping_add((h * 4_294_967_296.0) as u32);
        }
        self.n = n;
        f64::from(n) * TWO_POW_NEG_32
    }
}
