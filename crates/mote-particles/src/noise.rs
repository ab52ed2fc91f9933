//! Stateless integer hash used for deterministic wander

/// Golden-ratio multiplier spreading consecutive ticks across the hash input
const TICK_MULTIPLIER: u32 = 2_654_435_761;

/// 32-bit avalanche hash
pub fn hash32(n: u32) -> u32 {
    let mut t = n ^ 0x9E37_79B9;
    t = (t ^ (t >> 16)).wrapping_mul(0x85EB_CA6B);
    t = (t ^ (t >> 13)).wrapping_mul(0xC2B2_AE35);
    t ^ (t >> 16)
}

/// Uniform value in [0, 1) with 16 bits of resolution, a pure function of
/// `(seed, tick)`
pub fn unit(seed: u32, tick: u32) -> f32 {
    let h = hash32(seed.wrapping_add(tick.wrapping_mul(TICK_MULTIPLIER)));
    (h & 0xFFFF) as f32 / 65536.0
}
