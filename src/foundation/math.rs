use crate::foundation::core::{Vec3, Vec4};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

impl Lerp for Vec4 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec4::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
            a.w + (b.w - a.w) * t,
        )
    }
}

/// Unclamped linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    f64::lerp(&a, &b, t)
}

/// Hermite smoothstep of `t` clamped to `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp_smoothstep(a: f64, b: f64, t: f64) -> f64 {
    lerp(a, b, smoothstep(t))
}

/// `len` zeros with `value` at `idx`. An out-of-range `idx` yields all zeros.
pub fn one_hot_array(len: usize, idx: usize, value: f64) -> Vec<f64> {
    let mut out = vec![0.0; len];
    if let Some(slot) = out.get_mut(idx) {
        *slot = value;
    }
    out
}

/// Floor of a non-negative cell position as an index. Negative and non-finite inputs map to `None`.
pub fn cell_index(pos: f64) -> Option<usize> {
    if !pos.is_finite() || pos < 0.0 {
        return None;
    }
    Some(pos.floor() as usize)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
