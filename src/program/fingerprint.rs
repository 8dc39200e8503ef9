use crate::foundation::math::Fnv1a64;
use crate::layout::block::Block;
use crate::layout::model::Layout;
use crate::render::state::RenderState;
use crate::walkthrough::state::WalkthroughState;

/// 128-bit digest of everything a frame produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Digest of the mutated layout, the draw list, the token overlay, the scrub markers and the
/// visible commentary. Two executions of the same phase at the same time must agree.
pub fn fingerprint_frame(
    layout: &Layout,
    render: &RenderState,
    walkthrough: &WalkthroughState,
) -> FrameFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    let reachable = layout.reachable();
    write_u64_pair(&mut a, &mut b, reachable.len() as u64);
    for id in reachable {
        if let Some(blk) = layout.get(id) {
            write_block_pair(&mut a, &mut b, blk);
        }
    }

    write_u64_pair(&mut a, &mut b, render.draw.len() as u64);
    for cmd in &render.draw {
        match serde_json::to_value(cmd) {
            Ok(v) => write_json_value_pair(&mut a, &mut b, &v),
            Err(_) => write_u8_pair(&mut a, &mut b, 0xff),
        }
    }
    match &render.token_colors {
        Some(tc) => {
            write_u8_pair(&mut a, &mut b, 1);
            for c in tc.color2.to_bits() {
                write_u64_pair(&mut a, &mut b, c);
            }
            write_u64_pair(&mut a, &mut b, tc.mixes.len() as u64);
            for m in &tc.mixes {
                write_f64_pair(&mut a, &mut b, *m);
            }
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    write_u64_pair(&mut a, &mut b, walkthrough.times.len() as u64);
    for ti in &walkthrough.times {
        write_str_pair(&mut a, &mut b, &ti.name);
        write_f64_pair(&mut a, &mut b, ti.time);
    }
    match &walkthrough.commentary {
        Some(c) => {
            write_u8_pair(&mut a, &mut b, 1);
            write_str_pair(&mut a, &mut b, &c.visible);
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_block_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, blk: &Block) {
    write_str_pair(a, b, &blk.name);
    for v in [blk.x, blk.y, blk.z, blk.dx, blk.dy, blk.dz, blk.highlight, blk.opacity] {
        write_f64_pair(a, b, v);
    }
    for n in [blk.cx, blk.cy, blk.cz] {
        write_u64_pair(a, b, n as u64);
    }
    match blk.access {
        Some(access) => {
            write_u8_pair(a, b, 1);
            write_u8_pair(a, b, u8::from(access.disable));
        }
        None => write_u8_pair(a, b, 0),
    }
    match &blk.grid {
        Some(grid) => {
            write_u8_pair(a, b, 1);
            write_u8_pair(a, b, grid.dim.ordinal());
            write_u64_pair(a, b, grid.cell as u64);
            write_f64_pair(a, b, grid.gap);
        }
        None => write_u8_pair(a, b, 0),
    }
}

fn write_json_value_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => write_u8_pair(a, b, 0),
        serde_json::Value::Bool(x) => {
            write_u8_pair(a, b, 1);
            write_u8_pair(a, b, u8::from(*x));
        }
        serde_json::Value::Number(n) => {
            write_u8_pair(a, b, 2);
            write_str_pair(a, b, &n.to_string());
        }
        serde_json::Value::String(s) => {
            write_u8_pair(a, b, 3);
            write_str_pair(a, b, s);
        }
        serde_json::Value::Array(items) => {
            write_u8_pair(a, b, 4);
            write_u64_pair(a, b, items.len() as u64);
            for item in items {
                write_json_value_pair(a, b, item);
            }
        }
        serde_json::Value::Object(map) => {
            write_u8_pair(a, b, 5);
            write_u64_pair(a, b, map.len() as u64);
            for (k, item) in map {
                write_str_pair(a, b, k);
                write_json_value_pair(a, b, item);
            }
        }
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    a.write_f64(v);
    b.write_f64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/program/fingerprint.rs"]
mod tests;
