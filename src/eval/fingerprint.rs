use xxhash_rust::xxh3::Xxh3;

use crate::state::character::CharacterState;
use crate::state::color::ColorState;
use crate::state::material::MaterialState;
use crate::state::transform::TransformState;

const XXH3_SEED: u64 = 0x6c79_7068_6678_0001;

/// 128-bit digest of evaluated frame states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

pub(crate) fn fingerprint_frame(states: &[CharacterState], revealed: &[bool]) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(states.len() as u64);
    for (state, &shown) in states.iter().zip(revealed) {
        h.write_bool(shown);
        write_color(&mut h, &state.color);
        write_material(&mut h, &state.material);
        write_transform(&mut h, &state.transform);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_color(h: &mut StableHasher, c: &ColorState) {
    h.write_f64(c.color.r);
    h.write_f64(c.color.g);
    h.write_f64(c.color.b);
    h.write_f64(c.color.a);
    h.write_bool(c.override_rgb);
}

fn write_material(h: &mut StableHasher, m: &MaterialState) {
    h.write_u64(m.len() as u64);
    for (k, v) in m.iter() {
        h.write_i32(k);
        h.write_f64(v);
    }
}

fn write_transform(h: &mut StableHasher, t: &TransformState) {
    h.write_f64(t.position.x);
    h.write_f64(t.position.y);
    h.write_f64(t.rotation_rad);
    h.write_f64(t.scale.x);
    h.write_f64(t.scale.y);
    match t.group {
        Some(g) => {
            h.write_u8(1);
            h.write_u64(g.first as u64);
            h.write_u64(g.last as u64);
        }
        None => h.write_u8(0),
    }
}
