//! Bilinear texture lookup with tile or clamp addressing.

use lux_core::{Color, Texture};
use lux_math::Vec2;

/// How texel addresses outside the grid are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Tile: wrap with a signed modulo
    Wrap,
    /// Saturate to the nearest edge texel
    Clamp,
}

/// Resolve an integer texel address against a grid dimension.
#[inline]
pub(crate) fn resolve_index(index: i64, dim: usize, addressing: Addressing) -> usize {
    let dim = dim as i64;
    match addressing {
        Addressing::Wrap => index.rem_euclid(dim) as usize,
        Addressing::Clamp => index.clamp(0, dim - 1) as usize,
    }
}

/// Look up `texture` at `uv` and scale `value` by the filtered texel.
///
/// Without a texture `value` is returned unchanged. `uv` is nominally in
/// `[0, 1)` but any finite coordinate is accepted; the four neighbouring
/// texels are addressed independently before indexing, so the lookup never
/// leaves the grid.
pub fn lookup_scaled(value: Color, texture: Option<&Texture>, uv: Vec2, addressing: Addressing) -> Color {
    let Some(texture) = texture else {
        return value;
    };

    let (w, h) = (texture.width() as f32, texture.height() as f32);
    let (x, y) = (uv.x * w, uv.y * h);

    // Bring the coordinate near the grid first so the integer neighbour
    // addresses below cannot overflow.
    let (x, y) = match addressing {
        Addressing::Wrap => (x.rem_euclid(w), y.rem_euclid(h)),
        Addressing::Clamp => (x.clamp(-1.0, w), y.clamp(-1.0, h)),
    };

    let (xf, yf) = (x.floor(), y.floor());
    let (i, j) = (xf as i64, yf as i64);
    let s = x - xf;
    let t = y - yf;

    let i0 = resolve_index(i, texture.width(), addressing);
    let j0 = resolve_index(j, texture.height(), addressing);
    let i1 = resolve_index(i + 1, texture.width(), addressing);
    let j1 = resolve_index(j + 1, texture.height(), addressing);

    let blended = texture.at(i0, j0) * ((1.0 - s) * (1.0 - t))
        + texture.at(i0, j1) * ((1.0 - s) * t)
        + texture.at(i1, j0) * (s * (1.0 - t))
        + texture.at(i1, j1) * (s * t);

    value * blended
}
