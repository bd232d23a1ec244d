//! Fragment program sources for the runtime-shader effects.
//!
//! Programs follow the runtime shader dialect used by Android and Skia: one
//! `uniform shader` input named `content`, and `vec4 main(vec2 coord)`
//! evaluated per destination coordinate in pixel units.

/// Name of the sampled input in every built-in program.
pub const CONTENT_INPUT: &str = "content";

/// Snaps each coordinate to the lower corner of its `pixelSize` block.
pub const PIXELATE: &str = r#"
uniform shader content;
uniform float pixelSize;

vec4 main(vec2 coord) {
    vec2 pixel = floor(coord / pixelSize) * pixelSize;
    return content.eval(pixel);
}
"#;

/// Samples red and blue `offset` pixels to either side of green.
pub const CHROMATIC_ABERRATION: &str = r#"
uniform shader content;
uniform float offset;

vec4 main(vec2 coord) {
    vec2 off = vec2(offset, 0.0);
    float r = content.eval(coord + off).r;
    float g = content.eval(coord).g;
    float b = content.eval(coord - off).b;
    return vec4(r, g, b, 1.0);
}
"#;

/// Horizontal sine displacement driven by the normalized row.
pub const WAVE: &str = r#"
uniform shader content;
uniform float amplitude;
uniform float frequency;
uniform vec2 resolution;

vec4 main(vec2 coord) {
    vec2 uv = coord / resolution;
    float wave = sin(uv.y * frequency) * amplitude;
    return content.eval(coord + vec2(wave * 20.0, 0.0));
}
"#;

/// Rotates around `center` by an angle proportional to the distance.
///
/// `mat2` is column-major, so `mat2(c, -s, s, c)` has rows `[c, s]` and
/// `[-s, c]`: the twisted point is `(c*dx + s*dy, -s*dx + c*dy)`.
pub const SWIRL: &str = r#"
uniform shader content;
uniform vec2 center;
uniform float strength;

vec4 main(vec2 coord) {
    vec2 dir = coord - center;
    float dist = length(dir);
    float angle = strength * dist / 200.0;
    float s = sin(angle);
    float c = cos(angle);
    mat2 rot = mat2(c, -s, s, c);
    vec2 twisted = center + rot * dir;
    return content.eval(twisted);
}
"#;
