// SVG path data for annular sectors
//
// Angles are measured clockwise from 12 o'clock, so a point at angle `a`
// and radius `r` sits at `(r sin a, -r cos a)`.

use std::f64::consts::TAU;
use std::fmt::Write;

const EPSILON: f64 = 1e-9;

fn point(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Path data for the sector `[start, end] × [inner, outer]`
///
/// `pad_angle` is split evenly between both edges. Sectors narrower than
/// the padding collapse to their mid-angle; full rings are never padded.
pub fn arc_path(start: f64, end: f64, inner: f64, outer: f64, pad_angle: f64) -> String {
    let span = end - start;
    if outer <= EPSILON || span <= EPSILON {
        return String::new();
    }
    if span >= TAU - EPSILON {
        return full_ring(inner, outer);
    }

    let half_pad = (pad_angle.max(0.0) / 2.0).min(span / 2.0);
    let a0 = start + half_pad;
    let a1 = end - half_pad;
    let large = if a1 - a0 > std::f64::consts::PI { 1 } else { 0 };

    let (ox0, oy0) = point(a0, outer);
    let (ox1, oy1) = point(a1, outer);
    let mut d = String::new();
    let _ = write!(
        d,
        "M{:.3},{:.3}A{:.3},{:.3},0,{},1,{:.3},{:.3}",
        ox0, oy0, outer, outer, large, ox1, oy1
    );

    if inner > EPSILON {
        let (ix1, iy1) = point(a1, inner);
        let (ix0, iy0) = point(a0, inner);
        let _ = write!(
            d,
            "L{:.3},{:.3}A{:.3},{:.3},0,{},0,{:.3},{:.3}Z",
            ix1, iy1, inner, inner, large, ix0, iy0
        );
    } else {
        d.push_str("L0,0Z");
    }
    d
}

fn full_ring(inner: f64, outer: f64) -> String {
    let mut d = String::new();
    let _ = write!(
        d,
        "M0,{:.3}A{:.3},{:.3},0,1,1,0,{:.3}A{:.3},{:.3},0,1,1,0,{:.3}",
        -outer, outer, outer, outer, outer, outer, -outer
    );
    if inner > EPSILON {
        let _ = write!(
            d,
            "M0,{:.3}A{:.3},{:.3},0,1,0,0,{:.3}A{:.3},{:.3},0,1,0,0,{:.3}",
            -inner, inner, inner, inner, inner, inner, -inner
        );
    }
    d.push('Z');
    d
}
