//! Unit conversion utilities.
//!
//! Templates describe geometry in inches and type in points; DrawingML wants
//! EMUs for lengths, hundredths of a point for font sizes and 1/1000 percent
//! for line spacing and crop fractions.

pub const EMUS_PER_INCH: i64 = 914_400;

/// DrawingML percentage scale (`100000` = 100%).
pub const PERCENT_SCALE: f64 = 100_000.0;

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

/// Font size in hundredths of a point, as used by `a:rPr/@sz`.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

/// Fraction in `[0, 1]` to the DrawingML percentage scale, clamped.
#[inline]
pub fn fraction_to_percent(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * PERCENT_SCALE).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_round_trip() {
        assert_eq!(inches_to_emu(1.0), 914_400);
        assert_eq!(inches_to_emu(0.3), 274_320);
        assert_eq!(emu_to_inches(inches_to_emu(2.5)), 2.5);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(pt_to_centipoints(14.0), 1400);
        assert_eq!(pt_to_centipoints(10.5), 1050);
    }

    #[test]
    fn test_fraction_to_percent_clamps() {
        assert_eq!(fraction_to_percent(0.125), 12_500);
        assert_eq!(fraction_to_percent(-0.5), 0);
        assert_eq!(fraction_to_percent(1.5), 100_000);
    }
}
