//! Analog stick scaling - pure math shared by the SAADC task and tests.

/// Per-axis calibration, normally taken from [`crate::config`].
#[derive(Clone, Copy, Debug)]
pub struct AxisConfig {
    /// Added to the raw sample before anything else.
    pub offset: i32,
    /// Absolute raw value below which the stick reads as centered.
    pub dead_zone: i32,
    /// Raw value mapping to full deflection.
    pub limit: i32,
    /// Flip the axis direction.
    pub invert: bool,
}

/// Midpoint byte for a centered stick.
pub const AXIS_CENTER: u8 = 128;

/// Scale one raw ADC sample to the unsigned report byte.
///
/// Offset correction and inversion first, then the dead zone snaps small
/// deflections to the midpoint; everything else maps linearly into
/// 0..=255 around 128, clamped at the rails.
pub fn scale_axis(raw: i16, cfg: &AxisConfig) -> u8 {
    let mut v = raw as i32 + cfg.offset;

    if cfg.invert {
        v = -v;
    }

    if v.abs() < cfg.dead_zone {
        return AXIS_CENTER;
    }

    let out = v * i8::MAX as i32 / cfg.limit + AXIS_CENTER as i32;
    out.clamp(0, u8::MAX as i32) as u8
}
