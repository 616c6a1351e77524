use glam::Vec3;

/// Index of a sprite in its world, in declaration order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub(crate) usize);

impl SpriteId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-sprite animation parameters.
///
/// Periods are expressed in phase units (frames), not seconds: the shared
/// phase advances by one per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Motion {
    /// Base position and scale only.
    Fixed,

    /// Accumulates a circular offset: each frame moves `dt * radius` along the
    /// direction `(cos(phase / period), sin(phase / period))`.
    Orbit { radius: f32, period: f32 },

    /// Placed at a constant offset from another sprite's placement.
    ///
    /// The leader must not be a follower itself.
    Follow { leader: SpriteId, offset: Vec3 },

    /// Accumulates `speed * dt` radians around [`spin_axis`].
    Spin { speed: f32 },

    /// Heartbeat scaling by [`pulse_factor`] on top of the constant scale.
    Pulse { amplitude: f32, period: f32 },
}

impl Motion {
    #[inline]
    pub fn leader(&self) -> Option<SpriteId> {
        match self {
            Motion::Follow { leader, .. } => Some(*leader),
            _ => None,
        }
    }

    #[inline]
    pub fn is_follower(&self) -> bool {
        self.leader().is_some()
    }

    /// Finite numeric parameters and non-zero periods.
    pub fn is_valid(&self) -> bool {
        match *self {
            Motion::Fixed => true,
            Motion::Orbit { radius, period } => radius.is_finite() && valid_period(period),
            Motion::Follow { offset, .. } => offset.is_finite(),
            Motion::Spin { speed } => speed.is_finite(),
            Motion::Pulse { amplitude, period } => amplitude.is_finite() && valid_period(period),
        }
    }
}

#[inline]
fn valid_period(period: f32) -> bool {
    period.is_finite() && period != 0.0
}

/// Offset accumulated by an orbiting sprite during one frame.
#[inline]
pub fn orbit_step(phase: f32, period: f32, radius: f32, dt: f32) -> Vec3 {
    let (sin, cos) = (phase / period).sin_cos();
    Vec3::new(cos, sin, 0.0) * (dt * radius)
}

/// Rotation axis of a spinning sprite.
///
/// The accumulated angle doubles as the axis's y component, so the axis is
/// `+Y` for any positive angle and degenerate at exactly zero (the composer
/// substitutes `+Z` there). The sprite therefore turns about its vertical axis.
#[inline]
pub fn spin_axis(angle: f32) -> Vec3 {
    Vec3::new(0.0, angle, 0.0)
}

/// Uniform scale factor `1 + amplitude * cos(phase / period)`.
#[inline]
pub fn pulse_factor(phase: f32, amplitude: f32, period: f32) -> f32 {
    1.0 + amplitude * (phase / period).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    // ── pulse ─────────────────────────────────────────────────────────────

    #[test]
    fn pulse_stays_within_amplitude() {
        let (amp, period) = (0.1, 200.0);
        for phase in 0..5000 {
            let f = pulse_factor(phase as f32, amp, period);
            assert!(f >= 1.0 - amp - 1e-6 && f <= 1.0 + amp + 1e-6, "phase {phase}: {f}");
        }
    }

    #[test]
    fn pulse_peaks_at_even_multiples_of_pi() {
        let (amp, period) = (0.1, 200.0);
        assert_eq!(pulse_factor(0.0, amp, period), 1.0 + amp);
        let f = pulse_factor(2.0 * PI * period, amp, period);
        assert!((f - (1.0 + amp)).abs() < 1e-5);
    }

    #[test]
    fn pulse_bottoms_at_odd_multiples_of_pi() {
        let f = pulse_factor(PI * 200.0, 0.1, 200.0);
        assert!((f - 0.9).abs() < 1e-5);
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    #[test]
    fn orbit_step_length_is_dt_times_radius() {
        for phase in [0.0, 17.0, 123.0, 999.0] {
            let step = orbit_step(phase, 200.0, 2.0, 0.016);
            assert!((step.length() - 0.032).abs() < 1e-6);
            assert_eq!(step.z, 0.0);
        }
    }

    #[test]
    fn orbit_step_starts_along_x() {
        let step = orbit_step(0.0, 200.0, 2.0, 0.5);
        assert_eq!(step, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn orbit_step_is_zero_without_time() {
        assert_eq!(orbit_step(42.0, 200.0, 2.0, 0.0), Vec3::ZERO);
    }

    // ── spin ──────────────────────────────────────────────────────────────

    #[test]
    fn spin_axis_tracks_angle() {
        assert_eq!(spin_axis(0.0), Vec3::ZERO);
        assert_eq!(spin_axis(1.5), Vec3::new(0.0, 1.5, 0.0));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn zero_period_is_invalid() {
        assert!(!Motion::Orbit { radius: 1.0, period: 0.0 }.is_valid());
        assert!(!Motion::Pulse { amplitude: 0.1, period: 0.0 }.is_valid());
        assert!(Motion::Pulse { amplitude: 0.1, period: 200.0 }.is_valid());
    }

    #[test]
    fn non_finite_parameters_are_invalid() {
        assert!(!Motion::Spin { speed: f32::NAN }.is_valid());
        let follow = Motion::Follow { leader: SpriteId(0), offset: Vec3::new(f32::INFINITY, 0.0, 0.0) };
        assert!(!follow.is_valid());
    }

    #[test]
    fn only_follow_has_a_leader() {
        assert_eq!(Motion::Fixed.leader(), None);
        let follow = Motion::Follow { leader: SpriteId(3), offset: Vec3::X };
        assert_eq!(follow.leader(), Some(SpriteId(3)));
        assert!(follow.is_follower());
    }
}
