//! Core constants, unit conversions, and planar geometry shared across the
//! refueling mission planner workspace.

/// Physical constants expressed in SI units.
pub mod constants {
    /// Standard gravity used by the rocket equation (m/s²).
    pub const G0: f64 = 9.81;
    /// One full revolution (radians).
    pub const TAU: f64 = 2.0 * std::f64::consts::PI;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Angle arithmetic on the unit circle.
pub mod angles {
    use super::constants::TAU;

    /// Wrap an angle into [0, 2π).
    #[inline]
    pub fn normalize(angle_rad: f64) -> f64 {
        let wrapped = angle_rad % TAU;
        if wrapped < 0.0 { wrapped + TAU } else { wrapped }
    }

    /// Smallest separation between two angles, in [0, π].
    #[inline]
    pub fn separation(a_rad: f64, b_rad: f64) -> f64 {
        let diff = normalize(a_rad - b_rad);
        if diff > std::f64::consts::PI {
            TAU - diff
        } else {
            diff
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn normalize_wraps_negative_angles() {
            let a = normalize(-std::f64::consts::PI / 2.0);
            assert!((a - 1.5 * std::f64::consts::PI).abs() < 1e-12);
        }

        #[test]
        fn separation_is_symmetric_and_bounded() {
            let s1 = separation(0.1, 6.2);
            let s2 = separation(6.2, 0.1);
            assert!((s1 - s2).abs() < 1e-12);
            assert!(s1 <= std::f64::consts::PI);
        }
    }
}

/// Minimal 2-D point helpers to avoid ad-hoc tuple math everywhere.
pub mod point {
    /// Alias for a planar position in metres.
    pub type Point2 = [f64; 2];

    /// Cartesian position on a circle of radius `r` at angle `theta`.
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Point2 {
        [r * theta.cos(), r * theta.sin()]
    }

    /// Euclidean norm of a point interpreted as a vector.
    #[inline]
    pub fn norm(p: &Point2) -> f64 {
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    }

    /// Polar angle of a point, in (−π, π].
    #[inline]
    pub fn angle(p: &Point2) -> f64 {
        p[1].atan2(p[0])
    }
}
