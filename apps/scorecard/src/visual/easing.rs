#![allow(dead_code)]

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function with fixed end
/// points (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    name: &'static str,
}

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 40;
const EPSILON: f64 = 1e-7;

impl CubicBezier {
    pub const EASE_IN_OUT: CubicBezier = CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
        name: "easeInOut",
    };

    pub const LINEAR: CubicBezier = CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
        name: "linear",
    };

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Maps linear time `t` ∈ `[0, 1]` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_parameter(t);
        bezier(s, self.y1, self.y2)
    }

    /// Finds the curve parameter whose x coordinate is `x`.
    fn solve_parameter(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier(s, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        // Newton stalled on a flat segment: x(s) is monotonic on [0, 1], so bisect.
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = bezier(s, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

/// One coordinate of the cubic with end points 0 and 1 and inner points `p1`, `p2`.
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_points_are_fixed() {
        assert_eq!(CubicBezier::EASE_IN_OUT.apply(0.0), 0.0);
        assert_eq!(CubicBezier::EASE_IN_OUT.apply(1.0), 1.0);
        assert_eq!(CubicBezier::EASE_IN_OUT.apply(-3.0), 0.0);
        assert_eq!(CubicBezier::EASE_IN_OUT.apply(7.0), 1.0);
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert!((CubicBezier::LINEAR.apply(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ease_in_out_is_slow_at_the_ends() {
        let ease = CubicBezier::EASE_IN_OUT;
        assert!(ease.apply(0.1) < 0.1);
        assert!(ease.apply(0.9) > 0.9);
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_ease_in_out_is_monotonic() {
        let ease = CubicBezier::EASE_IN_OUT;
        let mut previous = 0.0;
        for i in 0..=100 {
            let y = ease.apply(f64::from(i) / 100.0);
            assert!(y + 1e-9 >= previous);
            previous = y;
        }
    }
}
