use std::f32::consts::PI;

/// Smooth in-out curve used for camera moves.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out with a decaying wobble. Overshoots before settling at 1.
pub fn bounce(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv.powi(3) - 0.1 * (8.0 * PI * t).sin() * inv.powi(2)
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn curves_pin_their_endpoints() {
        assert!(ease_in_out_quad(0.0).abs() < EPS);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < EPS);
        assert!(bounce(0.0).abs() < EPS);
        assert!((bounce(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn ease_in_out_is_symmetric_and_monotonic() {
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < EPS);
        let mut prev = 0.0;
        for i in 1..=100 {
            let t = i as f32 / 100.0;
            let v = ease_in_out_quad(t);
            assert!(v >= prev);
            assert!((v + ease_in_out_quad(1.0 - t) - 1.0).abs() < 1e-4);
            prev = v;
        }
    }

    #[test]
    fn bounce_overshoots_before_settling() {
        let peak = (0..=100)
            .map(|i| bounce(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn inputs_are_clamped() {
        assert_eq!(ease_in_out_quad(-1.0), 0.0);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
        assert!((bounce(3.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    }
}
