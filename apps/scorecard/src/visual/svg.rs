//! SVG rendering of the score ring, animated with SMIL so it needs no script.

use super::ring::{ArcAnimation, RingGeometry};

const TRACK_STROKE: &str = "rgba(255, 255, 255, 0.1)";
const GRADIENT_FROM: &str = "#ff6ec7";
const GRADIENT_TO: &str = "#05d9e8";

/// Renders the background track, the animated foreground arc and the score label.
///
/// The arc group is rotated −90° about the centre so the sweep starts at 12 o'clock.
pub fn render_ring_svg(ring: &RingGeometry, animation: &ArcAnimation) -> String {
    let [x1, y1, x2, y2] = animation.easing.control_points();
    let c = ring.center;
    let label_size = (ring.size * 0.16).round();

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" role="img" aria-label="Score {score} out of 100">
<defs><linearGradient id="neon-gradient" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" stop-color="{from}"/><stop offset="100%" stop-color="{to}"/></linearGradient></defs>
<g transform="rotate(-90 {c} {c})">
<circle cx="{c}" cy="{c}" r="{r:.3}" stroke="{track}" stroke-width="{sw}" fill="transparent"/>
<circle cx="{c}" cy="{c}" r="{r:.3}" stroke="url(#neon-gradient)" stroke-width="{sw}" fill="transparent" stroke-linecap="round" stroke-dasharray="{circ:.3}" stroke-dashoffset="{start:.3}">
<animate attributeName="stroke-dashoffset" from="{start:.3}" to="{end:.3}" begin="{delay}s" dur="{dur}s" fill="freeze" calcMode="spline" keyTimes="0;1" keySplines="{x1} {y1} {x2} {y2}"/>
</circle>
</g>
<text x="{c}" y="{c}" text-anchor="middle" dominant-baseline="central" font-size="{label_size}" font-weight="bold" fill="#ffffff">{score}</text>
</svg>"##,
        size = ring.size,
        score = ring.score.round(),
        from = GRADIENT_FROM,
        to = GRADIENT_TO,
        track = TRACK_STROKE,
        r = ring.radius,
        sw = ring.stroke_width,
        circ = ring.circumference,
        start = ring.initial_offset,
        end = ring.target_offset,
        delay = animation.delay.as_secs_f64(),
        dur = animation.duration.as_secs_f64(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::ring::{DEFAULT_SIZE, DEFAULT_STROKE_WIDTH};

    #[test]
    fn test_svg_animates_from_circumference_to_target() {
        let ring = RingGeometry::new(72.0, DEFAULT_SIZE, DEFAULT_STROKE_WIDTH);
        let svg = render_ring_svg(&ring, &ArcAnimation::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(&format!(r#"from="{:.3}""#, ring.circumference)));
        assert!(svg.contains(&format!(r#"to="{:.3}""#, ring.target_offset)));
        assert!(svg.contains(r#"begin="0.5s" dur="2s""#));
        assert!(svg.contains(r#"keySplines="0.42 0 0.58 1""#));
        assert!(svg.contains(">72</text>"));
    }

    #[test]
    fn test_svg_has_track_and_arc() {
        let ring = RingGeometry::new(0.0, DEFAULT_SIZE, DEFAULT_STROKE_WIDTH);
        let svg = render_ring_svg(&ring, &ArcAnimation::default());
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(r#"rotate(-90 100 100)"#));
    }
}
