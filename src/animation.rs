//! Scroll-triggered entrance tweens.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadInOut,
    CubicOut,
    Power3Out,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            delay_ms: 0.0,
            duration_ms,
            easing,
        }
    }

    pub fn delayed(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn sample(&self, elapsed_ms: f64) -> f64 {
        let active = elapsed_ms - self.delay_ms;
        if active <= 0.0 {
            return self.from;
        }
        if self.duration_ms <= 0.0 || active >= self.duration_ms {
            return self.to;
        }

        let progress = self.easing.apply(active / self.duration_ms);
        self.from + (self.to - self.from) * progress
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.delay_ms + self.duration_ms.max(0.0)
    }
}

/// Fires exactly once, the first time the visible ratio reaches the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    fired: bool,
}

impl VisibilityTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired: false,
        }
    }

    pub fn observe(&mut self, visible_ratio: f64) -> bool {
        if self.fired || visible_ratio < self.threshold {
            return false;
        }

        self.fired = true;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entrance {
    FadeUp,
    FadeLeft,
    FadeRight,
    ScaleIn,
}

const ENTRANCE_DURATION_MS: f64 = 800.0;
const ENTRANCE_DISTANCE_PX: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntranceTween {
    opacity: Tween,
    shift: Tween,
    scale: Tween,
    entrance: Entrance,
}

impl Entrance {
    pub fn tween(self, delay_ms: f64) -> EntranceTween {
        let opacity = Tween::new(0.0, 1.0, ENTRANCE_DURATION_MS, Easing::Power3Out).delayed(delay_ms);
        let (shift_from, scale_from) = match self {
            Self::FadeUp | Self::FadeLeft => (ENTRANCE_DISTANCE_PX, 1.0),
            Self::FadeRight => (-ENTRANCE_DISTANCE_PX, 1.0),
            Self::ScaleIn => (0.0, 0.9),
        };

        EntranceTween {
            opacity,
            shift: Tween::new(shift_from, 0.0, ENTRANCE_DURATION_MS, Easing::Power3Out)
                .delayed(delay_ms),
            scale: Tween::new(scale_from, 1.0, ENTRANCE_DURATION_MS, Easing::CubicOut)
                .delayed(delay_ms),
            entrance: self,
        }
    }
}

impl EntranceTween {
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.opacity.is_finished(elapsed_ms)
    }

    /// Inline style for the element at `elapsed_ms` after the trigger fired.
    pub fn style_at(&self, elapsed_ms: f64) -> String {
        let opacity = self.opacity.sample(elapsed_ms);
        let shift = self.shift.sample(elapsed_ms);
        let scale = self.scale.sample(elapsed_ms);
        let translate = match self.entrance {
            Entrance::FadeUp => format!("translate3d(0, {shift:.2}px, 0)"),
            Entrance::FadeLeft | Entrance::FadeRight => format!("translate3d({shift:.2}px, 0, 0)"),
            Entrance::ScaleIn => "translate3d(0, 0, 0)".to_string(),
        };

        format!("opacity: {opacity:.3}; transform: {translate} scale({scale:.3});")
    }

    pub fn initial_style(&self) -> String {
        self.style_at(0.0)
    }

    /// Style to write for this frame, or `None` once settled and the inline style should go.
    pub fn frame_style(&self, elapsed_ms: f64) -> Option<String> {
        (!self.is_finished(elapsed_ms)).then(|| self.style_at(elapsed_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_hit_both_endpoints() {
        for easing in [Easing::Linear, Easing::QuadInOut, Easing::CubicOut, Easing::Power3Out] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
            assert_eq!(easing.apply(-1.0), 0.0);
        }
    }

    #[test]
    fn easings_are_monotonic() {
        for easing in [Easing::Linear, Easing::QuadInOut, Easing::CubicOut, Easing::Power3Out] {
            let mut last = 0.0;
            for step in 0..=100 {
                let value = easing.apply(f64::from(step) / 100.0);
                assert!(value >= last);
                last = value;
            }
        }
    }

    #[test]
    fn tween_respects_delay_and_duration() {
        let tween = Tween::new(10.0, 20.0, 100.0, Easing::Linear).delayed(50.0);

        assert_eq!(tween.sample(0.0), 10.0);
        assert_eq!(tween.sample(50.0), 10.0);
        assert_eq!(tween.sample(100.0), 15.0);
        assert_eq!(tween.sample(150.0), 20.0);
        assert_eq!(tween.sample(10_000.0), 20.0);
        assert!(!tween.is_finished(149.0));
        assert!(tween.is_finished(150.0));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let tween = Tween::new(0.0, 1.0, 0.0, Easing::CubicOut);
        assert_eq!(tween.sample(0.1), 1.0);
        assert!(tween.is_finished(0.0));
    }

    #[test]
    fn trigger_fires_once_at_threshold() {
        let mut trigger = VisibilityTrigger::new(0.2);

        assert!(!trigger.observe(0.1));
        assert!(trigger.observe(0.2));
        assert!(!trigger.observe(0.9));
        assert!(!trigger.observe(1.0));
    }

    #[test]
    fn entrance_starts_hidden_and_ends_in_place() {
        let tween = Entrance::FadeUp.tween(0.0);

        assert_eq!(
            tween.initial_style(),
            "opacity: 0.000; transform: translate3d(0, 40.00px, 0) scale(1.000);"
        );
        assert_eq!(
            tween.style_at(ENTRANCE_DURATION_MS),
            "opacity: 1.000; transform: translate3d(0, 0.00px, 0) scale(1.000);"
        );
    }

    #[test]
    fn settled_entrance_leaves_no_inline_style() {
        let tween = Entrance::FadeUp.tween(0.0);

        assert!(tween.frame_style(ENTRANCE_DURATION_MS / 2.0).is_some());
        assert_eq!(tween.frame_style(ENTRANCE_DURATION_MS), None);
        assert_eq!(tween.frame_style(10_000.0), None);
    }

    #[test]
    fn fade_right_slides_in_from_the_left() {
        let tween = Entrance::FadeRight.tween(100.0);
        assert!(tween.style_at(0.0).contains("translate3d(-40.00px, 0, 0)"));
        assert!(!tween.is_finished(ENTRANCE_DURATION_MS));
        assert!(tween.is_finished(ENTRANCE_DURATION_MS + 100.0));
    }
}
