//! Time-based interpolation for the entry and transition animations.
//!
//! Animations are cosmetic: every one of them reports exactly its target value once it has
//! finished, so settled geometry never depends on easing maths.

/// Cubic bezier easing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Maps linear progress `fraction` to eased progress.
    pub fn transform(&self, fraction: f64) -> f64 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        // Newton first, bisection if the slope flattens out.
        let mut t = fraction;
        for _ in 0..8 {
            if !(0.0..=1.0).contains(&t) {
                break;
            }
            let x = Self::sample(self.x1, self.x2, t) - fraction;
            if x.abs() < 1e-7 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= x / d;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = fraction;
        for _ in 0..64 {
            let x = Self::sample(self.x1, self.x2, t);
            if (x - fraction).abs() < 1e-7 {
                break;
            }
            if x < fraction {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Decelerating curve used for the pie radius and the slider thumb.
    LinearOutSlowIn,
    /// Standard curve used for the switch highlight and pie rotation.
    FastOutSlowIn,
}

impl Easing {
    pub fn transform(&self, fraction: f64) -> f64 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::LinearOutSlowIn => CubicBezier::new(0.0, 0.0, 0.2, 1.0).transform(fraction),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0).transform(fraction),
        }
    }
}

/// Damped harmonic oscillator with unit mass moving from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub damping_ratio: f64,
    pub stiffness: f64,
}

impl Spring {
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f64 = 0.5;
    pub const STIFFNESS_LOW: f64 = 200.0;

    /// Displacement from the target below which the spring counts as settled.
    const SETTLE_THRESHOLD: f64 = 1e-3;

    pub const fn new(damping_ratio: f64, stiffness: f64) -> Self {
        Self {
            damping_ratio,
            stiffness,
        }
    }

    pub const fn medium_bouncy_low() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_LOW)
    }

    fn natural_frequency(&self) -> f64 {
        self.stiffness.max(f64::EPSILON).sqrt()
    }

    /// Progress (0 at rest, 1 at target) `seconds` after release. May overshoot 1.
    pub fn progress(&self, seconds: f64) -> f64 {
        if seconds <= 0.0 {
            return 0.0;
        }
        let w = self.natural_frequency();
        let z = self.damping_ratio.max(0.0);

        if z < 1.0 {
            let wd = w * (1.0 - z * z).sqrt();
            let envelope = (-z * w * seconds).exp();
            1.0 - envelope * ((wd * seconds).cos() + (z * w / wd) * (wd * seconds).sin())
        } else if z == 1.0 {
            1.0 - (-w * seconds).exp() * (1.0 + w * seconds)
        } else {
            let root = (z * z - 1.0).sqrt();
            let r1 = -w * (z - root);
            let r2 = -w * (z + root);
            1.0 - (r2 * (r1 * seconds).exp() - r1 * (r2 * seconds).exp()) / (r2 - r1)
        }
    }

    /// Time after which the displacement envelope stays under the settle threshold.
    pub fn settle_ms(&self) -> u64 {
        let w = self.natural_frequency();
        let z = self.damping_ratio.max(0.0);
        let decay = if z < 1.0 {
            z * w
        } else {
            // Slowest exponential of a critically/over-damped spring.
            w * (z - (z * z - 1.0).max(0.0).sqrt())
        };
        if decay <= 0.0 {
            // Undamped springs never settle on their own; cap them.
            return 10_000;
        }
        let seconds = -Self::SETTLE_THRESHOLD.ln() / decay;
        (seconds * 1000.0).ceil() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    Tween { duration_ms: u64, easing: Easing },
    Spring(Spring),
}

impl AnimationSpec {
    pub fn tween(duration_ms: u64, easing: Easing) -> Self {
        AnimationSpec::Tween {
            duration_ms,
            easing,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            AnimationSpec::Tween { duration_ms, .. } => *duration_ms,
            AnimationSpec::Spring(spring) => spring.settle_ms(),
        }
    }

    /// Eased progress for a point `elapsed_ms` into the animation.
    fn progress(&self, elapsed_ms: u64) -> f64 {
        match self {
            AnimationSpec::Tween {
                duration_ms,
                easing,
            } => {
                if *duration_ms == 0 {
                    return 1.0;
                }
                easing.transform(elapsed_ms as f64 / *duration_ms as f64)
            }
            AnimationSpec::Spring(spring) => spring.progress(elapsed_ms as f64 / 1000.0),
        }
    }
}

/// A single value moving from `from` to `to` after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub from: f64,
    pub to: f64,
    pub delay_ms: u64,
    pub spec: AnimationSpec,
}

impl Animation {
    pub fn new(from: f64, to: f64, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            delay_ms: 0,
            spec,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn end_ms(&self) -> u64 {
        self.delay_ms + self.spec.duration_ms()
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.end_ms()
    }

    pub fn value_at(&self, elapsed_ms: u64) -> f64 {
        if elapsed_ms <= self.delay_ms {
            return self.from;
        }
        if self.is_finished(elapsed_ms) {
            return self.to;
        }
        let progress = self.spec.progress(elapsed_ms - self.delay_ms);
        self.from + (self.to - self.from) * progress
    }
}
