#![forbid(unsafe_code)]

//! Backdrop fade animation.
//!
//! The dimmed backdrop behind a highlight fades in when a step is shown and
//! fades out when it is torn down. [`BackdropFade`] is a small deterministic
//! state machine driven by explicit `tick(delta)` calls; it never reads a
//! clock on its own.
//!
//! # Invariants
//!
//! - Progress is always in `[0.0, 1.0]`.
//! - [`BackdropFade::alpha`] is always in `[0.0, target_alpha]`.
//! - Reversing direction mid-flight preserves the visible alpha.
//! - [`BackdropFade::cancel`] leaves nothing running.
//!
//! # Failure Modes
//!
//! - Zero-duration fades complete on the next tick.
//! - Alpha presets outside `[0, 1]` are rejected by [`BackgroundAlpha::validate`].

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current phase of the backdrop lifecycle.
///
/// State machine: Hidden → FadingIn → Visible → FadingOut → Hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FadePhase {
    /// Nothing is drawn.
    #[default]
    Hidden,
    /// Alpha is rising toward the target.
    FadingIn,
    /// Alpha sits at the target.
    Visible,
    /// Alpha is falling toward zero.
    FadingOut,
}

impl FadePhase {
    /// Check if the backdrop should be drawn.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Check if a fade is in progress.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::FadingIn | Self::FadingOut)
    }
}

/// Easing curve applied to fade progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Decelerating; good for entrances.
    #[default]
    EaseOut,
    /// Accelerating; good for exits.
    EaseIn,
    /// S-curve.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Enter/exit durations for a step's backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationDuration {
    /// Fade-in duration.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub enter: Duration,
    /// Fade-out duration.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub exit: Duration,
}

impl AnimationDuration {
    /// Enter 700ms, exit 300ms.
    pub const DEFAULT: Self = Self::new(Duration::from_millis(700), Duration::from_millis(300));
    /// Enter 300ms, exit 150ms.
    pub const FAST: Self = Self::new(Duration::from_millis(300), Duration::from_millis(150));
    /// Enter 1200ms, exit 500ms.
    pub const SLOW: Self = Self::new(Duration::from_millis(1200), Duration::from_millis(500));
    /// Instant.
    pub const NONE: Self = Self::new(Duration::ZERO, Duration::ZERO);

    /// Create a custom duration pair.
    pub const fn new(enter: Duration, exit: Duration) -> Self {
        Self { enter, exit }
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Target opacity of the dimmed backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BackgroundAlpha {
    /// 0.3
    Light,
    /// 0.6
    #[default]
    Normal,
    /// 0.8
    Dark,
    /// Any value in `[0, 1]`.
    Custom(f32),
}

impl BackgroundAlpha {
    /// Resolved opacity.
    pub fn value(self) -> f32 {
        match self {
            Self::Light => 0.3,
            Self::Normal => 0.6,
            Self::Dark => 0.8,
            Self::Custom(a) => a,
        }
    }

    /// Returns the offending value when it is not a finite number in `[0, 1]`.
    pub fn validate(self) -> Result<f32, f32> {
        let a = self.value();
        if a.is_finite() && (0.0..=1.0).contains(&a) {
            Ok(a)
        } else {
            Err(a)
        }
    }
}

/// Fade state for one backdrop.
#[derive(Debug, Clone)]
pub struct BackdropFade {
    phase: FadePhase,
    elapsed: Duration,
    target_alpha: f32,
    durations: AnimationDuration,
    enter_easing: Easing,
    exit_easing: Easing,
}

impl Default for BackdropFade {
    fn default() -> Self {
        Self::new()
    }
}

impl BackdropFade {
    /// Create a hidden backdrop with default timing.
    pub fn new() -> Self {
        Self {
            phase: FadePhase::Hidden,
            elapsed: Duration::ZERO,
            target_alpha: BackgroundAlpha::Normal.value(),
            durations: AnimationDuration::DEFAULT,
            enter_easing: Easing::EaseOut,
            exit_easing: Easing::EaseIn,
        }
    }

    /// Set enter/exit easing curves.
    #[must_use]
    pub fn easing(mut self, enter: Easing, exit: Easing) -> Self {
        self.enter_easing = enter;
        self.exit_easing = exit;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Raw (un-eased) progress within the current phase, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        match self.phase {
            FadePhase::Hidden => 0.0,
            FadePhase::Visible => 1.0,
            FadePhase::FadingIn | FadePhase::FadingOut => {
                let total = self.phase_duration();
                if total.is_zero() {
                    1.0
                } else {
                    (self.elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
                }
            }
        }
    }

    /// Opacity the fade is heading toward while visible.
    pub fn target_alpha(&self) -> f32 {
        self.target_alpha
    }

    /// Check if a fade is in progress.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    /// Begin fading in toward `alpha` using `durations.enter`.
    ///
    /// When a fade-out is in flight, direction reverses from the currently
    /// visible alpha instead of restarting at zero.
    pub fn fade_in(&mut self, alpha: f32, durations: AnimationDuration) {
        let visible = self.alpha();
        self.target_alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        self.durations = durations;
        self.phase = FadePhase::FadingIn;
        self.elapsed = if self.target_alpha <= 0.0 {
            durations.enter
        } else if visible <= 0.0 {
            Duration::ZERO
        } else {
            let t = invert_easing(self.enter_easing, visible / self.target_alpha);
            durations.enter.mul_f32(t)
        };
    }

    /// Begin fading out using the exit duration of the last `fade_in`.
    pub fn fade_out(&mut self) {
        match self.phase {
            FadePhase::Hidden | FadePhase::FadingOut => {}
            FadePhase::Visible => {
                self.phase = FadePhase::FadingOut;
                self.elapsed = Duration::ZERO;
            }
            FadePhase::FadingIn => {
                let visible = self.alpha();
                self.phase = FadePhase::FadingOut;
                self.elapsed = if self.target_alpha > 0.0 {
                    let t = invert_easing(self.exit_easing, 1.0 - visible / self.target_alpha);
                    self.durations.exit.mul_f32(t)
                } else {
                    self.durations.exit
                };
            }
        }
    }

    /// Drop the fade immediately.
    pub fn cancel(&mut self) {
        self.phase = FadePhase::Hidden;
        self.elapsed = Duration::ZERO;
    }

    /// Advance by `delta`.
    ///
    /// Returns `true` if the phase changed (e.g. FadingIn → Visible).
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.phase.is_animating() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed < self.phase_duration() {
            return false;
        }
        self.phase = match self.phase {
            FadePhase::FadingIn => FadePhase::Visible,
            _ => FadePhase::Hidden,
        };
        self.elapsed = Duration::ZERO;
        true
    }

    /// Current backdrop opacity.
    pub fn alpha(&self) -> f32 {
        let fraction = match self.phase {
            FadePhase::Hidden => 0.0,
            FadePhase::Visible => 1.0,
            FadePhase::FadingIn => self.enter_easing.apply(self.progress()),
            FadePhase::FadingOut => 1.0 - self.exit_easing.apply(self.progress()),
        };
        (self.target_alpha * fraction).max(0.0).min(self.target_alpha)
    }

    fn phase_duration(&self) -> Duration {
        match self.phase {
            FadePhase::FadingOut => self.durations.exit,
            _ => self.durations.enter,
        }
    }
}

/// Find `t` such that `easing.apply(t) ≈ value` (bisection; curves are monotone).
fn invert_easing(easing: Easing, value: f32) -> f32 {
    let value = value.clamp(0.0, 1.0);
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..24 {
        let mid = (lo + hi) / 2.0;
        if easing.apply(mid) < value {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
