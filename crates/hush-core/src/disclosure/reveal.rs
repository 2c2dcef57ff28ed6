//! Progressive, sentence-windowed reveal of decrypted text.
//!
//! [`RevealEngine::start`] spawns a timer task that discloses the text one
//! character per step at a randomized pace. Every step publishes a
//! [`RevealFrame`] holding the sentence-window rendering of the current
//! prefix, never the raw prefix.
//!
//! Phases: `Idle -> Revealing -> Complete`, with `Revealing -> Cancelled` on
//! [`RevealEngine::cancel`] or when a new reveal starts. A cancelled reveal
//! cannot be resumed.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use zeroize::Zeroizing;

use crate::disclosure::sentence::{render_window, WindowPolicy};
use crate::disclosure::timer::{publish_if_current, Stamped, TimerSlot};

/// Reveal pacing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealSpeed {
    #[default]
    Fast,
    Slow,
}

impl RevealSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for RevealSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevealSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "slow" => Ok(Self::Slow),
            other => Err(format!(
                "Unknown reveal speed \"{}\" (expected fast or slow)",
                other
            )),
        }
    }
}

/// Half-open range `[min_ms, max_ms)` a step delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl StepRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    fn sample(&self, rng: &mut impl Rng) -> Duration {
        let ms = if self.max_ms > self.min_ms {
            rng.gen_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        };
        Duration::from_millis(ms)
    }
}

/// Step delays for each speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub fast: StepRange,
    pub slow: StepRange,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            fast: StepRange::new(12, 30),
            slow: StepRange::new(40, 70),
        }
    }
}

impl RevealTiming {
    pub fn range(&self, speed: RevealSpeed) -> StepRange {
        match speed {
            RevealSpeed::Fast => self.fast,
            RevealSpeed::Slow => self.slow,
        }
    }
}

/// Lifecycle of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Revealing,
    Complete,
    Cancelled,
}

/// What the display should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    /// Masked rendering of the revealed prefix.
    pub text: String,
    /// Characters of the plaintext revealed so far.
    pub revealed: usize,
    /// Characters in the full plaintext.
    pub total: usize,
    pub phase: RevealPhase,
    epoch: u64,
}

impl RevealFrame {
    fn idle() -> Self {
        Self {
            text: String::new(),
            revealed: 0,
            total: 0,
            phase: RevealPhase::Idle,
            epoch: 0,
        }
    }
}

impl Stamped for RevealFrame {
    fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Drives at most one reveal at a time.
///
/// Must be used from within a Tokio runtime.
pub struct RevealEngine {
    policy: WindowPolicy,
    timing: RevealTiming,
    epoch: u64,
    frames: Arc<watch::Sender<RevealFrame>>,
    timer: TimerSlot,
}

impl RevealEngine {
    pub fn new(policy: WindowPolicy) -> Self {
        let (tx, _rx) = watch::channel(RevealFrame::idle());
        Self {
            policy,
            timing: RevealTiming::default(),
            epoch: 0,
            frames: Arc::new(tx),
            timer: TimerSlot::new("reveal"),
        }
    }

    /// Override the step delays.
    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Start revealing `text`, cancelling any reveal in progress.
    ///
    /// Empty text completes immediately.
    pub fn start(&mut self, text: &str, speed: RevealSpeed) {
        self.cancel();

        self.epoch += 1;
        let epoch = self.epoch;
        let total = text.chars().count();
        let phase = if total == 0 {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        };
        self.frames.send_modify(|frame| {
            *frame = RevealFrame {
                text: String::new(),
                revealed: 0,
                total,
                phase,
                epoch,
            };
        });
        tracing::debug!(chars = total, speed = %speed, "reveal started");

        if total == 0 {
            return;
        }

        let run = RevealRun {
            text: Zeroizing::new(text.to_owned()),
            range: self.timing.range(speed),
            policy: self.policy,
            epoch,
            frames: Arc::clone(&self.frames),
        };
        self.timer.arm(run.play());
    }

    /// Cancel the reveal in progress, if any.
    ///
    /// No frame from the cancelled run is published after this returns. The
    /// last published text stays as it was.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.epoch += 1;
        let epoch = self.epoch;
        let cancelled = self.frames.send_if_modified(|frame| {
            frame.epoch = epoch;
            if frame.phase == RevealPhase::Revealing {
                frame.phase = RevealPhase::Cancelled;
                true
            } else {
                false
            }
        });
        if cancelled {
            tracing::debug!("reveal cancelled");
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.frames.borrow().phase
    }

    /// Latest published frame.
    pub fn current(&self) -> RevealFrame {
        self.frames.borrow().clone()
    }

    /// Observe frames as they are published.
    pub fn subscribe(&self) -> watch::Receiver<RevealFrame> {
        self.frames.subscribe()
    }

    /// Whether a reveal timer is pending.
    pub fn is_running(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn policy(&self) -> &WindowPolicy {
        &self.policy
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new(WindowPolicy::default())
    }
}

impl fmt::Debug for RevealEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealEngine")
            .field("policy", &self.policy)
            .field("timing", &self.timing)
            .field("phase", &self.phase())
            .finish()
    }
}

/// State owned by one reveal task.
struct RevealRun {
    text: Zeroizing<String>,
    range: StepRange,
    policy: WindowPolicy,
    epoch: u64,
    frames: Arc<watch::Sender<RevealFrame>>,
}

impl RevealRun {
    async fn play(self) {
        let mut rng = StdRng::from_entropy();
        let ends: Vec<usize> = self
            .text
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(self.text.len()))
            .collect();
        let total = ends.len();

        for (step, &end) in ends.iter().enumerate() {
            tokio::time::sleep(self.range.sample(&mut rng)).await;

            let revealed = step + 1;
            let rendered = render_window(&self.text[..end], &self.policy);
            let published = publish_if_current(&*self.frames, self.epoch, |frame| {
                frame.text = rendered;
                frame.revealed = revealed;
                if revealed == total {
                    frame.phase = RevealPhase::Complete;
                }
            });
            if !published {
                return;
            }
        }
        tracing::debug!(chars = total, "reveal complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_parse() {
        assert_eq!("fast".parse::<RevealSpeed>().unwrap(), RevealSpeed::Fast);
        assert_eq!(" SLOW ".parse::<RevealSpeed>().unwrap(), RevealSpeed::Slow);
        assert!("medium".parse::<RevealSpeed>().is_err());
    }

    #[test]
    fn test_step_range_sample_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = RevealTiming::default().range(RevealSpeed::Slow);
        for _ in 0..200 {
            let delay = range.sample(&mut rng);
            assert!(delay >= Duration::from_millis(40));
            assert!(delay < Duration::from_millis(70));
        }
    }

    #[test]
    fn test_step_range_degenerate() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            StepRange::new(5, 5).sample(&mut rng),
            Duration::from_millis(5)
        );
    }

    #[tokio::test]
    async fn test_new_engine_is_idle() {
        let engine = RevealEngine::default();
        assert_eq!(engine.phase(), RevealPhase::Idle);
        assert_eq!(engine.current().text, "");
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn test_empty_text_completes_immediately() {
        let mut engine = RevealEngine::default();
        engine.start("", RevealSpeed::Fast);
        assert_eq!(engine.phase(), RevealPhase::Complete);
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_when_idle_is_noop() {
        let mut engine = RevealEngine::default();
        engine.cancel();
        assert_eq!(engine.phase(), RevealPhase::Idle);
    }
}
