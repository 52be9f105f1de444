//! # Calculator Session
//!
//! A [`Session`] is what a front-end binds to: one input record, its
//! current breakdown, the reset controller and the timers it runs on.
//! Every mutation recomputes the breakdown before returning, so a host
//! that reads [`Session::output`] right after an edit always sees values
//! consistent with [`Session::input`].
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use cfee_core::input::Field;
//! use cfee_core::reset::ResetMode;
//! use cfee_core::session::Session;
//! use cfee_core::settings::Settings;
//!
//! let mut session = Session::with_seed(Settings::default(), 1);
//! session.set_raw(Field::BuyAmount, "1");
//! assert!(session.output().pnl_percent_needed > 0.0);
//!
//! session.request_reset();
//! assert_eq!(session.mode(), ResetMode::Armed);
//! assert_eq!(session.output().pnl_percent_needed, 0.0);
//!
//! session.advance(Duration::from_secs(5));
//! assert_eq!(session.mode(), ResetMode::Idle);
//! ```

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::calculations::break_even::{recompute, FeeBreakdown};
use crate::errors::CalcResult;
use crate::input::{Field, FeeInput};
use crate::reset::{ResetController, ResetMode, ResetTransition};
use crate::settings::Settings;
use crate::timer::{TimerKind, TimerQueue};

/// Input record, derived output and reset state for one user.
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    input: FeeInput,
    output: FeeBreakdown,
    reset: ResetController,
    timers: TimerQueue,
    rng: StdRng,
}

impl Session {
    /// Start a session with default inputs and an entropy-seeded RNG.
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Start a session with a fixed RNG seed (deterministic messages).
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, rng: StdRng) -> Self {
        let input = FeeInput::DEFAULT;
        Session {
            reset: ResetController::new(&settings),
            settings,
            input,
            output: recompute(&input),
            timers: TimerQueue::new(),
            rng,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &FeeInput {
        &self.input
    }

    pub fn output(&self) -> &FeeBreakdown {
        &self.output
    }

    pub fn mode(&self) -> ResetMode {
        self.reset.mode()
    }

    /// Text for the reset control
    pub fn label(&self) -> &str {
        self.reset.label()
    }

    /// True while either reset timer is live; hosts only need a clock
    /// tick while this holds.
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Live timers of `kind`
    pub fn live_timers(&self, kind: TimerKind) -> usize {
        self.timers.live_count(kind)
    }

    /// Set a field from a number (coerced to non-negative).
    pub fn set_field(&mut self, field: Field, value: f64) {
        self.input.set(field, value);
        self.refresh();
    }

    /// Set a field from raw form text (empty or invalid becomes 0).
    pub fn set_raw(&mut self, field: Field, raw: &str) {
        self.input.set_raw(field, raw);
        self.refresh();
    }

    /// Set a field by its key or alias.
    pub fn set_by_name(&mut self, name: &str, raw: &str) -> CalcResult<Field> {
        let field: Field = name.parse()?;
        self.set_raw(field, raw);
        Ok(field)
    }

    /// Replace the whole input record. Every field is coerced on the way
    /// in, as with [`Session::set_field`].
    pub fn replace_input(&mut self, input: FeeInput) {
        self.input = input.coerced();
        self.refresh();
    }

    /// Time left before the live reset timer fires, if one is pending
    pub fn time_remaining(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.timers.now()))
    }

    /// Reset control activated.
    pub fn request_reset(&mut self) -> ResetTransition {
        let transition = self
            .reset
            .request_reset(&mut self.input, &mut self.timers, &mut self.rng);
        self.refresh();
        transition
    }

    /// Pointer or focus left the reset control.
    pub fn cancel_pending(&mut self) -> bool {
        self.reset.cancel_pending(&mut self.timers)
    }

    /// Advance the session clock to `elapsed` since the session started
    /// and deliver due timers. Returns how many the controller acted on.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut handled = 0;
        for handle in self.timers.advance_to(elapsed) {
            if self.reset.on_timer(handle) {
                handled += 1;
            }
        }
        handled
    }

    fn refresh(&mut self) {
        self.output = recompute(&self.input);
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Settings::default())
    }
}
