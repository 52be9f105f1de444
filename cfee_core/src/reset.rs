//! # Confirmable Reset
//!
//! Resetting every input to its default is destructive, so it takes two
//! requests. The first one arms the reset (and zeroes the buy amount as
//! visible feedback); a second request inside the arming window confirms
//! it, restores the defaults and shows a short acknowledgement.
//!
//! ```text
//!            request                      request (within window)
//!   Idle ─────────────────▶ Armed ──────────────────────────────▶ Announcing
//!    ▲                       │  arming timer / pointer leaves          │
//!    └───────────────────────┘                                         │
//!    ▲          announcement timer / pointer leaves                    │
//!    └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each timer kind has at most one live instance. Starting a timer always
//! cancels the previous one of the same kind first, and a firing handle
//! that is not the live one is ignored.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use cfee_core::input::FeeInput;
//! use cfee_core::reset::{ResetController, ResetMode};
//! use cfee_core::settings::Settings;
//! use cfee_core::timer::TimerQueue;
//!
//! let mut controller = ResetController::new(&Settings::default());
//! let mut timers = TimerQueue::new();
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut input = FeeInput { buy_amount: 2.0, gas_fee_sell: 0.5, ..FeeInput::DEFAULT };
//!
//! controller.request_reset(&mut input, &mut timers, &mut rng);
//! assert_eq!(controller.mode(), ResetMode::Armed);
//! assert_eq!(input.buy_amount, 0.0);
//!
//! controller.request_reset(&mut input, &mut timers, &mut rng);
//! assert_eq!(controller.mode(), ResetMode::Announcing);
//! assert_eq!(input, FeeInput::DEFAULT);
//!
//! for handle in timers.advance_by(Duration::from_millis(500)) {
//!     controller.on_timer(handle);
//! }
//! assert_eq!(controller.mode(), ResetMode::Idle);
//! ```

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::input::FeeInput;
use crate::settings::{Settings, DEFAULT_ACKNOWLEDGEMENTS};
use crate::timer::{Scheduler, TimerHandle, TimerKind};

/// Where the reset control currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetMode {
    /// No reset pending
    #[default]
    Idle,
    /// First request received; the next one confirms
    Armed,
    /// Reset applied; acknowledgement on display
    Announcing,
}

/// What a reset request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetTransition {
    /// The reset is armed and waiting for confirmation
    Armed,
    /// Inputs were restored to their defaults
    Confirmed {
        /// Acknowledgement now on display
        message: String,
    },
}

/// Two-phase reset state machine.
#[derive(Debug, Clone)]
pub struct ResetController {
    mode: ResetMode,
    arming_timer: Option<TimerHandle>,
    announcement_timer: Option<TimerHandle>,
    message: Option<String>,
    arming_window: Duration,
    announcement_window: Duration,
    idle_label: String,
    confirm_label: String,
    acknowledgements: Vec<String>,
}

impl ResetController {
    pub fn new(settings: &Settings) -> Self {
        ResetController {
            mode: ResetMode::Idle,
            arming_timer: None,
            announcement_timer: None,
            message: None,
            arming_window: settings.arming_window(),
            announcement_window: settings.announcement_window(),
            idle_label: settings.idle_label.clone(),
            confirm_label: settings.confirm_label.clone(),
            acknowledgements: settings.acknowledgements.clone(),
        }
    }

    pub fn mode(&self) -> ResetMode {
        self.mode
    }

    /// Acknowledgement on display, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Text for the reset control. Exactly one of the acknowledgement, the
    /// confirmation prompt or the idle label.
    pub fn label(&self) -> &str {
        match (self.mode, self.message.as_deref()) {
            (ResetMode::Announcing, Some(message)) => message,
            (ResetMode::Armed, _) => self.confirm_label.as_str(),
            _ => self.idle_label.as_str(),
        }
    }

    /// Handle one activation of the reset control.
    ///
    /// From Idle this arms the reset and zeroes `buy_amount`. From Armed it
    /// restores every field to [`FeeInput::DEFAULT`] and picks an
    /// acknowledgement at random. From Announcing the acknowledgement is
    /// dropped and the reset is armed again.
    pub fn request_reset<S, R>(&mut self, input: &mut FeeInput, scheduler: &mut S, rng: &mut R) -> ResetTransition
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        match self.mode {
            ResetMode::Idle => self.arm(input, scheduler),
            ResetMode::Armed => self.confirm(input, scheduler, rng),
            ResetMode::Announcing => {
                self.stop_timer(TimerKind::Announcement, scheduler);
                self.message = None;
                self.arm(input, scheduler)
            }
        }
    }

    /// Handle the cancellation signal (pointer or focus left the control).
    ///
    /// Returns `false` when there was nothing to cancel.
    pub fn cancel_pending<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        match self.mode {
            ResetMode::Idle => false,
            ResetMode::Armed => {
                self.stop_timer(TimerKind::Arming, scheduler);
                self.mode = ResetMode::Idle;
                debug!("armed reset cancelled");
                true
            }
            ResetMode::Announcing => {
                self.stop_timer(TimerKind::Announcement, scheduler);
                self.message = None;
                self.mode = ResetMode::Idle;
                debug!("acknowledgement dismissed");
                true
            }
        }
    }

    /// Handle a fired timer. Returns `false` for stale handles, which are
    /// ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        match handle.kind() {
            TimerKind::Arming if self.arming_timer == Some(handle) => {
                self.arming_timer = None;
                if self.mode == ResetMode::Armed {
                    self.mode = ResetMode::Idle;
                }
                debug!("arming window expired");
                true
            }
            TimerKind::Announcement if self.announcement_timer == Some(handle) => {
                self.announcement_timer = None;
                self.message = None;
                if self.mode == ResetMode::Announcing {
                    self.mode = ResetMode::Idle;
                }
                debug!("acknowledgement expired");
                true
            }
            kind => {
                trace!(id = handle.id(), ?kind, "ignoring stale timer");
                false
            }
        }
    }

    fn arm<S>(&mut self, input: &mut FeeInput, scheduler: &mut S) -> ResetTransition
    where
        S: Scheduler + ?Sized,
    {
        input.buy_amount = 0.0;
        self.start_timer(TimerKind::Arming, scheduler);
        self.mode = ResetMode::Armed;
        debug!("reset armed");
        ResetTransition::Armed
    }

    fn confirm<S, R>(&mut self, input: &mut FeeInput, scheduler: &mut S, rng: &mut R) -> ResetTransition
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        self.stop_timer(TimerKind::Arming, scheduler);
        *input = FeeInput::DEFAULT;

        let message = self
            .acknowledgements
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_ACKNOWLEDGEMENTS[0].to_string());
        self.message = Some(message.clone());

        self.start_timer(TimerKind::Announcement, scheduler);
        self.mode = ResetMode::Announcing;
        info!(%message, "inputs reset to defaults");
        ResetTransition::Confirmed { message }
    }

    /// Cancel any live timer of `kind`, then schedule a fresh one.
    fn start_timer<S>(&mut self, kind: TimerKind, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.stop_timer(kind, scheduler);
        let delay = match kind {
            TimerKind::Arming => self.arming_window,
            TimerKind::Announcement => self.announcement_window,
        };
        let handle = scheduler.schedule(kind, delay);
        *self.slot(kind) = Some(handle);
    }

    fn stop_timer<S>(&mut self, kind: TimerKind, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(stale) = self.slot(kind).take() {
            scheduler.cancel(stale);
        }
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<TimerHandle> {
        match kind {
            TimerKind::Arming => &mut self.arming_timer,
            TimerKind::Announcement => &mut self.announcement_timer,
        }
    }
}

impl Default for ResetController {
    fn default() -> Self {
        ResetController::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DEFAULT_CONFIRM_LABEL, DEFAULT_IDLE_LABEL};
    use crate::timer::TimerQueue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Harness {
        controller: ResetController,
        timers: TimerQueue,
        rng: StdRng,
        input: FeeInput,
    }

    impl Harness {
        fn new() -> Self {
            Harness {
                controller: ResetController::default(),
                timers: TimerQueue::new(),
                rng: StdRng::seed_from_u64(42),
                input: FeeInput {
                    buy_amount: 3.0,
                    buying_tax_percent: 1.5,
                    gas_fee_sell: 0.01,
                    sol_incinerator_rebate: 0.0,
                    ..FeeInput::DEFAULT
                },
            }
        }

        fn request(&mut self) -> ResetTransition {
            self.controller
                .request_reset(&mut self.input, &mut self.timers, &mut self.rng)
        }

        fn advance(&mut self, ms: u64) {
            for handle in self.timers.advance_by(Duration::from_millis(ms)) {
                self.controller.on_timer(handle);
            }
        }
    }

    #[test]
    fn test_first_request_arms_and_zeroes_buy_amount() {
        let mut h = Harness::new();
        let before = h.input;

        assert_eq!(h.request(), ResetTransition::Armed);
        assert_eq!(h.controller.mode(), ResetMode::Armed);
        assert_eq!(h.controller.label(), DEFAULT_CONFIRM_LABEL);
        assert_eq!(h.input, FeeInput { buy_amount: 0.0, ..before });
        assert_eq!(h.timers.live_count(TimerKind::Arming), 1);
    }

    #[test]
    fn test_second_request_confirms() {
        let mut h = Harness::new();
        h.request();
        h.advance(4_999);

        let transition = h.request();
        let message = match transition {
            ResetTransition::Confirmed { message } => message,
            other => panic!("expected confirmation, got {:?}", other),
        };

        assert!(DEFAULT_ACKNOWLEDGEMENTS.contains(&message.as_str()));
        assert_eq!(h.controller.mode(), ResetMode::Announcing);
        assert_eq!(h.controller.label(), message);
        assert_eq!(h.input, FeeInput::DEFAULT);
        assert_eq!(h.timers.live_count(TimerKind::Arming), 0);
        assert_eq!(h.timers.live_count(TimerKind::Announcement), 1);
    }

    #[test]
    fn test_announcement_expires() {
        let mut h = Harness::new();
        h.request();
        h.request();

        h.advance(499);
        assert_eq!(h.controller.mode(), ResetMode::Announcing);

        h.advance(1);
        assert_eq!(h.controller.mode(), ResetMode::Idle);
        assert_eq!(h.controller.message(), None);
        assert_eq!(h.controller.label(), DEFAULT_IDLE_LABEL);
        assert!(h.timers.is_empty());
    }

    #[test]
    fn test_arming_window_elapses() {
        let mut h = Harness::new();
        let before = h.input;
        h.request();
        h.advance(5_000);

        assert_eq!(h.controller.mode(), ResetMode::Idle);
        // buy amount stays zeroed, everything else untouched
        assert_eq!(h.input, FeeInput { buy_amount: 0.0, ..before });

        // next request arms again instead of confirming
        assert_eq!(h.request(), ResetTransition::Armed);
    }

    #[test]
    fn test_cancel_while_armed() {
        let mut h = Harness::new();
        h.request();

        assert!(h.controller.cancel_pending(&mut h.timers));
        assert_eq!(h.controller.mode(), ResetMode::Idle);
        assert!(h.timers.is_empty());
        assert_eq!(h.input.buy_amount, 0.0);
        assert_eq!(h.input.buying_tax_percent, 1.5);
    }

    #[test]
    fn test_cancel_while_announcing() {
        let mut h = Harness::new();
        h.request();
        h.request();

        assert!(h.controller.cancel_pending(&mut h.timers));
        assert_eq!(h.controller.mode(), ResetMode::Idle);
        assert_eq!(h.controller.message(), None);
        assert!(h.timers.is_empty());
    }

    #[test]
    fn test_cancel_while_idle_is_noop() {
        let mut h = Harness::new();
        assert!(!h.controller.cancel_pending(&mut h.timers));
        assert_eq!(h.controller.mode(), ResetMode::Idle);
    }

    #[test]
    fn test_request_while_announcing_rearms() {
        let mut h = Harness::new();
        h.request();
        h.request();
        h.input.buy_amount = 9.0;

        assert_eq!(h.request(), ResetTransition::Armed);
        assert_eq!(h.controller.message(), None);
        assert_eq!(h.input.buy_amount, 0.0);
        assert_eq!(h.timers.live_count(TimerKind::Announcement), 0);
        assert_eq!(h.timers.live_count(TimerKind::Arming), 1);
    }

    #[test]
    fn test_at_most_one_live_timer_per_kind() {
        let mut h = Harness::new();
        for _ in 0..10 {
            h.request();
            assert!(h.timers.live_count(TimerKind::Arming) <= 1);
            assert!(h.timers.live_count(TimerKind::Announcement) <= 1);
        }
    }

    #[test]
    fn test_stale_handle_ignored() {
        let mut h = Harness::new();
        h.request();
        let first = h.controller.arming_timer.unwrap();
        h.controller.cancel_pending(&mut h.timers);
        h.request();

        // the cancelled handle must not disarm the new window
        assert!(!h.controller.on_timer(first));
        assert_eq!(h.controller.mode(), ResetMode::Armed);
    }

    #[test]
    fn test_rearm_restarts_window() {
        let mut h = Harness::new();
        h.request();
        h.advance(4_000);
        h.controller.cancel_pending(&mut h.timers);
        h.request();
        h.advance(4_000);

        // 8 s since the first request but only 4 s since the second
        assert_eq!(h.controller.mode(), ResetMode::Armed);
        h.advance(1_000);
        assert_eq!(h.controller.mode(), ResetMode::Idle);
    }

    #[test]
    fn test_message_selection_is_seeded() {
        let pick = |seed: u64| {
            let mut h = Harness::new();
            h.rng = StdRng::seed_from_u64(seed);
            h.request();
            match h.request() {
                ResetTransition::Confirmed { message } => message,
                other => panic!("expected confirmation, got {:?}", other),
            }
        };
        assert_eq!(pick(1), pick(1));
    }

    #[test]
    fn test_custom_labels() {
        let settings = Settings {
            idle_label: "Clear".to_string(),
            confirm_label: "Sure?".to_string(),
            acknowledgements: vec!["Done".to_string()],
            ..Settings::default()
        };
        let mut controller = ResetController::new(&settings);
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut input = FeeInput::DEFAULT;

        assert_eq!(controller.label(), "Clear");
        controller.request_reset(&mut input, &mut timers, &mut rng);
        assert_eq!(controller.label(), "Sure?");
        controller.request_reset(&mut input, &mut timers, &mut rng);
        assert_eq!(controller.label(), "Done");
    }
}
