use std::time::Duration;

use cfee_core::calculations::recompute;
use cfee_core::input::{Field, FeeInput};
use cfee_core::reset::ResetMode;
use cfee_core::session::Session;
use cfee_core::settings::Settings;
use cfee_core::timer::TimerKind;
use proptest::prelude::*;

fn amount() -> impl Strategy<Value = f64> {
    0.0f64..1_000.0
}

fn fee() -> impl Strategy<Value = f64> {
    0.0f64..0.1
}

fn tax() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

fn fee_input() -> impl Strategy<Value = FeeInput> {
    (
        (amount(), tax(), fee(), fee(), fee()),
        (tax(), fee(), fee(), fee(), fee()),
    )
        .prop_map(|((buy, buy_tax, pb, bb, gb), (sell_tax, ps, bs, gs, rebate))| FeeInput {
            buy_amount: buy,
            buying_tax_percent: buy_tax,
            priority_fee_buy: pb,
            bribe_fee_buy: bb,
            gas_fee_buy: gb,
            selling_tax_percent: sell_tax,
            priority_fee_sell: ps,
            bribe_fee_sell: bs,
            gas_fee_sell: gs,
            sol_incinerator_rebate: rebate,
        })
}

proptest! {
    #[test]
    fn break_even_covers_principal_and_buy_fees(input in fee_input()) {
        let out = recompute(&input);

        let expected_buy = input.buy_amount * (input.buying_tax_percent / 100.0)
            + input.priority_fee_buy + input.bribe_fee_buy + input.gas_fee_buy;
        prop_assert_eq!(out.total_buy_fees, expected_buy);
        prop_assert_eq!(out.break_even_amount, out.total_buy_fees + input.buy_amount);
        prop_assert!(out.break_even_amount >= 0.0);
    }

    #[test]
    fn sell_fees_and_total_follow_formulas(input in fee_input()) {
        let out = recompute(&input);

        let expected_sell = out.break_even_amount * (input.selling_tax_percent / 100.0)
            + input.priority_fee_sell + input.bribe_fee_sell + input.gas_fee_sell;
        prop_assert_eq!(out.total_sell_fees, expected_sell);
        prop_assert_eq!(
            out.total_fees_spent,
            out.total_buy_fees + out.total_sell_fees - input.sol_incinerator_rebate
        );
    }

    #[test]
    fn pnl_zero_iff_no_principal(input in fee_input()) {
        let zero_principal = FeeInput { buy_amount: 0.0, ..input };
        prop_assert_eq!(recompute(&zero_principal).pnl_percent_needed, 0.0);

        let out = recompute(&input);
        if input.buy_amount > 0.0 {
            prop_assert_eq!(
                out.pnl_percent_needed,
                (out.total_fees_spent / input.buy_amount) * 100.0
            );
        }
    }

    #[test]
    fn recompute_is_bit_identical(input in fee_input()) {
        let a = recompute(&input);
        let b = recompute(&input);
        prop_assert_eq!(a.total_fees_spent.to_bits(), b.total_fees_spent.to_bits());
        prop_assert_eq!(a.pnl_percent_needed.to_bits(), b.pnl_percent_needed.to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn coerced_raw_text_is_never_negative(raw in ".{0,12}") {
        let mut input = FeeInput::DEFAULT;
        input.set_raw(Field::GasFeeSell, &raw);
        prop_assert!(input.gas_fee_sell >= 0.0);
        prop_assert!(input.gas_fee_sell.is_finite());
    }

    #[test]
    fn request_storm_keeps_one_timer_per_kind(steps in prop::collection::vec((any::<bool>(), 0u64..6_000), 1..40)) {
        let mut session = Session::with_seed(Settings::default(), 5);
        let mut now = Duration::ZERO;

        for (request, wait_ms) in steps {
            if request {
                session.request_reset();
            } else {
                session.cancel_pending();
            }
            prop_assert!(session.live_timers(TimerKind::Arming) <= 1);
            prop_assert!(session.live_timers(TimerKind::Announcement) <= 1);

            now += Duration::from_millis(wait_ms);
            session.advance(now);
            prop_assert!(session.live_timers(TimerKind::Arming) <= 1);
            prop_assert!(session.live_timers(TimerKind::Announcement) <= 1);
        }
    }
}

#[test]
fn reset_once_then_wait_keeps_other_fields() {
    let mut session = Session::with_seed(Settings::default(), 3);
    session.set_field(Field::BuyAmount, 5.0);
    session.set_field(Field::BuyingTaxPercent, 2.0);
    session.set_field(Field::GasFeeSell, 0.02);
    let before = *session.input();

    session.request_reset();
    session.advance(Duration::from_secs(10));

    assert_eq!(session.mode(), ResetMode::Idle);
    assert_eq!(*session.input(), FeeInput { buy_amount: 0.0, ..before });
}

#[test]
fn full_reset_cycle_returns_to_idle() {
    let mut session = Session::with_seed(Settings::default(), 3);
    session.set_field(Field::BuyAmount, 5.0);
    session.set_field(Field::SellingTaxPercent, 9.0);

    session.request_reset();
    session.advance(Duration::from_millis(2_000));
    session.request_reset();
    assert_eq!(session.mode(), ResetMode::Announcing);
    assert_eq!(*session.input(), FeeInput::DEFAULT);
    assert_eq!(session.live_timers(TimerKind::Announcement), 1);
    assert_eq!(session.live_timers(TimerKind::Arming), 0);

    session.cancel_pending();
    assert_eq!(session.mode(), ResetMode::Idle);
    assert_eq!(session.label(), Settings::default().idle_label);
}
