//! Link bootstrap sequencing against the mock hardware.

use crate::mock_hw::{HwCall, LogSink, MockHardware, RecordingDelay};

use lora_notifier::app::bootstrap::{LinkHealth, bootstrap};
use lora_notifier::app::events::AppEvent;
use lora_notifier::app::ports::{IndicatorLine, IndicatorPort};
use lora_notifier::config::{LinkFlags, SystemConfig};
use lora_notifier::error::LinkError;

fn run(hw: &mut MockHardware, config: &SystemConfig) -> (LinkHealth, RecordingDelay, LogSink) {
    let mut delay = RecordingDelay::new();
    let mut sink = LogSink::new();
    let health = bootstrap(config, hw, &mut delay, &mut sink);
    (health, delay, sink)
}

#[test]
fn healthy_link_latches_ok_then_clears_it() {
    let mut hw = MockHardware::new();
    let (health, delay, sink) = run(&mut hw, &SystemConfig::default());

    assert_eq!(health, LinkHealth::Up);
    // all_off, latch on, clear at the end.
    assert_eq!(hw.levels_of(IndicatorLine::Ok), vec![false, true, false]);
    assert_eq!(hw.levels_of(IndicatorLine::Error), vec![false, false]);
    assert_eq!(delay.ms, vec![8000]);
    assert!(sink.has(|e| *e == AppEvent::LinkUp));
    assert!(sink.has(|e| *e == AppEvent::BootstrapComplete { link_up: true }));
}

#[test]
fn sequence_is_off_init_configure_then_clear() {
    let mut hw = MockHardware::new();
    run(&mut hw, &SystemConfig::default());

    let init = hw.position(&HwCall::Init).expect("init called");
    let configure = hw
        .position(&HwCall::Configure(LinkFlags::default()))
        .expect("configure called");
    assert!(init < configure);

    // Every line is driven low before init.
    for line in IndicatorLine::ALL {
        let off = hw
            .position(&HwCall::SetLevel {
                line,
                asserted: false,
            })
            .expect("line driven off");
        assert!(off < init, "{:?} cleared after init", line);
    }

    // OK latched between init and configure.
    let latch = hw
        .position(&HwCall::SetLevel {
            line: IndicatorLine::Ok,
            asserted: true,
        })
        .expect("OK latched");
    assert!(init < latch && latch < configure);

    // The bootstrap ends with OK and ERROR deasserted.
    let tail: Vec<_> = hw.calls[hw.calls.len() - 2..].to_vec();
    assert_eq!(
        tail,
        vec![
            HwCall::SetLevel {
                line: IndicatorLine::Ok,
                asserted: false
            },
            HwCall::SetLevel {
                line: IndicatorLine::Error,
                asserted: false
            },
        ]
    );
}

#[test]
fn init_failure_latches_error_and_still_configures() {
    let mut hw = MockHardware::failing_init();
    let (health, delay, sink) = run(&mut hw, &SystemConfig::default());

    assert_eq!(health, LinkHealth::Degraded(LinkError::InitFailed));
    assert_eq!(hw.levels_of(IndicatorLine::Error), vec![false, true, false]);
    assert_eq!(hw.levels_of(IndicatorLine::Ok), vec![false, false]);
    assert_eq!(hw.configure_calls(), 1);
    assert_eq!(delay.ms, vec![8000]);
    assert!(sink.has(|e| *e == AppEvent::LinkInitFailed(LinkError::InitFailed)));
    assert!(sink.has(|e| *e == AppEvent::LinkConfigured(Ok(()))));
    assert!(!hw.is_asserted(IndicatorLine::Error));
}

#[test]
fn init_failure_skips_configure_when_disabled() {
    let mut hw = MockHardware::failing_init();
    let config = SystemConfig {
        configure_on_init_failure: false,
        ..SystemConfig::default()
    };
    let (health, delay, sink) = run(&mut hw, &config);

    assert!(!health.is_up());
    assert_eq!(hw.configure_calls(), 0);
    assert_eq!(delay.ms, vec![8000], "join settle still observed");
    assert!(sink.has(|e| *e == AppEvent::LinkConfigSkipped));
    assert!(sink.has(|e| *e == AppEvent::BootstrapComplete { link_up: false }));
}

#[test]
fn healthy_link_configures_even_when_degraded_configure_disabled() {
    let mut hw = MockHardware::new();
    let config = SystemConfig {
        configure_on_init_failure: false,
        ..SystemConfig::default()
    };
    run(&mut hw, &config);
    assert_eq!(hw.configure_calls(), 1);
}

#[test]
fn rejected_configuration_is_reported_not_fatal() {
    let mut hw = MockHardware::new();
    hw.configure_result = Err(LinkError::ConfigRejected);
    let (health, _, sink) = run(&mut hw, &SystemConfig::default());

    assert_eq!(health, LinkHealth::Up);
    assert!(sink.has(|e| *e == AppEvent::LinkConfigured(Err(LinkError::ConfigRejected))));
    assert!(!hw.is_asserted(IndicatorLine::Ok));
}
