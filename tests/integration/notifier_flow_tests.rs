//! End-to-end trigger flow: bootstrap, then a series of triggers through
//! the notifier service, all against the mock hardware.

use crate::mock_hw::{HwCall, LogSink, MockHardware, RecordingDelay};

use lora_notifier::app::bootstrap::bootstrap;
use lora_notifier::app::events::AppEvent;
use lora_notifier::app::ports::IndicatorLine;
use lora_notifier::app::service::{HandlerPhase, NotifierService, TriggerOutcome};
use lora_notifier::config::SystemConfig;
use lora_notifier::error::LinkError;

struct Rig {
    service: NotifierService,
    hw: MockHardware,
    delay: RecordingDelay,
    sink: LogSink,
}

impl Rig {
    fn booted(hw: MockHardware, config: SystemConfig) -> Self {
        let mut rig = Self {
            service: NotifierService::new(config.clone()),
            hw,
            delay: RecordingDelay::new(),
            sink: LogSink::new(),
        };
        bootstrap(&config, &mut rig.hw, &mut rig.delay, &mut rig.sink);
        rig.hw.clear();
        rig.delay.ms.clear();
        rig.sink.events.clear();
        rig
    }

    fn trigger(&mut self, at_ms: u32) -> TriggerOutcome {
        self.service
            .handle_trigger(at_ms, &mut self.hw, &mut self.delay, &mut self.sink)
    }
}

#[test]
fn boot_then_cluster_of_triggers_sends_two_payloads() {
    let mut rig = Rig::booted(MockHardware::new(), SystemConfig::default());

    assert!(matches!(rig.trigger(0), TriggerOutcome::Accepted { count: 1, .. }));
    assert!(matches!(
        rig.trigger(5_000),
        TriggerOutcome::Rejected {
            since_last_ms: 5_000
        }
    ));
    assert!(matches!(rig.trigger(31_000), TriggerOutcome::Accepted { count: 2, .. }));

    assert_eq!(rig.hw.sent(), vec![vec![2, 0, 1], vec![2, 0, 2]]);
    assert_eq!(rig.service.count(), 2);
    assert_eq!(rig.service.rejected(), 1);
    assert_eq!(rig.service.phase(), HandlerPhase::Idle);
}

#[test]
fn each_send_is_preceded_by_tx_pulse_and_settle() {
    let mut rig = Rig::booted(MockHardware::new(), SystemConfig::default());
    rig.trigger(1_000);

    assert_eq!(
        rig.hw.calls,
        vec![
            HwCall::SetLevel {
                line: IndicatorLine::Tx,
                asserted: true
            },
            HwCall::SetLevel {
                line: IndicatorLine::Tx,
                asserted: false
            },
            HwCall::Send(vec![2, 0, 1]),
        ]
    );
    assert_eq!(rig.delay.ms, vec![100, 1000]);
}

#[test]
fn rejected_trigger_touches_nothing() {
    let mut rig = Rig::booted(MockHardware::new(), SystemConfig::default());
    rig.trigger(100);
    rig.hw.clear();
    rig.delay.ms.clear();

    rig.trigger(100 + 29_999);

    assert!(rig.hw.calls.is_empty());
    assert!(rig.delay.ms.is_empty());
    assert!(rig.sink.has(|e| matches!(
        e,
        AppEvent::TriggerRejected {
            since_last_ms: 29_999,
            ..
        }
    )));
}

#[test]
fn degraded_link_still_attempts_every_send() {
    let mut hw = MockHardware::failing_init();
    hw.send_result = Err(LinkError::SendFailed);
    let mut rig = Rig::booted(hw, SystemConfig::default());

    rig.trigger(0);
    rig.trigger(30_000);

    assert_eq!(rig.hw.sent(), vec![vec![2, 0, 1], vec![2, 0, 2]]);
    assert_eq!(rig.service.count(), 2);
    assert_eq!(rig.service.stats().failed, 2);
    assert_eq!(rig.service.stats().sent, 0);
    assert!(rig.sink.has(|e| matches!(
        e,
        AppEvent::SendFailed {
            count: 2,
            error: LinkError::SendFailed,
            ..
        }
    )));
}

#[test]
fn recovered_link_resumes_after_failed_sends() {
    let mut rig = Rig::booted(MockHardware::new(), SystemConfig::default());

    rig.hw.send_result = Err(LinkError::Transport);
    rig.trigger(0);
    rig.hw.send_result = Ok(());
    rig.trigger(30_000);

    // The failed event keeps its number; the next one is not renumbered.
    assert_eq!(rig.hw.sent(), vec![vec![2, 0, 1], vec![2, 0, 2]]);
    let stats = rig.service.stats();
    assert_eq!((stats.sent, stats.failed), (1, 1));
    assert_eq!(stats.recent_failures.recent(), Some(&1));
}

#[test]
fn counter_wraps_to_zero_after_65535() {
    let config = SystemConfig {
        debounce_interval_ms: 1,
        ..SystemConfig::default()
    };
    let mut rig = Rig::booted(MockHardware::new(), config);

    for t in 0..65_535u32 {
        rig.trigger(t);
    }
    assert_eq!(rig.service.count(), 65_535);
    rig.hw.clear();

    assert!(matches!(rig.trigger(65_535), TriggerOutcome::Accepted { count: 0, .. }));
    assert_eq!(rig.hw.sent(), vec![vec![2, 0, 0]]);
}

#[test]
fn debounce_window_spans_clock_wrap() {
    let mut rig = Rig::booted(MockHardware::new(), SystemConfig::default());

    rig.trigger(u32::MAX - 10_000);
    assert!(matches!(rig.trigger(5_000), TriggerOutcome::Rejected { .. }));
    assert!(matches!(rig.trigger(20_000), TriggerOutcome::Accepted { count: 2, .. }));
}

#[test]
fn sketch_tag_follows_configuration() {
    let config = SystemConfig {
        sketch_type: lora_notifier::payload::SketchType::DoorWindow,
        ..SystemConfig::default()
    };
    let mut rig = Rig::booted(MockHardware::new(), config);
    rig.trigger(0);
    assert_eq!(rig.hw.sent(), vec![vec![3, 0, 1]]);
}
