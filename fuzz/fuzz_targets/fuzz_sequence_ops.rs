#![no_main]

use libfuzzer_sys::fuzz_target;
use spotlight_sequence::{
    DialogContent, SequenceController, SequenceEvent, SequenceState, StepConfig,
};

fuzz_target!(|data: &[u8]| {
    // First byte picks the step count (1..=8), the rest drive operations.
    let Some((&count, ops)) = data.split_first() else {
        return;
    };
    let count = usize::from(count % 8) + 1;

    let mut controller = SequenceController::new();
    for index in 0..count {
        controller
            .register(index, StepConfig::new(), Box::new(|_| DialogContent::new("")))
            .expect("contiguous indices register");
    }

    let mut last_run = 0;
    for &op in ops.iter().take(512) {
        let before = controller.state();
        match op % 5 {
            0 => {
                let _ = controller.start();
            }
            1 => {
                controller.next();
            }
            2 => {
                controller.previous();
            }
            3 => {
                controller.dismiss();
            }
            _ => {
                let _ = controller.go_to(usize::from(op / 5));
            }
        }

        // Post-conditions that must always hold:
        let state = controller.state();
        if let Some(index) = state.current_index() {
            assert!(index < count, "running index out of range");
        }
        assert!(controller.run() >= last_run, "run counter went backwards");
        last_run = controller.run();
        for event in controller.drain_events() {
            if let SequenceEvent::StepChanged { to, .. } = event {
                assert!(to < count, "event targets missing step");
            }
        }
        if before.is_terminal() && state != before {
            assert_eq!(state, SequenceState::Running(0), "terminal state left by non-start");
        }
    }
});
