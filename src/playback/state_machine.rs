use crate::playback::types::{next_sched_state, SchedEvent, SchedState};

/// Pure scheduler state machine: transitions only, no I/O.
pub struct SchedulerStateMachine {
    state: SchedState,
}

impl SchedulerStateMachine {
    pub fn new() -> Self {
        Self {
            state: SchedState::Idle,
        }
    }

    pub fn state(&self) -> SchedState {
        self.state
    }

    pub fn next_state(&self, event: SchedEvent, queue_has_next: bool) -> SchedState {
        next_sched_state(self.state, event, queue_has_next)
    }

    pub fn advance(&mut self, event: SchedEvent, queue_has_next: bool) -> SchedState {
        let next = self.next_state(event, queue_has_next);
        self.state = next;
        next
    }
}

impl Default for SchedulerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
