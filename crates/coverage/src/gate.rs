//! Scan triggers and movement debouncing.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// Document load, or the re-initialization after a reload.
    Load,
    /// A click anywhere in the window.
    Click,
    /// Continuous pointer movement.
    Movement,
}

impl TriggerKind {
    /// Window-level event types that request a scan.
    pub fn for_event(event_type: &str) -> Option<Self> {
        match event_type {
            "load" => Some(TriggerKind::Load),
            "click" => Some(TriggerKind::Click),
            "mousemove" | "pointermove" => Some(TriggerKind::Movement),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Armed,
    Disarmed,
}

/// Decides whether a trigger runs a scan.
///
/// Discrete triggers always scan and arm the gate. A movement scans only
/// while armed and disarms it; further movement is skipped until the next
/// discrete trigger.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriggerGate {
    state: GateState,
}

impl TriggerGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn admit(&mut self, kind: TriggerKind) -> bool {
        match (kind, self.state) {
            (TriggerKind::Load | TriggerKind::Click, _) => {
                self.state = GateState::Armed;
                true
            }
            (TriggerKind::Movement, GateState::Armed) => {
                self.state = GateState::Disarmed;
                true
            }
            (TriggerKind::Movement, GateState::Disarmed) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_storm_scans_once() {
        let mut gate = TriggerGate::new();
        assert!(gate.admit(TriggerKind::Load));
        let admitted = (0..50).filter(|_| gate.admit(TriggerKind::Movement)).count();
        assert_eq!(admitted, 1);
        assert_eq!(gate.state(), GateState::Disarmed);
    }

    #[test]
    fn click_rearms_movement() {
        let mut gate = TriggerGate::new();
        assert!(gate.admit(TriggerKind::Movement));
        assert!(!gate.admit(TriggerKind::Movement));
        assert!(gate.admit(TriggerKind::Click));
        assert_eq!(gate.state(), GateState::Armed);
        assert!(gate.admit(TriggerKind::Movement));
        assert!(!gate.admit(TriggerKind::Movement));
    }

    #[test]
    fn discrete_triggers_always_scan() {
        let mut gate = TriggerGate::new();
        for kind in [TriggerKind::Click, TriggerKind::Click, TriggerKind::Load] {
            assert!(gate.admit(kind));
        }
    }

    #[test]
    fn trigger_kinds_from_window_events() {
        assert_eq!(TriggerKind::for_event("click"), Some(TriggerKind::Click));
        assert_eq!(TriggerKind::for_event("pointermove"), Some(TriggerKind::Movement));
        assert_eq!(TriggerKind::for_event("keyup"), None);
    }
}
