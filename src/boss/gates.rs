//! Boss domain: one-shot trigger gates.

/// Edge-triggered latch for frame choreography. A gate fires once when its
/// condition first holds, then stays spent until an explicit rearm crossing.
/// Replaces ad-hoc "already played"/"can fire" boolean pairs.
#[derive(Debug, Clone)]
pub struct FireGate {
    armed: bool,
}

impl Default for FireGate {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl FireGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the armed state on the first true condition.
    pub fn fire(&mut self, condition: bool) -> bool {
        if self.armed && condition {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn rearm(&mut self, condition: bool) {
        if condition {
            self.armed = true;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_while_condition_stays_true() {
        let mut gate = FireGate::new();
        assert!(gate.fire(true));
        assert!(!gate.fire(true));
        assert!(!gate.fire(true));
    }

    #[test]
    fn false_condition_never_consumes() {
        let mut gate = FireGate::new();
        assert!(!gate.fire(false));
        assert!(gate.is_armed());
        assert!(gate.fire(true));
    }

    #[test]
    fn rearm_restores_a_spent_gate() {
        let mut gate = FireGate::new();
        gate.fire(true);
        gate.rearm(false);
        assert!(!gate.fire(true), "rearm needs a true crossing");
        gate.rearm(true);
        assert!(gate.fire(true));
    }
}
