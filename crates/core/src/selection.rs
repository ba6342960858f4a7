//! Target selection policy for staking flows.
//!
//! A stake position is associated with zero or more targets (dapps).
//! Zero targets is a terminal no-op — the flow renders nothing and that
//! is not an error. One target resolves itself. More than one requires
//! an explicit user pick; picking is a one-way transition with no
//! automatic reversal.

use lantern_common::types::StakeTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// No associated targets. Terminal; produces nothing.
    NoTarget,
    /// Exactly one target — auto-selected, no interaction needed.
    SingleTarget(StakeTarget),
    /// Several candidates — the user must pick one before proceeding.
    MultiTarget(Vec<StakeTarget>),
}

impl SelectionPolicy {
    pub fn from_targets(targets: Vec<StakeTarget>) -> Self {
        match targets.len() {
            0 => Self::NoTarget,
            1 => {
                let mut targets = targets;
                Self::SingleTarget(targets.remove(0))
            }
            _ => Self::MultiTarget(targets),
        }
    }

    /// The resolved target, if any. `MultiTarget` resolves to nothing
    /// until a pick happens.
    pub fn resolved(&self) -> Option<&StakeTarget> {
        match self {
            Self::SingleTarget(target) => Some(target),
            Self::NoTarget | Self::MultiTarget(_) => None,
        }
    }

    /// Whether the flow must wait for an explicit user pick.
    pub fn needs_pick(&self) -> bool {
        matches!(self, Self::MultiTarget(_))
    }

    /// The candidates offered to the user, when a pick is pending.
    pub fn candidates(&self) -> &[StakeTarget] {
        match self {
            Self::MultiTarget(targets) => targets,
            Self::NoTarget | Self::SingleTarget(_) => &[],
        }
    }

    /// Apply the user's pick. Only valid from `MultiTarget`, and only
    /// for an offered target id; anything else leaves the state
    /// untouched and reports `false`.
    pub fn pick(&mut self, target_id: &str) -> bool {
        let Self::MultiTarget(targets) = self else {
            return false;
        };
        let Some(index) = targets.iter().position(|t| t.id == target_id) else {
            return false;
        };
        let target = targets.swap_remove(index);
        *self = Self::SingleTarget(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: &str) -> StakeTarget {
        StakeTarget { id: id.to_string(), name: None }
    }

    #[test]
    fn test_zero_targets_is_terminal_noop() {
        let policy = SelectionPolicy::from_targets(vec![]);
        assert_eq!(policy, SelectionPolicy::NoTarget);
        assert!(policy.resolved().is_none());
        assert!(!policy.needs_pick());
        assert!(policy.candidates().is_empty());
    }

    #[test]
    fn test_one_target_auto_resolves() {
        let policy = SelectionPolicy::from_targets(vec![target("dapp-a")]);
        assert!(!policy.needs_pick());
        assert_eq!(policy.resolved().unwrap().id, "dapp-a");
    }

    #[test]
    fn test_many_targets_require_a_pick() {
        let policy = SelectionPolicy::from_targets(vec![target("a"), target("b")]);
        assert!(policy.needs_pick());
        assert!(policy.resolved().is_none());
        assert_eq!(policy.candidates().len(), 2);
    }

    #[test]
    fn test_pick_transitions_to_single_equivalent() {
        let mut policy = SelectionPolicy::from_targets(vec![target("a"), target("b"), target("c")]);
        assert!(policy.pick("b"));

        // After picking T, the policy is equivalent to SingleTarget(T).
        assert_eq!(policy, SelectionPolicy::from_targets(vec![target("b")]));
        assert!(!policy.needs_pick());
        assert_eq!(policy.resolved().unwrap().id, "b");
    }

    #[test]
    fn test_pick_is_one_way() {
        let mut policy = SelectionPolicy::from_targets(vec![target("a"), target("b")]);
        assert!(policy.pick("a"));
        // A second pick has nothing to act on.
        assert!(!policy.pick("b"));
        assert_eq!(policy.resolved().unwrap().id, "a");
    }

    #[test]
    fn test_pick_rejects_unknown_target() {
        let mut policy = SelectionPolicy::from_targets(vec![target("a"), target("b")]);
        assert!(!policy.pick("nope"));
        assert!(policy.needs_pick());
        assert_eq!(policy.candidates().len(), 2);
    }

    #[test]
    fn test_pick_on_noop_states() {
        let mut none = SelectionPolicy::NoTarget;
        assert!(!none.pick("a"));

        let mut single = SelectionPolicy::from_targets(vec![target("a")]);
        assert!(!single.pick("a"));
    }
}
