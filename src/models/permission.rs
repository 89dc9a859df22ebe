use serde::{Deserialize, Serialize};

/// A principal's resolved rights on one repository.
///
/// Computed fresh per request by the permission resolver and discarded after
/// the policy check — never persisted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    pub admin: bool,
    pub push: bool,
    pub pull: bool,
}

impl PermissionSet {
    /// The "no access at all" result. A normal value, not an error.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn admin() -> Self {
        Self {
            admin: true,
            push: true,
            pull: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_grants_nothing() {
        let p = PermissionSet::none();
        assert!(!p.admin && !p.push && !p.pull);
    }

    #[test]
    fn admin_implies_push_and_pull() {
        let p = PermissionSet::admin();
        assert!(p.admin && p.push && p.pull);
    }
}
