// ABOUTME: Role classifier mapping a stored designation tag to the matching Role and Employee shape.
// ABOUTME: Unknown tags yield None so callers can report a data-integrity error instead of defaulting.

use crate::model::{Employee, EmployeeId, Role};

impl Role {
    /// Map a stored designation tag back to a role.
    pub fn from_tag(tag: &str) -> Option<Role> {
        match tag {
            "TeamMember" => Some(Role::IndividualContributor),
            "Manager" => Some(Role::Manager),
            _ => None,
        }
    }
}

/// Materialize an employee row, choosing the variant from its stored tag.
pub fn classify(tag: &str, id: EmployeeId, name: impl Into<String>) -> Option<Employee> {
    Role::from_tag(tag).map(|role| Employee::new(id, name, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for role in [Role::IndividualContributor, Role::Manager] {
            assert_eq!(Role::from_tag(role.as_tag()), Some(role));
        }
    }

    #[test]
    fn classify_fills_id_and_name() {
        let e = classify("Manager", EmployeeId::new(5), "Dana").unwrap();
        assert_eq!(e.id, EmployeeId::new(5));
        assert_eq!(e.name, "Dana");
        assert_eq!(e.role, Role::Manager);
    }

    #[test]
    fn unknown_tag_is_absent() {
        assert!(classify("Default", EmployeeId::new(1), "X").is_none());
        assert!(classify("manager", EmployeeId::new(1), "X").is_none());
        assert!(Role::from_tag("").is_none());
    }
}
