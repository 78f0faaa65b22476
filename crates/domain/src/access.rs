//! Scope and grading predicates.
//!
//! Both checks are fail-closed: a missing scope, a missing target value, or a
//! role pairing that is not listed denies.

use serde::{Deserialize, Serialize};

use crate::{EffectiveRole, Employee, ModuleKey, PermissionAction, PermissionMatrix, RoleLevel};

/// Resolved caller context used by the access predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    /// Caller employee code.
    pub employee_code: String,
    /// Effective role level.
    pub role_level: RoleLevel,
    /// Department scope for DEPT_HEAD checks.
    pub dept_scope: Option<String>,
    /// Team scope for TEAM_LEADER checks.
    pub team_scope: Option<String>,
}

impl AccessContext {
    /// Builds the context of an employee from their effective role.
    #[must_use]
    pub fn from_effective_role(employee: &Employee, role: &EffectiveRole) -> Self {
        Self {
            employee_code: employee.employee_code().as_str().to_owned(),
            role_level: role.role_level,
            dept_scope: role.dept_scope.clone(),
            team_scope: role.team_scope.clone(),
        }
    }

    /// Returns whether this context belongs to a SUPER_ADMIN.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role_level == RoleLevel::SuperAdmin
    }
}

/// Record an action is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetContext {
    /// Module the record belongs to.
    pub module: ModuleKey,
    /// Department of the record.
    pub department: Option<String>,
    /// Team of the record.
    pub team: Option<String>,
    /// Employee that owns the record.
    pub employee_code: Option<String>,
}

impl TargetContext {
    /// Creates a module-wide target without any scope values.
    #[must_use]
    pub fn module(module: ModuleKey) -> Self {
        Self {
            module,
            department: None,
            team: None,
            employee_code: None,
        }
    }

    /// Creates a target describing an employee record.
    #[must_use]
    pub fn employee(module: ModuleKey, employee: &Employee) -> Self {
        Self {
            module,
            department: employee.department().map(str::to_owned),
            team: employee.team().map(str::to_owned),
            employee_code: Some(employee.employee_code().as_str().to_owned()),
        }
    }
}

/// Decides whether a caller may perform an action on a target.
#[must_use]
pub fn can_perform_action(
    user: &AccessContext,
    action: PermissionAction,
    target: Option<&TargetContext>,
    matrix: &PermissionMatrix,
) -> bool {
    if user.is_super_admin() {
        return true;
    }

    let Some(target) = target else {
        return false;
    };

    if !matrix.allows(user.role_level, target.module, action) {
        return false;
    }

    match user.role_level {
        RoleLevel::BoardDirector => true,
        RoleLevel::DeptHead => scope_matches(user.dept_scope.as_deref(), target.department.as_deref()),
        RoleLevel::TeamLeader => scope_matches(user.team_scope.as_deref(), target.team.as_deref()),
        RoleLevel::Staff => scope_matches(
            Some(user.employee_code.as_str()),
            target.employee_code.as_deref(),
        ),
        RoleLevel::SuperAdmin => false,
    }
}

/// Employee being graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingTarget {
    /// Effective role level of the target.
    pub role_level: RoleLevel,
    /// Department of the target.
    pub department: Option<String>,
    /// Team of the target.
    pub team: Option<String>,
}

impl GradingTarget {
    /// Builds a grading target from an employee and their effective role.
    #[must_use]
    pub fn from_employee(employee: &Employee, role: &EffectiveRole) -> Self {
        Self {
            role_level: role.role_level,
            department: employee.department().map(str::to_owned),
            team: employee.team().map(str::to_owned),
        }
    }
}

/// Decides whether `grader` may grade `target` using the fixed adjacency table.
///
/// | grader | may grade | scope |
/// |---|---|---|
/// | SUPER_ADMIN | anyone | none |
/// | BOARD_DIRECTOR | DEPT_HEAD | none |
/// | DEPT_HEAD | TEAM_LEADER | `dept_scope == department` |
/// | TEAM_LEADER | STAFF | `team_scope == team` |
///
/// Equal roles are always denied, SUPER_ADMIN pairs included.
#[must_use]
pub fn can_grade(grader: &AccessContext, target: &GradingTarget) -> bool {
    if grader.role_level == target.role_level {
        return false;
    }

    match (grader.role_level, target.role_level) {
        (RoleLevel::SuperAdmin, _) => true,
        (RoleLevel::BoardDirector, RoleLevel::DeptHead) => true,
        (RoleLevel::DeptHead, RoleLevel::TeamLeader) => {
            scope_matches(grader.dept_scope.as_deref(), target.department.as_deref())
        }
        (RoleLevel::TeamLeader, RoleLevel::Staff) => {
            scope_matches(grader.team_scope.as_deref(), target.team.as_deref())
        }
        _ => false,
    }
}

fn scope_matches(scope: Option<&str>, value: Option<&str>) -> bool {
    match (scope, value) {
        (Some(scope), Some(value)) => scope == value,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{AccessContext, GradingTarget, TargetContext, can_grade, can_perform_action};
    use crate::{ModuleKey, PermissionAction, PermissionMatrix, PermissionRule, RoleLevel};

    fn user(role_level: RoleLevel, dept: Option<&str>, team: Option<&str>) -> AccessContext {
        AccessContext {
            employee_code: "NV010".to_owned(),
            role_level,
            dept_scope: dept.map(str::to_owned),
            team_scope: team.map(str::to_owned),
        }
    }

    fn target(dept: Option<&str>, team: Option<&str>, code: Option<&str>) -> TargetContext {
        TargetContext {
            module: ModuleKey::Tasks,
            department: dept.map(str::to_owned),
            team: team.map(str::to_owned),
            employee_code: code.map(str::to_owned),
        }
    }

    fn open_matrix() -> PermissionMatrix {
        PermissionMatrix::from_rules(RoleLevel::configurable().iter().filter_map(|role| {
            PermissionRule::new(*role, ModuleKey::Tasks, true, true, true).ok()
        }))
    }

    fn grading_target(role_level: RoleLevel, dept: Option<&str>, team: Option<&str>) -> GradingTarget {
        GradingTarget {
            role_level,
            department: dept.map(str::to_owned),
            team: team.map(str::to_owned),
        }
    }

    #[test]
    fn super_admin_passes_without_target() {
        let admin = user(RoleLevel::SuperAdmin, None, None);
        assert!(can_perform_action(
            &admin,
            PermissionAction::Delete,
            None,
            &PermissionMatrix::default()
        ));
    }

    #[test]
    fn non_admin_without_target_is_denied() {
        let director = user(RoleLevel::BoardDirector, None, None);
        assert!(!can_perform_action(
            &director,
            PermissionAction::View,
            None,
            &open_matrix()
        ));
    }

    #[test]
    fn scope_narrowing_per_role() {
        let matrix = open_matrix();
        let record = target(Some("Kế toán"), Some("Nhóm A"), Some("NV099"));

        assert!(can_perform_action(
            &user(RoleLevel::BoardDirector, None, None),
            PermissionAction::Edit,
            Some(&record),
            &matrix
        ));
        assert!(can_perform_action(
            &user(RoleLevel::DeptHead, Some("Kế toán"), None),
            PermissionAction::Edit,
            Some(&record),
            &matrix
        ));
        assert!(!can_perform_action(
            &user(RoleLevel::DeptHead, Some("Kinh doanh"), None),
            PermissionAction::Edit,
            Some(&record),
            &matrix
        ));
        assert!(can_perform_action(
            &user(RoleLevel::TeamLeader, None, Some("Nhóm A")),
            PermissionAction::View,
            Some(&record),
            &matrix
        ));
        assert!(!can_perform_action(
            &user(RoleLevel::Staff, None, None),
            PermissionAction::View,
            Some(&record),
            &matrix
        ));
        assert!(can_perform_action(
            &user(RoleLevel::Staff, None, None),
            PermissionAction::View,
            Some(&target(None, None, Some("NV010"))),
            &matrix
        ));
    }

    #[test]
    fn missing_scope_denies() {
        let matrix = open_matrix();
        assert!(!can_perform_action(
            &user(RoleLevel::DeptHead, None, None),
            PermissionAction::View,
            Some(&target(None, None, None)),
            &matrix
        ));
    }

    #[test]
    fn grading_adjacency_table() {
        let director = user(RoleLevel::BoardDirector, None, None);
        assert!(can_grade(&director, &grading_target(RoleLevel::DeptHead, None, None)));
        assert!(!can_grade(&director, &grading_target(RoleLevel::Staff, None, None)));

        let head = user(RoleLevel::DeptHead, Some("Kế toán"), None);
        assert!(!can_grade(&head, &grading_target(RoleLevel::DeptHead, Some("Kế toán"), None)));
        assert!(can_grade(&head, &grading_target(RoleLevel::TeamLeader, Some("Kế toán"), None)));
        assert!(!can_grade(&head, &grading_target(RoleLevel::TeamLeader, Some("Kinh doanh"), None)));

        let leader = user(RoleLevel::TeamLeader, None, Some("A"));
        assert!(!can_grade(&leader, &grading_target(RoleLevel::Staff, None, Some("B"))));
        assert!(can_grade(&leader, &grading_target(RoleLevel::Staff, None, Some("A"))));
        assert!(!can_grade(&user(RoleLevel::TeamLeader, None, None), &grading_target(RoleLevel::Staff, None, None)));

        let admin = user(RoleLevel::SuperAdmin, None, None);
        assert!(can_grade(&admin, &grading_target(RoleLevel::Staff, None, None)));
        assert!(!can_grade(&admin, &grading_target(RoleLevel::SuperAdmin, None, None)));
    }

    fn any_role() -> impl Strategy<Value = RoleLevel> {
        proptest::sample::select(RoleLevel::all().to_vec())
    }

    fn any_action() -> impl Strategy<Value = PermissionAction> {
        proptest::sample::select(vec![
            PermissionAction::View,
            PermissionAction::Edit,
            PermissionAction::Delete,
        ])
    }

    fn any_module() -> impl Strategy<Value = ModuleKey> {
        proptest::sample::select(ModuleKey::all().to_vec())
    }

    proptest! {
        #[test]
        fn super_admin_may_perform_any_action(
            action in any_action(),
            module in any_module(),
            dept in proptest::option::of("[a-z]{1,4}"),
            with_target in any::<bool>(),
        ) {
            let admin = user(RoleLevel::SuperAdmin, None, None);
            let record = TargetContext { module, department: dept, team: None, employee_code: None };
            let target = with_target.then_some(&record);
            prop_assert!(can_perform_action(&admin, action, target, &PermissionMatrix::default()));
        }

        #[test]
        fn false_flag_denies_regardless_of_scope(
            role in proptest::sample::select(RoleLevel::configurable().to_vec()),
            action in any_action(),
            module in any_module(),
            scope in "[a-z]{1,4}",
        ) {
            let rule = PermissionRule::new(role, module, true, true, true)
                .map(|rule| rule.with_flag(action, false));
            prop_assume!(rule.is_ok());
            let matrix = PermissionMatrix::from_rules(rule.ok());
            let caller = AccessContext {
                employee_code: scope.clone(),
                role_level: role,
                dept_scope: Some(scope.clone()),
                team_scope: Some(scope.clone()),
            };
            let record = TargetContext {
                module,
                department: Some(scope.clone()),
                team: Some(scope.clone()),
                employee_code: Some(scope),
            };
            prop_assert!(!can_perform_action(&caller, action, Some(&record), &matrix));
            prop_assert!(!can_perform_action(&caller, action, Some(&record), &PermissionMatrix::default()));
        }

        #[test]
        fn equal_roles_never_grade_each_other(role in any_role(), scope in "[a-z]{1,4}") {
            let grader = user(role, Some(scope.as_str()), Some(scope.as_str()));
            let target = grading_target(role, Some(scope.as_str()), Some(scope.as_str()));
            prop_assert!(!can_grade(&grader, &target));
        }
    }
}
