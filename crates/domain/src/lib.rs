//! Domain entities, vocabulary, and access policy.

#![forbid(unsafe_code)]

mod access;
mod attachment;
mod board;
mod employee;
mod grade;
mod navigation;
mod permission;
mod role;
mod role_inference;
mod task;
mod task_list;

pub use access::{AccessContext, GradingTarget, TargetContext, can_grade, can_perform_action};
pub use attachment::{MAX_ATTACHMENT_BYTES, TaskAttachment, attachment_object_path};
pub use board::{BoardColumn, TaskBoard};
pub use employee::{EffectiveRole, Employee, RoleOverride, RoleSource};
pub use grade::{Grade, GradePeriod};
pub use navigation::{NAVIGATION, NavNode, NavSection, PROFILE_MENU, visible_navigation};
pub use permission::{ModuleKey, PermissionAction, PermissionMatrix, PermissionRule};
pub use role::RoleLevel;
pub use role_inference::{
    BOARD_DIRECTOR_KEYWORDS, DEPT_HEAD_KEYWORDS, TEAM_LEADER_KEYWORDS, infer_role_level,
};
pub use task::{
    Assignee, AssignmentKind, BadgeTone, Task, TaskAssignment, TaskDraft, TaskId, TaskPatch,
    TaskPriority, TaskProgress, TaskStatus, primary_person, validate_assignments,
};
pub use task_list::{TaskCard, TaskFilter, sort_task_cards};
