use std::sync::Arc;

use hrdesk_core::AppError;
use hrdesk_domain::{ModuleKey, RoleLevel};

use super::{GradingService, SaveGradeInput};
use crate::test_support::{FakeDirectory, FakeGradeRepository, employee, identity, rule};

fn fixture() -> (Arc<FakeGradeRepository>, GradingService) {
    let directory = FakeDirectory::with(
        vec![
            employee("NV001", "Giám đốc điều hành", "Ban điều hành", "Điều hành"),
            employee("NV002", "Trưởng phòng Kinh doanh", "Kinh doanh", "Bán lẻ"),
            employee("NV003", "Trưởng nhóm Bán lẻ", "Kinh doanh", "Bán lẻ"),
            employee("NV004", "Nhân viên", "Kinh doanh", "Bán lẻ"),
            employee("NV005", "Nhân viên", "Kinh doanh", "Bán buôn"),
            employee("NV006", "Trưởng phòng Kế toán", "Kế toán", "Tổng hợp"),
        ],
        RoleLevel::configurable()
            .iter()
            .map(|role_level| rule(*role_level, ModuleKey::Grading, true, true, false))
            .collect(),
    );
    let grades = Arc::new(FakeGradeRepository::default());
    let service = GradingService::new(directory.authorization_service(), grades.clone());
    (grades, service)
}

fn input(target_code: &str, score: i32) -> SaveGradeInput {
    SaveGradeInput {
        target_code: target_code.to_owned(),
        period: "2026-10".to_owned(),
        score,
        comment: Some("Hoàn thành tốt".to_owned()),
    }
}

#[tokio::test]
async fn board_director_targets_department_heads_only() {
    let (_, service) = fixture();

    let Ok(targets) = service.grading_targets(&identity("NV001")).await else {
        panic!("targets should load");
    };

    let codes: Vec<&str> = targets
        .iter()
        .map(|candidate| candidate.employee.employee_code().as_str())
        .collect();
    assert_eq!(codes, vec!["NV002", "NV006"]);
}

#[tokio::test]
async fn team_leader_targets_staff_in_own_team() {
    let (_, service) = fixture();

    let Ok(targets) = service.grading_targets(&identity("NV003")).await else {
        panic!("targets should load");
    };

    let codes: Vec<&str> = targets
        .iter()
        .map(|candidate| candidate.employee.employee_code().as_str())
        .collect();
    assert_eq!(codes, vec!["NV004"]);
}

#[tokio::test]
async fn saving_again_replaces_grade_for_same_period() {
    let (grades, service) = fixture();

    assert!(service.save_grade(&identity("NV003"), input("NV004", 70)).await.is_ok());
    let result = service.save_grade(&identity("NV003"), input("NV004", 85)).await;

    let Ok(grade) = result else {
        panic!("grade should be saved");
    };
    assert_eq!(grade.score(), 85);
    assert_eq!(grades.grades.lock().await.len(), 1);
}

#[tokio::test]
async fn team_leader_cannot_grade_staff_of_another_team() {
    let (_, service) = fixture();

    let result = service.save_grade(&identity("NV003"), input("NV005", 80)).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn equal_roles_cannot_grade_each_other() {
    let (_, service) = fixture();

    let result = service.save_grade(&identity("NV002"), input("NV006", 80)).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn invalid_period_and_score_are_rejected() {
    let (_, service) = fixture();

    let bad_period = service
        .save_grade(
            &identity("NV003"),
            SaveGradeInput {
                period: "10/2026".to_owned(),
                ..input("NV004", 80)
            },
        )
        .await;
    let bad_score = service.save_grade(&identity("NV003"), input("NV004", 101)).await;

    assert!(matches!(bad_period, Err(AppError::Validation(_))));
    assert!(matches!(bad_score, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn given_grades_are_listed_per_period() {
    let (_, service) = fixture();
    assert!(service.save_grade(&identity("NV002"), input("NV003", 90)).await.is_ok());

    let this_period = service
        .list_given_grades(&identity("NV002"), Some("2026-10"))
        .await
        .unwrap_or_default();
    let other_period = service
        .list_given_grades(&identity("NV002"), Some("2026-09"))
        .await
        .unwrap_or_default();

    assert_eq!(this_period.len(), 1);
    assert!(other_period.is_empty());
}
