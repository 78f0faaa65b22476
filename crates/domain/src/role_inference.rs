//! Job-title based role inference.
//!
//! Every call site (settings listing, access resolution, grading) goes through
//! [`infer_role_level`] so the keyword tables below are the only classification.

use unicode_normalization::UnicodeNormalization;

use crate::RoleLevel;

/// Title keywords that classify an employee as a board member or director.
///
/// "giám đốc trung tâm" resolves here through the generic "giám đốc" keyword;
/// confirm with HR before moving centre directors to department heads.
pub const BOARD_DIRECTOR_KEYWORDS: &[&str] = &[
    "chủ tịch",
    "hội đồng quản trị",
    "hđqt",
    "tổng giám đốc",
    "giám đốc",
];

/// Title keywords that classify an employee as a department head.
pub const DEPT_HEAD_KEYWORDS: &[&str] = &[
    "trưởng phòng",
    "phó phòng",
    "trưởng ban",
    "phó ban",
    "trưởng bộ phận",
];

/// Title keywords that classify an employee as a team leader.
pub const TEAM_LEADER_KEYWORDS: &[&str] = &[
    "trưởng nhóm",
    "nhóm trưởng",
    "tổ trưởng",
    "tổ phó",
    "trưởng ca",
];

/// Infers the role level implied by a free-text job title.
///
/// Matching is a case-insensitive substring test; director keywords win over
/// department-head keywords, which win over team-leader keywords. Missing,
/// blank, or unmatched titles yield [`RoleLevel::Staff`]. Inference never
/// yields [`RoleLevel::SuperAdmin`].
#[must_use]
pub fn infer_role_level(job_title: Option<&str>) -> RoleLevel {
    let Some(title) = job_title.map(normalize_title).filter(|value| !value.is_empty()) else {
        return RoleLevel::Staff;
    };

    let categories = [
        (BOARD_DIRECTOR_KEYWORDS, RoleLevel::BoardDirector),
        (DEPT_HEAD_KEYWORDS, RoleLevel::DeptHead),
        (TEAM_LEADER_KEYWORDS, RoleLevel::TeamLeader),
    ];

    categories
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, role)| *role)
        .unwrap_or(RoleLevel::Staff)
}

/// Composes the title to NFC so decomposed input matches the keyword lists.
fn normalize_title(title: &str) -> String {
    title
        .nfc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{BOARD_DIRECTOR_KEYWORDS, infer_role_level};
    use crate::RoleLevel;

    #[test]
    fn deputy_director_is_board_director() {
        assert_eq!(
            infer_role_level(Some("Phó giám đốc")),
            RoleLevel::BoardDirector
        );
    }

    #[test]
    fn department_and_team_titles_are_classified() {
        assert_eq!(
            infer_role_level(Some("Trưởng phòng Nhân sự")),
            RoleLevel::DeptHead
        );
        assert_eq!(
            infer_role_level(Some("Phó trưởng phòng Kế toán")),
            RoleLevel::DeptHead
        );
        assert_eq!(
            infer_role_level(Some("Trưởng nhóm Kinh doanh")),
            RoleLevel::TeamLeader
        );
        assert_eq!(infer_role_level(Some("Tổ trưởng")), RoleLevel::TeamLeader);
    }

    #[test]
    fn director_keywords_win_over_department_keywords() {
        assert_eq!(
            infer_role_level(Some("Giám đốc kiêm Trưởng phòng Kỹ thuật")),
            RoleLevel::BoardDirector
        );
    }

    #[test]
    fn centre_director_resolves_to_board_director() {
        assert_eq!(
            infer_role_level(Some("Giám đốc Trung tâm Đào tạo")),
            RoleLevel::BoardDirector
        );
    }

    #[test]
    fn decomposed_title_matches_precomposed_keywords() {
        let deputy_director = "Pho\u{301} gia\u{301}m \u{111}o\u{302}\u{301}c";
        assert_eq!(
            infer_role_level(Some(deputy_director)),
            RoleLevel::BoardDirector
        );
        assert_eq!(
            infer_role_level(Some("Tru\u{31b}o\u{31b}\u{309}ng pho\u{300}ng")),
            RoleLevel::DeptHead
        );
    }

    #[test]
    fn extra_whitespace_does_not_break_matching() {
        assert_eq!(
            infer_role_level(Some("  trưởng    phòng  ")),
            RoleLevel::DeptHead
        );
    }

    #[test]
    fn missing_or_blank_titles_are_staff() {
        assert_eq!(infer_role_level(None), RoleLevel::Staff);
        assert_eq!(infer_role_level(Some("")), RoleLevel::Staff);
        assert_eq!(infer_role_level(Some("   ")), RoleLevel::Staff);
        assert_eq!(infer_role_level(Some("Chuyên viên")), RoleLevel::Staff);
    }

    fn flip_case(value: &str, mask: &[bool]) -> String {
        value
            .chars()
            .enumerate()
            .map(|(index, character)| {
                if mask.get(index).copied().unwrap_or(false) {
                    character.to_uppercase().collect::<String>()
                } else {
                    character.to_string()
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn any_title_with_director_keyword_is_board_director(
            prefix in "[a-zA-Z0-9 ]{0,12}",
            suffix in "[a-zA-Z0-9 ]{0,12}",
            keyword in proptest::sample::select(BOARD_DIRECTOR_KEYWORDS.to_vec()),
            mask in proptest::collection::vec(any::<bool>(), 0..24),
        ) {
            let title = format!("{prefix} {} {suffix}", flip_case(keyword, &mask));
            prop_assert_eq!(infer_role_level(Some(title.as_str())), RoleLevel::BoardDirector);
        }

        #[test]
        fn titles_without_keywords_are_staff(title in "[a-zA-Z0-9 ,.-]{0,40}") {
            prop_assert_eq!(infer_role_level(Some(title.as_str())), RoleLevel::Staff);
        }

        #[test]
        fn inference_is_deterministic(title in "\\PC{0,30}") {
            prop_assert_eq!(
                infer_role_level(Some(title.as_str())),
                infer_role_level(Some(title.as_str()))
            );
        }
    }
}
