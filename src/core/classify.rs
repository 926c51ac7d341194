//! Pure derivations from raw Canvas fields to display labels.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseType {
    Diplomado,
    Magister,
    Other,
}

impl CourseType {
    /// Classifies by the owning subaccount's name.
    pub fn from_account_name(account_name: &str) -> Self {
        if account_name.contains("Diplomado") {
            CourseType::Diplomado
        } else if account_name.contains("Magíster") {
            CourseType::Magister
        } else {
            CourseType::Other
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CourseType::Diplomado => "Diplomado",
            CourseType::Magister => "Magíster",
            CourseType::Other => "Otro",
        })
    }
}

pub fn publication_status(workflow_state: Option<&str>) -> &'static str {
    if workflow_state == Some("available") {
        "🟢Publicado"
    } else {
        "🔴No Publicado"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    /// Program code `DM`.
    Massive,
    /// Any other program code starting with `D`.
    National,
    Other,
}

impl Modality {
    /// Reads the program code out of a SIS id shaped like `ABC-DM01-X`.
    /// Ids without a non-empty second segment are `Other`.
    pub fn from_sis_course_id(sis_course_id: Option<&str>) -> Self {
        let Some(segment) = sis_course_id.and_then(|id| id.split('-').nth(1)) else {
            return Modality::Other;
        };
        let code: String = segment.chars().take(2).collect();

        if code == "DM" {
            Modality::Massive
        } else if code.starts_with('D') {
            Modality::National
        } else {
            Modality::Other
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Modality::Massive => "Masivo",
            Modality::National => "Nacional",
            Modality::Other => "Otro tipo",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    Instructor,
    Director,
    Tutor,
}

impl RoleCategory {
    /// Case-insensitive. `TeacherEnrollment` must match exactly; custom
    /// roles are matched by substring.
    pub fn from_role(role: &str) -> Option<Self> {
        let role = role.to_lowercase();
        if role == "teacherenrollment" {
            Some(RoleCategory::Instructor)
        } else if role.contains("director") {
            Some(RoleCategory::Director)
        } else if role.contains("tutor") {
            Some(RoleCategory::Tutor)
        } else {
            None
        }
    }
}
