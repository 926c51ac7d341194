use serde::{Deserialize, Serialize};
use std::fmt;

/// Canvas ids are numbers, but some installs hand them out as strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CanvasId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasId::Number(n) => write!(f, "{}", n),
            CanvasId::Text(s) => f.write_str(s),
        }
    }
}

/// `GET /courses/{id}`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Course {
    #[serde(default)]
    pub id: Option<CanvasId>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub account_id: Option<CanvasId>,

    #[serde(default)]
    pub course_code: Option<String>,

    #[serde(default)]
    pub sis_course_id: Option<String>,

    #[serde(default)]
    pub workflow_state: Option<String>,

    /// UTC timestamp, `%Y-%m-%dT%H:%M:%SZ`.
    #[serde(default)]
    pub start_at: Option<String>,
}

/// `GET /accounts/{id}`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Account {
    #[serde(default)]
    pub id: Option<CanvasId>,

    #[serde(default)]
    pub name: Option<String>,
}

/// One element of `GET /courses/{id}/blueprint_subscriptions`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BlueprintSubscription {
    #[serde(default)]
    pub id: Option<CanvasId>,

    #[serde(default)]
    pub blueprint_course: Option<BlueprintCourse>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BlueprintCourse {
    #[serde(default)]
    pub id: Option<CanvasId>,

    #[serde(default)]
    pub name: Option<String>,
}

/// One element of `GET /courses/{id}/assignments`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Assignment {
    #[serde(default)]
    pub id: Option<CanvasId>,

    #[serde(default)]
    pub due_at: Option<String>,
}

/// One element of `GET /courses/{id}/enrollments`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Enrollment {
    /// Role name, e.g. `TeacherEnrollment` or a custom role such as `Director Regional`.
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub user: Option<EnrollmentUser>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EnrollmentUser {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub login_id: Option<String>,
}
