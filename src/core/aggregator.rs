use chrono::{NaiveDate, Utc};
use log::{info, warn};

use crate::core::classify::{CourseType, Modality, RoleCategory, publication_status};
use crate::core::config::CanvasConfig;
use crate::core::dates::{format_date, latest_due_date, parse_canvas_timestamp};
use crate::core::progress::Progress;
use crate::http::CanvasClient;
use crate::model::canvas::{Account, Assignment, BlueprintSubscription, Course, Enrollment};
use crate::model::course_record::{CourseRecord, NO_INFO, UNASSIGNED, UNAVAILABLE};

const STAFF_ENROLLMENT_TYPES: &str = "type[]=TeacherEnrollment&type[]=TaEnrollment";

/// Builds one `CourseRecord` per course id from five dependent Canvas calls.
pub struct CourseAggregator<'a> {
    client: &'a CanvasClient,
    config: &'a CanvasConfig,
    today: NaiveDate,
}

impl<'a> CourseAggregator<'a> {
    pub fn new(client: &'a CanvasClient, config: &'a CanvasConfig) -> Self {
        let today = Utc::now().with_timezone(&config.timezone).date_naive();
        CourseAggregator { client, config, today }
    }

    /// Pins the date progress is measured against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Never fails: a course or account that cannot be fetched becomes an
    /// error row, anything else missing becomes a sentinel. A course payload
    /// without an id, or an account payload with neither id nor name, counts
    /// as not fetched.
    pub async fn aggregate(&self, course_id: &str) -> CourseRecord {
        let link = self.config.course_link(course_id);

        let Some(course) = self
            .client
            .get_json::<Course>(&format!("/courses/{}", course_id))
            .await
            .filter(|course| course.id.is_some())
        else {
            warn!("No se pudo obtener el curso {}", course_id);
            return CourseRecord::unavailable(
                course_id,
                &format!("❌ Error al obtener curso {}", course_id),
                &link,
            );
        };

        let account = match &course.account_id {
            Some(account_id) => {
                self.client
                    .get_json::<Account>(&format!("/accounts/{}", account_id))
                    .await
                    .filter(|account| account.id.is_some() || account.name.is_some())
            }
            None => None,
        };
        let Some(account) = account else {
            warn!("No se pudo obtener la subcuenta del curso {}", course_id);
            return CourseRecord::unavailable(
                course_id,
                &format!("⚠️ Subcuenta no disponible para {}", course_id),
                &link,
            );
        };

        let blueprints = self
            .client
            .get_json::<Vec<BlueprintSubscription>>(&format!(
                "/courses/{}/blueprint_subscriptions",
                course_id
            ))
            .await;

        let tz = &self.config.timezone;
        let account_name = account.name.unwrap_or_else(|| NO_INFO.to_string());

        let start = course
            .start_at
            .as_deref()
            .and_then(|raw| parse_canvas_timestamp(raw, tz));

        let assignments = self
            .client
            .get_all::<Assignment>(&format!("/courses/{}/assignments", course_id))
            .await
            .unwrap_or_default();
        let end = latest_due_date(&assignments, tz);

        let progress = Progress::compute(
            start.map(|d| d.date_naive()),
            end.map(|d| d.date_naive()),
            self.today,
        );

        let enrollments = self
            .client
            .get_all::<Enrollment>(&format!(
                "/courses/{}/enrollments?{}",
                course_id, STAFF_ENROLLMENT_TYPES
            ))
            .await
            .unwrap_or_default();
        let staff = Staff::from_enrollments(&enrollments);

        info!("Curso {} procesado: {}", course_id, progress);

        CourseRecord {
            course_type: CourseType::from_account_name(&account_name).to_string(),
            account_name,
            name: course.name.unwrap_or_default(),
            course_id: course_id.to_string(),
            blueprint_id: blueprint_id(blueprints.as_deref()),
            status: publication_status(course.workflow_state.as_deref()).to_string(),
            progress: progress.to_string(),
            course_code: course.course_code.unwrap_or_else(|| NO_INFO.to_string()),
            start_date: start.as_ref().map_or_else(|| NO_INFO.to_string(), format_date),
            end_date: end.as_ref().map_or_else(|| NO_INFO.to_string(), format_date),
            modality: Modality::from_sis_course_id(course.sis_course_id.as_deref()).to_string(),
            link,
            instructor_name: staff.instructor_name,
            instructor_email: staff.instructor_email,
            director_name: staff.director_name,
            director_email: staff.director_email,
            tutor_email: staff.tutor_email,
        }
    }
}

/// Id of the template course behind the first blueprint subscription.
pub fn blueprint_id(subscriptions: Option<&[BlueprintSubscription]>) -> String {
    subscriptions
        .and_then(|subs| subs.first())
        .and_then(|sub| sub.blueprint_course.as_ref())
        .and_then(|course| course.id.as_ref())
        .map_or_else(|| NO_INFO.to_string(), |id| id.to_string())
}

/// People responsible for a course, as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub instructor_name: String,
    pub instructor_email: String,
    pub director_name: String,
    pub director_email: String,
    pub tutor_email: String,
}

impl Default for Staff {
    fn default() -> Self {
        Staff {
            instructor_name: UNASSIGNED.to_string(),
            instructor_email: UNASSIGNED.to_string(),
            director_name: UNASSIGNED.to_string(),
            director_email: UNASSIGNED.to_string(),
            tutor_email: UNASSIGNED.to_string(),
        }
    }
}

impl Staff {
    /// Later enrollments of the same category overwrite earlier ones.
    pub fn from_enrollments(enrollments: &[Enrollment]) -> Self {
        let mut staff = Staff::default();

        for enrollment in enrollments {
            let Some(category) = enrollment.role.as_deref().and_then(RoleCategory::from_role) else {
                continue;
            };
            let user = enrollment.user.as_ref();
            let name = || {
                user.and_then(|u| u.name.clone())
                    .unwrap_or_else(|| UNAVAILABLE.to_string())
            };
            let email = || {
                user.and_then(|u| u.login_id.clone())
                    .unwrap_or_else(|| UNAVAILABLE.to_string())
            };

            match category {
                RoleCategory::Instructor => {
                    staff.instructor_name = name();
                    staff.instructor_email = email();
                }
                RoleCategory::Director => {
                    staff.director_name = name();
                    staff.director_email = email();
                }
                RoleCategory::Tutor => staff.tutor_email = email(),
            }
        }

        staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::canvas::{BlueprintCourse, CanvasId, EnrollmentUser};

    fn enrollment(role: &str, name: &str, login: &str) -> Enrollment {
        Enrollment {
            role: Some(role.to_string()),
            user: Some(EnrollmentUser {
                name: Some(name.to_string()),
                login_id: Some(login.to_string()),
            }),
        }
    }

    #[test]
    fn blueprint_id_defaults_when_empty_or_missing() {
        assert_eq!(blueprint_id(Some(&[])), NO_INFO);
        assert_eq!(blueprint_id(None), NO_INFO);
        assert_eq!(blueprint_id(Some(&[BlueprintSubscription::default()])), NO_INFO);

        let with_course = BlueprintSubscription {
            id: None,
            blueprint_course: Some(BlueprintCourse {
                id: Some(CanvasId::Number(9001)),
                name: None,
            }),
        };
        assert_eq!(blueprint_id(Some(&[with_course])), "9001");
    }

    #[test]
    fn staff_is_assigned_by_role() {
        let staff = Staff::from_enrollments(&[
            enrollment("TeacherEnrollment", "Ana Pérez", "ana@uni.cl"),
            enrollment("Director Regional", "Luis Soto", "luis@uni.cl"),
            enrollment("TutorSocial", "Marta Díaz", "marta@uni.cl"),
        ]);

        assert_eq!(staff.instructor_name, "Ana Pérez");
        assert_eq!(staff.instructor_email, "ana@uni.cl");
        assert_eq!(staff.director_name, "Luis Soto");
        assert_eq!(staff.director_email, "luis@uni.cl");
        assert_eq!(staff.tutor_email, "marta@uni.cl");
    }

    #[test]
    fn last_enrollment_of_a_category_wins() {
        let staff = Staff::from_enrollments(&[
            enrollment("TeacherEnrollment", "Primera", "primera@uni.cl"),
            enrollment("TaEnrollment", "Ayudante", "ayudante@uni.cl"),
            enrollment("TeacherEnrollment", "Segunda", "segunda@uni.cl"),
        ]);

        assert_eq!(staff.instructor_name, "Segunda");
        assert_eq!(staff.director_name, UNASSIGNED);
        assert_eq!(staff.tutor_email, UNASSIGNED);
    }

    #[test]
    fn missing_user_fields_are_unavailable() {
        let staff = Staff::from_enrollments(&[Enrollment {
            role: Some("TeacherEnrollment".to_string()),
            user: None,
        }]);

        assert_eq!(staff.instructor_name, UNAVAILABLE);
        assert_eq!(staff.instructor_email, UNAVAILABLE);
    }
}
