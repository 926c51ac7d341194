use serde::{Deserialize, Serialize};

/// Sentinel for data that could not be fetched at all.
pub const UNAVAILABLE: &str = "No disponible";
/// Sentinel for data the course simply does not have.
pub const NO_INFO: &str = "Sin información";
/// Sentinel for an enrollment category nobody fills.
pub const UNASSIGNED: &str = "No asignado";

/// Column headers, in display order.
pub const COLUMNS: [&str; 17] = [
    "Tipo",
    "Cuenta",
    "Nombre",
    "ID Dictación",
    "ID Plantilla",
    "Estado",
    "Progreso",
    "Código",
    "F. Inicio",
    "F. Cierre",
    "Modalidad",
    "Link",
    "Profesor",
    "Email Profesor",
    "Director",
    "Email Director",
    "Email Tutor",
];

/// One output row. Every column is always present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    #[serde(rename = "Tipo")]
    pub course_type: String,

    #[serde(rename = "Cuenta")]
    pub account_name: String,

    #[serde(rename = "Nombre")]
    pub name: String,

    #[serde(rename = "ID Dictación")]
    pub course_id: String,

    #[serde(rename = "ID Plantilla")]
    pub blueprint_id: String,

    #[serde(rename = "Estado")]
    pub status: String,

    #[serde(rename = "Progreso")]
    pub progress: String,

    #[serde(rename = "Código")]
    pub course_code: String,

    #[serde(rename = "F. Inicio")]
    pub start_date: String,

    #[serde(rename = "F. Cierre")]
    pub end_date: String,

    #[serde(rename = "Modalidad")]
    pub modality: String,

    #[serde(rename = "Link")]
    pub link: String,

    #[serde(rename = "Profesor")]
    pub instructor_name: String,

    #[serde(rename = "Email Profesor")]
    pub instructor_email: String,

    #[serde(rename = "Director")]
    pub director_name: String,

    #[serde(rename = "Email Director")]
    pub director_email: String,

    #[serde(rename = "Email Tutor")]
    pub tutor_email: String,
}

impl CourseRecord {
    /// Row for a course that could not be processed. Only the id, the link
    /// and the reason (shown as the name) carry information.
    pub fn unavailable(course_id: &str, reason: &str, link: &str) -> Self {
        CourseRecord {
            course_type: "❌ Error".to_string(),
            account_name: UNAVAILABLE.to_string(),
            name: reason.to_string(),
            course_id: course_id.to_string(),
            blueprint_id: UNAVAILABLE.to_string(),
            status: UNAVAILABLE.to_string(),
            progress: UNAVAILABLE.to_string(),
            course_code: UNAVAILABLE.to_string(),
            start_date: UNAVAILABLE.to_string(),
            end_date: UNAVAILABLE.to_string(),
            modality: UNAVAILABLE.to_string(),
            link: link.to_string(),
            instructor_name: UNAVAILABLE.to_string(),
            instructor_email: UNAVAILABLE.to_string(),
            director_name: UNAVAILABLE.to_string(),
            director_email: UNAVAILABLE.to_string(),
            tutor_email: UNAVAILABLE.to_string(),
        }
    }

    /// Cell values in `COLUMNS` order.
    pub fn values(&self) -> [&str; 17] {
        [
            &self.course_type,
            &self.account_name,
            &self.name,
            &self.course_id,
            &self.blueprint_id,
            &self.status,
            &self.progress,
            &self.course_code,
            &self.start_date,
            &self.end_date,
            &self.modality,
            &self.link,
            &self.instructor_name,
            &self.instructor_email,
            &self.director_name,
            &self.director_email,
            &self.tutor_email,
        ]
    }

    pub fn is_error(&self) -> bool {
        self.course_type == "❌ Error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_row_fills_every_column() {
        let record = CourseRecord::unavailable(
            "123",
            "❌ Error al obtener curso 123",
            "https://canvas.example.com/courses/123",
        );

        assert!(record.is_error());
        assert_eq!(record.course_id, "123");
        assert_eq!(record.link, "https://canvas.example.com/courses/123");
        let informational = record
            .values()
            .iter()
            .enumerate()
            .filter(|(i, _)| ![0, 2, 3, 11].contains(i))
            .all(|(_, v)| *v == UNAVAILABLE);
        assert!(informational);
    }

    #[test]
    fn json_keys_match_column_headers() {
        let record = CourseRecord::unavailable("1", "x", "y");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
    }
}
