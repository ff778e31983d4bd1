/// Backend routes used by the pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ForgotPassword,
    LecturerData,
    AdviseeResults { advisee_id: String },
    StudentNotes { student_id: String },
    ContactGuardian { advisee_id: String },
    SubmitGrade,
    Resources,
    CoursesOverview,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Self::ForgotPassword => "/api/students/forgot-password".to_string(),
            Self::LecturerData => "/api/lecturer/data".to_string(),
            Self::AdviseeResults { advisee_id } => {
                format!("/api/lecturer/advisees/{advisee_id}/results")
            }
            Self::StudentNotes { student_id } => format!("/api/students/{student_id}/notes"),
            Self::ContactGuardian { advisee_id } => {
                format!("/api/advisees/{advisee_id}/contact-guardian")
            }
            Self::SubmitGrade => "/api/lecturer/submit-grade".to_string(),
            Self::Resources => "/api/resources".to_string(),
            Self::CoursesOverview => "/api/student/courses-overview".to_string(),
        }
    }

    /// Public routes are callable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::ForgotPassword | Self::Resources)
    }
}
