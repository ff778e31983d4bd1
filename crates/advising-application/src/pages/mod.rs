//! Page controllers.
//!
//! # Module Structure
//!
//! - `resources`: public resource catalog with category filter
//! - `lecturer_dashboard`: advisees, results, notes and guardian contact
//! - `lecturer_profile`: lecturer profile card
//! - `submit_grade`: grade entry form
//! - `student_courses`: enrolled and outstanding courses
//! - `student_profile`: student profile from the document database
//! - `student_results`: official results joined with course records
//! - `forgot_password`: public password reset request
//!
//! Every controller takes the shared [`AppContext`](crate::context::AppContext),
//! enters through the session guard, and renders remote failures inline.

pub mod forgot_password;
pub mod lecturer_dashboard;
pub mod lecturer_profile;
pub mod resources;
pub mod student_courses;
pub mod student_profile;
pub mod student_results;
pub mod submit_grade;

mod submission;

pub use forgot_password::ForgotPasswordPage;
pub use lecturer_dashboard::LecturerDashboardPage;
pub use lecturer_profile::LecturerProfilePage;
pub use resources::ResourcesPage;
pub use student_courses::StudentCoursesPage;
pub use student_profile::StudentProfilePage;
pub use student_results::StudentResultsPage;
pub use submit_grade::SubmitGradePage;
pub use submission::TONE_ATTRIBUTE;

/// Logout control present on every protected page.
pub const LOGOUT_BUTTON: &str = "logout-button";
