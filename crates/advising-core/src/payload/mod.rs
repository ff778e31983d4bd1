//! Typed response and request schemas.
//!
//! One schema per backend endpoint and per document-database collection.
//! Decoding is lenient where the data sources are known to be loose (numeric
//! ids, `"N/A"` standing in for a number) so that rendering code only ever
//! sees `Option`s.

mod ack;
mod courses;
pub mod lenient;
mod lecturer;
mod notes;
mod records;
mod resources;
mod results;

pub use ack::{Ack, ContactGuardianRequest, ForgotPasswordRequest, GradeSubmission};
pub use courses::{CourseSummary, CoursesOverview};
pub use lecturer::{Advisee, LecturerData, LecturerInfo};
pub use notes::{AdvisingNote, NewNote, NoteCreated, NotesPayload};
pub use records::{CourseRecord, DegreeRef, ResultRecord, UserProfile};
pub use resources::{Resource, ResourcesPayload};
pub use results::{AdviseeResult, AdviseeResults};
