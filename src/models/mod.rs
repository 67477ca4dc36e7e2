pub mod enrollment;
pub mod loaders;
pub mod submission;

pub use enrollment::{CourseRecord, EnrollmentRecord};
pub use loaders::{load_all_submissions, load_submission, load_submission_manifest};
pub use submission::{Submission, SubmissionManifest};
