pub mod document_sniffer;
pub mod identity_matcher;
pub mod rejection_writer;

pub use document_sniffer::is_pdf;
pub use identity_matcher::{check_claim, matches_claim, term_matches, ClaimCheck};
pub use rejection_writer::RejectionWriter;
