//! Amendment clause (개정문) generation.
//!
//! The pipeline per statute is scan → group → render: every token holding
//! the find word becomes an [`scanner::Occurrence`], occurrences that
//! rewrite identically share a [`clause::ClauseGroup`], and each group is
//! rendered as one `"{citation} 중 ... 한다."` line under a numbered header.

pub mod assembler;
pub mod clause;
pub mod location;
pub mod phonology;
pub mod scanner;

pub use assembler::{
    generate_amendment_clauses, Amender, AmendmentReport, AmendmentSentence, NO_AMENDMENT_TARGETS,
};
pub use location::Location;
pub use phonology::Particle;
