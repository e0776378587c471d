//! # docoracle-rs: Test Oracles from Free-Text Documentation
//!
//! Turns natural-language comments attached to methods and constructors into
//! machine-checkable equivalence oracles. A comment such as
//!
//! > Returns the same as isEmpty(), if the list has no elements.
//!
//! on `boolean isEmptyList()` becomes `if (isEmpty()) {RESULT==isEmpty()}`.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Sentences   │──▶│ Equivalence  │──▶│    Guard     │──▶│   Subject    │
//! │ segmentation │   │  detection   │   │ extraction + │   │   matching   │
//! └──────────────┘   └──────────────┘   │ translation  │   └──────┬───────┘
//!                                       └──────────────┘          │
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐          │
//! │  Validation  │◀──│   Oracle     │◀──│   Overload   │◀─────────┘
//! │              │   │  synthesis   │   │  resolution  │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! Candidate enumeration, guard translation and validation are collaborator
//! traits with shipped implementations ([`TypeCatalog`],
//! [`guard::pattern::PatternGuardTranslator`], [`oracle::validator::SyntaxValidator`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docoracle_rs::{FreeTextTranslator, TypeCatalog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Arc::new(TypeCatalog::from_file("catalog.yml")?);
//!     let translator = FreeTextTranslator::for_catalog(catalog.clone())?;
//!
//!     let report = translator.analyze_catalog(&catalog);
//!     for member in &report.members {
//!         for oracle in member.oracles() {
//!             println!("{}: {}", member.signature, oracle);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Configuration and error handling
pub mod core {
    //! Configuration and error types.

    pub mod config;
    pub mod errors;
}

// Data model shared by every stage
pub mod model {
    //! Documented members, candidates, equivalence records and guard propositions.

    pub mod code_element;
    pub mod equivalence;
    pub mod member;
    pub mod proposition;
    pub mod types;
}

// Lexical analysis of comment text
pub mod text {
    //! Sentence segmentation, equivalence detection and guard extraction.

    pub mod condition;
    pub mod equivalence;
    pub mod references;
    pub mod sentences;
}

// Candidate sources
pub mod catalog {
    //! Candidate enumeration and the declarative type catalog.

    pub mod enumerator;
    pub mod type_catalog;
}

// Guard clause translation
pub mod guard {
    //! Guard clause translation into boolean predicates.

    pub mod pattern;
    pub mod translator;
}

// Name matching and overload resolution
pub mod matching {
    //! Subject matching, argument binding and overload resolution.

    pub mod arguments;
    pub mod overload;
    pub mod subject;
    pub mod types;
}

// Oracle expressions
pub mod oracle {
    //! Oracle expression model, synthesis and validation.

    pub mod expr;
    pub mod synthesizer;
    pub mod validator;
}

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::FreeTextTranslator;
pub use api::results::{AnalysisReport, AnalysisSummary, MemberOutcome, MemberReport};
pub use catalog::enumerator::CandidateEnumerator;
pub use catalog::type_catalog::TypeCatalog;
pub use core::config::DocOracleConfig;
pub use core::errors::{DocOracleError, Result};
pub use guard::translator::GuardTranslator;
pub use model::code_element::CodeElement;
pub use model::equivalence::{EquivalenceMatch, UnresolvedReason};
pub use model::member::DocumentedMember;
pub use oracle::validator::OracleValidator;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
