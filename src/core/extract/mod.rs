//! Extraction: turns the declarations of one translation unit into records.
//!
//! The router classifies each declaration in document order and hands it to
//! the matching extractor:
//! - `class`: structs and classes
//! - `enumeration`: enums
//! - `alias`: typedefs and `using` declarations
//! - `specialization`: template specializations, members resolved against the arguments
//! - `adoption`: types registered through attributes on a registration point

pub mod adoption;
pub mod alias;
pub mod class;
pub mod enumeration;
pub mod router;
pub mod session;
pub mod specialization;
pub mod type_info;


pub use adoption::Adopter;
pub use alias::AliasExtractor;
pub use class::ClassExtractor;
pub use enumeration::EnumExtractor;
pub use router::{Route, route};
pub use session::{ExtractionSession, FileAnalysis};
pub use specialization::SpecializationExtractor;
pub use type_info::ExtractContext;
