//! Domain models for folio
//!
//! Content kinds, their schemas, and the listings projected from them.
//! Contains no I/O.

mod slug;
mod kind;
mod schema;
mod blog;
mod project;
mod work;
mod garden;
mod collection;
pub mod projection;

pub use slug::{slugify, Slug, SlugError};
pub use kind::ContentKind;
pub use schema::{parse_date, Choice, FieldReader, Fields, Problem, RawRecord, Schema, ValidationError};
pub use blog::BlogPost;
pub use project::{Project, ProjectType};
pub use work::WorkEntry;
pub use garden::{GardenNote, Maturity};
pub use collection::{validate_record, Collections, InvalidContent, Warning};
