//! Data types exchanged with the showcase backend.
//!
//! - [`Product`] and [`ProductId`]: the catalog record and its vendor identifier
//! - [`Envelope`]: the status fields every response carries
//! - [`JobId`], [`JobStatus`] and [`PollState`]: video generation jobs
//! - [`VideoFile`]: an entry of the generated-video listing

mod envelope;
mod product;
mod video;

pub use envelope::{Envelope, UNKNOWN_ERROR};
pub use product::{
    extract_identifier, Product, ProductId, PLACEHOLDER_IMAGE, PLACEHOLDER_IMAGE_LARGE, UNTITLED,
};
pub use video::{JobId, JobStatus, PollState, VideoFile};
