//! Page components.
//!
//! Each page owns its view state and talks to the backend through a shared
//! [`ShowcaseClient`](crate::api::ShowcaseClient). Operations that change the
//! view take `&mut self`, so one page is driven by one task at a time.
//!
//! - [`SearchController`]: catalog search
//! - [`CatalogManager`]: the saved-product list
//! - [`ProductDetailPage`]: a single product
//! - [`ShowcasePage`]: the read-only public listing of saved products
//!
//! Video generation is shared by all pages and lives in
//! [`VideoStudio`](crate::video::VideoStudio).

pub mod catalog;
pub mod detail;
pub mod search;
pub mod showcase;

pub use catalog::{CatalogManager, EditForm, DEFAULT_EXPORT_FILE};
pub use detail::{DetailState, ProductDetailPage};
pub use search::{SearchController, SearchMode, SearchOutcome};
pub use showcase::ShowcasePage;
