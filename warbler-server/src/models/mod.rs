//! Domain models with validation at construction
//!
//! Row types live next to their repositories in `db::repos`; this module
//! holds the validated input types and pagination shared by every layer.

pub mod validation;
pub mod message;
pub mod pagination;

pub use validation::ValidationError;
pub use message::{MessageText, MAX_MESSAGE_LEN};
pub use pagination::{Pagination, Paginated, PaginationParams, MAX_PER_PAGE};

/// Avatar stored when a user signs up without one.
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.svg";

/// Profile header stored when a user has not chosen one.
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.svg";
