// Public API - what other modules can use
pub use handlers::{duplicate_name, user_list};
pub use naming::{NameDeduplicator, SUFFIX_RANGE};
pub use service::MembershipService;
pub use types::{DuplicateNameQuery, DuplicateNameResponse, UserListQuery};

// Internal modules
mod handlers;
mod naming;
mod service;
mod types;
