//! Data models and their schemas

pub mod category;
pub mod dates;
pub mod event;
pub mod page;
pub mod schema;
pub mod user;

// Re-export commonly used types
pub use category::{Category, CategoryList};
pub use dates::DatePolicy;
pub use event::{
    CreateEvent, EventDetail, EventSummary, EventType, FilterRequest, Link, Links, Organizer,
    UpdateEvent,
};
pub use page::{EventCollection, EventPage, PaginatedEvents};
pub use schema::Schema;
pub use user::{Credentials, LoginRequest, LoginResponse, RegisterRequest};
