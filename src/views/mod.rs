//! View state machines
//!
//! Each view owns its own state and talks to the events service through the
//! service traits, so the same flows drive the CLI and the tests.

pub mod event_detail;
pub mod event_form;
pub mod event_list;
pub mod filter_panel;
pub mod my_events;
pub mod pagination;

pub use event_detail::{DeleteOutcome, DetailState, EventDetailView, Prompter};
pub use event_form::EventForm;
pub use event_list::{EventListView, ListState, QueryTicket, ScrollTo};
pub use filter_panel::FilterPanel;
pub use my_events::{AgendaState, MyEventsView};
pub use pagination::{PageButton, Pagination};
