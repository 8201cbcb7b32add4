//! Dashboard session state.
//!
//! [`DashboardController`] drives listings from committed filter state,
//! [`ResultStream`] keeps only the newest response, notices report outcomes,
//! and [`state`] persists preferences between sessions.

mod controller;
pub mod notice;
pub mod results;
pub mod state;

pub use controller::DashboardController;
pub use notice::{
    Notice, NoticeReceiver, NoticeSender, PLAYER_CREATED, PLAYER_DELETED, PLAYER_UPDATED, Severity,
};
pub use results::{LoadState, RequestTicket, ResultStream};
pub use state::{DashboardState, JsonFileStore, MemoryStore, StateStore, Theme};
