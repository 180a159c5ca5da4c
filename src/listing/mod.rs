//! Post listing - the home page's growing list of posts

mod page;
mod state;

pub use page::{fetch_formatted, fetch_initial, LoadOutcome, PostListPage};
pub use state::{Applied, PostListState, Transition};
