pub mod conflicts;
pub mod edit;
pub mod list;
pub mod upcoming;
pub mod watch;
