//! Core of a weekly football match-prediction game: fixture grouping and
//! ordering, the Wednesday prediction deadline, per-fixture display state,
//! and scoring. All time-sensitive functions take `now` explicitly; nothing
//! in the library reads the system clock or other ambient state.

pub mod api_fetch;
pub mod deadline;
pub mod display_state;
pub mod fixture;
pub mod grouping;
pub mod http_cache;
pub mod http_client;
pub mod matchweek;
pub mod scoring;
