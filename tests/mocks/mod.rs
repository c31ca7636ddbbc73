//! In-memory stand-ins for the fetch and delivery collaborators

pub mod fake_fetcher;
pub mod fake_source;
pub mod recording_sink;

#[allow(unused_imports)]
pub use fake_fetcher::FakeFetcher;
#[allow(unused_imports)]
pub use fake_source::{Behavior, CallLog, FakeSource, FetchCall};
#[allow(unused_imports)]
pub use recording_sink::{RecordingSink, SinkEvent};
