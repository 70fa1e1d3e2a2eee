pub mod evaluator;
pub mod message;
pub mod recorder;
pub mod runner;

pub use evaluator::{evaluate, window_end, Verdict, WINDOW_HOURS};
pub use message::closure_message;
pub use recorder::Recorder;
pub use runner::Tracker;
