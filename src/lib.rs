pub mod calendar;
pub mod engine;
pub mod model;
pub mod repl;
pub mod snapshot;
pub mod storage;
