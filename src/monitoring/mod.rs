//! Background polling
//!
//! The only recurring activity in the console: periodic refresh of budget
//! alerts and model health. Pollers are cleared on teardown via their
//! active flag; a dropped handle leaves the next tick to exit the task.

pub mod poller;

pub use poller::{AlertPoller, ModelHealthPoller};
