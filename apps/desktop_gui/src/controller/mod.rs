//! Controller layer: egui input translation and event dispatch.

pub mod events;
pub mod orchestration;
