pub mod chart;
pub mod checker;
pub mod configuration;
pub mod entities;
pub mod features;
pub mod grammar;
pub mod pipeline;
pub mod tree;
