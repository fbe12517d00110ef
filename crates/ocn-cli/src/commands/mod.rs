pub mod agents;
pub mod cart;
pub mod run;
