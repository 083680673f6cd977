pub mod crates;
pub mod run;
pub mod setup;
pub mod testing;
pub mod web;
