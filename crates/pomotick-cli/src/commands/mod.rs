pub mod config;
pub mod cues;
pub mod run;
pub mod simulate;
