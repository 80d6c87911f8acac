pub mod commons;
pub mod export;
pub mod import;
pub mod list;
pub mod new;
pub mod remove;
pub mod run;
pub mod show;
pub mod update;
