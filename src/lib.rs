mod config;
mod container;
mod driver;
mod error;
mod fixture;
mod key;
mod report;
mod stats;

pub mod fork;

pub use crate::config::{BenchConfig, TimeUnit};
pub use crate::container::{
    populate, Container, ContainerKind, HashContainer, Populated, Staged, TreeContainer,
};
pub use crate::driver::{Driver, Phase, Report, Target};
pub use crate::error::BenchError;
pub use crate::fixture::Fixture;
pub use crate::key::{MapKey, MAP_ELEMENT};
pub use crate::report::{render_json, render_table};
pub use crate::stats::Samples;

#[cfg(test)]
mod fixture_test;
#[cfg(test)]
mod stats_test;
