//! Asylum statistics chart pipeline
//!
//! Turns UNHCR-style CSV tables into the datasets behind a set of charts:
//! seasonal application lines, 3- and 5-year window comparisons, age/gender
//! splits, top hosting-country rankings and period-sliced choropleth maps.
//!
//! This crate provides the core implementation for the `asylum-stats` CLI.
//! The output is a single JSON chart deck; rendering is left to whatever
//! consumes it.

pub mod aggregator;
pub mod charts;
pub mod commands;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod utils;
