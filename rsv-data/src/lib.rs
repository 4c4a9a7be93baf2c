//! Combination, historical statistics and indicators for reservoir levels.
//!
//! This crate turns the per-source records held in a
//! [`rsv_records::store::SourceStore`] into the structures a dashboard
//! displays. Every function is pure: the caller re-runs it whenever the
//! datasets, the selected sources or the selected year change.
//!
//! # Pipeline
//!
//! - [`combine::combine`] sums the selected sources year by year
//! - [`historical::historical_stats`] per-month min / average / max
//! - [`kpi::derive_kpis`] capacity, current reserve, percentage, variation
//! - [`per_source::per_source_stats`] current and max per source
//! - [`dashboard::build_view`] all of the above plus monthly comparison rows
//!
//! # Usage
//!
//! ```rust
//! use rsv_data::dashboard::build_view;
//! use rsv_data::selection::SourceSelection;
//! use rsv_records::parser::parse_yearly_csv;
//! use rsv_records::store::SourceStore;
//!
//! let mut store = SourceStore::new(["north", "south"]);
//! store.insert("north", parse_yearly_csv("Year,Jan,Feb\n2020,10,12\n"));
//! store.insert("south", parse_yearly_csv("Year,Jan,Feb\n2020,5,\n"));
//!
//! let view = build_view(&store, &SourceSelection::new(["north", "south"]), Some(2020));
//! assert_eq!(view.combined[0].values[0], Some(15.0));
//! assert_eq!(view.kpis.current_reserve, 12.0);
//! ```

pub mod combine;
pub mod dashboard;
pub mod historical;
pub mod kpi;
pub mod models;
pub mod per_source;
pub mod selection;
