//! A data layer generated at build time from `schema/`, with every plugin bound. The tests under
//! `tests/` run it against an in-memory executor.

pub mod generated;
