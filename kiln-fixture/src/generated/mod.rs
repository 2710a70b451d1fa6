//! Code generated by kiln. DO NOT EDIT.
pub mod dao;
pub mod entity;
pub mod mock;
pub mod model;
pub mod repository;
