//! HTTP handlers

pub mod basic;
pub mod hello;
pub mod timer;
