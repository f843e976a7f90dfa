//! # IO Module
//!
//! Interface layer that exposes the weight log domain over HTTP.

pub mod rest;

pub use rest::*;
