//! Store Doctor - guided small-business consultation
//!
//! A store owner describes their shop, gets an initial diagnosis, asks
//! follow-up questions and finally receives a written prescription. Every
//! piece of text is produced by a generative backend from prompts built by
//! the `domain::prompt` assembler.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
