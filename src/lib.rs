//! Yojana Sahayak - Government Scheme Discovery Assistant
//!
//! Backend for a voice-first assistant that answers questions about
//! government welfare schemes through an external agent orchestrator,
//! annotates the answers with detected eligibility signals, and scrubs
//! uploaded document text of personally-identifiable information before
//! it is displayed or forwarded.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
