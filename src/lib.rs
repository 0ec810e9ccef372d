// Obfuscation Markers - declarative obfuscation for named fields
// Copyright (c) 2025 Obfuscation Markers Contributors
// Licensed under the Apache License, Version 2.0

//! # Obfuscation Markers
//!
//! Declarative markers that say how a value should be obfuscated, and a
//! factory that turns them into reusable strategies.
//!
//! ## Overview
//!
//! This library provides:
//! - **Markers** for six masking kinds (all, none, fixed length, fixed value,
//!   portion, custom provider) and one representation kind
//! - **Resolution** of the markers on an element into at most one obfuscator
//!   and at most one representation provider
//! - **Built-in representations** for arrays and plain values, shared as
//!   process-wide singletons
//! - **Manifests** that declare markers for named fields in TOML
//!
//! ## Architecture
//!
//! - [`domain`] - Error types and capabilities
//! - [`obfuscator`] - Masking strategies
//! - [`representation`] - Values and representation providers
//! - [`markers`] - Marker types and annotated elements
//! - [`factory`] - The resolution facade
//! - [`registry`] - Named provider registration
//! - [`config`] - Field manifests
//! - [`logging`] - Structured logging setup
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use obfuscation_markers::factory::{DefaultObjectFactory, ObjectFactory};
//! use obfuscation_markers::markers::{AnnotatedElement, ObfuscatePortion, RepresentedBy};
//! use obfuscation_markers::representation::builtin::IntArrayToString;
//! use obfuscation_markers::representation::Value;
//!
//! # fn example() -> obfuscation_markers::domain::Result<()> {
//! let element = AnnotatedElement::new("pin_digits")
//!     .with(ObfuscatePortion {
//!         keep_at_start: 1,
//!         ..ObfuscatePortion::default()
//!     })
//!     .with(RepresentedBy::new(IntArrayToString::provider_type()));
//!
//! let factory = DefaultObjectFactory;
//! let obfuscator = factory.obfuscator(&element)?.expect("declared");
//! let representation = factory.representation(&element)?.expect("declared");
//!
//! let text = representation.to_display_form(&Value::IntArray(vec![1, 2, 3]))?;
//! assert_eq!(obfuscator.obfuscate_text(&text), "[********");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]. Conflicting markers,
//! providers that cannot be created and `Null` values are all reported to the
//! caller; nothing is retried or recovered.
//!
//! ## Logging
//!
//! The library emits `tracing` events and never installs a subscriber itself.

pub mod cli;
pub mod config;
pub mod domain;
pub mod factory;
pub mod logging;
pub mod markers;
pub mod obfuscator;
pub mod registry;
pub mod representation;
