//! Type-directed XML-RPC value serialization.
//!
//! This crate provides:
//! - A closed runtime [`Value`] taxonomy covering everything the XML-RPC
//!   value encoding can carry
//! - A [`SerializerResolver`] dispatching each shape to its wire
//!   serializer, with initialize-once caching for the stateful ones
//! - A streaming [`Sink`] seam plus [`XmlSink`], a markup implementation
//!   for it
//!
//! Transport, request/response envelopes and XML parsing are out of
//! scope; this is the value-encoding layer an RPC stream writer plugs
//! into.

pub mod config;
pub mod error;
pub mod resolver;
pub mod serializer;
pub mod sink;
pub mod value;

pub use config::*;
pub use error::*;
pub use resolver::*;
pub use serializer::*;
pub use sink::*;
pub use value::*;
