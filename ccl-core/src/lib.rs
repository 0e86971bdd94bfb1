//! Connected-component labeling core library.
//!
//! Labels the 4- or 8-connected foreground components of a binary raster,
//! either in one batch call ([`label_two_pass`]) or incrementally as pixels
//! arrive ([`StreamingLabeler`]). Both labelers share the [`DisjointSet`]
//! substrate and produce a dense [`LabelMap`] whose labels run `1..=K`.
//!
//! # Tracing
//!
//! The batch labeler runs inside a `core.two_pass` span, streaming
//! materialisation inside `core.stream.materialize`, image seeding inside
//! `core.stream.seed`, and the reference labelers inside `core.baseline`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod baseline;
mod compaction;
mod connectivity;
mod disjoint_set;
mod error;
mod image;
mod streaming;
mod two_pass;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    connectivity::Connectivity,
    disjoint_set::{DisjointSet, ElementId, UnionOutcome},
    error::{DisjointSetError, DisjointSetErrorCode, LabelingError, LabelingErrorCode, Result},
    image::{BinaryImage, Dimensions, LabelMap},
    streaming::{StreamingLabeler, StreamingLabelerBuilder},
    two_pass::{label_buffer, label_two_pass},
};
