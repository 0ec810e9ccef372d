//! Program elements carrying markers

use super::{Marker, MarkerKind};

/// Something markers are attached to
///
/// This is the non-reflective counterpart of an annotated field or method: an
/// element exposes at most one marker per kind.
pub trait Annotated {
    /// Returns the marker of `kind`, if present
    fn annotation(&self, kind: MarkerKind) -> Option<&Marker>;
}

/// A named element with attached markers
///
/// Declaration order is preserved. Attaching a marker of a kind that is
/// already present replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedElement {
    name: String,
    markers: Vec<Marker>,
}

impl AnnotatedElement {
    /// Creates an element without markers
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
        }
    }

    /// Attaches a marker
    pub fn with(mut self, marker: impl Into<Marker>) -> Self {
        self.attach(marker.into());
        self
    }

    /// Attaches a marker in place
    pub fn attach(&mut self, marker: Marker) {
        let kind = marker.kind();
        match self.markers.iter_mut().find(|m| m.kind() == kind) {
            Some(existing) => *existing = marker,
            None => self.markers.push(marker),
        }
    }

    /// The element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached markers in declaration order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Annotated for AnnotatedElement {
    fn annotation(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind() == kind)
    }
}
