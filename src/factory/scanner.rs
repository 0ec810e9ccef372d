//! Marker scanning and single-match enforcement
//!
//! Resolution runs in two steps. Scanning turns a marker source into the
//! ordered list of markers relevant to one capability: a kind lookup is
//! probed in the fixed kind order, an explicit collection keeps the caller's
//! order. Single-match enforcement then converts every scanned marker and
//! accepts zero or one result.

use crate::domain::{Capability, FactoryError, Result};
use crate::markers::{Marker, MarkerKind};

/// Probes `lookup` for every kind of `capability`, in scan order
pub fn scan_lookup(
    lookup: impl Fn(MarkerKind) -> Option<Marker>,
    capability: Capability,
) -> Vec<Marker> {
    MarkerKind::for_capability(capability)
        .iter()
        .filter_map(|&kind| lookup(kind).filter(|marker| marker.kind() == kind))
        .collect()
}

/// Keeps the markers of `capability`, in the order given
pub fn scan_markers(markers: &[Marker], capability: Capability) -> Vec<Marker> {
    markers
        .iter()
        .filter(|marker| marker.capability() == capability)
        .cloned()
        .collect()
}

/// Converts every marker and returns the single result, if any
///
/// Conversion errors propagate as soon as they occur. Each marker counts on
/// its own, so two equal markers still conflict.
///
/// # Errors
///
/// Returns [`FactoryError::Conflict`] with the converted markers in discovery
/// order when more than one marker converts into a strategy.
pub fn find_single<S>(
    capability: Capability,
    markers: Vec<Marker>,
    mut convert: impl FnMut(&Marker) -> Result<Option<S>>,
) -> Result<Option<S>> {
    let mut found: Vec<(Marker, S)> = Vec::with_capacity(1);
    for marker in markers {
        if let Some(strategy) = convert(&marker)? {
            tracing::debug!(%capability, marker = %marker, "Resolved marker");
            found.push((marker, strategy));
        }
    }

    match found.len() {
        0 | 1 => Ok(found.pop().map(|(_, strategy)| strategy)),
        count => {
            tracing::debug!(%capability, count, "Conflicting markers");
            Err(FactoryError::Conflict {
                capability,
                markers: found.into_iter().map(|(marker, _)| marker).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{ObfuscateAll, ObfuscateFixedValue, ObfuscateNone, RepresentedBy};
    use crate::representation::builtin::ValueToString;

    fn sample() -> Vec<Marker> {
        vec![
            Marker::from(ObfuscateFixedValue::new("x")),
            Marker::from(RepresentedBy::new(ValueToString::provider_type())),
            Marker::from(ObfuscateAll::default()),
        ]
    }

    #[test]
    fn test_scan_markers_keeps_caller_order() {
        let scanned = scan_markers(&sample(), Capability::Obfuscation);
        let kinds: Vec<MarkerKind> = scanned.iter().map(Marker::kind).collect();
        assert_eq!(kinds, vec![MarkerKind::FixedValue, MarkerKind::All]);

        let scanned = scan_markers(&sample(), Capability::Representation);
        assert_eq!(scanned.len(), 1);
    }

    #[test]
    fn test_scan_lookup_uses_kind_order() {
        let markers = sample();
        let scanned = scan_lookup(
            |kind| markers.iter().find(|m| m.kind() == kind).cloned(),
            Capability::Obfuscation,
        );
        let kinds: Vec<MarkerKind> = scanned.iter().map(Marker::kind).collect();
        assert_eq!(kinds, vec![MarkerKind::All, MarkerKind::FixedValue]);
    }

    #[test]
    fn test_scan_lookup_ignores_mismatched_kinds() {
        let scanned = scan_lookup(|_| Some(Marker::from(ObfuscateNone)), Capability::Obfuscation);
        assert_eq!(scanned, vec![Marker::from(ObfuscateNone)]);
    }

    #[test]
    fn test_find_single_outcomes() {
        let none: Option<u8> = find_single(Capability::Obfuscation, vec![], |_| Ok(Some(1))).unwrap();
        assert_eq!(none, None);

        let one = find_single(
            Capability::Obfuscation,
            vec![Marker::from(ObfuscateNone)],
            |_| Ok(Some(1)),
        )
        .unwrap();
        assert_eq!(one, Some(1));

        let twice = vec![Marker::from(ObfuscateNone), Marker::from(ObfuscateNone)];
        let err = find_single(Capability::Obfuscation, twice.clone(), |_| Ok(Some(1))).unwrap_err();
        assert_eq!(err.conflicting_markers(), Some(twice.as_slice()));
    }

    #[test]
    fn test_find_single_propagates_conversion_error_first() {
        let markers = vec![Marker::from(ObfuscateNone), Marker::from(ObfuscateAll::default())];
        let err = find_single::<u8>(Capability::Obfuscation, markers, |_| {
            Err(FactoryError::InvalidMarker("bad".to_string()))
        })
        .unwrap_err();
        assert!(matches!(err, FactoryError::InvalidMarker(_)));
    }
}
