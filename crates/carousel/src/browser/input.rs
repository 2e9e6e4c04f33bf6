//! DOM event values to engine input.

use carousel_core::PointerSample;

/// Build a pointer sample from a DOM pointer event's type and fields.
/// Unknown event types give `None`.
#[must_use]
pub fn pointer_sample(kind: &str, pointer_id: i32, x: f64, y: f64, time_ms: f64) -> Option<PointerSample> {
    let id = u32::try_from(pointer_id).unwrap_or_default();
    match kind {
        "pointerdown" => Some(PointerSample::Down { id, x, y, time_ms }),
        "pointermove" => Some(PointerSample::Move { id, x, y, time_ms }),
        "pointerup" => Some(PointerSample::Up { id, x, y, time_ms }),
        "pointercancel" | "lostpointercapture" => Some(PointerSample::Cancel { id }),
        _ => None,
    }
}

/// Parse a dot's `data-dot` attribute.
#[must_use]
pub fn parse_dot_index(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_sample_kinds() {
        assert_eq!(
            pointer_sample("pointerdown", 3, 10.0, 20.0, 5.0),
            Some(PointerSample::Down {
                id: 3,
                x: 10.0,
                y: 20.0,
                time_ms: 5.0
            })
        );
        assert!(matches!(
            pointer_sample("pointermove", 3, 0.0, 0.0, 0.0),
            Some(PointerSample::Move { .. })
        ));
        assert!(matches!(
            pointer_sample("pointerup", 3, 0.0, 0.0, 0.0),
            Some(PointerSample::Up { .. })
        ));
        assert_eq!(
            pointer_sample("pointercancel", 3, 0.0, 0.0, 0.0),
            Some(PointerSample::Cancel { id: 3 })
        );
        assert_eq!(pointer_sample("click", 3, 0.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_negative_pointer_id() {
        assert_eq!(
            pointer_sample("pointercancel", -1, 0.0, 0.0, 0.0),
            Some(PointerSample::Cancel { id: 0 })
        );
    }

    #[test]
    fn test_parse_dot_index() {
        assert_eq!(parse_dot_index("4"), Some(4));
        assert_eq!(parse_dot_index(" 0 "), Some(0));
        assert_eq!(parse_dot_index("-1"), None);
        assert_eq!(parse_dot_index("x"), None);
    }
}
