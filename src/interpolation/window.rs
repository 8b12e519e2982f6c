//! Hole filling for a single three-row window.

use crate::types::{Row, Window};

/// Parses `raw` as a number unless it is the hole marker or not a number at all.
///
/// Both cases count as a hole; callers are not told which one it was. A finite-looking
/// token whose magnitude overflows `f64` (such as `1e400`) is out of range and also a hole;
/// only an explicit `inf`/`infinity` literal yields an infinite value.
pub fn parse_cell(raw: &str, hole_marker: &str) -> Option<f64> {
    if raw == hole_marker {
        return None;
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_infinite() && !is_infinity_literal(raw) {
        return None;
    }
    Some(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Returns `true` if `raw` needs interpolating.
pub fn is_hole(raw: &str, hole_marker: &str) -> bool {
    parse_cell(raw, hole_marker).is_none()
}

/// Returns a copy of `window.current` with every hole replaced by the mean of its numeric
/// non-diagonal neighbors (above, below, left, right), formatted with `decimal_places`
/// fractional digits.
///
/// Non-hole cells are copied verbatim. A hole with no numeric neighbor stays as
/// `hole_marker`. Neighbors are always read from the original row, never from values
/// filled earlier in the same pass.
pub fn interpolate_window(window: &Window<'_>, hole_marker: &str, decimal_places: usize) -> Row {
    let current = window.current;
    let cell = |row: Option<&[String]>, col: usize| -> Option<f64> {
        row.and_then(|r| r.get(col))
            .and_then(|raw| parse_cell(raw, hole_marker))
    };

    current
        .iter()
        .enumerate()
        .map(|(col, raw)| {
            if !is_hole(raw, hole_marker) {
                return raw.clone();
            }

            let left = col.checked_sub(1).and_then(|c| cell(Some(current), c));
            let right = cell(Some(current), col + 1);
            let neighbors = [cell(window.prior, col), cell(window.next, col), left, right];
            match mean(neighbors.iter().flatten().copied()) {
                Some(avg) => format!("{avg:.decimal_places$}"),
                None => hole_marker.to_owned(),
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (total, count) = values.fold((0.0, 0u32), |(t, n), v| (t + v, n + 1));
    (count > 0).then(|| total / f64::from(count))
}
