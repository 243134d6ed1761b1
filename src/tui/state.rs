//! Pure state transformations for the TUI (Functional Core)
//!
//! Only pure functions here: selection cycling, comparison marks, and the
//! share/width math the distribution view needs. The imperative shell
//! (app.rs and the event loop) handles I/O and calls into these.

// =============================================================================
// Selection Cycling
// =============================================================================

/// Cycle the genre selection forward.
///
/// `None` is the distribution view; cycling runs
/// distribution → genre 0 → ... → genre N-1 → distribution.
pub fn next_genre(current: Option<usize>, genre_count: usize) -> Option<usize> {
    match current {
        None if genre_count == 0 => None,
        None => Some(0),
        Some(i) if i + 1 < genre_count => Some(i + 1),
        Some(_) => None,
    }
}

/// Cycle the genre selection backward
pub fn prev_genre(current: Option<usize>, genre_count: usize) -> Option<usize> {
    match current {
        None if genre_count == 0 => None,
        None => Some(genre_count - 1),
        Some(0) => None,
        Some(i) => Some(i - 1),
    }
}

// =============================================================================
// Comparison Marks
// =============================================================================

/// Toggle membership of `index` in the comparison set
pub fn toggle_mark(marks: &[bool], index: usize) -> Vec<bool> {
    let mut out = marks.to_vec();
    if let Some(slot) = out.get_mut(index) {
        *slot = !*slot;
    }
    out
}

/// Names of the marked genres, in display order
pub fn marked_genres(genres: &[String], marks: &[bool]) -> Vec<String> {
    genres
        .iter()
        .zip(marks.iter())
        .filter(|(_, &marked)| marked)
        .map(|(g, _)| g.clone())
        .collect()
}

// =============================================================================
// Distribution Math
// =============================================================================

/// Fraction of `total` that `value` represents (0 when the total is 0)
pub fn share(value: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        value / total
    }
}

/// Width in cells of a share bar, never exceeding `max_width`
pub fn bar_cells(fraction: f64, max_width: usize) -> usize {
    ((fraction * max_width as f64).round() as usize).min(max_width)
}

/// Truncate a label to fit a column, with an ellipsis
pub fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let kept: String = label.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Cycling Tests ---

    #[test]
    fn test_next_genre_cycles_through_distribution() {
        assert_eq!(next_genre(None, 2), Some(0));
        assert_eq!(next_genre(Some(0), 2), Some(1));
        assert_eq!(next_genre(Some(1), 2), None); // back to distribution
    }

    #[test]
    fn test_prev_genre_cycles_backward() {
        assert_eq!(prev_genre(None, 2), Some(1));
        assert_eq!(prev_genre(Some(1), 2), Some(0));
        assert_eq!(prev_genre(Some(0), 2), None);
    }

    #[test]
    fn test_cycling_with_no_genres() {
        assert_eq!(next_genre(None, 0), None);
        assert_eq!(prev_genre(None, 0), None);
    }

    // --- Mark Tests ---

    #[test]
    fn test_toggle_mark() {
        let marks = vec![false, true, false];
        let toggled = toggle_mark(&marks, 0);
        assert_eq!(toggled, vec![true, true, false]);
        let toggled = toggle_mark(&toggled, 1);
        assert_eq!(toggled, vec![true, false, false]);
    }

    #[test]
    fn test_toggle_mark_out_of_range_is_noop() {
        let marks = vec![false];
        assert_eq!(toggle_mark(&marks, 5), vec![false]);
    }

    #[test]
    fn test_marked_genres() {
        let genres = vec!["Horror".to_string(), "Drama".to_string(), "Comedy".to_string()];
        let marks = vec![true, false, true];
        assert_eq!(marked_genres(&genres, &marks), vec!["Horror", "Comedy"]);
    }

    // --- Distribution Math Tests ---

    #[test]
    fn test_share() {
        assert_eq!(share(25.0, 100.0), 0.25);
        assert_eq!(share(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_bar_cells_clamped() {
        assert_eq!(bar_cells(0.5, 20), 10);
        assert_eq!(bar_cells(1.5, 20), 20);
        assert_eq!(bar_cells(0.0, 20), 0);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Heat", 10), "Heat");
        assert_eq!(truncate_label("The Shawshank Redemption", 10), "The Shaws…");
        assert_eq!(truncate_label("abc", 1), "…");
    }
}
