use super::*;

fn assert_invariants(window: PreviewWindow, total: usize, desired: usize) {
    assert!(window.start <= window.end);
    assert!(window.end <= total);
    assert_eq!(window.len(), total.min(desired));
}

#[test]
fn empty_file_yields_empty_window() {
    assert_eq!(compute_window(0, 0, 100), PreviewWindow::EMPTY);
    assert_eq!(compute_window(42, 0, 10), PreviewWindow::EMPTY);
}

#[test]
fn small_file_is_shown_whole() {
    assert_eq!(compute_window(5, 10, 100), PreviewWindow { start: 0, end: 10 });
    assert_eq!(compute_window(0, 10, 10), PreviewWindow { start: 0, end: 10 });
}

#[test]
fn window_is_centered_on_target() {
    let window = compute_window(500, 1000, 100);
    assert_eq!(window, PreviewWindow { start: 450, end: 550 });
    assert!(window.contains(500));
}

#[test]
fn window_reflows_at_file_end() {
    let window = compute_window(995, 1000, 100);
    assert_eq!(window, PreviewWindow { start: 900, end: 1000 });
}

#[test]
fn window_clamps_at_file_start() {
    let window = compute_window(3, 1000, 100);
    assert_eq!(window, PreviewWindow { start: 0, end: 100 });
}

#[test]
fn target_past_end_is_clamped() {
    let window = compute_window(5000, 1000, 100);
    assert_eq!(window, PreviewWindow { start: 900, end: 1000 });
    assert!(window.contains(999));
}

#[test]
fn zero_desired_is_empty_but_in_range() {
    let window = compute_window(10, 20, 0);
    assert!(window.is_empty());
    assert!(window.end <= 20);
}

#[test]
fn invariants_hold_across_shapes() {
    for total in [1usize, 2, 7, 50, 101, 333] {
        for desired in [1usize, 2, 9, 50, 100, 400] {
            for target in [0usize, 1, total / 2, total.saturating_sub(1), total + 3] {
                let window = compute_window(target, total, desired);
                assert_invariants(window, total, desired);
                assert!(window.contains(target.min(total - 1)));
            }
        }
    }
}
