use super::*;

#[test]
fn position_ordering() {
    assert!(Position::new(1, 5) < Position::new(2, 0));
    assert!(Position::new(2, 1) > Position::new(2, 0));
    assert_eq!(Position::default(), Position::ZERO);
}

#[test]
fn range_contains_is_inclusive() {
    let range = Range::from_coords(1, 2, 3, 4);
    assert!(range.contains(Position::new(1, 2)));
    assert!(range.contains(Position::new(2, 0)));
    assert!(range.contains(Position::new(3, 4)));
    assert!(!range.contains(Position::new(3, 5)));
    assert!(!range.contains(Position::new(0, 9)));
}

#[test]
fn range_contains_range() {
    let outer = Range::from_coords(0, 0, 10, 0);
    let inner = Range::from_coords(2, 4, 2, 9);
    assert!(outer.contains_range(inner));
    assert!(!inner.contains_range(outer));
}

#[test]
fn display_is_one_based() {
    let range = Range::from_coords(0, 0, 1, 3);
    assert_eq!(range.to_string(), "1:1-2:4");
    assert_eq!(format!("{range:?}"), "0:0..1:3");
}

#[test]
fn empty_range() {
    assert!(Range::default().is_empty());
    assert!(!Range::from_coords(0, 0, 0, 1).is_empty());
}
