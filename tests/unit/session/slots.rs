use super::*;

fn slot(v: u8) -> Slot {
    Slot {
        image: SourceImage::solid(2, 2, [v, v, v, 255]).unwrap(),
        transform: Transform::default(),
        adjustments: Adjustments::default(),
        thumbnail: Raster::new(1, 1).unwrap(),
    }
}

#[test]
fn empty_grid() {
    let grid = SlotGrid::default();
    assert!(grid.is_empty());
    assert_eq!(grid.next_empty(), Some(0));
    assert_eq!(grid.first_filled(), None);
    assert_eq!(grid.iter().count(), 12);
}

#[test]
fn put_take_and_search() {
    let mut grid = SlotGrid::default();
    grid.put(0, slot(1)).unwrap();
    grid.put(2, slot(2)).unwrap();
    assert_eq!(grid.next_empty(), Some(1));
    assert_eq!(grid.first_filled(), Some(0));
    assert_eq!(grid.filled_indices(), [0, 2]);

    assert!(grid.take(0).unwrap().is_some());
    assert!(grid.take(0).unwrap().is_none());
    assert_eq!(grid.first_filled(), Some(2));
}

#[test]
fn swap_moves_contents() {
    let mut grid = SlotGrid::default();
    grid.put(3, slot(9)).unwrap();
    grid.swap(3, 11).unwrap();
    assert!(!grid.is_filled(3));
    assert_eq!(grid.get(11).unwrap().image.view().pixel(0, 0), [9, 9, 9, 255]);
}

#[test]
fn out_of_range_index_is_validation_error() {
    let mut grid = SlotGrid::default();
    assert!(matches!(
        grid.put(12, slot(0)),
        Err(BadgeError::Validation(_))
    ));
    assert!(grid.swap(0, 12).is_err());
    assert!(grid.get(12).is_none());
}

#[test]
fn clear_empties_everything() {
    let mut grid = SlotGrid::default();
    grid.put(5, slot(1)).unwrap();
    grid.clear();
    assert!(grid.is_empty());
}
