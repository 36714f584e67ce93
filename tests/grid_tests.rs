use broadside::{
    index_to_row_col, orthogonal_neighbors, row_col_to_index, CellSet, BOARD_SIZE, NUM_CELLS,
};

#[test]
fn test_index_row_col_inverse() {
    for index in 0..NUM_CELLS {
        let (r, c) = index_to_row_col(index);
        assert!(r < BOARD_SIZE && c < BOARD_SIZE);
        assert_eq!(row_col_to_index(r, c), index);
    }
}

#[test]
#[should_panic]
fn test_out_of_range_index_fails_fast() {
    index_to_row_col(NUM_CELLS);
}

#[test]
fn test_cellset_basics() {
    let mut set = CellSet::new();
    assert!(set.is_empty());
    set.insert(0);
    set.insert(99);
    set.insert(99);
    assert_eq!(set.len(), 2);
    assert!(set.contains(0));
    assert!(set.contains(99));
    assert!(!set.contains(50));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 99]);
}

#[test]
fn test_cellset_bit_ops() {
    let a: CellSet = [1, 2, 3].into_iter().collect();
    let b: CellSet = [3, 4].into_iter().collect();
    assert_eq!((a | b).len(), 4);
    assert_eq!((a & b).iter().collect::<Vec<_>>(), vec![3]);
    assert_eq!((!CellSet::new()).len(), NUM_CELLS);
}

#[test]
fn test_neighbors_corner_and_center() {
    // Top-left corner has two neighbors.
    let corner: Vec<_> = orthogonal_neighbors(0).collect();
    assert_eq!(corner.len(), 2);
    assert!(corner.contains(&1));
    assert!(corner.contains(&BOARD_SIZE));

    // Interior cell has four.
    let center = row_col_to_index(5, 5);
    let neighbors: Vec<_> = orthogonal_neighbors(center).collect();
    assert_eq!(neighbors.len(), 4);
    for n in neighbors {
        let (r, c) = index_to_row_col(n);
        let (cr, cc) = index_to_row_col(center);
        assert_eq!(r.abs_diff(cr) + c.abs_diff(cc), 1);
    }
}
