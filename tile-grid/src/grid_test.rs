//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{Extent, GridError, Tile, TileSpec, TiledLayer};

#[test]
fn test_strict_tiles() {
    let spec = TileSpec::square(50.0, 0.0, true).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&Extent::new(0.0, 0.0, 100.0, 100.0)).collect();
    assert_eq!(tiles.len(), 4);
    assert_eq!(
        tiles.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec![
            "0.0-0.0-50.0-50.0",
            "0.0-50.0-50.0-100.0",
            "50.0-0.0-100.0-50.0",
            "50.0-50.0-100.0-100.0"
        ]
    );
    assert_eq!(tiles[1].extent, Extent::new(0.0, 50.0, 50.0, 100.0));
}

#[test]
fn test_strict_drops_partial_tiles() {
    // 100 is not a multiple of 40: the third column and row are dropped, not shifted
    let spec = TileSpec::square(40.0, 0.0, true).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&Extent::new(0.0, 0.0, 100.0, 100.0)).collect();
    assert_eq!(tiles.len(), 4);
    assert!(tiles.iter().all(|t| t.extent.maxx <= 80.0 && t.extent.maxy <= 80.0));

    let spec = TileSpec::square(40.0, 0.0, false).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&Extent::new(0.0, 0.0, 100.0, 100.0)).collect();
    assert_eq!(tiles.len(), 9);
    assert_eq!(tiles[8].extent, Extent::new(80.0, 80.0, 120.0, 120.0));
}

#[test]
fn test_strict_fractional_size() {
    // 0.2 + 0.1 rounds to 0.30000000000000004, the last column still fits
    let spec = TileSpec::square(0.1, 0.0, true).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&Extent::new(0.0, 0.0, 0.3, 0.3)).collect();
    assert_eq!(tiles.len(), 9);
    let last = &tiles[8].extent;
    assert!((last.minx - 0.2).abs() < 1e-12 && (last.maxx - 0.3).abs() < 1e-12);
    assert!((last.miny - 0.2).abs() < 1e-12 && (last.maxy - 0.3).abs() < 1e-12);

    let spec = TileSpec::new(0.1, 0.3, 0.0, 0.0, true).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&Extent::new(0.0, 0.0, 0.7, 0.9)).collect();
    assert_eq!(tiles.len(), 7 * 3);

    // no extra column starting at the far edge without strict inclusion
    let spec = TileSpec::square(0.1, 0.0, false).unwrap();
    assert_eq!(spec.tiles(&Extent::new(0.0, 0.0, 0.3, 0.3)).count(), 9);
}

#[test]
fn test_overlap() {
    let extent = Extent::new(0.0, 0.0, 100.0, 100.0);
    let spec = TileSpec::square(30.0, 5.0, false).unwrap();
    assert_eq!(spec.step(), (20.0, 20.0));
    let tiles: Vec<Tile> = spec.tiles(&extent).collect();
    assert_eq!(tiles.len(), 36);
    assert_eq!(tiles[0].extent, Extent::new(-5.0, -5.0, 25.0, 25.0));
    assert_eq!(tiles[1].extent, Extent::new(-5.0, 15.0, 25.0, 45.0));

    let spec = TileSpec::square(30.0, 5.0, true).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&extent).collect();
    assert_eq!(tiles.len(), 25);
    let buffered = extent.buffered(5.0, 5.0);
    assert!(tiles.iter().all(|t| buffered.contains(&t.extent, 1e-9)));
}

#[test]
fn test_coverage() {
    let extent = Extent::new(506880.00000000914, 6286848.0, 508416.0, 6288379.599999994);
    for (size, overlap) in &[(64.0, 15.0), (32.0, 0.0), (128.0, 25.0), (100.0, 20.0)] {
        let spec = TileSpec::square(*size, *overlap, false).unwrap();
        let tiles: Vec<Tile> = spec.tiles(&extent).collect();
        let n = 37;
        for i in 0..=n {
            for j in 0..=n {
                let x = extent.minx + extent.width() * i as f64 / n as f64;
                let y = extent.miny + extent.height() * j as f64 / n as f64;
                let covered = tiles.iter().any(|t| {
                    t.extent.minx <= x && x <= t.extent.maxx && t.extent.miny <= y && y <= t.extent.maxy
                });
                assert!(covered, "({}, {}) not covered with tile size {}", x, y, size);
            }
        }

        let spec = TileSpec::square(*size, *overlap, true).unwrap();
        let buffered = extent.buffered(*overlap, *overlap);
        assert!(spec
            .tiles(&extent)
            .all(|t| buffered.contains(&t.extent, 1e-6)));
    }
}

#[test]
fn test_rectangular_spec() {
    let spec = TileSpec::new(50.0, 25.0, 0.0, 0.0, true).unwrap();
    let tiles: Vec<Tile> = spec.tiles(&Extent::new(0.0, 0.0, 100.0, 50.0)).collect();
    assert_eq!(tiles.len(), 4);
    assert_eq!(tiles[3].id, "50.0-25.0-100.0-50.0");
}

#[test]
fn test_idempotence() {
    let extent = Extent::new(-12.5, 3.0, 87.25, 64.0);
    let spec = TileSpec::new(10.0, 7.5, 1.0, 0.5, false).unwrap();
    let first: Vec<String> = spec.tiles(&extent).map(|t| t.id).collect();
    let second: Vec<String> = spec.tiles(&extent).map(|t| t.id).collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let mut iter = spec.tiles(&extent);
    let head: Vec<String> = iter.by_ref().take(3).map(|t| t.id).collect();
    iter.restart();
    let again: Vec<String> = iter.take(3).map(|t| t.id).collect();
    assert_eq!(head, again);
}

#[test]
fn test_degenerate_extent() {
    let spec = TileSpec::square(10.0, 2.0, false).unwrap();
    assert_eq!(spec.tiles(&Extent::new(0.0, 0.0, 0.0, 100.0)).count(), 0);
    assert_eq!(spec.tiles(&Extent::new(10.0, 0.0, 0.0, 100.0)).count(), 0);
    assert_eq!(spec.tiles(&Extent::new(0.0, 5.0, 100.0, 5.0)).count(), 0);
}

#[test]
fn test_bad_spec() {
    assert!(matches!(
        TileSpec::square(10.0, 5.0, true),
        Err(GridError::InvalidTileSpec(_))
    ));
    assert!(matches!(
        TileSpec::new(10.0, 10.0, 1.0, 6.0, true),
        Err(GridError::InvalidTileSpec(_))
    ));
    assert!(TileSpec::square(0.0, 0.0, true).is_err());
    assert!(TileSpec::square(10.0, -1.0, true).is_err());
    assert!(TileSpec::square(10.0, 4.9, true).is_ok());
}

#[test]
fn test_tiled_layer() {
    let spec = TileSpec::square(50.0, 0.0, true).unwrap();
    let layer = TiledLayer::new(2154, spec.tiles(&Extent::new(0.0, 0.0, 100.0, 100.0)).collect());
    assert_eq!(layer.total_area(), 10000.0);
    let selection = layer.select(&[3, 0]);
    assert_eq!(
        selection.ids(),
        vec!["50.0-50.0-100.0-100.0", "0.0-0.0-50.0-50.0"]
    );
    let left = layer.filtered(|t| t.extent.minx < 50.0);
    assert_eq!(left.len(), 2);
    assert_eq!(left.srid, 2154);
}
