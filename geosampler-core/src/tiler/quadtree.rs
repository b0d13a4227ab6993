//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::SamplerResult;
use crate::core::feature::FeatureLayer;
use crate::datasource;
use crate::tiler::area::{Predicate, TilingArea};
use std::path::Path;
use tile_grid::{Criterion, QuadTree};

/// Adaptive quad tree tiler
#[derive(Clone, Debug)]
pub struct QuadTreeTiler {
    criterion: Criterion,
    area: TilingArea,
    predicate: Predicate,
}

impl QuadTreeTiler {
    pub fn new(criterion: Criterion, area: TilingArea, predicate: Predicate) -> QuadTreeTiler {
        QuadTreeTiler {
            criterion,
            area,
            predicate,
        }
    }
    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }
    pub fn area(&self) -> &TilingArea {
        &self.area
    }
    pub fn tile(&self) -> QuadTree {
        let tree = QuadTree::build(&self.area.bounds, &self.criterion, self.area.srid);
        info!(
            "Quad tree with {} ({} levels)",
            self.criterion,
            tree.last_level() + 1
        );
        if self.area.hull.is_none() {
            return tree;
        }
        let tree = tree.filtered(|tile| self.area.keeps(tile, self.predicate));
        for (level, layer) in tree.levels().iter().enumerate() {
            debug!("level {}: {} tiles within extent", level, layer.len());
        }
        tree
    }
    /// Write one file per level, named `<stem>-<level>.<ext>`
    pub fn write(&self, path: &str, driver: Option<&str>) -> SamplerResult<()> {
        let tree = self.tile();
        for (level, layer) in tree.levels().iter().enumerate() {
            let level_path = level_path(path, level);
            let name = format!("level-{}", level);
            datasource::write_layer(&FeatureLayer::from_tiles(&name, layer), &level_path, driver)?;
        }
        Ok(())
    }
}

pub fn level_path(path: &str, level: usize) -> String {
    let path = Path::new(path);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("tiles");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", stem, level, ext),
        None => format!("{}-{}", stem, level),
    };
    path.with_file_name(file_name).to_string_lossy().into_owned()
}
