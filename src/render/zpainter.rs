//! Depth sorted painting of 3D strokes.
//!
//! Strokes are rasterized concurrently into per-shard sample lists without touching the
//! canvas. [`ZPainter::commit`] then merges the shards pixel by pixel, sorts each pixel's
//! samples from far to near and composites them in that order, so the image does not
//! depend on which shard painted what or in which order strokes were submitted.

use crate::error::{FieldLineError, Result};
use crate::render::canvas::{Canvas, Paint, over, paint};
use crate::render::raster;
use egui::{Color32, Pos2};
use log::debug;
use ndarray::{Array2, Zip};
use rayon::prelude::*;
use std::cmp::Ordering;

/*
== Strokes and samples ========================================================
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthPoint {
    pub pixel: Pos2,
    /// Distance along the viewing direction; larger is farther away.
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStroke {
    pub from: DepthPoint,
    pub to: DepthPoint,
    /// Premultiplied stroke colour.
    pub color: Color32,
    pub width: f32,
}

// A rasterized pixel's colour, already scaled by coverage, together with its depth.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DepthSample {
    color: Paint,
    depth: f32,
}

// Farthest first. Equal depths fall back to the colour so the order is total.
fn paint_order(a: &DepthSample, b: &DepthSample) -> Ordering {
    let by_colour = a
        .color
        .iter()
        .zip(&b.color)
        .fold(Ordering::Equal, |order, (x, y)| order.then_with(|| x.total_cmp(y)));
    b.depth.total_cmp(&a.depth).then(by_colour)
}

/*
== Shards =====================================================================
*/

/// Private sample buffer of one painting worker.
pub struct ZShard {
    samples: Array2<Vec<DepthSample>>,
}

impl ZShard {
    fn new(width: u32, height: u32) -> Self {
        ZShard {
            samples: Array2::from_elem((height as usize, width as usize), Vec::new()),
        }
    }

    /// Records the stroke's samples. Depth at a pixel is interpolated at the nearest point
    /// of the segment; a zero length stroke takes the farther endpoint's depth.
    pub fn stroke(&mut self, stroke: &DepthStroke) {
        let (rows, columns) = self.samples.dim();
        let DepthStroke {
            from,
            to,
            color,
            width,
        } = *stroke;
        let far = from.depth.max(to.depth);
        raster::stroke_segment(from.pixel, to.pixel, width, columns, rows, |c| {
            let depth = match c.t {
                Some(t) => from.depth + t * (to.depth - from.depth),
                None => far,
            };
            self.samples[[c.y, c.x]].push(DepthSample {
                color: paint(color, c.alpha),
                depth,
            });
        });
    }

    pub fn sample_count(&self) -> usize {
        self.samples.iter().map(Vec::len).sum()
    }
}

/*
== Painter ====================================================================
*/

pub struct ZPainter {
    width: u32,
    height: u32,
    shards: Vec<ZShard>,
}

impl ZPainter {
    /// At least one shard is always created.
    pub fn new(width: u32, height: u32, shards: usize) -> Self {
        ZPainter {
            width,
            height,
            shards: (0..shards.max(1)).map(|_| ZShard::new(width, height)).collect(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn shard_mut(&mut self, index: usize) -> Result<&mut ZShard> {
        let count = self.shards.len();
        self.shards
            .get_mut(index)
            .ok_or(FieldLineError::ShardOutOfRange { index, count })
    }

    /// Spreads `strokes` round robin over the shards and rasterizes them in parallel.
    pub fn paint(&mut self, strokes: &[DepthStroke]) {
        let count = self.shards.len();
        self.shards
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, shard)| {
                for stroke in strokes.iter().skip(i).step_by(count) {
                    shard.stroke(stroke);
                }
            });
    }

    /// Composites every recorded sample onto `canvas`, far to near.
    pub fn commit(&self, canvas: &mut Canvas) -> Result<()> {
        if (canvas.width(), canvas.height()) != (self.width, self.height) {
            return Err(FieldLineError::InvalidOption(format!(
                "canvas is {}x{} but painter is {}x{}",
                canvas.width(),
                canvas.height(),
                self.width,
                self.height
            )));
        }
        Zip::indexed(canvas.pixels_mut()).par_for_each(|(y, x), pixel| {
            let mut merged: Vec<DepthSample> = self
                .shards
                .iter()
                .flat_map(|shard| shard.samples[[y, x]].iter().copied())
                .collect();
            merged.sort_unstable_by(paint_order);
            for sample in &merged {
                *pixel = over(*pixel, sample.color);
            }
        });
        debug!(
            "committed {} depth samples from {} shards",
            self.shards.iter().map(ZShard::sample_count).sum::<usize>(),
            self.shards.len()
        );
        Ok(())
    }
}
