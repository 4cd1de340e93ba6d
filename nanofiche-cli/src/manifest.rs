//! Ordering of image files and their assignment to placements.
//!
//! Files are only listed, never opened.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use log::debug;
use nanofiche::entities::PackingResult;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extensions (lowercase) of the files picked up from an image folder
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Orders file names by the last run of digits they contain, so that `img_2` precedes `img_10`.
///
/// Names without digits count as 0. Equal numbers are ordered by name.
pub struct NaturalOrder {
    digits: Regex,
}

impl NaturalOrder {
    pub fn new() -> Result<Self> {
        Ok(NaturalOrder {
            digits: Regex::new(r"\d+")?,
        })
    }

    pub fn key(&self, name: &str) -> u64 {
        self.digits
            .find_iter(name)
            .last()
            .map_or(0, |m| m.as_str().parse().unwrap_or(u64::MAX))
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).cmp(&self.key(b)).then_with(|| a.cmp(b))
    }
}

/// All image files directly inside `folder`, in natural order of their file names.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let order = NaturalOrder::new()?;
    let mut images = vec![];
    for entry in fs::read_dir(folder).with_context(|| format!("could not read image folder: {}", folder.display()))? {
        let path = entry?.path();
        if path.is_file() && is_image(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| order.compare(&file_name(a), &file_name(b)));
    debug!("[MANIFEST] {} images found in {}", images.len(), folder.display());
    Ok(images)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pairs every placement of a layout with the image that goes there.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Manifest {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub bin_width: u32,
    pub bin_height: u32,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub index: usize,
    pub file: String,
    pub x: u32,
    pub y: u32,
}

impl Manifest {
    /// Assigns the `i`-th file to the `i`-th placement.
    pub fn new(result: &PackingResult, images: &[PathBuf]) -> Result<Self> {
        ensure!(
            images.len() == result.n_placed(),
            "{} images cannot be assigned to {} placements",
            images.len(),
            result.n_placed()
        );
        let entries = images
            .iter()
            .zip(result.placements.iter())
            .enumerate()
            .map(|(index, (image, p))| ManifestEntry {
                index,
                file: file_name(image),
                x: p.x,
                y: p.y,
            })
            .collect();

        Ok(Manifest {
            canvas_width: result.canvas_width,
            canvas_height: result.canvas_height,
            bin_width: result.bin.width,
            bin_height: result.bin.height,
            entries,
        })
    }
}
