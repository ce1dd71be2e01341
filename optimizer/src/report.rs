//! Result files.
//!
//! Each run writes a human-readable `result<N>.txt` and a `result<N>.json`
//! with the same content for downstream tooling.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mcts::Configuration;
use serde::Serialize;
use sphere_geometry::Topology;

use crate::runner::RunSummary;

/// Decimal places kept for vertex coordinates.
const VERTEX_DECIMALS: i32 = 6;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub size: usize,
    pub seed: u64,

    /// Sorted region degrees
    pub topology: Vec<usize>,

    /// Vertex indices per region
    pub regions: Topology,

    /// Relaxed vertices as `[lat, lon]`, rounded
    pub vertices: Vec<[f64; 2]>,

    /// Length of the edge network, every edge counted once
    pub total_perimeter: f64,

    pub placement_cost: f64,
    pub relaxation_cost: f64,
}

impl Report {
    pub fn from_summary(summary: &RunSummary) -> Self {
        let relaxed = &summary.relaxation.best;
        let topology = relaxed.topology();

        Self {
            size: summary.size,
            seed: summary.seed,
            topology: topology.signature(),
            regions: topology.clone(),
            vertices: relaxed
                .vertices()
                .iter()
                .map(|&[lat, lon]| [round(lat), round(lon)])
                .collect(),
            total_perimeter: relaxed.metrics().network_length(),
            placement_cost: summary.placement.best_cost,
            relaxation_cost: relaxed.cost(),
        }
    }

    /// Plain-text rendering, one field per line.
    pub fn render_text(&self) -> String {
        format!(
            "Size: {}\nTopology: {:?}\nRegions: {:?}\nVertices: {:?}\nTotal perimeter: {}\n",
            self.size,
            self.topology,
            self.regions.regions(),
            self.vertices,
            self.total_perimeter
        )
    }

    /// Write `result<N>.txt` and `result<N>.json` into `dir`, creating it
    /// if needed. Returns the text report's path.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create results directory {}", dir.display()))?;

        let text_path = dir.join(format!("result{}.txt", self.size));
        fs::write(&text_path, self.render_text())
            .with_context(|| format!("failed to write {}", text_path.display()))?;

        let json_path = dir.join(format!("result{}.json", self.size));
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        fs::write(&json_path, json)
            .with_context(|| format!("failed to write {}", json_path.display()))?;

        Ok(text_path)
    }
}

fn round(x: f64) -> f64 {
    let scale = 10f64.powi(VERTEX_DECIMALS);
    let rounded = (x * scale).round() / scale;
    // Avoid printing -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
