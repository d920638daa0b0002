//! Reference layouts: the hand-placed canonical cell of every riding, and
//! the anchor each region packs from when ridings are rearranged.
//!
//! The two bundled layouts (federal ridings, Quebec provincial ridings) are
//! parsed from RON once per process and shared read-only afterwards.
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::errors::BinPlotError;
use crate::layout::pack::ceil_sqrt;
use crate::riding::{GridPos, RidingCode};

pub mod scope;

pub use scope::{Province, Scope};

const FEDERAL_BINS: &str = include_str!("../../data/federal_bins.ron");
const QUEBEC_BINS: &str = include_str!("../../data/quebec_bins.ron");

static FEDERAL: OnceLock<Result<ReferenceLayout, String>> = OnceLock::new();
static QUEBEC: OnceLock<Result<ReferenceLayout, String>> = OnceLock::new();

/// Where a region's ridings start when they are packed together.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegionAnchor {
    pub region: String,
    pub pos: GridPos,
}

/// A riding's canonical cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReferenceRiding {
    pub code: RidingCode,
    pub region: String,
    pub pos: GridPos,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ReferenceData {
    name: String,
    anchors: Vec<RegionAnchor>,
    ridings: Vec<ReferenceRiding>,
}

#[derive(Debug, Clone)]
pub struct ReferenceLayout {
    name: String,
    anchors: Vec<RegionAnchor>,
    ridings: Vec<ReferenceRiding>,
    by_code: HashMap<RidingCode, usize>,
    by_region: HashMap<String, usize>,
    region_sizes: Vec<usize>,
}

impl ReferenceLayout {
    /// Builds and validates a layout. Regions keep the order of `anchors`.
    pub fn new(
        name: &str,
        anchors: Vec<RegionAnchor>,
        ridings: Vec<ReferenceRiding>,
    ) -> Result<ReferenceLayout, BinPlotError> {
        let mut by_region = HashMap::new();
        for (i, anchor) in anchors.iter().enumerate() {
            if by_region.insert(anchor.region.clone(), i).is_some() {
                return Err(BinPlotError::InvalidReference(format!(
                    "region '{}' anchored twice",
                    anchor.region
                )));
            }
        }

        let mut by_code = HashMap::new();
        let mut occupied = HashSet::new();
        let mut region_sizes = vec![0usize; anchors.len()];
        for (i, riding) in ridings.iter().enumerate() {
            if by_code.insert(riding.code, i).is_some() {
                return Err(BinPlotError::InvalidReference(format!(
                    "riding {} listed twice",
                    riding.code
                )));
            }
            if !occupied.insert(riding.pos) {
                return Err(BinPlotError::InvalidReference(format!(
                    "riding {} overlaps another riding at {}",
                    riding.code, riding.pos
                )));
            }
            match by_region.get(&riding.region) {
                Some(&region) => region_sizes[region] += 1,
                None => {
                    return Err(BinPlotError::InvalidReference(format!(
                        "riding {} belongs to unanchored region '{}'",
                        riding.code, riding.region
                    )))
                }
            }
        }

        // Each region may need up to a ceil(sqrt(n)) square when packed,
        // kept as its first and one-past-last corners.
        let mut reserved: Vec<(usize, GridPos, GridPos)> = Vec::new();
        for (i, anchor) in anchors.iter().enumerate() {
            if region_sizes[i] == 0 {
                continue;
            }
            let side = i32::try_from(ceil_sqrt(region_sizes[i])).unwrap_or(i32::MAX);
            let Some(end) = anchor.pos.checked_add(GridPos::new(side, side)) else {
                return Err(BinPlotError::InvalidReference(format!(
                    "region '{}' anchored at {} runs off the grid",
                    anchor.region, anchor.pos
                )));
            };
            reserved.push((i, anchor.pos, end));
        }
        for (n, (a, astart, aend)) in reserved.iter().enumerate() {
            for (b, bstart, bend) in reserved.iter().skip(n + 1) {
                let apart = aend.row <= bstart.row
                    || bend.row <= astart.row
                    || aend.col <= bstart.col
                    || bend.col <= astart.col;
                if !apart {
                    return Err(BinPlotError::InvalidReference(format!(
                        "regions '{}' and '{}' overlap when arranged",
                        anchors[*a].region, anchors[*b].region
                    )));
                }
            }
        }

        Ok(ReferenceLayout {
            name: name.to_string(),
            anchors,
            ridings,
            by_code,
            by_region,
            region_sizes,
        })
    }

    pub fn from_ron_str(data: &str) -> Result<ReferenceLayout, BinPlotError> {
        let data: ReferenceData = ron::from_str(data)?;
        ReferenceLayout::new(&data.name, data.anchors, data.ridings)
    }

    /// The 338 federal ridings of the 2013 representation order.
    pub fn federal() -> Result<&'static ReferenceLayout, BinPlotError> {
        embedded(&FEDERAL, FEDERAL_BINS)
    }

    /// The 125 Quebec provincial ridings, grouped by administrative region.
    pub fn quebec() -> Result<&'static ReferenceLayout, BinPlotError> {
        embedded(&QUEBEC, QUEBEC_BINS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn riding(&self, code: RidingCode) -> Option<&ReferenceRiding> {
        self.by_code.get(&code).map(|&i| &self.ridings[i])
    }

    pub fn ridings(&self) -> &[ReferenceRiding] {
        &self.ridings
    }

    /// Region anchors in declaration order.
    pub fn regions(&self) -> &[RegionAnchor] {
        &self.anchors
    }

    pub fn anchor(&self, region: &str) -> Option<GridPos> {
        self.by_region.get(region).map(|&i| self.anchors[i].pos)
    }

    /// Position of the region in declaration order.
    pub fn region_index(&self, region: &str) -> Option<usize> {
        self.by_region.get(region).copied()
    }

    /// How many ridings the layout places in the region.
    pub fn region_size(&self, region: &str) -> usize {
        self.by_region
            .get(region)
            .map(|&i| self.region_sizes[i])
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.ridings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ridings.is_empty()
    }
}

fn embedded(
    cell: &'static OnceLock<Result<ReferenceLayout, String>>,
    data: &str,
) -> Result<&'static ReferenceLayout, BinPlotError> {
    cell.get_or_init(|| ReferenceLayout::from_ron_str(data).map_err(|err| err.to_string()))
        .as_ref()
        .map_err(|msg| BinPlotError::InvalidReference(msg.clone()))
}
