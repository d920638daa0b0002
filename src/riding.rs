use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Numeric riding code, e.g. `35001` for the first Ontario federal riding.
pub type RidingCode = u32;

/// A cell position on the bin grid. Row 0 is the northern edge and rows
/// grow southward; columns grow eastward.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub fn new(row: i32, col: i32) -> GridPos {
        GridPos { row, col }
    }

    /// `None` when either coordinate would overflow.
    pub fn checked_add(self, rhs: GridPos) -> Option<GridPos> {
        Some(GridPos::new(
            self.row.checked_add(rhs.row)?,
            self.col.checked_add(rhs.col)?,
        ))
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The caller's value for a riding. Only the renderer looks at it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub enum FillValue {
    Continuous(f64),
    Category(String),
    #[default]
    Missing,
}

impl FillValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FillValue::Continuous(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FillValue::Missing)
    }
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FillValue::Continuous(v) => write!(f, "{}", v),
            FillValue::Category(c) => write!(f, "{}", c),
            FillValue::Missing => write!(f, "NA"),
        }
    }
}

/// A riding matched against the reference layout, carrying the caller's value.
#[derive(Debug, Clone, PartialEq)]
pub struct Riding {
    pub code: RidingCode,
    pub region: String,
    pub canonical: GridPos,
    pub value: FillValue,
}

/// Ridings sharing a region identifier, sorted by ascending code.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: String,
    pub anchor: GridPos,
    pub ridings: Vec<Riding>,
}

impl Region {
    pub fn new(id: &str, anchor: GridPos) -> Region {
        Region {
            id: id.to_string(),
            anchor,
            ridings: vec![],
        }
    }

    pub fn push(&mut self, riding: Riding) {
        self.ridings.push(riding);
    }

    /// Restores ascending code order after pushes.
    pub fn sort(&mut self) {
        self.ridings.sort_by_key(|riding| riding.code);
    }

    pub fn len(&self) -> usize {
        self.ridings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ridings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pos_add() {
        assert_eq!(GridPos::new(2, 3) + GridPos::new(1, -1), GridPos::new(3, 2));
        assert_eq!(
            GridPos::new(2, 3).checked_add(GridPos::new(1, -1)),
            Some(GridPos::new(3, 2))
        );
        assert_eq!(GridPos::new(i32::MAX, 0).checked_add(GridPos::new(1, 0)), None);
        assert_eq!(GridPos::new(0, i32::MIN).checked_add(GridPos::new(0, -1)), None);
    }

    #[test]
    fn test_region_sort() {
        let mut region = Region::new("A", GridPos::new(0, 0));
        for code in [30, 10, 20] {
            region.push(Riding {
                code,
                region: "A".to_string(),
                canonical: GridPos::default(),
                value: FillValue::Missing,
            });
        }
        region.sort();
        let codes: Vec<RidingCode> = region.ridings.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![10, 20, 30]);
        assert_eq!(region.len(), 3);
    }

    #[test]
    fn test_fill_value_display() {
        assert_eq!(FillValue::Continuous(0.5).to_string(), "0.5");
        assert_eq!(FillValue::Category("Liberal".into()).to_string(), "Liberal");
        assert_eq!(FillValue::Missing.to_string(), "NA");
        assert_eq!(FillValue::Continuous(2.0).as_f64(), Some(2.0));
        assert!(FillValue::Missing.is_missing());
    }
}
