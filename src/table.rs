use std::fmt;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::errors::BinPlotError;
use crate::riding::RidingCode;

/// One value in a [`RidingTable`].
///
/// In RON a missing cell is written `()`. The text cells `"NA"` and `""`
/// also count as missing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TableValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl TableValue {
    /// Reads the value as a riding code. Integral floats and numeric text
    /// are accepted, anything else can't match a riding.
    pub fn as_code(&self) -> Option<RidingCode> {
        match self {
            TableValue::Int(i) => RidingCode::try_from(*i).ok(),
            TableValue::Float(f)
                if f.fract() == 0.0 && *f >= 0.0 && *f <= RidingCode::MAX as f64 =>
            {
                Some(*f as RidingCode)
            }
            TableValue::Text(s) => s.trim().parse::<RidingCode>().ok(),
            _ => None,
        }
    }

    /// Numeric view of the value; `None` for text that isn't a number and
    /// for missing values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TableValue::Int(i) => Some(*i as f64),
            TableValue::Float(f) => Some(*f),
            TableValue::Text(s) => s.trim().parse::<f64>().ok(),
            TableValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            TableValue::Missing => true,
            TableValue::Text(s) => matches!(s.trim(), "" | "NA"),
            _ => false,
        }
    }
}

impl fmt::Display for TableValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableValue::Int(i) => write!(f, "{}", i),
            TableValue::Float(v) => write!(f, "{}", v),
            TableValue::Text(s) => write!(f, "{}", s),
            TableValue::Missing => write!(f, "NA"),
        }
    }
}

impl From<i64> for TableValue {
    fn from(value: i64) -> Self {
        TableValue::Int(value)
    }
}

impl From<u32> for TableValue {
    fn from(value: u32) -> Self {
        TableValue::Int(i64::from(value))
    }
}

impl From<f64> for TableValue {
    fn from(value: f64) -> Self {
        TableValue::Float(value)
    }
}

impl From<&str> for TableValue {
    fn from(value: &str) -> Self {
        TableValue::Text(value.to_string())
    }
}

impl From<String> for TableValue {
    fn from(value: String) -> Self {
        TableValue::Text(value)
    }
}

impl<T: Into<TableValue>> From<Option<T>> for TableValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TableValue::Missing)
    }
}

/// Named-column table of caller data, one riding per row.
///
/// ```rust
/// use riding_binplot::table::RidingTable;
///
/// let mut table = RidingTable::new(&["riding_code", "turnout"]);
/// table.push_row(vec![35001u32.into(), 0.64.into()]).unwrap();
/// assert_eq!(table.column("turnout").unwrap(), 1);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RidingTable {
    columns: Vec<String>,
    rows: Vec<Vec<TableValue>>,
}

impl RidingTable {
    pub fn new(columns: &[&str]) -> RidingTable {
        RidingTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: vec![],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn push_row(&mut self, row: Vec<TableValue>) -> Result<&mut Self, BinPlotError> {
        if row.len() != self.columns.len() {
            return Err(BinPlotError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(self)
    }

    /// Index of the named column.
    pub fn column(&self, name: &str) -> Result<usize, BinPlotError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| BinPlotError::MissingColumn(name.to_string()))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TableValue]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_widths(&self) -> Result<(), BinPlotError> {
        match self.rows.iter().find(|row| row.len() != self.columns.len()) {
            Some(row) => Err(BinPlotError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn from_ron_str(data: &str) -> Result<RidingTable> {
        let table: RidingTable = ron::from_str(data)?;
        table.check_widths()?;
        Ok(table)
    }

    pub fn from_file(path: &Path) -> Result<RidingTable> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        RidingTable::from_ron_str(data.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parsing() {
        assert_eq!(TableValue::Int(35001).as_code(), Some(35001));
        assert_eq!(TableValue::Float(35001.0).as_code(), Some(35001));
        assert_eq!(TableValue::Float(35001.5).as_code(), None);
        assert_eq!(TableValue::Text(" 24017 ".into()).as_code(), Some(24017));
        assert_eq!(TableValue::Text("Outremont".into()).as_code(), None);
        assert_eq!(TableValue::Int(-4).as_code(), None);
        assert_eq!(TableValue::Missing.as_code(), None);
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(TableValue::Int(3).as_number(), Some(3.0));
        assert_eq!(TableValue::Text("0.25".into()).as_number(), Some(0.25));
        assert_eq!(TableValue::Text("NDP".into()).as_number(), None);
        assert_eq!(TableValue::from(None::<f64>), TableValue::Missing);
    }

    #[test]
    fn test_missing_spellings() {
        assert!(TableValue::Missing.is_missing());
        assert!(TableValue::Text("NA".into()).is_missing());
        assert!(TableValue::Text(" ".into()).is_missing());
        assert!(!TableValue::Text("N/A party".into()).is_missing());
        assert!(!TableValue::Float(0.0).is_missing());

        let table = RidingTable::from_ron_str(
            r#"(columns: ["riding_code", "turnout"], rows: [[35001, ()], [35002, "NA"]])"#,
        )
        .expect("Failed to load table");
        assert!(table.rows().all(|row| row[1].is_missing()));
    }

    #[test]
    fn test_row_width_checked() {
        let mut table = RidingTable::new(&["code", "value"]);
        assert!(table.push_row(vec![1u32.into(), 2.0.into()]).is_ok());
        match table.push_row(vec![1u32.into()]) {
            Err(BinPlotError::RowWidth { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("Expected a row width error, got {:?}", other),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let table = RidingTable::new(&["code", "value"]);
        assert!(matches!(
            table.column("party"),
            Err(BinPlotError::MissingColumn(name)) if name == "party"
        ));
    }

    #[test]
    fn test_from_ron() {
        let table = RidingTable::from_ron_str(
            r#"(
                columns: ["riding_code", "party"],
                rows: [
                    [35001, "Liberal"],
                    [35002, "Conservative"],
                ],
            )"#,
        )
        .expect("Failed to load table");
        assert_eq!(table.len(), 2);
        let first: Vec<&[TableValue]> = table.rows().collect();
        assert_eq!(first[0][0].as_code(), Some(35001));
        assert_eq!(first[1][1], TableValue::Text("Conservative".into()));

        assert!(RidingTable::from_ron_str(
            r#"(columns: ["riding_code", "party"], rows: [[35001]])"#
        )
        .is_err());
    }
}
