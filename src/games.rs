// src/games.rs
//
// Scrape output. A GameTable is a list of records that can be viewed as
// columns (name → ordered values) or flattened to a DataSet for the
// cache, export and the GUI table.

use std::error::Error;

use crate::specs::{browse::BrowseEntry, stats::GameStats};
use crate::store::DataSet;

pub const COLUMNS: [&str; 12] = [
    "Name",
    "BGG_Rating",
    "AVG_Rating",
    "Voter_Count",
    "Min_Players",
    "Max_Players",
    "Min_Time",
    "Max_Time",
    "Min_Age",
    "Difficulty",
    "Owners",
    "Total_Plays",
];

#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub name: String,
    pub bgg_rating: f64,
    pub avg_rating: f64,
    pub voter_count: f64,
    pub min_players: u32,
    pub max_players: u32,
    pub min_time: u32,
    pub max_time: u32,
    pub min_age: u32,
    pub difficulty: f64,
    pub owners: f64,
    pub total_plays: f64,
}

impl GameRecord {
    pub fn new(entry: BrowseEntry, stats: GameStats) -> Self {
        Self {
            name: entry.name,
            bgg_rating: entry.bgg_rating,
            avg_rating: entry.avg_rating,
            voter_count: entry.voters,
            min_players: stats.min_players,
            max_players: stats.max_players,
            min_time: stats.min_time,
            max_time: stats.max_time,
            min_age: stats.min_age,
            difficulty: stats.difficulty,
            owners: stats.owners,
            total_plays: stats.total_plays,
        }
    }

    /// Cells in `COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.bgg_rating.to_string(),
            self.avg_rating.to_string(),
            self.voter_count.to_string(),
            self.min_players.to_string(),
            self.max_players.to_string(),
            self.min_time.to_string(),
            self.max_time.to_string(),
            self.min_age.to_string(),
            self.difficulty.to_string(),
            self.owners.to_string(),
            self.total_plays.to_string(),
        ]
    }

    pub fn from_row(row: &[String]) -> Result<Self, Box<dyn Error>> {
        if row.len() != COLUMNS.len() {
            return Err(format!("expected {} cells, got {}", COLUMNS.len(), row.len()).into());
        }
        Ok(Self {
            name: row[0].clone(),
            bgg_rating: row[1].trim().parse()?,
            avg_rating: row[2].trim().parse()?,
            voter_count: row[3].trim().parse()?,
            min_players: row[4].trim().parse()?,
            max_players: row[5].trim().parse()?,
            min_time: row[6].trim().parse()?,
            max_time: row[7].trim().parse()?,
            min_age: row[8].trim().parse()?,
            difficulty: row[9].trim().parse()?,
            owners: row[10].trim().parse()?,
            total_plays: row[11].trim().parse()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    Text(Vec<String>),
    Int(Vec<u32>),
    Float(Vec<f64>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Int(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric columns as f64; `None` for text.
    pub fn as_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnValues::Text(_) => None,
            ColumnValues::Int(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            ColumnValues::Float(v) => Some(v.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub values: ColumnValues,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameTable {
    pub records: Vec<GameRecord>,
}

impl GameTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column name → values, index-aligned across all columns.
    pub fn columns(&self) -> Vec<Column> {
        let text = |f: fn(&GameRecord) -> String| ColumnValues::Text(self.records.iter().map(f).collect());
        let int = |f: fn(&GameRecord) -> u32| ColumnValues::Int(self.records.iter().map(f).collect());
        let float = |f: fn(&GameRecord) -> f64| ColumnValues::Float(self.records.iter().map(f).collect());

        let values = [
            text(|r| r.name.clone()),
            float(|r| r.bgg_rating),
            float(|r| r.avg_rating),
            float(|r| r.voter_count),
            int(|r| r.min_players),
            int(|r| r.max_players),
            int(|r| r.min_time),
            int(|r| r.max_time),
            int(|r| r.min_age),
            float(|r| r.difficulty),
            float(|r| r.owners),
            float(|r| r.total_plays),
        ];

        COLUMNS
            .iter()
            .zip(values)
            .map(|(&name, values)| Column { name, values })
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<Column> {
        self.columns().into_iter().find(|c| c.name == name)
    }

    pub fn to_dataset(&self) -> DataSet {
        DataSet {
            headers: Some(COLUMNS.iter().map(|s| s!(*s)).collect()),
            rows: self.records.iter().map(GameRecord::to_row).collect(),
        }
    }

    pub fn from_dataset(ds: &DataSet) -> Result<Self, Box<dyn Error>> {
        let records = ds
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| GameRecord::from_row(r).map_err(|e| format!("row {}: {}", i + 1, e).into()))
            .collect::<Result<Vec<_>, Box<dyn Error>>>()?;
        Ok(Self { records })
    }
}
