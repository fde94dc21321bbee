//! Power ranger data types and the schemas that describe them on the wire

use genz_rs::prelude::*;

// ============================================
// Data Models
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "zeo")]
    Zeo,
}

impl Season {
    /// Numbered seasons; Zeo has no number
    pub fn number(&self) -> Option<u32> {
        match self {
            Season::One => Some(1),
            Season::Two => Some(2),
            Season::Three => Some(3),
            Season::Zeo => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Black,
    Pink,
    Blue,
    Green,
    White,
    Gold,
}

/// The color a ranger wore in one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub season: Season,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRanger {
    pub id: u32,
    pub name: String,
    pub seasons: Vec<Appearance>,
}

impl PowerRanger {
    pub fn appeared_in(&self, season: u32) -> bool {
        self.seasons
            .iter()
            .any(|a| a.season.number() == Some(season))
    }
}

#[derive(Debug, Deserialize)]
pub struct RangerId {
    pub id: u32,
}

#[derive(Debug, Deserialize)]
pub struct RangerQuery {
    pub name: Option<String>,
    pub seasons: Option<Vec<u32>>,
}

/// Body of create and rename requests
#[derive(Debug, Deserialize)]
pub struct RangerName {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RangerIds {
    pub ids: Vec<u32>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Deleted {
    pub deleted: usize,
}

// ============================================
// Schemas
// ============================================

/// Every schema the resource declares.
///
/// Built once and cloned into route declarations so the documented ranger
/// stays a single component.
#[derive(Clone)]
pub struct Schemas {
    pub ranger: Schema,
    pub id: Schema,
    pub query: Schema,
    pub name: Schema,
    pub ids: Schema,
    pub deleted: Schema,
}

impl Schemas {
    pub fn new() -> Self {
        let appearance = Schema::object([
            ("season", Schema::enumeration(["1", "2", "3", "zeo"])),
            (
                "color",
                Schema::enumeration([
                    "red", "yellow", "black", "pink", "blue", "green", "white", "gold",
                ]),
            ),
        ]);

        Self {
            ranger: Schema::object([
                ("id", Schema::number()),
                ("name", Schema::string()),
                ("seasons", appearance.array()),
            ])
            .openapi("Power Ranger", "Go Go Power Rangers"),
            id: Schema::object([("id", Schema::number())]),
            query: Schema::object([
                ("name", Schema::string().optional()),
                ("seasons", Schema::number().array().optional()),
            ]),
            name: Schema::object([("name", Schema::string())])
                .openapi("Ranger Name", "The name of a new or renamed ranger"),
            ids: Schema::object([("ids", Schema::number().array())]),
            deleted: Schema::object([("deleted", Schema::number())]),
        }
    }
}

impl Default for Schemas {
    fn default() -> Self {
        Self::new()
    }
}
