//! Repräsentiert einen Knoten des Netzes mit Punktgeometrie und Attributen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::attribute::{KnotenForm, VerwaltungseinheitId};

/// Quellsystem, aus dem ein Netzelement stammt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuellSystem {
    /// Digitales Landschaftsmodell
    Dlm,
    /// Manuell in RadVIS erfasst
    #[default]
    RadVis,
    /// RadNETZ-Import
    RadNetz,
    /// OpenStreetMap-abgeleitet
    Osm,
}

/// Fachattribute eines Knotens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KnotenAttribute {
    /// Freitext-Kommentar
    pub kommentar: Option<String>,
    /// Zuständige Verwaltungseinheit
    pub zustaendigkeit: Option<VerwaltungseinheitId>,
    /// Knotenform
    pub knoten_form: Option<KnotenForm>,
    /// Beschreibung des baulichen Zustands
    pub zustandsbeschreibung: Option<String>,
}

/// Ein Knoten des Netzes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knoten {
    /// Eindeutige ID
    pub id: u64,
    /// Punktgeometrie
    pub position: Vec2,
    /// Fachattribute
    pub attribute: KnotenAttribute,
    /// Quellsystem
    pub quelle: QuellSystem,
}

impl Knoten {
    /// Erstellt einen Knoten ohne Fachattribute.
    pub fn neu(id: u64, position: Vec2, quelle: QuellSystem) -> Self {
        Self {
            id,
            position,
            attribute: KnotenAttribute::default(),
            quelle,
        }
    }
}
