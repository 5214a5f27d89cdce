//! Topologie-Änderungsereignisse und ihre Auslöser.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Kante, Knoten, Polylinie};

/// Auslöser einer Netzänderung (für Audit und Statistik).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetzAenderungAusloeser {
    /// Kante manuell gelöscht
    KanteGeloescht,
    /// Knoten manuell gelöscht
    KnotenGeloescht,
    /// DLM-Reimport hat Elemente entfernt oder ersetzt
    DlmReimport,
    /// RadNETZ-Reimport hat Elemente entfernt oder ersetzt
    RadNetzReimport,
    /// RadVIS-Kante vom Eigentümer gelöscht
    RadVisKanteGeloescht,
}

/// Kanten wurden gelöscht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KantenGeloeschtEvent {
    /// IDs der gelöschten Kanten
    pub kanten_ids: Vec<u64>,
    /// Geometrien der gelöschten Kanten (parallel zu `kanten_ids`)
    pub geometrien: Vec<Polylinie>,
    /// Auslöser der Löschung
    pub ausloeser: NetzAenderungAusloeser,
    /// Zeitpunkt der Änderung
    pub datum: DateTime<Utc>,
}

/// Eine Kante wurde durch eine oder mehrere neue Kanten ersetzt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanteErsetztEvent {
    /// Die ersetzte Kante
    pub alt: Kante,
    /// Die Ersatzkanten
    pub ersatz: Vec<Kante>,
    /// Auslöser der Ersetzung
    pub ausloeser: NetzAenderungAusloeser,
}

/// Knoten wurden gelöscht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnotenGeloeschtEvent {
    /// Die gelöschten Knoten
    pub knoten: Vec<Knoten>,
    /// Auslöser der Löschung
    pub ausloeser: NetzAenderungAusloeser,
    /// Zeitpunkt der Änderung
    pub datum: DateTime<Utc>,
}
