//! Repository- und Protokoll-Kontrakte für Netzbezug-Konsumenten.
//!
//! Das umgebende System stellt pro Entitätstyp ein Repository; der Kern
//! kennt nur diese Traits. Die In-Memory-Implementierungen dienen als
//! Referenz und als Test-Double.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::netzbezug::events::NetzAenderungAusloeser;
use crate::netzbezug::Netzbezug;

/// Eine Fach-Entität mit Netzbezug.
pub trait MitNetzbezug {
    /// Eindeutige ID der Entität.
    fn id(&self) -> u64;
    /// Netzbezug (read-only).
    fn netzbezug(&self) -> &Netzbezug;
    /// Netzbezug (mutierbar).
    fn netzbezug_mut(&mut self) -> &mut Netzbezug;
}

/// Repository eines Entitätstyps, der das Netz referenziert.
///
/// Die `find_by_*`-Abfragen dürfen höchstens [`MAX_PARAMETER`] IDs pro
/// Aufruf erhalten (Parameter-Obergrenze des Backing-Stores); das Chunking
/// übernimmt der Aufrufer.
///
/// [`MAX_PARAMETER`]: crate::netzbezug::service::MAX_PARAMETER
pub trait NetzbezugRepository {
    /// Entitätstyp dieses Repositories.
    type Entitaet: MitNetzbezug;

    /// Alle Entitäten, deren Netzbezug mindestens eine der Kanten enthält.
    fn find_by_kanten_ids(&self, kanten_ids: &[u64]) -> Vec<Self::Entitaet>;
    /// Alle Entitäten, deren Netzbezug mindestens einen der Knoten enthält.
    fn find_by_knoten_ids(&self, knoten_ids: &[u64]) -> Vec<Self::Entitaet>;
    /// Speichert alle mutierten Entitäten.
    fn save_all(&mut self, entitaeten: Vec<Self::Entitaet>) -> Result<()>;
}

/// Append-only Senke für menschenlesbare Änderungsprotokolle.
pub trait Protokoll {
    /// Hängt einen Eintrag an.
    fn vermerke(&mut self, eintrag: ProtokollEintrag);
}

/// Ein Eintrag im Änderungsprotokoll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtokollEintrag {
    /// Zeitpunkt der Änderung
    pub datum: DateTime<Utc>,
    /// Auslöser der Änderung
    pub ausloeser: NetzAenderungAusloeser,
    /// Menschenlesbare Beschreibung
    pub beschreibung: String,
}

/// In-Memory-Protokoll (Referenzimplementierung).
#[derive(Debug, Clone, Default)]
pub struct InMemoryProtokoll {
    eintraege: Vec<ProtokollEintrag>,
}

impl InMemoryProtokoll {
    /// Leeres Protokoll.
    pub fn neu() -> Self {
        Self::default()
    }

    /// Alle Einträge in Anfügereihenfolge.
    pub fn eintraege(&self) -> &[ProtokollEintrag] {
        &self.eintraege
    }
}

impl Protokoll for InMemoryProtokoll {
    fn vermerke(&mut self, eintrag: ProtokollEintrag) {
        self.eintraege.push(eintrag);
    }
}

/// In-Memory-Repository (Referenzimplementierung).
#[derive(Debug, Clone, Default)]
pub struct InMemoryNetzbezugRepository<T: MitNetzbezug + Clone> {
    entitaeten: Vec<T>,
}

impl<T: MitNetzbezug + Clone> InMemoryNetzbezugRepository<T> {
    /// Repository mit Anfangsbestand.
    pub fn mit_entitaeten(entitaeten: Vec<T>) -> Self {
        Self { entitaeten }
    }

    /// Alle Entitäten (read-only).
    pub fn entitaeten(&self) -> &[T] {
        &self.entitaeten
    }

    /// Entität nach ID.
    pub fn entitaet(&self, id: u64) -> Option<&T> {
        self.entitaeten.iter().find(|e| e.id() == id)
    }
}

impl<T: MitNetzbezug + Clone> NetzbezugRepository for InMemoryNetzbezugRepository<T> {
    type Entitaet = T;

    fn find_by_kanten_ids(&self, kanten_ids: &[u64]) -> Vec<T> {
        let ids: HashSet<u64> = kanten_ids.iter().copied().collect();
        self.entitaeten
            .iter()
            .filter(|e| ids.iter().any(|&id| e.netzbezug().enthaelt_kante(id)))
            .cloned()
            .collect()
    }

    fn find_by_knoten_ids(&self, knoten_ids: &[u64]) -> Vec<T> {
        let ids: HashSet<u64> = knoten_ids.iter().copied().collect();
        self.entitaeten
            .iter()
            .filter(|e| ids.iter().any(|&id| e.netzbezug().enthaelt_knoten(id)))
            .cloned()
            .collect()
    }

    fn save_all(&mut self, mutierte: Vec<T>) -> Result<()> {
        for neu in mutierte {
            match self.entitaeten.iter_mut().find(|e| e.id() == neu.id()) {
                Some(bestand) => *bestand = neu,
                None => self.entitaeten.push(neu),
            }
        }
        Ok(())
    }
}
