//! Die zentrale Netz-Datenstruktur mit Kanten, Knoten und Spatial-Index.

use std::collections::{BTreeSet, HashMap, HashSet};

use glam::Vec2;

use crate::core::attribute::Netzklasse;
use crate::core::geometrie::Bereich;
use crate::core::spatial::{KnotenIndex, KnotenTreffer};
use crate::core::{Kante, Knoten};
use crate::fehler::NetzFehler;

/// Container für das gesamte Radverkehrsnetz.
///
/// Alle Mutationen laufen über explizite `speichere_*`/`loesche_*`-Aufrufe;
/// `speichere_kante` prüft die optimistische Sperre gegen die übergebene
/// Version und schlägt mit [`NetzFehler::VeralteteVersion`] fehl statt
/// still zu überschreiben.
#[derive(Debug, Clone)]
pub struct Netz {
    kanten: HashMap<u64, Kante>,
    knoten: HashMap<u64, Knoten>,
    /// Persistenter Spatial-Index für schnelle Knoten-Abfragen
    spatial_index: KnotenIndex,
}

impl Netz {
    /// Erstellt ein leeres Netz.
    pub fn neu() -> Self {
        Self {
            kanten: HashMap::new(),
            knoten: HashMap::new(),
            spatial_index: KnotenIndex::leer(),
        }
    }

    // ─── Lookup ──────────────────────────────────────────────────────────────

    /// Kante nach ID.
    pub fn kante(&self, id: u64) -> Option<&Kante> {
        self.kanten.get(&id)
    }

    /// Knoten nach ID.
    pub fn knoten(&self, id: u64) -> Option<&Knoten> {
        self.knoten.get(&id)
    }

    /// Iterator über alle Kanten (read-only).
    pub fn kanten_iter(&self) -> impl Iterator<Item = &Kante> {
        self.kanten.values()
    }

    /// Iterator über alle Knoten (read-only).
    pub fn knoten_iter(&self) -> impl Iterator<Item = &Knoten> {
        self.knoten.values()
    }

    /// Anzahl der Kanten.
    pub fn kanten_anzahl(&self) -> usize {
        self.kanten.len()
    }

    /// Anzahl der Knoten.
    pub fn knoten_anzahl(&self) -> usize {
        self.knoten.len()
    }

    /// Alle Kanten, deren Geometrie den Bereich schneidet.
    pub fn kanten_in_bereich(&self, bereich: &Bereich) -> Vec<&Kante> {
        self.kanten
            .values()
            .filter(|k| bereich.schneidet(&k.geometrie))
            .collect()
    }

    /// Alle Knoten-IDs im Bereich (über den Spatial-Index).
    pub fn knoten_in_bereich(&self, bereich: &Bereich) -> Vec<u64> {
        self.spatial_index.im_bereich(bereich)
    }

    /// Alle Knoten im Umkreis, nächster zuerst.
    pub fn knoten_im_umkreis(&self, position: Vec2, radius: f32) -> Vec<KnotenTreffer> {
        self.spatial_index.im_umkreis(position, radius)
    }

    // ─── Topologie ───────────────────────────────────────────────────────────

    /// Alle Kanten, die an diesem Knoten hängen.
    pub fn adjazente_kanten(&self, knoten_id: u64) -> Vec<&Kante> {
        self.kanten
            .values()
            .filter(|k| k.ist_an_knoten(knoten_id))
            .collect()
    }

    /// Grad eines Knotens (Anzahl inzidenter Kanten; Schleifen zählen doppelt).
    pub fn grad(&self, knoten_id: u64) -> usize {
        self.kanten
            .values()
            .map(|k| {
                (k.von_knoten == knoten_id) as usize + (k.nach_knoten == knoten_id) as usize
            })
            .sum()
    }

    /// Alle Kanten mit mindestens einer der angefragten Netzklassen,
    /// zusammen mit ihren Endknoten (ein Durchlauf, kein N+1-Zugriff).
    pub fn kanten_mit_netzklassen(
        &self,
        netzklassen: &BTreeSet<Netzklasse>,
    ) -> (Vec<&Kante>, HashMap<u64, &Knoten>) {
        let kanten: Vec<&Kante> = self
            .kanten
            .values()
            .filter(|k| {
                k.kanten_attribut_gruppe
                    .netzklassen
                    .iter()
                    .any(|klasse| netzklassen.contains(klasse))
            })
            .collect();

        let mut knoten = HashMap::new();
        for kante in &kanten {
            for id in [kante.von_knoten, kante.nach_knoten] {
                if let Some(k) = self.knoten.get(&id) {
                    knoten.insert(id, k);
                }
            }
        }
        (kanten, knoten)
    }

    // ─── Mutation ────────────────────────────────────────────────────────────

    /// Fügt einen Knoten hinzu oder ersetzt ihn.
    pub fn speichere_knoten(&mut self, knoten: Knoten) {
        self.knoten.insert(knoten.id, knoten);
        self.rebuild_spatial_index();
    }

    /// Speichert eine Kante unter optimistischer Sperre.
    ///
    /// Die Version der übergebenen Kante muss dem Stand im Store entsprechen;
    /// bei Erfolg wird die Version hochgezählt. Neue Kanten werden mit
    /// Version 0 angelegt.
    pub fn speichere_kante(&mut self, mut kante: Kante) -> Result<u64, NetzFehler> {
        if let Some(bestand) = self.kanten.get(&kante.id) {
            if bestand.version != kante.version {
                return Err(NetzFehler::VeralteteVersion {
                    kante_id: kante.id,
                    erwartet: bestand.version,
                    uebergeben: kante.version,
                });
            }
            kante.version += 1;
        }
        let version = kante.version;
        self.kanten.insert(kante.id, kante);
        Ok(version)
    }

    /// Entfernt eine Kante.
    pub fn loesche_kante(&mut self, kante_id: u64) -> Option<Kante> {
        self.kanten.remove(&kante_id)
    }

    /// Entfernt einen Knoten. Schlägt fehl, solange noch Kanten an ihm hängen.
    pub fn loesche_knoten(&mut self, knoten_id: u64) -> Result<Knoten, NetzFehler> {
        if self.grad(knoten_id) > 0 {
            return Err(NetzFehler::KnotenInVerwendung(knoten_id));
        }
        let entfernt = self
            .knoten
            .remove(&knoten_id)
            .ok_or(NetzFehler::KnotenNichtGefunden(knoten_id))?;
        self.rebuild_spatial_index();
        Ok(entfernt)
    }

    /// Entfernt alle Knoten ohne adjazente Kanten und gibt sie zurück.
    pub fn entferne_verwaiste_knoten(&mut self) -> Vec<Knoten> {
        let mut referenziert: HashSet<u64> = HashSet::with_capacity(self.kanten.len() * 2);
        for kante in self.kanten.values() {
            referenziert.insert(kante.von_knoten);
            referenziert.insert(kante.nach_knoten);
        }

        let verwaist: Vec<u64> = self
            .knoten
            .keys()
            .filter(|id| !referenziert.contains(id))
            .copied()
            .collect();

        let entfernt: Vec<Knoten> = verwaist
            .iter()
            .filter_map(|id| self.knoten.remove(id))
            .collect();

        if !entfernt.is_empty() {
            self.rebuild_spatial_index();
            log::debug!("{} verwaiste Knoten entfernt", entfernt.len());
        }
        entfernt
    }

    /// Baut den persistenten Spatial-Index aus den aktuellen Knoten neu auf.
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial_index = KnotenIndex::aus_knoten(self.knoten.values());
    }
}

impl Default for Netz {
    fn default() -> Self {
        Self::neu()
    }
}
