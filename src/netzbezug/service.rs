//! Kaskadierende Netzbezug-Pflege bei Löschung und Ersetzung von
//! Netzelementen.
//!
//! Der Service kennt die konkreten Entitätstypen nicht; pro Typ wird ein
//! [`NetzbezugKonsument`] registriert, der sein Repository kapselt. Alle
//! Operationen laufen synchron in der umgebenden Transaktion des
//! Aufrufers; Fehler brechen die gesamte Kaskade ab.

use std::collections::HashMap;

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Kante, Netz};
use crate::netzbezug::events::{
    KanteErsetztEvent, KantenGeloeschtEvent, KnotenGeloeschtEvent, NetzAenderungAusloeser,
};
use crate::netzbezug::repository::{
    MitNetzbezug, NetzbezugRepository, Protokoll, ProtokollEintrag,
};

/// Obergrenze an IDs pro Existenz-/Mitgliedschaftsabfrage gegen den
/// Backing-Store (Parameter-Limit der Query-Schnittstelle). Das Chunking
/// ist rein sequentiell und keine Transaktionsgrenze.
pub const MAX_PARAMETER: usize = 1000;

/// Maximal zulässige Abweichung (Meter) beim geometrischen Umlegen von
/// Bezügen auf Ersatzkanten bzw. bei der Ersatzknoten-Suche.
pub const ERSATZ_TOLERANZ: f32 = 30.0;

/// Zähler über eine einzelne Kaskaden-Operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetzbezugAenderungStatistik {
    /// Anzahl mutierter Entitäten
    pub betroffene_entitaeten: u32,
    /// Entitäten, bei denen der alte Kantenbezug vollständig ersetzt wurde
    pub erfolgreich_ersetzte_kanten: u32,
    /// Tatsächlich getauschte Knotenbezüge
    pub ersetzte_knotenbezuege: u32,
    /// Ersatzlos entfernte Knotenbezüge
    pub entfernte_knotenbezuege: u32,
    /// Geschriebene Protokolleinträge
    pub protokoll_eintraege: u32,
}

/// Ergebnis eines Konsumenten für eine Kantenlöschung.
#[derive(Debug, Clone, Default)]
pub struct KantenLoeschErgebnis {
    /// Anzahl mutierter Entitäten
    pub betroffene: u32,
    /// Betroffene Entitäts-IDs je gelöschter Kante
    pub betroffene_pro_kante: HashMap<u64, Vec<u64>>,
}

/// Ergebnis eines Konsumenten für eine Kantenersetzung.
#[derive(Debug, Clone, Default)]
pub struct KantenErsatzErgebnis {
    /// Anzahl mutierter Entitäten
    pub betroffene: u32,
    /// Entitäten ohne verbleibenden Bezug auf die alte Kante
    pub erfolgreich_ersetzt: u32,
}

/// Ergebnis eines Konsumenten für eine Knotenlöschung.
#[derive(Debug, Clone, Default)]
pub struct KnotenLoeschErgebnis {
    /// Anzahl mutierter Entitäten
    pub betroffene: u32,
    /// Tatsächlich getauschte Knotenbezüge
    pub ersetzte: u32,
    /// Ersatzlos entfernte Knotenbezüge
    pub entfernte: u32,
    /// Betroffene Entitäts-IDs je gelöschtem Knoten
    pub betroffene_pro_knoten: HashMap<u64, Vec<u64>>,
}

/// Ein registrierter Konsument: kapselt das Repository eines
/// Entitätstyps und wendet die Kaskaden-Schritte darauf an.
pub trait NetzbezugKonsument {
    /// Anzeigename des Entitätstyps (für Protokoll und Logging).
    fn name(&self) -> &str;
    /// Entfernt alle Bezüge auf die gelöschten Kanten.
    fn entferne_kantenbezuege(&mut self, kanten_ids: &[u64]) -> Result<KantenLoeschErgebnis>;
    /// Legt Bezüge auf die Ersatzkanten um.
    fn ersetze_kantenbezuege(&mut self, alt: &Kante, ersatz: &[Kante])
        -> Result<KantenErsatzErgebnis>;
    /// Tauscht bzw. entfernt Bezüge auf die gelöschten Knoten.
    fn verarbeite_knoten_geloescht(
        &mut self,
        geloeschte_ids: &[u64],
        ersatz: &HashMap<u64, u64>,
    ) -> Result<KnotenLoeschErgebnis>;
}

/// Standard-Konsument über einem [`NetzbezugRepository`].
pub struct BenannterKonsument<R: NetzbezugRepository> {
    name: String,
    repository: R,
}

impl<R: NetzbezugRepository> BenannterKonsument<R> {
    /// Erstellt einen Konsumenten mit Anzeigenamen.
    pub fn neu(name: impl Into<String>, repository: R) -> Self {
        Self {
            name: name.into(),
            repository,
        }
    }

    /// Zugriff auf das gekapselte Repository (für Tests und Auswertungen).
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Lädt alle betroffenen Entitäten in Chunks von [`MAX_PARAMETER`] IDs
    /// und dedupliziert nach Entitäts-ID (eine Entität kann Bezüge in
    /// mehreren Chunks haben).
    fn lade_betroffene(
        &self,
        ids: &[u64],
        nach_knoten: bool,
    ) -> IndexMap<u64, R::Entitaet> {
        let mut betroffene: IndexMap<u64, R::Entitaet> = IndexMap::new();
        for chunk in ids.chunks(MAX_PARAMETER) {
            let geladen = if nach_knoten {
                self.repository.find_by_knoten_ids(chunk)
            } else {
                self.repository.find_by_kanten_ids(chunk)
            };
            for entitaet in geladen {
                betroffene.entry(entitaet.id()).or_insert(entitaet);
            }
        }
        betroffene
    }
}

impl<R: NetzbezugRepository> NetzbezugKonsument for BenannterKonsument<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn entferne_kantenbezuege(&mut self, kanten_ids: &[u64]) -> Result<KantenLoeschErgebnis> {
        let mut betroffene = self.lade_betroffene(kanten_ids, false);
        let mut ergebnis = KantenLoeschErgebnis::default();

        for (entitaets_id, entitaet) in betroffene.iter_mut() {
            let mut mutiert = false;
            for &kante_id in kanten_ids {
                if entitaet.netzbezug_mut().entferne_kante(kante_id) {
                    mutiert = true;
                    ergebnis
                        .betroffene_pro_kante
                        .entry(kante_id)
                        .or_default()
                        .push(*entitaets_id);
                }
            }
            if mutiert {
                ergebnis.betroffene += 1;
            }
        }

        self.repository
            .save_all(betroffene.into_values().collect())?;
        Ok(ergebnis)
    }

    fn ersetze_kantenbezuege(
        &mut self,
        alt: &Kante,
        ersatz: &[Kante],
    ) -> Result<KantenErsatzErgebnis> {
        let mut betroffene = self.lade_betroffene(&[alt.id], false);
        let mut ergebnis = KantenErsatzErgebnis {
            betroffene: betroffene.len() as u32,
            erfolgreich_ersetzt: 0,
        };

        for entitaet in betroffene.values_mut() {
            if entitaet
                .netzbezug_mut()
                .ersetze_kante(alt, ersatz, ERSATZ_TOLERANZ)
            {
                ergebnis.erfolgreich_ersetzt += 1;
            }
        }

        self.repository
            .save_all(betroffene.into_values().collect())?;
        Ok(ergebnis)
    }

    fn verarbeite_knoten_geloescht(
        &mut self,
        geloeschte_ids: &[u64],
        ersatz: &HashMap<u64, u64>,
    ) -> Result<KnotenLoeschErgebnis> {
        let mut betroffene = self.lade_betroffene(geloeschte_ids, true);
        let mut ergebnis = KnotenLoeschErgebnis::default();

        for (entitaets_id, entitaet) in betroffene.iter_mut() {
            let mut mutiert = false;
            for &knoten_id in geloeschte_ids {
                if !entitaet.netzbezug().enthaelt_knoten(knoten_id) {
                    continue;
                }
                ergebnis
                    .betroffene_pro_knoten
                    .entry(knoten_id)
                    .or_default()
                    .push(*entitaets_id);

                match ersatz.get(&knoten_id) {
                    Some(&neu) => {
                        // Containment-Vergleich vor/nach dem Tausch, nicht
                        // bloße Set-Mitgliedschaft
                        if entitaet.netzbezug_mut().ersetze_knoten(knoten_id, neu) {
                            ergebnis.ersetzte += 1;
                            mutiert = true;
                        }
                    }
                    None => {
                        if entitaet.netzbezug_mut().entferne_knoten(knoten_id) {
                            ergebnis.entfernte += 1;
                            mutiert = true;
                        }
                    }
                }
            }
            if mutiert {
                ergebnis.betroffene += 1;
            }
        }

        self.repository
            .save_all(betroffene.into_values().collect())?;
        Ok(ergebnis)
    }
}

/// Kaskaden-Service über allen registrierten Konsumenten.
pub struct NetzbezugAenderungsService {
    konsumenten: Vec<Box<dyn NetzbezugKonsument>>,
    /// Ersatzknoten-Suche bei Knotenlöschung (Feature-Flag)
    ersatzknoten_suche: bool,
}

impl NetzbezugAenderungsService {
    /// Erstellt einen Service ohne Konsumenten.
    pub fn neu(ersatzknoten_suche: bool) -> Self {
        Self {
            konsumenten: Vec::new(),
            ersatzknoten_suche,
        }
    }

    /// Registriert einen Konsumenten.
    pub fn registriere(&mut self, konsument: Box<dyn NetzbezugKonsument>) {
        self.konsumenten.push(konsument);
    }

    /// Reagiert auf gelöschte Kanten: entfernt die Bezüge aller
    /// Konsumenten-Entitäten und protokolliert je gelöschter Kante die
    /// betroffenen Entitäten — außer der Eigentümer hat selbst gelöscht.
    pub fn on_kanten_geloescht(
        &mut self,
        event: &KantenGeloeschtEvent,
        protokoll: &mut dyn Protokoll,
    ) -> Result<NetzbezugAenderungStatistik> {
        let mut statistik = NetzbezugAenderungStatistik::default();
        // kante_id → [(Konsument, betroffene Entitäts-IDs)]
        let mut betroffene_pro_kante: IndexMap<u64, Vec<(String, Vec<u64>)>> = IndexMap::new();

        for konsument in &mut self.konsumenten {
            let ergebnis = konsument.entferne_kantenbezuege(&event.kanten_ids)?;
            statistik.betroffene_entitaeten += ergebnis.betroffene;
            for (kante_id, entitaeten) in ergebnis.betroffene_pro_kante {
                betroffene_pro_kante
                    .entry(kante_id)
                    .or_default()
                    .push((konsument.name().to_string(), entitaeten));
            }
        }

        if event.ausloeser != NetzAenderungAusloeser::RadVisKanteGeloescht {
            for (kante_id, betroffene) in &betroffene_pro_kante {
                let beschreibung = betroffene
                    .iter()
                    .map(|(name, ids)| format!("{name}: {ids:?}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                protokoll.vermerke(ProtokollEintrag {
                    datum: event.datum,
                    ausloeser: event.ausloeser,
                    beschreibung: format!(
                        "Kante {kante_id} gelöscht; Netzbezug entfernt bei {beschreibung}"
                    ),
                });
                statistik.protokoll_eintraege += 1;
            }
        }

        log::info!(
            "{} Kante(n) gelöscht, {} Entität(en) angepasst",
            event.kanten_ids.len(),
            statistik.betroffene_entitaeten
        );
        Ok(statistik)
    }

    /// Reagiert auf eine ersetzte Kante: legt Bezüge geometrisch auf die
    /// Ersatzkanten um (innerhalb [`ERSATZ_TOLERANZ`]).
    pub fn on_kante_ersetzt(
        &mut self,
        event: &KanteErsetztEvent,
    ) -> Result<NetzbezugAenderungStatistik> {
        let mut statistik = NetzbezugAenderungStatistik::default();

        for konsument in &mut self.konsumenten {
            let ergebnis = konsument.ersetze_kantenbezuege(&event.alt, &event.ersatz)?;
            statistik.betroffene_entitaeten += ergebnis.betroffene;
            statistik.erfolgreich_ersetzte_kanten += ergebnis.erfolgreich_ersetzt;
        }

        log::info!(
            "Kante {} ersetzt durch {} Kante(n): {}/{} Entität(en) vollständig umgelegt",
            event.alt.id,
            event.ersatz.len(),
            statistik.erfolgreich_ersetzte_kanten,
            statistik.betroffene_entitaeten
        );
        Ok(statistik)
    }

    /// Reagiert auf gelöschte Knoten: sucht (hinter dem Feature-Flag)
    /// Ersatzknoten unter den verbliebenen Knoten des Netzes, tauscht
    /// Bezüge um bzw. entfernt sie und protokolliert je Knoten die
    /// Entitäten, die einen Bezug verlieren oder wechseln.
    pub fn on_knoten_geloescht(
        &mut self,
        netz: &Netz,
        event: &KnotenGeloeschtEvent,
        protokoll: &mut dyn Protokoll,
    ) -> Result<NetzbezugAenderungStatistik> {
        let geloeschte_ids: Vec<u64> = event.knoten.iter().map(|k| k.id).collect();

        let ersatz: HashMap<u64, u64> = if self.ersatzknoten_suche {
            event
                .knoten
                .iter()
                .filter_map(|geloescht| {
                    netz.knoten_im_umkreis(geloescht.position, ERSATZ_TOLERANZ)
                        .into_iter()
                        .find(|treffer| !geloeschte_ids.contains(&treffer.knoten_id))
                        .map(|treffer| (geloescht.id, treffer.knoten_id))
                })
                .collect()
        } else {
            HashMap::new()
        };

        let mut statistik = NetzbezugAenderungStatistik::default();
        let mut betroffene_pro_knoten: IndexMap<u64, Vec<(String, Vec<u64>)>> = IndexMap::new();

        for konsument in &mut self.konsumenten {
            let ergebnis = konsument.verarbeite_knoten_geloescht(&geloeschte_ids, &ersatz)?;
            statistik.betroffene_entitaeten += ergebnis.betroffene;
            statistik.ersetzte_knotenbezuege += ergebnis.ersetzte;
            statistik.entfernte_knotenbezuege += ergebnis.entfernte;
            for (knoten_id, entitaeten) in ergebnis.betroffene_pro_knoten {
                betroffene_pro_knoten
                    .entry(knoten_id)
                    .or_default()
                    .push((konsument.name().to_string(), entitaeten));
            }
        }

        for (knoten_id, betroffene) in &betroffene_pro_knoten {
            let beschreibung = betroffene
                .iter()
                .map(|(name, ids)| format!("{name}: {ids:?}"))
                .collect::<Vec<_>>()
                .join(", ");
            let ersatz_text = match ersatz.get(knoten_id) {
                Some(neu) => format!("ersetzt durch Knoten {neu}"),
                None => "Bezug ersatzlos entfernt".to_string(),
            };
            protokoll.vermerke(ProtokollEintrag {
                datum: event.datum,
                ausloeser: event.ausloeser,
                beschreibung: format!(
                    "Knoten {knoten_id} gelöscht ({ersatz_text}); betroffen: {beschreibung}"
                ),
            });
            statistik.protokoll_eintraege += 1;
        }

        log::info!(
            "{} Knoten gelöscht: {} Bezüge getauscht, {} entfernt",
            geloeschte_ids.len(),
            statistik.ersetzte_knotenbezuege,
            statistik.entfernte_knotenbezuege
        );
        Ok(statistik)
    }
}
