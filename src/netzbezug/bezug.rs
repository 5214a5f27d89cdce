//! Der Netzbezug: räumliche Referenz einer Fach-Entität auf das Netz.
//!
//! Entitäten referenzieren Kanten abschnittsweise (mit Seitenbezug),
//! punktuell (eine lineare Referenz) oder ganze Knoten. Beim Löschen
//! oder Ersetzen von Netzelementen werden die Referenzen hier angepasst.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{Kante, LinearReferenzierterAbschnitt, Seitenbezug};

/// Abschnittsweiser, seitenbezogener Bezug auf eine Kante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbschnittsweiserKantenSeitenBezug {
    /// Referenzierte Kante
    pub kante_id: u64,
    /// Abschnitt auf der Kante
    pub abschnitt: LinearReferenzierterAbschnitt,
    /// Seitenbezug
    pub seitenbezug: Seitenbezug,
}

/// Punktueller Bezug auf eine Kante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunktuellerKantenBezug {
    /// Referenzierte Kante
    pub kante_id: u64,
    /// Lineare Referenz des Punkts in [0, 1]
    pub lineare_referenz: f64,
}

/// Vollständiger Netzbezug einer Entität.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Netzbezug {
    /// Abschnittsweise Kantenbezüge
    pub abschnittsweise: Vec<AbschnittsweiserKantenSeitenBezug>,
    /// Punktuelle Kantenbezüge
    pub punktuell: Vec<PunktuellerKantenBezug>,
    /// Knotenbezüge
    pub knoten: BTreeSet<u64>,
}

impl Netzbezug {
    /// Leerer Netzbezug.
    pub fn leer() -> Self {
        Self::default()
    }

    /// Prüft ob irgendein Bezug auf diese Kante zeigt.
    pub fn enthaelt_kante(&self, kante_id: u64) -> bool {
        self.abschnittsweise.iter().any(|b| b.kante_id == kante_id)
            || self.punktuell.iter().any(|b| b.kante_id == kante_id)
    }

    /// Prüft ob der Knoten referenziert wird.
    pub fn enthaelt_knoten(&self, knoten_id: u64) -> bool {
        self.knoten.contains(&knoten_id)
    }

    /// Prüft ob der Bezug leer ist.
    pub fn ist_leer(&self) -> bool {
        self.abschnittsweise.is_empty() && self.punktuell.is_empty() && self.knoten.is_empty()
    }

    /// Entfernt alle Bezüge auf die Kante; gibt `true` zurück falls etwas
    /// entfernt wurde.
    pub fn entferne_kante(&mut self, kante_id: u64) -> bool {
        let vorher = self.abschnittsweise.len() + self.punktuell.len();
        self.abschnittsweise.retain(|b| b.kante_id != kante_id);
        self.punktuell.retain(|b| b.kante_id != kante_id);
        self.abschnittsweise.len() + self.punktuell.len() < vorher
    }

    /// Entfernt den Knotenbezug; gibt `true` zurück falls vorhanden.
    pub fn entferne_knoten(&mut self, knoten_id: u64) -> bool {
        self.knoten.remove(&knoten_id)
    }

    /// Ersetzt einen Knotenbezug durch einen anderen Knoten.
    ///
    /// Gibt `true` zurück, wenn tatsächlich ein Bezug getauscht wurde:
    /// der alte Knoten war enthalten, ist es danach nicht mehr, und der
    /// neue ist enthalten. Zeigte bereits ein anderer Bezug auf den
    /// Ersatzknoten, ist das Set danach kleiner — auch das zählt als Tausch.
    pub fn ersetze_knoten(&mut self, alt: u64, neu: u64) -> bool {
        if !self.knoten.remove(&alt) {
            return false;
        }
        self.knoten.insert(neu);
        true
    }

    /// Versucht, alle Bezüge auf `alt` geometrisch auf die Ersatzkanten
    /// umzulegen. Bezüge, für die keine Ersatzkante innerhalb `toleranz`
    /// (Meter) liegt, bleiben unverändert stehen.
    ///
    /// Gibt `true` zurück, wenn danach kein Bezug mehr auf `alt` zeigt.
    pub fn ersetze_kante(&mut self, alt: &Kante, ersatz: &[Kante], toleranz: f32) -> bool {
        for bezug in &mut self.abschnittsweise {
            if bezug.kante_id != alt.id {
                continue;
            }
            let start = alt.geometrie.punkt_bei(bezug.abschnitt.von() as f32);
            let mitte = alt
                .geometrie
                .punkt_bei(((bezug.abschnitt.von() + bezug.abschnitt.bis()) * 0.5) as f32);
            let ende = alt.geometrie.punkt_bei(bezug.abschnitt.bis() as f32);

            // Beste Ersatzkante: kleinste maximale Abweichung über drei Stützstellen
            let bester = ersatz
                .iter()
                .map(|kandidat| {
                    let abweichung = kandidat
                        .geometrie
                        .abstand(start)
                        .max(kandidat.geometrie.abstand(mitte))
                        .max(kandidat.geometrie.abstand(ende));
                    (kandidat, abweichung)
                })
                .filter(|(_, abweichung)| *abweichung <= toleranz)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((kandidat, _)) = bester {
                let von = kandidat.geometrie.projiziere(start) as f64;
                let bis = kandidat.geometrie.projiziere(ende) as f64;
                let (von, bis, gedreht) = if von <= bis {
                    (von, bis, false)
                } else {
                    (bis, von, true)
                };
                // Degenerierte Projektion (Punktabschnitt) nicht übernehmen
                if bis - von > 1e-6 {
                    bezug.kante_id = kandidat.id;
                    bezug.abschnitt = LinearReferenzierterAbschnitt::von_bis(von, bis);
                    if gedreht {
                        bezug.seitenbezug = bezug.seitenbezug.gegenseite();
                    }
                }
            }
        }

        for bezug in &mut self.punktuell {
            if bezug.kante_id != alt.id {
                continue;
            }
            let punkt = alt.geometrie.punkt_bei(bezug.lineare_referenz as f32);
            let bester = ersatz
                .iter()
                .map(|kandidat| (kandidat, kandidat.geometrie.abstand(punkt)))
                .filter(|(_, abstand)| *abstand <= toleranz)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((kandidat, _)) = bester {
                bezug.kante_id = kandidat.id;
                bezug.lineare_referenz = kandidat.geometrie.projiziere(punkt) as f64;
            }
        }

        !self.enthaelt_kante(alt.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Polylinie;
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn bezug_auf_kante(kante_id: u64) -> Netzbezug {
        Netzbezug {
            abschnittsweise: vec![AbschnittsweiserKantenSeitenBezug {
                kante_id,
                abschnitt: LinearReferenzierterAbschnitt::von_bis(0.25, 0.75),
                seitenbezug: Seitenbezug::Links,
            }],
            punktuell: vec![PunktuellerKantenBezug {
                kante_id,
                lineare_referenz: 0.5,
            }],
            knoten: BTreeSet::new(),
        }
    }

    #[test]
    fn entferne_kante_raeumt_beide_bezugsarten() {
        let mut bezug = bezug_auf_kante(7);
        assert!(bezug.enthaelt_kante(7));
        assert!(bezug.entferne_kante(7));
        assert!(!bezug.enthaelt_kante(7));
        assert!(bezug.ist_leer());
        // Zweites Entfernen ist ein No-op
        assert!(!bezug.entferne_kante(7));
    }

    #[test]
    fn ersetze_knoten_zaehlt_nur_echte_tausche() {
        let mut bezug = Netzbezug::leer();
        bezug.knoten.insert(1);
        bezug.knoten.insert(2);

        assert!(bezug.ersetze_knoten(1, 5));
        assert!(!bezug.enthaelt_knoten(1));
        assert!(bezug.enthaelt_knoten(5));

        // Knoten 3 ist nicht enthalten → kein Tausch
        assert!(!bezug.ersetze_knoten(3, 5));

        // Tausch auf bereits referenzierten Ersatzknoten verkleinert das Set
        assert!(bezug.ersetze_knoten(2, 5));
        assert_eq!(bezug.knoten.len(), 1);
    }

    #[test]
    fn ersetze_kante_projiziert_abschnitt_und_punkt() {
        let alt = Kante::neu(
            7,
            1,
            2,
            Polylinie::neu(vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]),
        );
        // Ersatzkante leicht versetzt parallel
        let neu = Kante::neu(
            8,
            1,
            2,
            Polylinie::neu(vec![Vec2::new(0.0, 2.0), Vec2::new(100.0, 2.0)]),
        );

        let mut bezug = bezug_auf_kante(7);
        assert!(bezug.ersetze_kante(&alt, std::slice::from_ref(&neu), 30.0));

        assert_eq!(bezug.abschnittsweise[0].kante_id, 8);
        assert_relative_eq!(bezug.abschnittsweise[0].abschnitt.von(), 0.25, epsilon = 1e-5);
        assert_relative_eq!(bezug.abschnittsweise[0].abschnitt.bis(), 0.75, epsilon = 1e-5);
        assert_eq!(bezug.abschnittsweise[0].seitenbezug, Seitenbezug::Links);
        assert_eq!(bezug.punktuell[0].kante_id, 8);
        assert_relative_eq!(bezug.punktuell[0].lineare_referenz, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn ersetze_kante_dreht_seitenbezug_bei_gegenlaeufiger_ersatzkante() {
        let alt = Kante::neu(
            7,
            1,
            2,
            Polylinie::neu(vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]),
        );
        // Ersatzkante läuft in Gegenrichtung
        let neu = Kante::neu(
            8,
            2,
            1,
            Polylinie::neu(vec![Vec2::new(100.0, 0.0), Vec2::new(0.0, 0.0)]),
        );

        let mut bezug = bezug_auf_kante(7);
        assert!(bezug.ersetze_kante(&alt, std::slice::from_ref(&neu), 30.0));
        assert_eq!(bezug.abschnittsweise[0].seitenbezug, Seitenbezug::Rechts);
        assert_relative_eq!(bezug.abschnittsweise[0].abschnitt.von(), 0.25, epsilon = 1e-5);
    }

    #[test]
    fn ersetze_kante_ausser_toleranz_laesst_bezug_stehen() {
        let alt = Kante::neu(
            7,
            1,
            2,
            Polylinie::neu(vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]),
        );
        let weit_weg = Kante::neu(
            8,
            3,
            4,
            Polylinie::neu(vec![Vec2::new(0.0, 500.0), Vec2::new(100.0, 500.0)]),
        );

        let mut bezug = bezug_auf_kante(7);
        assert!(!bezug.ersetze_kante(&alt, std::slice::from_ref(&weit_weg), 30.0));
        assert!(bezug.enthaelt_kante(7));
    }
}
