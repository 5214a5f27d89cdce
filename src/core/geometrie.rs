//! Reine Geometrie-Funktionen für Polylinien (LineStrings) und Polygone.
//!
//! Layer-neutral: wird von `projektion`, `strecken` und `sackgassen`
//! importiert ohne Zirkel-Abhängigkeiten zu erzeugen. Alle linearen
//! Referenzen sind Anteile in [0, 1] entlang der Polylinien-Länge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Eine offene Polylinie (LineString) aus mindestens zwei Stützpunkten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polylinie {
    punkte: Vec<Vec2>,
}

impl Polylinie {
    /// Erstellt eine Polylinie aus Stützpunkten.
    ///
    /// Erwartet mindestens zwei Punkte; degenerierte Eingaben werden
    /// unverändert übernommen und liefern Länge 0.
    pub fn neu(punkte: Vec<Vec2>) -> Self {
        debug_assert!(punkte.len() >= 2, "Polylinie braucht mindestens 2 Punkte");
        Self { punkte }
    }

    /// Stützpunkte (read-only).
    pub fn punkte(&self) -> &[Vec2] {
        &self.punkte
    }

    /// Erster Stützpunkt.
    pub fn start(&self) -> Vec2 {
        self.punkte[0]
    }

    /// Letzter Stützpunkt.
    pub fn ende(&self) -> Vec2 {
        *self.punkte.last().unwrap()
    }

    /// Gesamtlänge der Polylinie.
    pub fn laenge(&self) -> f32 {
        self.punkte.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Punkt am angegebenen Längen-Anteil (t ∈ [0, 1], geklemmt).
    pub fn punkt_bei(&self, anteil: f32) -> Vec2 {
        let anteil = anteil.clamp(0.0, 1.0);
        let ziel = self.laenge() * anteil;

        let mut gelaufen = 0.0f32;
        for w in self.punkte.windows(2) {
            let seg_laenge = w[0].distance(w[1]);
            if gelaufen + seg_laenge >= ziel {
                if seg_laenge < f32::EPSILON {
                    return w[0];
                }
                let t = (ziel - gelaufen) / seg_laenge;
                return w[0].lerp(w[1], t);
            }
            gelaufen += seg_laenge;
        }
        self.ende()
    }

    /// Projiziert einen Punkt auf die Polylinie und gibt den Längen-Anteil
    /// der nächstgelegenen Stelle zurück (lineare Referenz).
    pub fn projiziere(&self, punkt: Vec2) -> f32 {
        let gesamt = self.laenge();
        if gesamt < f32::EPSILON {
            return 0.0;
        }

        let mut beste_distanz = f32::MAX;
        let mut bester_anteil = 0.0f32;
        let mut gelaufen = 0.0f32;

        for w in self.punkte.windows(2) {
            let seg = w[1] - w[0];
            let seg_laenge = seg.length();
            let t = if seg_laenge < f32::EPSILON {
                0.0
            } else {
                ((punkt - w[0]).dot(seg) / (seg_laenge * seg_laenge)).clamp(0.0, 1.0)
            };
            let fuss = w[0] + seg * t;
            let distanz = punkt.distance(fuss);
            if distanz < beste_distanz {
                beste_distanz = distanz;
                bester_anteil = (gelaufen + seg_laenge * t) / gesamt;
            }
            gelaufen += seg_laenge;
        }

        bester_anteil.clamp(0.0, 1.0)
    }

    /// Kürzester Abstand eines Punkts zur Polylinie.
    pub fn abstand(&self, punkt: Vec2) -> f32 {
        let mut bester = f32::MAX;
        for w in self.punkte.windows(2) {
            let seg = w[1] - w[0];
            let seg_laenge_sq = seg.length_squared();
            let t = if seg_laenge_sq < f32::EPSILON {
                0.0
            } else {
                ((punkt - w[0]).dot(seg) / seg_laenge_sq).clamp(0.0, 1.0)
            };
            bester = bester.min(punkt.distance(w[0] + seg * t));
        }
        bester
    }

    /// Extrahiert den Teilverlauf zwischen zwei Längen-Anteilen.
    ///
    /// `von` und `bis` werden geklemmt und bei Bedarf getauscht; das
    /// Ergebnis enthält exakt interpolierte Endpunkte.
    pub fn teilstueck(&self, von: f32, bis: f32) -> Polylinie {
        let (von, bis) = if von <= bis { (von, bis) } else { (bis, von) };
        let gesamt = self.laenge();
        let start_ziel = gesamt * von.clamp(0.0, 1.0);
        let ende_ziel = gesamt * bis.clamp(0.0, 1.0);

        let mut punkte = vec![self.punkt_bei(von)];
        let mut gelaufen = 0.0f32;
        for w in self.punkte.windows(2) {
            let seg_laenge = w[0].distance(w[1]);
            let seg_ende = gelaufen + seg_laenge;
            // Innere Stützpunkte strikt zwischen den beiden Zielen übernehmen
            if seg_ende > start_ziel && seg_ende < ende_ziel {
                punkte.push(w[1]);
            }
            gelaufen = seg_ende;
        }
        punkte.push(self.punkt_bei(bis));

        // Doppelte Punkte an den Schnittstellen entfernen
        punkte.dedup_by(|a, b| a.distance(*b) < 1e-6);
        if punkte.len() < 2 {
            let p = punkte[0];
            punkte.push(p);
        }
        Polylinie::neu(punkte)
    }

    /// Gibt die Polylinie mit umgekehrter Stützpunktreihenfolge zurück.
    pub fn umgekehrt(&self) -> Polylinie {
        let mut punkte = self.punkte.clone();
        punkte.reverse();
        Polylinie::neu(punkte)
    }
}

/// Axis-aligned Rechteck für Partitions- und Bereichsabfragen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bereich {
    /// Minimal-Ecke
    pub min: Vec2,
    /// Maximal-Ecke
    pub max: Vec2,
}

impl Bereich {
    /// Erstellt einen Bereich aus zwei Ecken.
    pub fn neu(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Prüft ob ein Punkt im Bereich liegt (inklusive Ränder).
    pub fn enthaelt(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Prüft ob die Polylinie den Bereich berührt oder durchquert; auch
    /// Segmente, deren Endpunkte beide außerhalb liegen, werden erkannt.
    pub fn schneidet(&self, linie: &Polylinie) -> bool {
        linie
            .punkte()
            .windows(2)
            .any(|w| self.schneidet_segment(w[0], w[1]))
    }

    /// Liang-Barsky-Clipping eines Liniensegments gegen das Rechteck.
    fn schneidet_segment(&self, a: Vec2, b: Vec2) -> bool {
        let d = b - a;
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for (p, q) in [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ] {
            if p.abs() < f32::EPSILON {
                // Parallel zur Kante: ganz außerhalb?
                if q < 0.0 {
                    return false;
                }
            } else {
                let t = q / p;
                if p < 0.0 {
                    t_min = t_min.max(t);
                } else {
                    t_max = t_max.min(t);
                }
                if t_min > t_max {
                    return false;
                }
            }
        }
        true
    }
}

/// Geschlossener Polygonzug (letzter Punkt implizit mit dem ersten verbunden).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    ring: Vec<Vec2>,
}

impl Polygon {
    /// Erstellt ein Polygon aus einem Ring von Stützpunkten.
    pub fn neu(ring: Vec<Vec2>) -> Self {
        debug_assert!(ring.len() >= 3, "Polygon braucht mindestens 3 Punkte");
        Self { ring }
    }

    /// Punkt-in-Polygon-Test (Ray-Casting, Ränder zählen als innen).
    pub fn enthaelt(&self, p: Vec2) -> bool {
        let n = self.ring.len();
        let mut innen = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.ring[i];
            let b = self.ring[j];
            // Punkt auf einer Kante des Rings → innen
            let seg = b - a;
            let seg_laenge_sq = seg.length_squared();
            if seg_laenge_sq > f32::EPSILON {
                let t = ((p - a).dot(seg) / seg_laenge_sq).clamp(0.0, 1.0);
                if p.distance(a + seg * t) < 1e-5 {
                    return true;
                }
            }
            if (a.y > p.y) != (b.y > p.y) {
                let x_schnitt = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_schnitt {
                    innen = !innen;
                }
            }
            j = i;
        }
        innen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gerade() -> Polylinie {
        Polylinie::neu(vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)])
    }

    fn knick() -> Polylinie {
        Polylinie::neu(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ])
    }

    #[test]
    fn laenge_und_punkt_bei() {
        assert_relative_eq!(gerade().laenge(), 10.0);
        assert_relative_eq!(knick().laenge(), 20.0);

        let mitte = knick().punkt_bei(0.5);
        assert_relative_eq!(mitte.x, 10.0);
        assert_relative_eq!(mitte.y, 0.0);

        let dreiviertel = knick().punkt_bei(0.75);
        assert_relative_eq!(dreiviertel.x, 10.0);
        assert_relative_eq!(dreiviertel.y, 5.0);
    }

    #[test]
    fn projiziere_liefert_lineare_referenz() {
        let linie = knick();
        assert_relative_eq!(linie.projiziere(Vec2::new(5.0, -1.0)), 0.25);
        assert_relative_eq!(linie.projiziere(Vec2::new(11.0, 5.0)), 0.75);
        // Vor dem Start → 0
        assert_relative_eq!(linie.projiziere(Vec2::new(-5.0, 0.0)), 0.0);
    }

    #[test]
    fn teilstueck_enthaelt_innere_stuetzpunkte() {
        let teil = knick().teilstueck(0.25, 0.75);
        assert_eq!(teil.punkte().len(), 3);
        assert_relative_eq!(teil.start().x, 5.0);
        assert_relative_eq!(teil.punkte()[1].x, 10.0);
        assert_relative_eq!(teil.punkte()[1].y, 0.0);
        assert_relative_eq!(teil.ende().y, 5.0);
        assert_relative_eq!(teil.laenge(), 10.0);
    }

    #[test]
    fn teilstueck_mit_vertauschten_grenzen() {
        let teil = gerade().teilstueck(0.8, 0.2);
        assert_relative_eq!(teil.start().x, 2.0);
        assert_relative_eq!(teil.ende().x, 8.0);
    }

    #[test]
    fn umgekehrt_dreht_stuetzpunkte() {
        let r = knick().umgekehrt();
        assert_relative_eq!(r.start().y, 10.0);
        assert_relative_eq!(r.ende().x, 0.0);
    }

    #[test]
    fn bereich_schneidet_polylinie() {
        let bereich = Bereich::neu(Vec2::new(-1.0, -1.0), Vec2::new(5.0, 5.0));
        assert!(bereich.schneidet(&gerade()));
        let weit_weg = Polylinie::neu(vec![Vec2::new(50.0, 50.0), Vec2::new(60.0, 50.0)]);
        assert!(!bereich.schneidet(&weit_weg));
    }

    #[test]
    fn bereich_schneidet_durchquerende_polylinie() {
        // Beide Endpunkte außerhalb, der Verlauf kreuzt den Bereich
        let bereich = Bereich::neu(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let quer = Polylinie::neu(vec![Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0)]);
        assert!(bereich.schneidet(&quer));

        let diagonal_vorbei =
            Polylinie::neu(vec![Vec2::new(-5.0, 8.0), Vec2::new(8.0, 21.0)]);
        assert!(!bereich.schneidet(&diagonal_vorbei));
    }

    #[test]
    fn polygon_enthaelt_punkt() {
        let quadrat = Polygon::neu(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        assert!(quadrat.enthaelt(Vec2::new(5.0, 5.0)));
        assert!(!quadrat.enthaelt(Vec2::new(15.0, 5.0)));
        // Rand zählt als innen
        assert!(quadrat.enthaelt(Vec2::new(10.0, 5.0)));
    }
}
