//! Händigkeit: auf welcher Seite einer Basisgeometrie verläuft eine
//! andere Geometrie?
//!
//! Entscheidet bei der Attributprojektion, ob die "linke" Seite der
//! Quellkante auf die linke oder rechte Seite der Zielkante abgebildet
//! werden muss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::Polylinie;

/// Anzahl der Stützstellen für die Offset-Abtastung.
const ABTAST_PUNKTE: usize = 20;

/// Offsets unterhalb dieser Länge (Meter) werden als deckungsgleich
/// gewertet und nicht mitgezählt.
const MIN_OFFSET: f32 = 1e-4;

/// Seite, auf der die andere Geometrie relativ zur Basis verläuft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientierung {
    /// Links der Basis (in Stationierungsrichtung)
    Links,
    /// Rechts der Basis
    Rechts,
    /// Kein dominanter Offset (z.B. deckungsgleiche Geometrien)
    Unbestimmt,
}

/// Ergebnis der Händigkeits-Bestimmung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Haendigkeit {
    /// Dominante Seite
    pub orientierung: Orientierung,
    /// Anteil der dominanten Seite am Vorzeichen-Saldo, in [0, 1]
    pub wahrscheinlichkeit: f64,
}

impl Haendigkeit {
    /// Unbestimmte Händigkeit (deckungsgleiche Geometrien).
    pub fn unbestimmt() -> Self {
        Self {
            orientierung: Orientierung::Unbestimmt,
            wahrscheinlichkeit: 0.0,
        }
    }
}

/// Bestimmt, auf welcher Seite von `basis` die Geometrie `andere` verläuft.
///
/// An parameterkorrespondierenden Stützstellen wird das Vorzeichen des
/// Kreuzprodukts aus Basis-Tangente und Offset-Vektor ausgewertet; das
/// Mehrheitsvorzeichen gewinnt, Ausreißer werden über den Saldo
/// diskontiert. Deckungsgleiche Geometrien liefern `Unbestimmt` mit
/// Wahrscheinlichkeit 0.
pub fn haendigkeit_von_kante_zu_kante(basis: &Polylinie, andere: &Polylinie) -> Haendigkeit {
    let mut links = 0i32;
    let mut rechts = 0i32;

    for i in 0..ABTAST_PUNKTE {
        // Stützstellen im Inneren, damit die Tangente beidseitig bestimmbar ist
        let t = (i as f32 + 0.5) / ABTAST_PUNKTE as f32;
        let punkt = basis.punkt_bei(t);
        let tangente = basis.punkt_bei((t + 0.01).min(1.0)) - basis.punkt_bei((t - 0.01).max(0.0));
        let offset = andere.punkt_bei(t) - punkt;

        if tangente.length() < MIN_OFFSET {
            continue;
        }

        // Nur der seitliche Abstand zählt; Versatz längs der Tangente
        // (z.B. bei Teilüberlappung auf gleicher Linie) hat keine Seite
        let quer = kreuz(tangente.normalize(), offset);
        if quer.abs() < MIN_OFFSET {
            continue;
        }
        if quer > 0.0 {
            links += 1;
        } else {
            rechts += 1;
        }
    }

    let gewertet = links + rechts;
    if gewertet == 0 {
        return Haendigkeit::unbestimmt();
    }

    let saldo = (links - rechts).abs();
    let wahrscheinlichkeit = saldo as f64 / gewertet as f64;
    let orientierung = if saldo == 0 {
        Orientierung::Unbestimmt
    } else if links > rechts {
        Orientierung::Links
    } else {
        Orientierung::Rechts
    };

    Haendigkeit {
        orientierung,
        wahrscheinlichkeit,
    }
}

fn kreuz(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gerade_bei(y: f32) -> Polylinie {
        Polylinie::neu(vec![Vec2::new(0.0, y), Vec2::new(100.0, y)])
    }

    #[test]
    fn parallele_links_der_basis() {
        // Basis läuft in +x; positives y liegt links
        let h = haendigkeit_von_kante_zu_kante(&gerade_bei(0.0), &gerade_bei(5.0));
        assert_eq!(h.orientierung, Orientierung::Links);
        assert_relative_eq!(h.wahrscheinlichkeit, 1.0);
    }

    #[test]
    fn parallele_rechts_der_basis() {
        let h = haendigkeit_von_kante_zu_kante(&gerade_bei(0.0), &gerade_bei(-5.0));
        assert_eq!(h.orientierung, Orientierung::Rechts);
        assert_relative_eq!(h.wahrscheinlichkeit, 1.0);
    }

    #[test]
    fn deckungsgleiche_geometrien_sind_unbestimmt() {
        let h = haendigkeit_von_kante_zu_kante(&gerade_bei(0.0), &gerade_bei(0.0));
        assert_eq!(h.orientierung, Orientierung::Unbestimmt);
        assert_relative_eq!(h.wahrscheinlichkeit, 0.0);
    }

    #[test]
    fn versatz_laengs_der_linie_hat_keine_seite() {
        // Teilüberlappung auf derselben Linie: der Versatz zeigt in
        // Tangentenrichtung und darf keine Seite ergeben
        let versetzt = Polylinie::neu(vec![Vec2::new(60.0, 0.0), Vec2::new(160.0, 0.0)]);
        let h = haendigkeit_von_kante_zu_kante(&gerade_bei(0.0), &versetzt);
        assert_eq!(h.orientierung, Orientierung::Unbestimmt);
    }

    #[test]
    fn kreuzende_geometrie_hat_geringe_wahrscheinlichkeit() {
        // Kreuzt die Basis in der Mitte: halbe Stützstellen links, halbe rechts
        let kreuzend = Polylinie::neu(vec![Vec2::new(0.0, -5.0), Vec2::new(100.0, 5.0)]);
        let h = haendigkeit_von_kante_zu_kante(&gerade_bei(0.0), &kreuzend);
        assert!(h.wahrscheinlichkeit < 0.2);
    }
}
