//! Lineare Referenzierung: normierte Abschnitte [0, 1] entlang einer Kante
//! und Seitenbezug für zweiseitige Kanten.

use serde::{Deserialize, Serialize};

/// Toleranz für Gleichheits- und Lückenprüfungen auf Anteilen.
pub const ANTEIL_TOLERANZ: f64 = 1e-9;

/// Ein normierter Abschnitt `[von, bis)` entlang der Kantengeometrie.
///
/// `von` und `bis` sind Längen-Anteile in [0, 1] mit `von < bis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearReferenzierterAbschnitt {
    von: f64,
    bis: f64,
}

impl LinearReferenzierterAbschnitt {
    /// Erstellt einen Abschnitt; klemmt auf [0, 1].
    ///
    /// Degenerierte Eingaben (`von >= bis`) sind Programmierfehler.
    pub fn von_bis(von: f64, bis: f64) -> Self {
        let von = von.clamp(0.0, 1.0);
        let bis = bis.clamp(0.0, 1.0);
        debug_assert!(
            von < bis,
            "Abschnitt braucht von < bis, bekam [{von}, {bis}]"
        );
        Self { von, bis }
    }

    /// Der gesamte Abschnitt [0, 1].
    pub fn ganz() -> Self {
        Self { von: 0.0, bis: 1.0 }
    }

    /// Unteres Ende des Abschnitts.
    pub fn von(&self) -> f64 {
        self.von
    }

    /// Oberes Ende des Abschnitts.
    pub fn bis(&self) -> f64 {
        self.bis
    }

    /// Anteilige Länge des Abschnitts.
    pub fn laenge(&self) -> f64 {
        self.bis - self.von
    }

    /// Prüft ob der Abschnitt den ganzen Bereich [0, 1] abdeckt.
    pub fn ist_ganz(&self) -> bool {
        self.von < ANTEIL_TOLERANZ && self.bis > 1.0 - ANTEIL_TOLERANZ
    }

    /// Prüft ob ein Anteil im Abschnitt liegt.
    pub fn enthaelt(&self, anteil: f64) -> bool {
        anteil >= self.von - ANTEIL_TOLERANZ && anteil <= self.bis + ANTEIL_TOLERANZ
    }

    /// Prüft ob `other` vollständig in diesem Abschnitt liegt.
    pub fn umfasst(&self, other: &Self) -> bool {
        self.enthaelt(other.von) && self.enthaelt(other.bis)
    }

    /// Prüft ob sich die Abschnitte an genau einem Punkt berühren.
    pub fn beruehrt(&self, other: &Self) -> bool {
        (self.bis - other.von).abs() < ANTEIL_TOLERANZ
            || (other.bis - self.von).abs() < ANTEIL_TOLERANZ
    }

    /// Überschneidung mit positivem Längenanteil, sonst `None`.
    pub fn ueberschneidung(&self, other: &Self) -> Option<Self> {
        let von = self.von.max(other.von);
        let bis = self.bis.min(other.bis);
        if bis - von > ANTEIL_TOLERANZ {
            Some(Self { von, bis })
        } else {
            None
        }
    }

    /// Drückt diesen Abschnitt relativ zum Fenster `fenster` aus
    /// (Re-Normierung auf [0, 1] lokal zum Fenster).
    ///
    /// Voraussetzung: der Abschnitt liegt innerhalb des Fensters.
    pub fn relativ_zu(&self, fenster: &Self) -> Self {
        debug_assert!(fenster.laenge() > ANTEIL_TOLERANZ);
        let skala = fenster.laenge();
        Self {
            von: ((self.von - fenster.von) / skala).clamp(0.0, 1.0),
            bis: ((self.bis - fenster.von) / skala).clamp(0.0, 1.0),
        }
    }

    /// Spiegelt den Abschnitt unter Richtungsumkehr: `[1-bis, 1-von]`.
    pub fn umgekehrt(&self) -> Self {
        Self {
            von: 1.0 - self.bis,
            bis: 1.0 - self.von,
        }
    }
}

/// Seitenbezug eines Attributs auf einer Kante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Seitenbezug {
    /// Linke Seite in Stationierungsrichtung
    Links,
    /// Rechte Seite in Stationierungsrichtung
    Rechts,
    /// Beide Seiten (einzig gültiger Wert auf einseitigen Kanten)
    #[default]
    Beidseitig,
}

impl Seitenbezug {
    /// Gegenseite (Beidseitig bleibt Beidseitig).
    pub fn gegenseite(&self) -> Self {
        match self {
            Seitenbezug::Links => Seitenbezug::Rechts,
            Seitenbezug::Rechts => Seitenbezug::Links,
            Seitenbezug::Beidseitig => Seitenbezug::Beidseitig,
        }
    }
}

/// Prüft die Partitions-Invariante: sortierte Abschnitte überdecken [0, 1]
/// lückenlos und überlappungsfrei.
pub fn ist_lueckenlos(abschnitte: &[LinearReferenzierterAbschnitt]) -> bool {
    let Some(erster) = abschnitte.first() else {
        return false;
    };
    if erster.von() > ANTEIL_TOLERANZ {
        return false;
    }
    for paar in abschnitte.windows(2) {
        if (paar[0].bis() - paar[1].von()).abs() > ANTEIL_TOLERANZ {
            return false;
        }
    }
    abschnitte.last().unwrap().bis() > 1.0 - ANTEIL_TOLERANZ
}
