//! Repräsentiert eine Kante zwischen zwei Knoten mit Verlaufgeometrie
//! und den fünf Attributgruppen.

use serde::{Deserialize, Serialize};

use crate::core::attribute::{
    FahrtrichtungAttributGruppe, FuehrungsformAttributGruppe, GeschwindigkeitAttributGruppe,
    KantenAttributGruppe, ZustaendigkeitAttributGruppe,
};
use crate::core::geometrie::Polylinie;

/// Eine Kante des Netzes.
///
/// Die Knoten werden per ID referenziert und können von vielen Kanten
/// geteilt werden. `version` dient der optimistischen Sperre beim
/// Speichern über den Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kante {
    /// Eindeutige ID
    pub id: u64,
    /// Version für die optimistische Sperre
    pub version: u64,
    /// Von-Knoten (Beginn der Stationierungsrichtung)
    pub von_knoten: u64,
    /// Nach-Knoten (Ende der Stationierungsrichtung)
    pub nach_knoten: u64,
    /// Verlaufgeometrie
    pub geometrie: Polylinie,
    /// Abweichender Verlauf der linken Seite (optional)
    pub verlauf_links: Option<Polylinie>,
    /// Abweichender Verlauf der rechten Seite (optional)
    pub verlauf_rechts: Option<Polylinie>,
    /// Führt die Kante links und rechts unabhängige seitenbezogene Attribute?
    pub zweiseitig: bool,
    /// Ganzkantige Attribute, Netzklassen, Standards
    pub kanten_attribut_gruppe: KantenAttributGruppe,
    /// Geschwindigkeits-Attribute
    pub geschwindigkeit_attribut_gruppe: GeschwindigkeitAttributGruppe,
    /// Führungsform-Attribute (seitenabhängig)
    pub fuehrungsform_attribut_gruppe: FuehrungsformAttributGruppe,
    /// Zuständigkeits-Attribute
    pub zustaendigkeit_attribut_gruppe: ZustaendigkeitAttributGruppe,
    /// Fahrtrichtung je Seite
    pub fahrtrichtung_attribut_gruppe: FahrtrichtungAttributGruppe,
}

impl Kante {
    /// Erstellt eine einseitige Kante mit Standard-Attributgruppen.
    pub fn neu(id: u64, von_knoten: u64, nach_knoten: u64, geometrie: Polylinie) -> Self {
        Self {
            id,
            version: 0,
            von_knoten,
            nach_knoten,
            geometrie,
            verlauf_links: None,
            verlauf_rechts: None,
            zweiseitig: false,
            kanten_attribut_gruppe: KantenAttributGruppe::default(),
            geschwindigkeit_attribut_gruppe: GeschwindigkeitAttributGruppe::standard(),
            fuehrungsform_attribut_gruppe: FuehrungsformAttributGruppe::standard(false),
            zustaendigkeit_attribut_gruppe: ZustaendigkeitAttributGruppe::standard(),
            fahrtrichtung_attribut_gruppe: FahrtrichtungAttributGruppe::default(),
        }
    }

    /// Prüft ob die Kante an diesem Knoten hängt.
    pub fn ist_an_knoten(&self, knoten_id: u64) -> bool {
        self.von_knoten == knoten_id || self.nach_knoten == knoten_id
    }

    /// Gibt den jeweils anderen Endknoten zurück.
    pub fn andere_knoten(&self, knoten_id: u64) -> Option<u64> {
        if self.von_knoten == knoten_id {
            Some(self.nach_knoten)
        } else if self.nach_knoten == knoten_id {
            Some(self.von_knoten)
        } else {
            None
        }
    }

    /// Gibt den gemeinsamen Knoten mit einer anderen Kante zurück.
    pub fn gemeinsamer_knoten(&self, other: &Kante) -> Option<u64> {
        if other.ist_an_knoten(self.von_knoten) {
            Some(self.von_knoten)
        } else if other.ist_an_knoten(self.nach_knoten) {
            Some(self.nach_knoten)
        } else {
            None
        }
    }

    /// Länge der Verlaufgeometrie.
    pub fn laenge(&self) -> f32 {
        self.geometrie.laenge()
    }
}
