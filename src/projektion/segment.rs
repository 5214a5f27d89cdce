//! Kanten-Segmente: das Stück einer Quellkante, das bei der Projektion
//! auf einen Abschnitt der Zielkante fällt.
//!
//! Ein Segment trägt die Quellkante, die linearen Referenzen des
//! Überschneidungsbereichs auf Quelle und Ziel sowie die Händigkeit der
//! Quelle relativ zum Ziel. Über die Getter liefert es die auf das
//! Segment zugeschnittenen, bereits richtungs- und seitenkorrigierten
//! Attributlisten.

use serde::{Deserialize, Serialize};

use crate::core::{
    schneide_auf, FuehrungsformAttribute, GeschwindigkeitAttribute, Kante,
    LinearReferenzierteAttribute, LinearReferenzierterAbschnitt, Richtung, Seitenbezug,
    ZustaendigkeitAttribute,
};
use crate::projektion::haendigkeit::{Haendigkeit, Orientierung};

/// Lineare Referenz eines Überschneidungsbereichs auf einer Kante,
/// inklusive der Information, ob die Überschneidung gegen die
/// Stationierungsrichtung der Kante verläuft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineareReferenzProjektionsergebnis {
    /// Abschnitt auf der Kante (stets `von < bis`)
    pub abschnitt: LinearReferenzierterAbschnitt,
    /// Verläuft die Überschneidung gegen die Stationierungsrichtung?
    pub umgekehrt: bool,
}

impl LineareReferenzProjektionsergebnis {
    /// Ergebnis aus zwei projizierten Anteilen; ordnet und merkt sich
    /// die Laufrichtung.
    pub fn aus_anteilen(von: f64, bis: f64) -> Self {
        if von <= bis {
            Self {
                abschnitt: LinearReferenzierterAbschnitt::von_bis(von, bis),
                umgekehrt: false,
            }
        } else {
            Self {
                abschnitt: LinearReferenzierterAbschnitt::von_bis(bis, von),
                umgekehrt: true,
            }
        }
    }
}

/// Ein Stück einer Quellkante, projiziert auf einen Abschnitt der Zielkante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KantenSegment {
    quell_kante: Kante,
    projektion_auf_quelle: LineareReferenzProjektionsergebnis,
    projektion_auf_ziel: LineareReferenzProjektionsergebnis,
    haendigkeit: Haendigkeit,
}

impl KantenSegment {
    pub fn neu(
        quell_kante: Kante,
        projektion_auf_quelle: LineareReferenzProjektionsergebnis,
        projektion_auf_ziel: LineareReferenzProjektionsergebnis,
        haendigkeit: Haendigkeit,
    ) -> Self {
        Self {
            quell_kante,
            projektion_auf_quelle,
            projektion_auf_ziel,
            haendigkeit,
        }
    }

    /// Die Quellkante des Segments.
    pub fn quell_kante(&self) -> &Kante {
        &self.quell_kante
    }

    /// Abschnitt auf der Zielkante, auf den das Segment fällt.
    pub fn ziel_abschnitt(&self) -> LinearReferenzierterAbschnitt {
        self.projektion_auf_ziel.abschnitt
    }

    /// Abschnitt auf der Quellkante, aus dem das Segment stammt.
    pub fn quell_abschnitt(&self) -> LinearReferenzierterAbschnitt {
        self.projektion_auf_quelle.abschnitt
    }

    /// Händigkeit der Quellkante relativ zur Zielkante.
    pub fn haendigkeit(&self) -> Haendigkeit {
        self.haendigkeit
    }

    /// Laufen Quelle und Ziel im Überschneidungsbereich gegenläufig?
    pub fn richtung_gedreht(&self) -> bool {
        self.projektion_auf_quelle.umgekehrt != self.projektion_auf_ziel.umgekehrt
    }

    /// Müssen die Seiten (links/rechts) beim Übernehmen getauscht werden?
    /// Gegenläufige Stationierung tauscht links und rechts.
    pub fn seiten_vertauscht(&self) -> bool {
        self.richtung_gedreht()
    }

    /// Zielseite für eine einseitige Quellkante: eine links neben dem
    /// Ziel verlaufende Quelle speist die linke Zielseite, eine rechts
    /// verlaufende die rechte. Ohne dominante Seite beide.
    pub fn ziel_seite(&self) -> Seitenbezug {
        match self.haendigkeit.orientierung {
            Orientierung::Links => Seitenbezug::Links,
            Orientierung::Rechts => Seitenbezug::Rechts,
            Orientierung::Unbestimmt => Seitenbezug::Beidseitig,
        }
    }

    /// Geschwindigkeits-Attribute des Segments, lokal auf das Segment
    /// normiert und bei gegenläufiger Stationierung richtungskorrigiert.
    pub fn geschwindigkeit_attribute(&self) -> Vec<GeschwindigkeitAttribute> {
        let zugeschnitten = schneide_auf(
            self.quell_kante.geschwindigkeit_attribut_gruppe.attribute(),
            &self.quell_abschnitt(),
        );
        self.richtungskorrigiert(zugeschnitten, GeschwindigkeitAttribute::umgekehrt)
    }

    /// Führungsform-Attribute, die auf der linken Seite der Zielkante landen.
    pub fn fuehrungsform_attribute_links(&self) -> Vec<FuehrungsformAttribute> {
        self.fuehrungsform_seite(true)
    }

    /// Führungsform-Attribute, die auf der rechten Seite der Zielkante landen.
    pub fn fuehrungsform_attribute_rechts(&self) -> Vec<FuehrungsformAttribute> {
        self.fuehrungsform_seite(false)
    }

    fn fuehrungsform_seite(&self, ziel_links: bool) -> Vec<FuehrungsformAttribute> {
        let gruppe = &self.quell_kante.fuehrungsform_attribut_gruppe;
        let quelle = if gruppe.ist_zweiseitig() {
            let quell_links = ziel_links != self.seiten_vertauscht();
            if quell_links {
                gruppe.links()
            } else {
                gruppe.rechts()
            }
        } else {
            // Einseitige Quelle: die Händigkeit bestimmt, welche Zielseite
            // sie speist. Eine links des Ziels verlaufende Quelle liefert
            // nichts für die rechte Zielseite und umgekehrt.
            let bedient = match self.ziel_seite() {
                Seitenbezug::Beidseitig => true,
                Seitenbezug::Links => ziel_links,
                Seitenbezug::Rechts => !ziel_links,
            };
            if !bedient {
                return Vec::new();
            }
            gruppe.links()
        };
        let zugeschnitten = schneide_auf(quelle, &self.quell_abschnitt());
        self.richtungskorrigiert(zugeschnitten, Clone::clone)
    }

    /// Zuständigkeits-Attribute des Segments.
    pub fn zustaendigkeit_attribute(&self) -> Vec<ZustaendigkeitAttribute> {
        let zugeschnitten = schneide_auf(
            self.quell_kante.zustaendigkeit_attribut_gruppe.attribute(),
            &self.quell_abschnitt(),
        );
        self.richtungskorrigiert(zugeschnitten, Clone::clone)
    }

    /// Fahrtrichtung des Segments auf der linken Zielseite.
    pub fn fahrtrichtung_links(&self) -> Richtung {
        let gruppe = if self.richtung_gedreht() {
            self.quell_kante.fahrtrichtung_attribut_gruppe.umgekehrt()
        } else {
            self.quell_kante.fahrtrichtung_attribut_gruppe.clone()
        };
        if self.seiten_vertauscht() {
            gruppe.rechts()
        } else {
            gruppe.links()
        }
    }

    /// Fahrtrichtung des Segments auf der rechten Zielseite.
    pub fn fahrtrichtung_rechts(&self) -> Richtung {
        let gruppe = if self.richtung_gedreht() {
            self.quell_kante.fahrtrichtung_attribut_gruppe.umgekehrt()
        } else {
            self.quell_kante.fahrtrichtung_attribut_gruppe.clone()
        };
        if self.seiten_vertauscht() {
            gruppe.links()
        } else {
            gruppe.rechts()
        }
    }

    /// Spiegelt bei gegenläufiger Stationierung die Abschnitte an der
    /// Segmentmitte, dreht die Listenreihenfolge und wendet die
    /// fachliche Richtungskorrektur je Wert an.
    fn richtungskorrigiert<T, F>(&self, mut attribute: Vec<T>, korrektur: F) -> Vec<T>
    where
        T: LinearReferenzierteAttribute,
        F: Fn(&T) -> T,
    {
        if !self.richtung_gedreht() {
            return attribute;
        }
        attribute.reverse();
        attribute
            .iter()
            .map(|wert| korrektur(wert).mit_abschnitt(wert.abschnitt().umgekehrt()))
            .collect()
    }
}
