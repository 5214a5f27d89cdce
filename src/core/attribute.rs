//! Attributgruppen einer Kante und die Abschnitts-Algebra darauf.
//!
//! Jede linear referenzierte Gruppe hält pro relevanter Seite eine nach
//! `von` sortierte, lückenlose und überlappungsfreie Partition von [0, 1].
//! Einfügen teilt angeschnittene Nachbarn, Entfernen/Zusammenlegen hält
//! die Partition geschlossen.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::linear_referenz::{
    ist_lueckenlos, LinearReferenzierterAbschnitt, Seitenbezug, ANTEIL_TOLERANZ,
};
use crate::fehler::NetzFehler;

/// Id einer Verwaltungseinheit (Organisation mit Zuständigkeitsbereich).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VerwaltungseinheitId(pub u64);

/// Netzklasse einer Kante (klassenbildende Eigenschaft für Strecken).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Netzklasse {
    /// RadNETZ Alltag
    RadnetzAlltag,
    /// RadNETZ Freizeit
    RadnetzFreizeit,
    /// RadNETZ Zielnetz
    RadnetzZielnetz,
    /// Kreisnetz Alltag
    KreisnetzAlltag,
    /// Kreisnetz Freizeit
    KreisnetzFreizeit,
    /// Kommunalnetz Alltag
    KommunalnetzAlltag,
    /// Kommunalnetz Freizeit
    KommunalnetzFreizeit,
    /// Radvorrangrouten
    Radvorrangrouten,
    /// Radschnellverbindung
    Radschnellverbindung,
}

/// Erfüllter Qualitätsstandard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum IstStandard {
    /// Basisstandard
    Basisstandard,
    /// Startstandard RadNETZ
    StartstandardRadnetz,
    /// Zielstandard RadNETZ
    ZielstandardRadnetz,
    /// Standard für Radschnellverbindungen
    RadschnellverbindungStandard,
    /// Standard für Radvorrangrouten
    RadvorrangroutenStandard,
}

/// Status einer Kante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KantenStatus {
    /// Unter Verkehr
    #[default]
    UnterVerkehr,
    /// In Planung
    InPlanung,
    /// Im Bau
    InBau,
    /// Gesperrt / nicht für Radverkehr freigegeben
    NichtFuerRadverkehrFreigegeben,
    /// Fiktive Kante ohne baulichen Bestand
    Fiktiv,
}

/// Ortslage eines Abschnitts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ortslage {
    /// Innerorts
    Innerorts,
    /// Außerorts
    Ausserorts,
}

/// Zulässige Höchstgeschwindigkeit des Kfz-Verkehrs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Hoechstgeschwindigkeit {
    /// Keine Angabe
    #[default]
    Unbekannt,
    /// Verkehrsberuhigter Bereich
    Max9Kmh,
    /// Tempo-20-Zone
    Max20Kmh,
    /// Tempo-30-Zone
    Max30Kmh,
    /// Innerorts-Regelfall
    Max50Kmh,
    /// Landstraße reduziert
    Max70Kmh,
    /// Außerorts-Regelfall
    Max100Kmh,
}

/// Führungsform des Radverkehrs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Radverkehrsfuehrung {
    /// Keine Angabe
    #[default]
    Unbekannt,
    /// Baulich getrennter Radweg
    SonderwegRadweg,
    /// Gemeinsamer Geh-/Radweg
    GehRadwegGemeinsam,
    /// Schutzstreifen auf der Fahrbahn
    Schutzstreifen,
    /// Radfahrstreifen
    Radfahrstreifen,
    /// Führung im Mischverkehr
    Mischverkehr,
    /// Fahrradstraße
    Fahrradstrasse,
}

/// Belagart der Oberfläche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BelagArt {
    /// Keine Angabe
    #[default]
    Unbekannt,
    /// Asphalt
    Asphalt,
    /// Beton
    Beton,
    /// Pflaster
    Pflaster,
    /// Wassergebundene Decke
    WassergebundeneDecke,
    /// Ungebundener Belag
    Ungebunden,
}

/// Bordsteinausführung an Querungsstellen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bordstein {
    /// Keine Angabe
    #[default]
    Unbekannt,
    /// Abgesenkt (< 3 cm)
    KomplettAbgesenkt,
    /// Teilweise abgesenkt
    TeilweiseAbgesenkt,
    /// Hochbord
    KeineAbsenkung,
}

/// Fahrtrichtung des Radverkehrs relativ zur Stationierungsrichtung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Richtung {
    /// In Stationierungsrichtung
    InRichtung,
    /// Gegen Stationierungsrichtung
    GegenRichtung,
    /// Beide Richtungen
    #[default]
    BeideRichtungen,
}

impl Richtung {
    /// Richtung unter Umkehr der Stationierungsrichtung.
    pub fn umgekehrt(&self) -> Self {
        match self {
            Richtung::InRichtung => Richtung::GegenRichtung,
            Richtung::GegenRichtung => Richtung::InRichtung,
            Richtung::BeideRichtungen => Richtung::BeideRichtungen,
        }
    }
}

/// Form eines Knotens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnotenForm {
    /// Kreuzung ohne besondere Regelung
    Kreuzung,
    /// Einmündung
    Einmuendung,
    /// Kreisverkehr
    Kreisverkehr,
    /// Lichtsignalanlage
    Lichtsignalanlage,
    /// Querungsstelle
    Querungsstelle,
}

// ─── Abschnitts-Algebra ──────────────────────────────────────────────────────

/// Ein linear referenzierter Attributwert: Abschnitt plus Fachdaten.
pub trait LinearReferenzierteAttribute: Clone {
    /// Abschnitt dieses Werts.
    fn abschnitt(&self) -> LinearReferenzierterAbschnitt;
    /// Kopie mit ausgetauschtem Abschnitt (Fachdaten unverändert).
    fn mit_abschnitt(&self, abschnitt: LinearReferenzierterAbschnitt) -> Self;
    /// Gleichheit der Fachdaten (ohne Abschnitt).
    fn werte_gleich(&self, other: &Self) -> bool;
}

/// Sortiert nach `von` und prüft die Partitions-Invariante.
pub fn sortiere_und_pruefe<T: LinearReferenzierteAttribute>(mut attribute: Vec<T>) -> Vec<T> {
    attribute.sort_by(|a, b| a.abschnitt().von().total_cmp(&b.abschnitt().von()));
    let abschnitte: Vec<_> = attribute.iter().map(|a| a.abschnitt()).collect();
    debug_assert!(
        ist_lueckenlos(&abschnitte),
        "Attributliste überdeckt [0, 1] nicht lückenlos"
    );
    attribute
}

/// Fügt einen neuen Wert ein und hält die Partition geschlossen:
/// vollständig überdeckte Werte fallen weg, angeschnittene werden gekürzt,
/// ein vollständig umfassender Wert wird geteilt.
pub fn fuege_ein<T: LinearReferenzierteAttribute>(attribute: &mut Vec<T>, neuer: T) {
    let fenster = neuer.abschnitt();
    let mut ergebnis: Vec<T> = Vec::with_capacity(attribute.len() + 2);

    for alter in attribute.iter() {
        let a = alter.abschnitt();
        // Links überstehender Rest
        if a.von() < fenster.von() - ANTEIL_TOLERANZ {
            let bis = a.bis().min(fenster.von());
            if bis - a.von() > ANTEIL_TOLERANZ {
                ergebnis.push(
                    alter.mit_abschnitt(LinearReferenzierterAbschnitt::von_bis(a.von(), bis)),
                );
            }
        }
        // Rechts überstehender Rest
        if a.bis() > fenster.bis() + ANTEIL_TOLERANZ {
            let von = a.von().max(fenster.bis());
            if a.bis() - von > ANTEIL_TOLERANZ {
                ergebnis.push(
                    alter.mit_abschnitt(LinearReferenzierterAbschnitt::von_bis(von, a.bis())),
                );
            }
        }
    }

    ergebnis.push(neuer);
    ergebnis.sort_by(|a, b| a.abschnitt().von().total_cmp(&b.abschnitt().von()));
    *attribute = ergebnis;
}

/// Teilt den Wert, der `anteil` überdeckt, an dieser Stelle in zwei Werte
/// mit identischen Fachdaten. Liegt `anteil` auf einer bestehenden Grenze,
/// passiert nichts.
pub fn teile_bei<T: LinearReferenzierteAttribute>(attribute: &mut Vec<T>, anteil: f64) {
    if anteil <= ANTEIL_TOLERANZ || anteil >= 1.0 - ANTEIL_TOLERANZ {
        return;
    }
    let Some(index) = attribute.iter().position(|a| {
        let abschnitt = a.abschnitt();
        abschnitt.von() + ANTEIL_TOLERANZ < anteil && anteil < abschnitt.bis() - ANTEIL_TOLERANZ
    }) else {
        return;
    };

    let alter = attribute[index].clone();
    let a = alter.abschnitt();
    attribute[index] =
        alter.mit_abschnitt(LinearReferenzierterAbschnitt::von_bis(a.von(), anteil));
    attribute.insert(
        index + 1,
        alter.mit_abschnitt(LinearReferenzierterAbschnitt::von_bis(anteil, a.bis())),
    );
}

/// Verschmilzt benachbarte Werte mit gleichen Fachdaten.
pub fn defragmentiere<T: LinearReferenzierteAttribute>(attribute: &mut Vec<T>) {
    let mut ergebnis: Vec<T> = Vec::with_capacity(attribute.len());
    for wert in attribute.drain(..) {
        match ergebnis.last_mut() {
            Some(letzter)
                if letzter.werte_gleich(&wert)
                    && letzter.abschnitt().beruehrt(&wert.abschnitt()) =>
            {
                *letzter = letzter.mit_abschnitt(LinearReferenzierterAbschnitt::von_bis(
                    letzter.abschnitt().von(),
                    wert.abschnitt().bis(),
                ));
            }
            _ => ergebnis.push(wert),
        }
    }
    *attribute = ergebnis;
}

/// Schneidet die Liste auf ein Fenster zu und re-normiert alle Abschnitte
/// auf [0, 1] lokal zum Fenster. Werte ganz außerhalb fallen weg.
pub fn schneide_auf<T: LinearReferenzierteAttribute>(
    attribute: &[T],
    fenster: &LinearReferenzierterAbschnitt,
) -> Vec<T> {
    attribute
        .iter()
        .filter_map(|wert| {
            wert.abschnitt()
                .ueberschneidung(fenster)
                .map(|schnitt| wert.mit_abschnitt(schnitt.relativ_zu(fenster)))
        })
        .collect()
}

/// Prüft die Partitions-Invariante einer Attributliste.
pub fn liste_ist_lueckenlos<T: LinearReferenzierteAttribute>(attribute: &[T]) -> bool {
    let abschnitte: Vec<_> = attribute.iter().map(|a| a.abschnitt()).collect();
    ist_lueckenlos(&abschnitte)
}

// ─── Attributwerte ───────────────────────────────────────────────────────────

/// Ganzkantige Attribute (nicht linear referenziert).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KantenAttribute {
    /// Status der Kante
    pub status: KantenStatus,
    /// Straßenname (falls vorhanden)
    pub strassen_name: Option<String>,
    /// Freitext-Kommentar
    pub kommentar: Option<String>,
    /// Durchschnittliche tägliche Verkehrsstärke Radverkehr
    pub dtv_radverkehr: Option<u32>,
}

/// Geschwindigkeits-Attribute eines Abschnitts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeschwindigkeitAttribute {
    /// Gültigkeitsabschnitt
    pub abschnitt: LinearReferenzierterAbschnitt,
    /// Ortslage des Abschnitts
    pub ortslage: Option<Ortslage>,
    /// Höchstgeschwindigkeit in Stationierungsrichtung
    pub hoechstgeschwindigkeit: Hoechstgeschwindigkeit,
    /// Abweichende Höchstgeschwindigkeit gegen Stationierungsrichtung
    pub abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung:
        Option<Hoechstgeschwindigkeit>,
}

impl GeschwindigkeitAttribute {
    /// Standardwert über den ganzen Abschnitt [0, 1].
    pub fn standard() -> Self {
        Self {
            abschnitt: LinearReferenzierterAbschnitt::ganz(),
            ortslage: None,
            hoechstgeschwindigkeit: Hoechstgeschwindigkeit::Unbekannt,
            abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung: None,
        }
    }

    /// Wert unter Umkehr der Stationierungsrichtung: Abschnitt gespiegelt,
    /// richtungsabhängige Geschwindigkeiten getauscht.
    pub fn umgekehrt(&self) -> Self {
        match self.abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung {
            Some(gegen) => Self {
                abschnitt: self.abschnitt.umgekehrt(),
                ortslage: self.ortslage,
                hoechstgeschwindigkeit: gegen,
                abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung: Some(
                    self.hoechstgeschwindigkeit,
                ),
            },
            None => Self {
                abschnitt: self.abschnitt.umgekehrt(),
                ..self.clone()
            },
        }
    }
}

impl LinearReferenzierteAttribute for GeschwindigkeitAttribute {
    fn abschnitt(&self) -> LinearReferenzierterAbschnitt {
        self.abschnitt
    }

    fn mit_abschnitt(&self, abschnitt: LinearReferenzierterAbschnitt) -> Self {
        Self {
            abschnitt,
            ..self.clone()
        }
    }

    fn werte_gleich(&self, other: &Self) -> bool {
        self.ortslage == other.ortslage
            && self.hoechstgeschwindigkeit == other.hoechstgeschwindigkeit
            && self.abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung
                == other.abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung
    }
}

/// Führungsform-Attribute eines Abschnitts (seitenabhängig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuehrungsformAttribute {
    /// Gültigkeitsabschnitt
    pub abschnitt: LinearReferenzierterAbschnitt,
    /// Führungsform des Radverkehrs
    pub radverkehrsfuehrung: Radverkehrsfuehrung,
    /// Belagart
    pub belag_art: BelagArt,
    /// Bordsteinausführung
    pub bordstein: Bordstein,
    /// Nutzbare Breite in Metern
    pub breite: Option<f32>,
}

impl FuehrungsformAttribute {
    /// Standardwert über den ganzen Abschnitt [0, 1].
    pub fn standard() -> Self {
        Self {
            abschnitt: LinearReferenzierterAbschnitt::ganz(),
            radverkehrsfuehrung: Radverkehrsfuehrung::Unbekannt,
            belag_art: BelagArt::Unbekannt,
            bordstein: Bordstein::Unbekannt,
            breite: None,
        }
    }
}

impl LinearReferenzierteAttribute for FuehrungsformAttribute {
    fn abschnitt(&self) -> LinearReferenzierterAbschnitt {
        self.abschnitt
    }

    fn mit_abschnitt(&self, abschnitt: LinearReferenzierterAbschnitt) -> Self {
        Self {
            abschnitt,
            ..self.clone()
        }
    }

    fn werte_gleich(&self, other: &Self) -> bool {
        self.radverkehrsfuehrung == other.radverkehrsfuehrung
            && self.belag_art == other.belag_art
            && self.bordstein == other.bordstein
            && self.breite == other.breite
    }
}

/// Zuständigkeits-Attribute eines Abschnitts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZustaendigkeitAttribute {
    /// Gültigkeitsabschnitt
    pub abschnitt: LinearReferenzierterAbschnitt,
    /// Baulastträger
    pub baulast_traeger: Option<VerwaltungseinheitId>,
    /// Unterhaltszuständiger
    pub unterhalts_zustaendiger: Option<VerwaltungseinheitId>,
    /// Erhaltszuständiger
    pub erhalts_zustaendiger: Option<VerwaltungseinheitId>,
    /// Kennung der Vereinbarung
    pub vereinbarungs_kennung: Option<String>,
}

impl ZustaendigkeitAttribute {
    /// Standardwert über den ganzen Abschnitt [0, 1].
    pub fn standard() -> Self {
        Self {
            abschnitt: LinearReferenzierterAbschnitt::ganz(),
            baulast_traeger: None,
            unterhalts_zustaendiger: None,
            erhalts_zustaendiger: None,
            vereinbarungs_kennung: None,
        }
    }
}

impl LinearReferenzierteAttribute for ZustaendigkeitAttribute {
    fn abschnitt(&self) -> LinearReferenzierterAbschnitt {
        self.abschnitt
    }

    fn mit_abschnitt(&self, abschnitt: LinearReferenzierterAbschnitt) -> Self {
        Self {
            abschnitt,
            ..self.clone()
        }
    }

    fn werte_gleich(&self, other: &Self) -> bool {
        self.baulast_traeger == other.baulast_traeger
            && self.unterhalts_zustaendiger == other.unterhalts_zustaendiger
            && self.erhalts_zustaendiger == other.erhalts_zustaendiger
            && self.vereinbarungs_kennung == other.vereinbarungs_kennung
    }
}

// ─── Attributgruppen ─────────────────────────────────────────────────────────

/// Ganzkantige Attribute plus Netzklassen und erfüllte Standards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KantenAttributGruppe {
    /// Ganzkantige Fachattribute
    pub kanten_attribute: KantenAttribute,
    /// Netzklassen der Kante
    pub netzklassen: BTreeSet<Netzklasse>,
    /// Erfüllte Standards
    pub ist_standards: BTreeSet<IstStandard>,
}

/// Linear referenzierte Geschwindigkeits-Attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeschwindigkeitAttributGruppe {
    attribute: Vec<GeschwindigkeitAttribute>,
}

impl GeschwindigkeitAttributGruppe {
    /// Erstellt die Gruppe; sortiert und prüft die Partitions-Invariante.
    pub fn neu(attribute: Vec<GeschwindigkeitAttribute>) -> Self {
        Self {
            attribute: sortiere_und_pruefe(attribute),
        }
    }

    /// Gruppe mit einem Standardwert über [0, 1].
    pub fn standard() -> Self {
        Self {
            attribute: vec![GeschwindigkeitAttribute::standard()],
        }
    }

    /// Attribute in Abschnittsreihenfolge.
    pub fn attribute(&self) -> &[GeschwindigkeitAttribute] {
        &self.attribute
    }

    /// Fügt einen Wert ein (teilt/verdrängt überdeckte Nachbarn).
    pub fn fuege_ein(&mut self, neuer: GeschwindigkeitAttribute) {
        fuege_ein(&mut self.attribute, neuer);
    }

    /// Teilt den überdeckenden Wert an `anteil`.
    pub fn teile_bei(&mut self, anteil: f64) {
        teile_bei(&mut self.attribute, anteil);
    }

    /// Verschmilzt benachbarte gleiche Werte.
    pub fn defragmentiere(&mut self) {
        defragmentiere(&mut self.attribute);
    }

    /// Prüft die Partitions-Invariante.
    pub fn ist_lueckenlos(&self) -> bool {
        liste_ist_lueckenlos(&self.attribute)
    }
}

impl Default for GeschwindigkeitAttributGruppe {
    fn default() -> Self {
        Self::standard()
    }
}

/// Linear referenzierte Führungsform-Attribute, links/rechts unabhängig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuehrungsformAttributGruppe {
    links: Vec<FuehrungsformAttribute>,
    rechts: Vec<FuehrungsformAttribute>,
    ist_zweiseitig: bool,
}

impl FuehrungsformAttributGruppe {
    /// Einseitige Gruppe: `rechts` spiegelt `links`.
    pub fn neu_einseitig(attribute: Vec<FuehrungsformAttribute>) -> Self {
        let links = sortiere_und_pruefe(attribute);
        Self {
            rechts: links.clone(),
            links,
            ist_zweiseitig: false,
        }
    }

    /// Zweiseitige Gruppe mit unabhängigen Seiten.
    pub fn neu_zweiseitig(
        links: Vec<FuehrungsformAttribute>,
        rechts: Vec<FuehrungsformAttribute>,
    ) -> Self {
        Self {
            links: sortiere_und_pruefe(links),
            rechts: sortiere_und_pruefe(rechts),
            ist_zweiseitig: true,
        }
    }

    /// Einseitige Standardgruppe.
    pub fn standard(ist_zweiseitig: bool) -> Self {
        if ist_zweiseitig {
            Self::neu_zweiseitig(
                vec![FuehrungsformAttribute::standard()],
                vec![FuehrungsformAttribute::standard()],
            )
        } else {
            Self::neu_einseitig(vec![FuehrungsformAttribute::standard()])
        }
    }

    /// Ist die Gruppe zweiseitig?
    pub fn ist_zweiseitig(&self) -> bool {
        self.ist_zweiseitig
    }

    /// Attribute der linken Seite.
    pub fn links(&self) -> &[FuehrungsformAttribute] {
        &self.links
    }

    /// Attribute der rechten Seite (bei einseitigen Kanten Spiegel von links).
    pub fn rechts(&self) -> &[FuehrungsformAttribute] {
        &self.rechts
    }

    /// Ersetzt die Attribute einer Seite.
    ///
    /// Auf einseitigen Kanten ist nur `Beidseitig` zulässig; `Links`/`Rechts`
    /// werden mit `UngueltigerSeitenbezug` abgelehnt.
    pub fn aendere_seite(
        &mut self,
        seitenbezug: Seitenbezug,
        attribute: Vec<FuehrungsformAttribute>,
    ) -> Result<(), NetzFehler> {
        let attribute = sortiere_und_pruefe(attribute);
        match (seitenbezug, self.ist_zweiseitig) {
            (Seitenbezug::Beidseitig, _) => {
                self.links = attribute.clone();
                self.rechts = attribute;
            }
            (Seitenbezug::Links, true) => self.links = attribute,
            (Seitenbezug::Rechts, true) => self.rechts = attribute,
            (seitenbezug, false) => {
                return Err(NetzFehler::UngueltigerSeitenbezug { seitenbezug })
            }
        }
        Ok(())
    }

    /// Vertauscht linke und rechte Seite (Händigkeits-Flip).
    pub fn vertausche_seiten(&mut self) {
        std::mem::swap(&mut self.links, &mut self.rechts);
    }

    /// Prüft die Partitions-Invariante beider Seiten.
    pub fn ist_lueckenlos(&self) -> bool {
        liste_ist_lueckenlos(&self.links) && liste_ist_lueckenlos(&self.rechts)
    }
}

impl Default for FuehrungsformAttributGruppe {
    fn default() -> Self {
        Self::standard(false)
    }
}

/// Linear referenzierte Zuständigkeits-Attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZustaendigkeitAttributGruppe {
    attribute: Vec<ZustaendigkeitAttribute>,
}

impl ZustaendigkeitAttributGruppe {
    /// Erstellt die Gruppe; sortiert und prüft die Partitions-Invariante.
    pub fn neu(attribute: Vec<ZustaendigkeitAttribute>) -> Self {
        Self {
            attribute: sortiere_und_pruefe(attribute),
        }
    }

    /// Gruppe mit einem Standardwert über [0, 1].
    pub fn standard() -> Self {
        Self {
            attribute: vec![ZustaendigkeitAttribute::standard()],
        }
    }

    /// Attribute in Abschnittsreihenfolge.
    pub fn attribute(&self) -> &[ZustaendigkeitAttribute] {
        &self.attribute
    }

    /// Fügt einen Wert ein (teilt/verdrängt überdeckte Nachbarn).
    pub fn fuege_ein(&mut self, neuer: ZustaendigkeitAttribute) {
        fuege_ein(&mut self.attribute, neuer);
    }

    /// Teilt den überdeckenden Wert an `anteil`.
    pub fn teile_bei(&mut self, anteil: f64) {
        teile_bei(&mut self.attribute, anteil);
    }

    /// Verschmilzt benachbarte gleiche Werte.
    pub fn defragmentiere(&mut self) {
        defragmentiere(&mut self.attribute);
    }

    /// Prüft die Partitions-Invariante.
    pub fn ist_lueckenlos(&self) -> bool {
        liste_ist_lueckenlos(&self.attribute)
    }
}

impl Default for ZustaendigkeitAttributGruppe {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fahrtrichtung je Seite (ganzkantig, nicht linear referenziert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FahrtrichtungAttributGruppe {
    links: Richtung,
    rechts: Richtung,
    ist_zweiseitig: bool,
}

impl FahrtrichtungAttributGruppe {
    /// Erstellt die Gruppe; bei einseitigen Kanten spiegelt rechts links.
    pub fn neu(richtung: Richtung, ist_zweiseitig: bool) -> Self {
        Self {
            links: richtung,
            rechts: richtung,
            ist_zweiseitig,
        }
    }

    /// Richtung der linken Seite.
    pub fn links(&self) -> Richtung {
        self.links
    }

    /// Richtung der rechten Seite.
    pub fn rechts(&self) -> Richtung {
        self.rechts
    }

    /// Ist die Gruppe zweiseitig?
    pub fn ist_zweiseitig(&self) -> bool {
        self.ist_zweiseitig
    }

    /// Setzt die Richtung für eine Seite (Seitenbezug-Regeln wie bei
    /// [`FuehrungsformAttributGruppe::aendere_seite`]).
    pub fn aendere(
        &mut self,
        seitenbezug: Seitenbezug,
        richtung: Richtung,
    ) -> Result<(), NetzFehler> {
        match (seitenbezug, self.ist_zweiseitig) {
            (Seitenbezug::Beidseitig, _) => {
                self.links = richtung;
                self.rechts = richtung;
            }
            (Seitenbezug::Links, true) => self.links = richtung,
            (Seitenbezug::Rechts, true) => self.rechts = richtung,
            (seitenbezug, false) => {
                return Err(NetzFehler::UngueltigerSeitenbezug { seitenbezug })
            }
        }
        Ok(())
    }

    /// Beide Richtungen unter Umkehr der Stationierungsrichtung,
    /// inklusive Seitentausch.
    pub fn umgekehrt(&self) -> Self {
        Self {
            links: self.rechts.umgekehrt(),
            rechts: self.links.umgekehrt(),
            ist_zweiseitig: self.ist_zweiseitig,
        }
    }
}

impl Default for FahrtrichtungAttributGruppe {
    fn default() -> Self {
        Self::neu(Richtung::BeideRichtungen, false)
    }
}
