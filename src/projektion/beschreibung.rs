//! Sammelbeschreibung einer Attributprojektion auf eine Zielkante.
//!
//! Während der Projektion liefern mehrere Quellkanten Segmente auf
//! dieselbe Zielkante. Die Beschreibung akkumuliert je Segment die
//! längengewichteten Anteile der ganzkantigen Attribute und die auf die
//! Zielkante umgerechneten linear referenzierten Werte, damit am Ende
//! die Mehrheitswerte übernommen und Konflikte gemeldet werden können.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::core::{
    IstStandard, KantenAttribute, LinearReferenzierteAttribute, LinearReferenzierterAbschnitt,
    Netzklasse, ZustaendigkeitAttribute,
};
use crate::core::{FuehrungsformAttribute, GeschwindigkeitAttribute};
use crate::projektion::segment::KantenSegment;

/// Ein linear referenzierter Wert samt der Zielabschnitte, auf denen
/// ihn mindestens ein Segment liefert.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjizierterWert<T> {
    /// Der (fachlich dedupliziert gesammelte) Wert
    pub wert: T,
    /// Zielabschnitte, die diesen Wert erhalten sollen
    pub abschnitte: Vec<LinearReferenzierterAbschnitt>,
}

/// Akkumulierte Projektion aller Segmente auf eine Zielkante.
#[derive(Debug, Clone, Default)]
pub struct Attributprojektionsbeschreibung {
    ziel_kante_id: u64,
    /// Längengewichtete Anteile je ganzkantigem Attributwert
    kanten_attribute_anteile: IndexMap<KantenAttribute, f64>,
    netzklassen_anteile: IndexMap<BTreeSet<Netzklasse>, f64>,
    ist_standards_anteile: IndexMap<BTreeSet<IstStandard>, f64>,
    geschwindigkeit: Vec<ProjizierterWert<GeschwindigkeitAttribute>>,
    fuehrungsform_links: Vec<ProjizierterWert<FuehrungsformAttribute>>,
    fuehrungsform_rechts: Vec<ProjizierterWert<FuehrungsformAttribute>>,
    zustaendigkeit: Vec<ProjizierterWert<ZustaendigkeitAttribute>>,
}

impl Attributprojektionsbeschreibung {
    pub fn neu(ziel_kante_id: u64) -> Self {
        Self {
            ziel_kante_id,
            ..Self::default()
        }
    }

    pub fn ziel_kante_id(&self) -> u64 {
        self.ziel_kante_id
    }

    /// Nimmt ein Segment auf: ganzkantige Anteile werden mit der Länge
    /// des Zielabschnitts gewichtet, linear referenzierte Werte auf die
    /// Stationierung der Zielkante umgerechnet.
    pub fn fuege_segment_hinzu(&mut self, segment: &KantenSegment) {
        let fenster = segment.ziel_abschnitt();
        let gewicht = fenster.laenge();

        let gruppe = &segment.quell_kante().kanten_attribut_gruppe;
        *self
            .kanten_attribute_anteile
            .entry(gruppe.kanten_attribute.clone())
            .or_insert(0.0) += gewicht;
        *self
            .netzklassen_anteile
            .entry(gruppe.netzklassen.clone())
            .or_insert(0.0) += gewicht;
        *self
            .ist_standards_anteile
            .entry(gruppe.ist_standards.clone())
            .or_insert(0.0) += gewicht;

        sammle(
            &mut self.geschwindigkeit,
            segment.geschwindigkeit_attribute(),
            &fenster,
        );
        sammle(
            &mut self.fuehrungsform_links,
            segment.fuehrungsform_attribute_links(),
            &fenster,
        );
        sammle(
            &mut self.fuehrungsform_rechts,
            segment.fuehrungsform_attribute_rechts(),
            &fenster,
        );
        sammle(
            &mut self.zustaendigkeit,
            segment.zustaendigkeit_attribute(),
            &fenster,
        );
    }

    /// Ganzkantiger Attributwert mit dem größten Längenanteil.
    pub fn dominante_kanten_attribute(&self) -> Option<&KantenAttribute> {
        self.kanten_attribute_anteile
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(wert, _)| wert)
    }

    /// Netzklassen-Menge mit dem größten Längenanteil.
    pub fn dominante_netzklassen(&self) -> Option<&BTreeSet<Netzklasse>> {
        self.netzklassen_anteile
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(wert, _)| wert)
    }

    /// Standards-Menge mit dem größten Längenanteil.
    pub fn dominante_ist_standards(&self) -> Option<&BTreeSet<IstStandard>> {
        self.ist_standards_anteile
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(wert, _)| wert)
    }

    pub fn kanten_attribute_anteile(&self) -> &IndexMap<KantenAttribute, f64> {
        &self.kanten_attribute_anteile
    }

    pub fn netzklassen_anteile(&self) -> &IndexMap<BTreeSet<Netzklasse>, f64> {
        &self.netzklassen_anteile
    }

    pub fn ist_standards_anteile(&self) -> &IndexMap<BTreeSet<IstStandard>, f64> {
        &self.ist_standards_anteile
    }

    pub fn geschwindigkeit(&self) -> &[ProjizierterWert<GeschwindigkeitAttribute>] {
        &self.geschwindigkeit
    }

    pub fn fuehrungsform_links(&self) -> &[ProjizierterWert<FuehrungsformAttribute>] {
        &self.fuehrungsform_links
    }

    pub fn fuehrungsform_rechts(&self) -> &[ProjizierterWert<FuehrungsformAttribute>] {
        &self.fuehrungsform_rechts
    }

    pub fn zustaendigkeit(&self) -> &[ProjizierterWert<ZustaendigkeitAttribute>] {
        &self.zustaendigkeit
    }

    /// Zielabschnitte, auf denen sich fachlich unterschiedliche Werte
    /// derselben Attributgruppe überlappen. Solche Projektionen können
    /// nicht automatisch übernommen werden und brauchen Nacharbeit.
    pub fn potentiell_inkonsistente_projektionen(&self) -> Vec<LinearReferenzierterAbschnitt> {
        let mut konflikte = Vec::new();
        konflikte.extend(ueberlappungen(&self.geschwindigkeit));
        konflikte.extend(ueberlappungen(&self.fuehrungsform_links));
        konflikte.extend(ueberlappungen(&self.fuehrungsform_rechts));
        konflikte.extend(ueberlappungen(&self.zustaendigkeit));
        konflikte.sort_by(|a, b| a.von().total_cmp(&b.von()));
        konflikte
    }
}

/// Rechnet segmentlokale Abschnitte auf die Zielkante um und sortiert
/// sie per Fachdaten-Vergleich in die Wertliste ein.
fn sammle<T: LinearReferenzierteAttribute>(
    ziel: &mut Vec<ProjizierterWert<T>>,
    werte: Vec<T>,
    fenster: &LinearReferenzierterAbschnitt,
) {
    for wert in werte {
        let lokal = wert.abschnitt();
        let auf_ziel = LinearReferenzierterAbschnitt::von_bis(
            fenster.von() + lokal.von() * fenster.laenge(),
            fenster.von() + lokal.bis() * fenster.laenge(),
        );
        match ziel.iter_mut().find(|p| p.wert.werte_gleich(&wert)) {
            Some(vorhanden) => vorhanden.abschnitte.push(auf_ziel),
            None => ziel.push(ProjizierterWert {
                wert,
                abschnitte: vec![auf_ziel],
            }),
        }
    }
}

/// Überschneidungen zwischen Abschnitten fachlich verschiedener Werte.
fn ueberlappungen<T: LinearReferenzierteAttribute>(
    werte: &[ProjizierterWert<T>],
) -> Vec<LinearReferenzierterAbschnitt> {
    let mut konflikte = Vec::new();
    for (i, a) in werte.iter().enumerate() {
        for b in &werte[i + 1..] {
            for abschnitt_a in &a.abschnitte {
                for abschnitt_b in &b.abschnitte {
                    if let Some(schnitt) = abschnitt_a.ueberschneidung(abschnitt_b) {
                        konflikte.push(schnitt);
                    }
                }
            }
        }
    }
    konflikte
}
