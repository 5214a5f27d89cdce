//! Integrationstests für die Attributprojektion: von der
//! Dubletten-Erkennung über Segmente bis zur Sammelbeschreibung.

use glam::Vec2;
use radnetz::core::{
    liste_ist_lueckenlos, FuehrungsformAttribute, GeschwindigkeitAttribute,
    Hoechstgeschwindigkeit, Kante, LinearReferenzierterAbschnitt, Polylinie, Radverkehrsfuehrung,
    Seitenbezug,
};
use radnetz::projektion::{
    haendigkeit_von_kante_zu_kante, Attributprojektionsbeschreibung, KanteDublette, KantenSegment,
    LineareReferenzProjektionsergebnis, Orientierung,
};

fn kante(id: u64, punkte: Vec<Vec2>) -> Kante {
    Kante::neu(id, id * 10, id * 10 + 1, Polylinie::neu(punkte))
}

fn mit_tempo(
    mut kante: Kante,
    abschnitt: LinearReferenzierterAbschnitt,
    tempo: Hoechstgeschwindigkeit,
) -> Kante {
    kante.geschwindigkeit_attribut_gruppe.fuege_ein(GeschwindigkeitAttribute {
        abschnitt,
        ortslage: None,
        hoechstgeschwindigkeit: tempo,
        abweichende_hoechstgeschwindigkeit_gegen_stationierungsrichtung: None,
    });
    kante
}

#[test]
fn dublette_bis_beschreibung_uebertraegt_attribute() {
    // Quelle und Ziel verlaufen deckungsgleich; Tempo 30 auf der ersten
    // Hälfte der Quelle muss auf der ersten Hälfte des Ziels ankommen
    let quelle = mit_tempo(
        kante(1, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]),
        LinearReferenzierterAbschnitt::von_bis(0.0, 0.5),
        Hoechstgeschwindigkeit::Max30Kmh,
    );
    let ziel = kante(2, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]);

    let dublette = KanteDublette::erstelle(&quelle, &ziel).unwrap();
    let auf_quelle = dublette.ueberschneidung_als_projektion(&quelle).unwrap();
    let auf_ziel = dublette.ueberschneidung_als_projektion(&ziel).unwrap();
    let haendigkeit = haendigkeit_von_kante_zu_kante(&ziel.geometrie, &quelle.geometrie);

    let segment = KantenSegment::neu(quelle, auf_quelle, auf_ziel, haendigkeit);
    let mut beschreibung = Attributprojektionsbeschreibung::neu(ziel.id);
    beschreibung.fuege_segment_hinzu(&segment);

    let tempo_30 = beschreibung
        .geschwindigkeit()
        .iter()
        .find(|p| p.wert.hoechstgeschwindigkeit == Hoechstgeschwindigkeit::Max30Kmh)
        .expect("Tempo 30 muss projiziert werden");
    assert_eq!(tempo_30.abschnitte.len(), 1);
    let abschnitt = tempo_30.abschnitte[0];
    assert!(abschnitt.von() < 0.05);
    assert!((abschnitt.bis() - 0.5).abs() < 0.05);
    assert!(beschreibung.potentiell_inkonsistente_projektionen().is_empty());
}

#[test]
fn gegenlaeufige_quelle_wird_gespiegelt_uebernommen() {
    // Quelle läuft dem Ziel entgegen; Tempo 30 am Anfang der Quelle
    // liegt räumlich am Ende des Ziels
    let quelle = mit_tempo(
        kante(1, vec![Vec2::new(100.0, 0.0), Vec2::new(0.0, 0.0)]),
        LinearReferenzierterAbschnitt::von_bis(0.0, 0.5),
        Hoechstgeschwindigkeit::Max30Kmh,
    );
    let ziel = kante(2, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]);

    let dublette = KanteDublette::erstelle(&quelle, &ziel).unwrap();
    assert!(dublette.zweite_kante_laeuft_gegen());
    let auf_quelle = dublette.ueberschneidung_als_projektion(&quelle).unwrap();
    let auf_ziel = dublette.ueberschneidung_als_projektion(&ziel).unwrap();
    let haendigkeit = haendigkeit_von_kante_zu_kante(&ziel.geometrie, &quelle.geometrie);

    let segment = KantenSegment::neu(quelle, auf_quelle, auf_ziel, haendigkeit);
    assert!(segment.richtung_gedreht());

    let mut beschreibung = Attributprojektionsbeschreibung::neu(ziel.id);
    beschreibung.fuege_segment_hinzu(&segment);

    let tempo_30 = beschreibung
        .geschwindigkeit()
        .iter()
        .find(|p| p.wert.hoechstgeschwindigkeit == Hoechstgeschwindigkeit::Max30Kmh)
        .expect("Tempo 30 muss projiziert werden");
    let abschnitt = tempo_30.abschnitte[0];
    assert!((abschnitt.von() - 0.5).abs() < 0.05);
    assert!(abschnitt.bis() > 0.95);
}

#[test]
fn projektion_erhaelt_die_partition() {
    // Segmentweise zugeschnittene Listen bleiben lückenlos über [0, 1]
    let quelle = mit_tempo(
        kante(1, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]),
        LinearReferenzierterAbschnitt::von_bis(0.3, 0.7),
        Hoechstgeschwindigkeit::Max50Kmh,
    );
    let ziel = kante(2, vec![Vec2::new(20.0, 0.0), Vec2::new(80.0, 0.0)]);

    let dublette = KanteDublette::erstelle(&quelle, &ziel).unwrap();
    let segment = KantenSegment::neu(
        quelle.clone(),
        dublette.ueberschneidung_als_projektion(&quelle).unwrap(),
        dublette.ueberschneidung_als_projektion(&ziel).unwrap(),
        haendigkeit_von_kante_zu_kante(&ziel.geometrie, &quelle.geometrie),
    );

    assert!(liste_ist_lueckenlos(&segment.geschwindigkeit_attribute()));
    assert!(liste_ist_lueckenlos(&segment.zustaendigkeit_attribute()));
    assert!(liste_ist_lueckenlos(&segment.fuehrungsform_attribute_links()));
}

#[test]
fn seitlich_versetzte_quelle_speist_die_passende_zielseite() {
    // Zwei gleichlaufende Quellen beiderseits des Ziels: die linke darf
    // nur die linke Zielseite füllen, die rechte nur die rechte
    fn quelle_bei(id: u64, y: f32) -> Kante {
        let mut kante = kante(id, vec![Vec2::new(0.0, y), Vec2::new(100.0, y)]);
        let mut radweg = FuehrungsformAttribute::standard();
        radweg.radverkehrsfuehrung = Radverkehrsfuehrung::SonderwegRadweg;
        kante
            .fuehrungsform_attribut_gruppe
            .aendere_seite(Seitenbezug::Beidseitig, vec![radweg])
            .unwrap();
        kante
    }

    let ziel = kante(9, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]);

    for (y, erwartete_orientierung) in [(5.0, Orientierung::Links), (-5.0, Orientierung::Rechts)] {
        let quelle = quelle_bei(1, y);
        let haendigkeit = haendigkeit_von_kante_zu_kante(&ziel.geometrie, &quelle.geometrie);
        assert_eq!(haendigkeit.orientierung, erwartete_orientierung);

        let segment = KantenSegment::neu(
            quelle,
            LineareReferenzProjektionsergebnis::aus_anteilen(0.0, 1.0),
            LineareReferenzProjektionsergebnis::aus_anteilen(0.0, 1.0),
            haendigkeit,
        );
        let mut beschreibung = Attributprojektionsbeschreibung::neu(ziel.id);
        beschreibung.fuege_segment_hinzu(&segment);

        let (gefuellt, leer) = if erwartete_orientierung == Orientierung::Links {
            (beschreibung.fuehrungsform_links(), beschreibung.fuehrungsform_rechts())
        } else {
            (beschreibung.fuehrungsform_rechts(), beschreibung.fuehrungsform_links())
        };
        assert_eq!(
            gefuellt[0].wert.radverkehrsfuehrung,
            Radverkehrsfuehrung::SonderwegRadweg
        );
        assert!(leer.is_empty());
    }
}
