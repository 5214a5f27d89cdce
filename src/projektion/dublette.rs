//! Erkennung von Kanten-Dubletten: zwei Kanten, deren Geometrien über
//! eine relevante Länge in einem schmalen Korridor zueinander verlaufen.
//!
//! Die Überschneidung wird durch Abtasten der ersten Geometrie bestimmt:
//! zusammenhängende Läufe von Stützpunkten, die näher als
//! [`DUBLETTEN_TOLERANZ`] an der zweiten Geometrie liegen, bilden
//! Kandidaten; der längste Lauf muss mindestens [`MIN_UEBERSCHNEIDUNG`]
//! Meter messen. Punktberührungen, Kreuzungen und getrennte
//! Einzelkontakte fallen damit heraus.

use crate::core::{Kante, Polylinie};
use crate::fehler::NetzFehler;
use crate::projektion::segment::LineareReferenzProjektionsergebnis;

/// Korridorbreite in Metern, innerhalb derer zwei Verläufe als
/// deckungsgleich gelten.
pub const DUBLETTEN_TOLERANZ: f32 = 1.0;

/// Mindestlänge der Überschneidung in Metern.
pub const MIN_UEBERSCHNEIDUNG: f32 = 3.0;

/// Abtastschritt in Metern entlang der ersten Geometrie.
const ABTAST_SCHRITT: f32 = 0.25;

/// Eine erkannte Dublette zweier Kanten.
#[derive(Debug, Clone, PartialEq)]
pub struct KanteDublette {
    kante_a_id: u64,
    kante_b_id: u64,
    ueberschneidung: Polylinie,
    abschnitt_auf_a: LineareReferenzProjektionsergebnis,
    abschnitt_auf_b: LineareReferenzProjektionsergebnis,
}

impl KanteDublette {
    /// Prüft zwei Kanten auf Dublettenschaft.
    ///
    /// Liefert [`NetzFehler::KeineUeberschneidung`], wenn der längste
    /// zusammenhängende Korridor-Lauf kürzer als die Mindestlänge ist.
    pub fn erstelle(kante_a: &Kante, kante_b: &Kante) -> Result<Self, NetzFehler> {
        let a = &kante_a.geometrie;
        let b = &kante_b.geometrie;

        let (von_a, bis_a) = laengster_korridor_lauf(a, b)
            .ok_or(NetzFehler::KeineUeberschneidung)?;

        let ueberschneidung = a.teilstueck(von_a, bis_a);
        if ueberschneidung.laenge() < MIN_UEBERSCHNEIDUNG {
            return Err(NetzFehler::KeineUeberschneidung);
        }

        // Lineare Referenz auf B über die Endpunkte des Laufs; eine
        // fallende Referenz heißt gegenläufige Stationierung.
        let von_b = b.projiziere(a.punkt_bei(von_a)) as f64;
        let bis_b = b.projiziere(a.punkt_bei(bis_a)) as f64;
        if (von_b - bis_b).abs() < 1e-9 {
            // Der Lauf bildet auf B auf einen Punkt ab (z.B. Endpunkt-Nähe)
            return Err(NetzFehler::KeineUeberschneidung);
        }

        Ok(Self {
            kante_a_id: kante_a.id,
            kante_b_id: kante_b.id,
            ueberschneidung,
            abschnitt_auf_a: LineareReferenzProjektionsergebnis::aus_anteilen(
                von_a as f64,
                bis_a as f64,
            ),
            abschnitt_auf_b: LineareReferenzProjektionsergebnis::aus_anteilen(von_b, bis_b),
        })
    }

    pub fn kante_a_id(&self) -> u64 {
        self.kante_a_id
    }

    pub fn kante_b_id(&self) -> u64 {
        self.kante_b_id
    }

    /// Geometrie des gemeinsamen Verlaufs (Teilstück von Kante A).
    pub fn ueberschneidung(&self) -> &Polylinie {
        &self.ueberschneidung
    }

    /// Läuft Kante B im Überschneidungsbereich gegen Kante A?
    pub fn zweite_kante_laeuft_gegen(&self) -> bool {
        self.abschnitt_auf_a.umgekehrt != self.abschnitt_auf_b.umgekehrt
    }

    /// Lineare Referenz der Überschneidung auf der gewünschten Kante.
    pub fn ueberschneidung_als_projektion(
        &self,
        auf: &Kante,
    ) -> Option<LineareReferenzProjektionsergebnis> {
        if auf.id == self.kante_a_id {
            Some(self.abschnitt_auf_a)
        } else if auf.id == self.kante_b_id {
            Some(self.abschnitt_auf_b)
        } else {
            None
        }
    }
}

/// Längster zusammenhängender Lauf von Abtastpunkten auf `a`, die im
/// Korridor um `b` liegen, als Anteilsfenster auf `a`.
fn laengster_korridor_lauf(a: &Polylinie, b: &Polylinie) -> Option<(f32, f32)> {
    let laenge = a.laenge();
    if laenge <= 0.0 {
        return None;
    }
    let schritte = ((laenge / ABTAST_SCHRITT).ceil() as usize).max(2);

    let mut bester: Option<(f32, f32)> = None;
    let mut lauf_start: Option<f32> = None;

    for i in 0..=schritte {
        let anteil = i as f32 / schritte as f32;
        let nah = b.abstand(a.punkt_bei(anteil)) <= DUBLETTEN_TOLERANZ;

        match (nah, lauf_start) {
            (true, None) => lauf_start = Some(anteil),
            (false, Some(start)) => {
                let ende = (i - 1) as f32 / schritte as f32;
                bester = laengerer_lauf(bester, (start, ende), laenge);
                lauf_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = lauf_start {
        bester = laengerer_lauf(bester, (start, 1.0), laenge);
    }

    bester.filter(|(von, bis)| bis > von)
}

fn laengerer_lauf(
    bisher: Option<(f32, f32)>,
    kandidat: (f32, f32),
    laenge: f32,
) -> Option<(f32, f32)> {
    let kandidat_laenge = (kandidat.1 - kandidat.0) * laenge;
    match bisher {
        Some((von, bis)) if (bis - von) * laenge >= kandidat_laenge => bisher,
        _ => Some(kandidat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn kante(id: u64, punkte: Vec<Vec2>) -> Kante {
        Kante::neu(id, id * 10, id * 10 + 1, Polylinie::neu(punkte))
    }

    #[test]
    fn vollstaendig_enthaltener_verlauf_ist_dublette() {
        // Gleicher Verlauf, B ohne den kollinearen Zwischenpunkt
        let a = kante(
            1,
            vec![
                Vec2::new(10.0, 20.0),
                Vec2::new(20.0, 10.0),
                Vec2::new(30.0, 10.0),
                Vec2::new(40.0, 10.0),
                Vec2::new(50.0, 20.0),
            ],
        );
        let b = kante(
            2,
            vec![
                Vec2::new(10.0, 20.0),
                Vec2::new(20.0, 10.0),
                Vec2::new(40.0, 10.0),
                Vec2::new(50.0, 20.0),
            ],
        );

        let dublette = KanteDublette::erstelle(&a, &b).unwrap();
        assert!(!dublette.zweite_kante_laeuft_gegen());
        let auf_a = dublette.ueberschneidung_als_projektion(&a).unwrap();
        assert!(auf_a.abschnitt.von() < 0.05);
        assert!(auf_a.abschnitt.bis() > 0.95);
        assert!((dublette.ueberschneidung().laenge() - a.geometrie.laenge()).abs() < 1.0);
    }

    #[test]
    fn teilweise_ueberlappung_liefert_teilfenster() {
        let a = kante(1, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]);
        let b = kante(2, vec![Vec2::new(60.0, 0.0), Vec2::new(160.0, 0.0)]);

        let dublette = KanteDublette::erstelle(&a, &b).unwrap();
        let auf_a = dublette.ueberschneidung_als_projektion(&a).unwrap();
        assert!((auf_a.abschnitt.von() - 0.6).abs() < 0.02);
        assert!(auf_a.abschnitt.bis() > 0.98);
        let auf_b = dublette.ueberschneidung_als_projektion(&b).unwrap();
        assert!(auf_b.abschnitt.von() < 0.02);
        assert!((auf_b.abschnitt.bis() - 0.4).abs() < 0.02);
    }

    #[test]
    fn gegenlaeufige_dublette_wird_erkannt() {
        let a = kante(1, vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0)]);
        let b = kante(2, vec![Vec2::new(50.0, 0.0), Vec2::new(0.0, 0.0)]);

        let dublette = KanteDublette::erstelle(&a, &b).unwrap();
        assert!(dublette.zweite_kante_laeuft_gegen());
    }

    #[test]
    fn parallele_linien_ausserhalb_des_korridors_sind_keine_dublette() {
        let a = kante(1, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]);
        let b = kante(2, vec![Vec2::new(0.0, 5.0), Vec2::new(100.0, 5.0)]);

        assert_eq!(
            KanteDublette::erstelle(&a, &b),
            Err(NetzFehler::KeineUeberschneidung)
        );
    }

    #[test]
    fn punktberuehrung_ist_keine_dublette() {
        // X-förmige Kreuzung: nur ein kurzer Lauf um den Schnittpunkt
        let a = kante(1, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)]);
        let b = kante(2, vec![Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)]);

        assert_eq!(
            KanteDublette::erstelle(&a, &b),
            Err(NetzFehler::KeineUeberschneidung)
        );
    }

    #[test]
    fn gabelung_liefert_gemeinsamen_ast() {
        // B teilt sich den ersten Ast mit A und biegt dann ab
        let a = kante(
            1,
            vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(100.0, 0.0)],
        );
        let b = kante(
            2,
            vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(50.0, 80.0)],
        );

        let dublette = KanteDublette::erstelle(&a, &b).unwrap();
        let auf_a = dublette.ueberschneidung_als_projektion(&a).unwrap();
        assert!(auf_a.abschnitt.von() < 0.02);
        assert!((auf_a.abschnitt.bis() - 0.5).abs() < 0.03);
    }
}
