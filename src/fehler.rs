//! Fehler-Taxonomie des Netz-Kerns.
//!
//! Alle Fehler werden synchron geworfen und unverändert an den Aufrufer
//! durchgereicht; der Kern versucht keine automatische Wiederholung.

use thiserror::Error;

use crate::core::Seitenbezug;

/// Domänenfehler der Topologie- und Attributpflege.
#[derive(Debug, Error, PartialEq)]
pub enum NetzFehler {
    /// Optimistische Sperre: die übergebene Version passt nicht zum Stand im Store.
    /// Der Aufrufer muss neu laden und erneut versuchen.
    #[error("Kante {kante_id}: veraltete Version (erwartet {erwartet}, übergeben {uebergeben})")]
    VeralteteVersion {
        /// Betroffene Kante
        kante_id: u64,
        /// Version im Store
        erwartet: u64,
        /// Vom Aufrufer übergebene Version
        uebergeben: u64,
    },

    /// Zwei Kanten teilen keinen materiellen, zusammenhängenden Teilverlauf.
    /// Das Kandidatenpaar ist als Nicht-Dublette zu behandeln.
    #[error("keine Überschneidung zwischen den Kantengeometrien")]
    KeineUeberschneidung,

    /// Seitenbezogene Attributzuweisung passt nicht zur Ein-/Zweiseitigkeit der Kante.
    #[error("ungültiger Seitenbezug {seitenbezug:?} für einseitige Kante")]
    UngueltigerSeitenbezug {
        /// Der abgelehnte Seitenbezug
        seitenbezug: Seitenbezug,
    },

    /// Kante mit dieser ID existiert nicht im Store.
    #[error("Kante {0} nicht gefunden")]
    KanteNichtGefunden(u64),

    /// Knoten mit dieser ID existiert nicht im Store.
    #[error("Knoten {0} nicht gefunden")]
    KnotenNichtGefunden(u64),

    /// Knoten kann nicht entfernt werden, solange Kanten an ihm hängen.
    #[error("Knoten {0} hat noch adjazente Kanten")]
    KnotenInVerwendung(u64),
}
