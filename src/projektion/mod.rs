//! Attributprojektion: überträgt linear referenzierte Attribute von
//! Quellkanten auf deckungsgleiche Zielkanten.

pub mod beschreibung;
pub mod dublette;
pub mod haendigkeit;
pub mod segment;

pub use beschreibung::{Attributprojektionsbeschreibung, ProjizierterWert};
pub use dublette::{KanteDublette, DUBLETTEN_TOLERANZ, MIN_UEBERSCHNEIDUNG};
pub use haendigkeit::{haendigkeit_von_kante_zu_kante, Haendigkeit, Orientierung};
pub use segment::{KantenSegment, LineareReferenzProjektionsergebnis};
