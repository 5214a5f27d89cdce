//! Kernbibliothek eines linear referenzierten Radverkehrsnetzes.
//! Topologiepflege, Netzbezüge, Attributprojektion und Streckenbildung
//! als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod fehler;
pub mod netzbezug;
pub mod projektion;
pub mod sackgassen;
pub mod strecken;

pub use core::{
    Bereich, Kante, Knoten, LinearReferenzierterAbschnitt, Netz, Netzklasse, Polygon, Polylinie,
    Seitenbezug,
};
pub use fehler::NetzFehler;
pub use netzbezug::{Netzbezug, NetzbezugAenderungsService};
pub use projektion::{Attributprojektionsbeschreibung, KanteDublette, KantenSegment};
pub use sackgassen::{
    bestimme_sackgassen, bestimme_sackgassen_fuer_netzklassen, bestimme_sackgassen_in_grenze,
};
pub use strecken::{StreckeVonKanten, StreckenErgebnis};
