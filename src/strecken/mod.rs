//! Streckenbildung: maximale Ketten gleichklassiger Kanten zwischen
//! Knoten vom Grad ungleich 2, partitionsweise aufgebaut.

pub mod builder;
pub mod strecke;

pub use builder::{
    erstelle_strecken_einer_partition, sub_linestrings_durch_knoten_projektion,
    verschmelze_unvollstaendige_strecken, StreckenErgebnis,
};
pub use strecke::{StreckeVonKanten, StreckenKante};
