//! Fixed vocabularies used by the field normalizers.
//!
//! Each table maps a source-language term (as it appears after the
//! normalizer's own cleanup) to its canonical value. Open tables pass unknown
//! terms through via [`Vocabulary::translate`]; closed tables are only ever
//! consulted with [`Vocabulary::lookup`].

use super::measurements::{Dimension, Part};
use super::titles::TitleStatus;
use super::locations::RoleType;

pub struct Vocabulary<T: Copy + 'static> {
    pub name: &'static str,
    entries: &'static [(&'static str, T)],
}

impl<T: Copy + 'static> Vocabulary<T> {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, T)]) -> Self {
        Vocabulary { name, entries }
    }

    pub fn lookup(&self, term: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(source, _)| *source == term)
            .map(|(_, canonical)| *canonical)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &'static [(&'static str, T)] {
        self.entries
    }
}

impl Vocabulary<&'static str> {
    /// Canonical value for `term`, or `term` itself when the table has no entry.
    pub fn translate(&self, term: &str) -> String {
        self.lookup(term).unwrap_or(term).to_string()
    }
}

/// Marker category carried by every record; it says nothing about the work.
pub const FINE_ART_MARKER: &str = "bildende kunst";

pub static SUBJECTS: Vocabulary<&str> = Vocabulary::new(
    "subjects",
    &[
        ("arbeidsliv", "working life"),
        ("bro", "bridge"),
        ("byggeskikk", "vernacular architecture"),
        ("bygning", "building"),
        ("dyr", "animal"),
        ("elv", "river"),
        ("eventyr og sagn", "myths and fairy tales"),
        ("fjell", "mountain"),
        ("fjord", "fjord"),
        ("flora", "flora"),
        ("folklore", "folklore"),
        ("foss", "waterfall"),
        ("fritidsliv", "outdoor life"),
        ("fugl", "bird"),
        ("illustrasjon", "illustration"),
        ("isbre", "glacier"),
        ("kart", "map"),
        ("kirke", "church"),
        ("kystlandskap", "coastal landscape"),
        ("landskap", "landscape"),
        ("maritimt", "maritime"),
        ("reiseskisse", "travel sketch"),
        ("ski", "skiing"),
        ("skip / båt", "ship / boat"),
        ("skoglandskap", "woodlands"),
        ("skogsinteriør", "forest interior"),
    ],
);

// Targets follow the Wikimedia Commons {{Technique}} vocabulary.
pub static TECHNIQUES: Vocabulary<&str> = Vocabulary::new(
    "techniques",
    &[
        ("akvarell", "watercolor"),
        ("blyant", "pencil"),
        ("fargelitografi", "lithography"),
        ("fargestift", "crayon"),
        ("gouache", "gouache paint"),
        ("hvitt kritt", "chalk"),
        ("kull", "charcoal"),
        ("lavering", "ink wash"),
        ("olje", "oil"),
        ("papir", "paper"),
        ("penn", "pen"),
        ("pensel", "brush"),
        ("streketsning", "etching"),
    ],
);

pub static MATERIALS: Vocabulary<&str> = Vocabulary::new(
    "materials",
    &[
        ("kartong", "cardboard"),
        ("lerret", "canvas"),
        ("papir", "paper"),
        ("papplate", "cardboard"),
        // "Olje på treplate"
        ("tre", "wood"),
        ("trefiberplate", "fiberboard"),
    ],
);

pub static MEASURE_PARTS: Vocabulary<Part> = Vocabulary::new(
    "measurement category",
    &[
        ("Hovedmål", Part::MainObject),
        ("Rammemål", Part::Frame),
        ("Papir", Part::Paper),
        ("Platemål", Part::EtchingPlate),
        ("Arkets mål", Part::Page),
        ("Bildemål", Part::Image),
    ],
);

pub static MEASURE_DIMENSIONS: Vocabulary<Dimension> = Vocabulary::new(
    "measurement dimension",
    &[
        ("Høyde", Dimension::Height),
        ("Bredde", Dimension::Width),
        ("Dybde", Dimension::Depth),
    ],
);

pub static TITLE_STATUS: Vocabulary<TitleStatus> = Vocabulary::new(
    "title status",
    &[
        ("anvendt", TitleStatus::Current),
        ("current", TitleStatus::Current),
        ("original", TitleStatus::Original),
    ],
);

pub static ROLE_TYPES: Vocabulary<RoleType> = Vocabulary::new(
    "location role",
    &[
        ("avbildet sted", RoleType::DepictedLocation),
        ("produksjonssted", RoleType::ProducedAt),
    ],
);

pub static PLACE_TYPES: Vocabulary<&str> = Vocabulary::new(
    "place type",
    &[
        ("adresse", "address"),
        ("land", "country"),
        ("fylke", "county"),
        ("kommune", "municipality"),
        // mountain ranges and similar
        ("område", "area"),
        ("områdepres", "specific_area"),
    ],
);

pub static PLACE_NAMES: Vocabulary<&str> = Vocabulary::new(
    "place name",
    &[
        ("Danmark", "Denmark"),
        ("Frankrike", "France"),
        ("Norge", "Norway"),
        ("Skottland", "Scotland"),
        ("Storbritannia", "Great Britain"),
        ("Sveits", "Switzerland"),
        ("Sverige", "Sweden"),
        ("Tyskland", "Germany"),
        ("Østerrike", "Austria"),
        ("Lindesnes fyr", "Lindesnes Lighthouse"),
        ("Oscarsborg festning", "Oscarsborg fortress"),
        ("Rheinland-Pfalz", "Rhineland-Palatinate"),
        ("Schloss Hohenaschau", "Hohenaschau Castle"),
        ("Schloss Altenklingen", "Altenklingen Castle"),
        ("St.-Katharinen-Kirche", "Saint Catherine of Alexandria Church"),
        // source data typos
        ("6859 Sogndal", "Slinde"),
        ("Aschau am Chiemgau", "Aschau im Chiemgau"),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_keys<T: Copy>(vocab: &Vocabulary<T>) {
        let mut seen = HashSet::new();
        for (source, _) in vocab.entries() {
            assert!(seen.insert(*source), "{}: duplicate key {}", vocab.name, source);
        }
    }

    #[test]
    fn tables_have_unique_keys() {
        assert_unique_keys(&SUBJECTS);
        assert_unique_keys(&TECHNIQUES);
        assert_unique_keys(&MATERIALS);
        assert_unique_keys(&MEASURE_PARTS);
        assert_unique_keys(&MEASURE_DIMENSIONS);
        assert_unique_keys(&TITLE_STATUS);
        assert_unique_keys(&ROLE_TYPES);
        assert_unique_keys(&PLACE_TYPES);
        assert_unique_keys(&PLACE_NAMES);
    }

    #[test]
    fn translate_passes_unknown_terms() {
        assert_eq!(SUBJECTS.translate("fjell"), "mountain");
        assert_eq!(SUBJECTS.translate("portrett"), "portrett");
        assert_eq!(PLACE_NAMES.translate("Bergen"), "Bergen");
    }

    #[test]
    fn lowercase_tables_are_lowercase() {
        for vocab in [&SUBJECTS, &TECHNIQUES, &MATERIALS, &PLACE_TYPES] {
            for (source, _) in vocab.entries() {
                assert_eq!(*source, source.to_lowercase(), "{}", vocab.name);
                assert_eq!(*source, source.trim(), "{}", vocab.name);
            }
        }
    }

    #[test]
    fn english_outputs_are_fixed_points() {
        // translating canonical output again must not change it
        for vocab in [&SUBJECTS, &TECHNIQUES, &MATERIALS] {
            for (_, canonical) in vocab.entries() {
                assert_eq!(vocab.translate(canonical), *canonical, "{}", vocab.name);
            }
        }
    }

    #[test]
    fn closed_tables_reject_unknown() {
        assert_eq!(ROLE_TYPES.lookup("oppbevaringssted"), None);
        assert_eq!(MEASURE_PARTS.lookup("hovedmål"), None);
        assert_eq!(TITLE_STATUS.lookup("anvendt"), Some(TitleStatus::Current));
    }
}
