//! Which raw path feeds which output field, and how it is cleaned.
//!
//! Rules are independent of each other and of their order. Adding a field
//! means adding a row here, nothing else.

use crate::normalize::{locations, measurements, media, scalar, subjects, titles, Normalizer};
use crate::path::Segment::{self, Index, Key};

pub const UUID: &str = "uuid";
pub const FROM_DATE: &str = "from_date";
pub const TO_DATE: &str = "to_date";
pub const DESCRIPTIVE_DATE: &str = "descriptive_date";
pub const CREATION_DATE: &str = "creation_date";

pub struct FieldRule {
    pub path: &'static [Segment],
    pub field: &'static str,
    pub normalizer: Normalizer,
}

const fn rule(path: &'static [Segment], field: &'static str, normalizer: Normalizer) -> FieldRule {
    FieldRule {
        path,
        field,
        normalizer,
    }
}

pub static FIELDS: &[FieldRule] = &[
    rule(&[Key("identifier.id")], "national_museum_norway_artwork_id", scalar::string),
    rule(&[Key("artifact.uuid")], UUID, scalar::string),
    rule(&[Key("artifact.uniqueId")], "digitalt_museum_id", scalar::string),
    rule(&[Key("artifact.ingress.title")], "ingress_title", scalar::string),
    rule(&[Key("digitaltmuseum_link")], "digitalt_museum_link", scalar::string),
    rule(&[Key("nasjonalmuseet_link")], "nasjonalmuseet_link", scalar::string),
    rule(&[Key("uuid_link")], "uuid_link", scalar::string),
    rule(&[Key("uuid_json"), Key("createdDate")], "digital_item_created_at", scalar::instant),
    rule(
        &[Key("uuid_json"), Key("eventWrap"), Key("acquisition")],
        "acquisition_notes",
        scalar::string,
    ),
    rule(
        &[Key("uuid_json"), Key("eventWrap"), Key("descriptiveDating")],
        DESCRIPTIVE_DATE,
        scalar::string,
    ),
    rule(
        &[Key("uuid_json"), Key("eventWrap"), Key("production"), Key("timespan"), Key("fromDate")],
        FROM_DATE,
        scalar::calendar_date,
    ),
    rule(
        &[Key("uuid_json"), Key("eventWrap"), Key("production"), Key("timespan"), Key("toDate")],
        TO_DATE,
        scalar::calendar_date,
    ),
    rule(&[Key("artifact.ingress.subjects")], "subjects", subjects::normalize),
    rule(&[Key("uuid_json"), Key("measures")], "measurements", measurements::normalize),
    rule(
        &[Key("uuid_json"), Key("media"), Key("pictures"), Index(0), Key("index")],
        "media_index",
        scalar::integer,
    ),
    rule(
        &[Key("uuid_json"), Key("media"), Key("pictures"), Index(0), Key("width")],
        "media_width_pixels",
        scalar::integer,
    ),
    rule(
        &[Key("uuid_json"), Key("media"), Key("pictures"), Index(0), Key("height")],
        "media_height_pixels",
        scalar::integer,
    ),
    rule(&[Key("uuid_json"), Key("titles")], "titles", titles::normalize),
    rule(
        &[Key("uuid_json"), Key("technique"), Key("techniques")],
        "techniques",
        media::techniques,
    ),
    rule(
        &[Key("uuid_json"), Key("material"), Key("comment")],
        "material_comment",
        scalar::string,
    ),
    rule(
        &[Key("uuid_json"), Key("material"), Key("materials")],
        "materials",
        media::materials,
    ),
    rule(
        &[Key("uuid_json"), Key("motif"), Key("depictedPlaces")],
        "locations",
        locations::normalize,
    ),
];
