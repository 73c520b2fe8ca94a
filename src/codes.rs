//! Code tables of the tourist tax survey datasets.

pub const TOTAL_CODE: &str = "_T";

/// Purpose codes and their abbreviations, in table order.
pub const PURPOSES: [(&str, &str); 6] = [
    ("CUALQUIER_FIN_SERVICIO_CANARIAS", "CFSC"),
    ("MEJORAR_CALIDAD_ENTORNOS_TURISTICOS", "MCET"),
    ("MEJORAR_CONDICIONES_VIDA_CANARIAS", "MCVC"),
    ("MEJORAR_DESARROLLO_ECONOMICO_CANARIAS", "MDEC"),
    ("MEJORAR_PROTEGER_MEDIO_AMBIENTE_CANARIAS", "MPMAC"),
    (TOTAL_CODE, "T"),
];

pub const GENDERS: [(&str, &str); 3] = [("F", "Femenino"), ("M", "Masculino"), (TOTAL_CODE, "Total")];

pub const AGE_GROUPS: [(&str, &str); 4] = [
    ("Y_GE55", "> 55"),
    ("Y35T54", "35 - 54"),
    ("Y18T34", "18 - 34"),
    (TOTAL_CODE, "Total"),
];

pub const AGE_ORDER: [&str; 4] = ["Y18T34", "Y35T54", "Y_GE55", TOTAL_CODE];

pub const PURPOSE_ORDER: [&str; 5] = [
    "MEJORAR_CALIDAD_ENTORNOS_TURISTICOS",
    "MEJORAR_CONDICIONES_VIDA_CANARIAS",
    "MEJORAR_DESARROLLO_ECONOMICO_CANARIAS",
    "MEJORAR_PROTEGER_MEDIO_AMBIENTE_CANARIAS",
    "CUALQUIER_FIN_SERVICIO_CANARIAS",
];

/// Archipelago-wide aggregate, not a place that can be put on a map.
pub const AGGREGATE_TERRITORY: &str = "Canarias";

/// Marker position (latitude, longitude) of every mapped territory.
pub const TERRITORY_COORDINATES: [(&str, f64, f64); 13] = [
    ("Tenerife - Sur", 28.0916, -16.6291),
    ("Tenerife - Norte", 28.4753, -16.4167),
    ("Tenerife - Área Metropolitana", 28.4633, -16.2519),
    ("Tenerife", 28.2916, -16.6291),
    ("Lanzarote", 29.0469, -13.6414),
    ("La Palma", 28.6569, -17.8966),
    ("La Gomera", 28.1088, -17.1023),
    ("Gran Canaria - Sur", 27.8050, -15.5766),
    ("Gran Canaria - Norte", 28.1463, -15.6586),
    ("Gran Canaria - Área Metropolitana", 28.1038, -15.4131),
    ("Gran Canaria", 27.95, -15.5),
    ("Fuerteventura", 28.3587, -14.034),
    ("El Hierro", 27.7414, -18.0310),
];

pub fn territory_coordinates(name: &str) -> Option<(f64, f64)> {
    TERRITORY_COORDINATES
        .into_iter()
        .find(|(territory, _, _)| *territory == name)
        .map(|(_, latitude, longitude)| (latitude, longitude))
}

fn lookup(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == code).map(|(_, value)| *value)
}

pub fn purpose_abbreviation(code: &str) -> Option<&'static str> {
    lookup(&PURPOSES, code)
}

pub fn gender_label(code: &str) -> Option<&'static str> {
    lookup(&GENDERS, code)
}

pub fn age_label(code: &str) -> Option<&'static str> {
    lookup(&AGE_GROUPS, code)
}

/// Purpose codes that are real spending destinations, in table order.
pub fn substantive_purposes() -> impl Iterator<Item = &'static str> {
    PURPOSES.into_iter().map(|(code, _)| code).filter(|code| *code != TOTAL_CODE)
}

/// `MEJORAR_CALIDAD_ENTORNOS_TURISTICOS` -> `Mejorar Calidad Entornos Turisticos`
pub fn purpose_title(code: &str) -> String {
    code.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub(crate) fn order_of(order: &[&str], code: &str) -> usize {
    order.iter().position(|known| *known == code).unwrap_or(order.len())
}
