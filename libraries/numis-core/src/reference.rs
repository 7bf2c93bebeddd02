//! Static reference data: currencies, orientations, countries

use crate::types::{CurrencyCode, Orientation};

/// Display information for a supported currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub name: &'static str,
    pub symbol: &'static str,
}

/// Supported price currencies
pub const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo {
        code: CurrencyCode::Ars,
        name: "Peso Argentino",
        symbol: "$",
    },
    CurrencyInfo {
        code: CurrencyCode::Usd,
        name: "Dólar Estadounidense",
        symbol: "US$",
    },
    CurrencyInfo {
        code: CurrencyCode::Eur,
        name: "Euro",
        symbol: "€",
    },
];

/// Orientation choices; `None` means unspecified
pub const ORIENTATIONS: &[Option<Orientation>] = &[
    None,
    Some(Orientation::CoinAlignment),
    Some(Orientation::MedalAlignment),
];

/// Countries offered by the country selector
///
/// Country is free text on the record; this list only feeds the selector.
pub const COUNTRIES: &[&str] = &[
    "Alemania",
    "Argentina",
    "Australia",
    "Austria",
    "Bélgica",
    "Bolivia",
    "Brasil",
    "Canadá",
    "Chile",
    "China",
    "Colombia",
    "Costa Rica",
    "Cuba",
    "Dinamarca",
    "Ecuador",
    "Egipto",
    "El Salvador",
    "España",
    "Estados Unidos",
    "Francia",
    "Grecia",
    "Guatemala",
    "Honduras",
    "India",
    "Irlanda",
    "Israel",
    "Italia",
    "Japón",
    "México",
    "Nicaragua",
    "Noruega",
    "Países Bajos",
    "Panamá",
    "Paraguay",
    "Perú",
    "Polonia",
    "Portugal",
    "Reino Unido",
    "República Dominicana",
    "Rusia",
    "Sudáfrica",
    "Suecia",
    "Suiza",
    "Turquía",
    "Uruguay",
    "Venezuela",
];

/// Look up display information for a currency
pub fn currency_info(code: CurrencyCode) -> &'static CurrencyInfo {
    CURRENCIES
        .iter()
        .find(|info| info.code == code)
        .unwrap_or(&CURRENCIES[0])
}

/// Whether `name` is one of the reference countries
pub fn is_known_country(name: &str) -> bool {
    COUNTRIES.contains(&name.trim())
}
