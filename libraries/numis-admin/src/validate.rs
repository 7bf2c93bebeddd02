//! Draft validation and payload assembly
//!
//! Both functions are pure: they read a [`CoinDraft`] and never perform I/O.

use crate::draft::CoinDraft;
use crate::error::ValidationError;
use numis_core::types::{CoinDetails, CoinPayload, ImageRef, Price};

/// Check a draft, stopping at the first failure
pub fn validate(draft: &CoinDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if draft.prices().is_empty() {
        return Err(ValidationError::PriceRequired);
    }

    if !draft
        .prices()
        .values()
        .any(|row| parse_amount(&row.amount).is_some())
    {
        return Err(ValidationError::ValidPriceRequired);
    }

    if draft.image_count() == 0 {
        return Err(ValidationError::ImageRequired);
    }

    Ok(())
}

/// Build the write body from a draft and the images uploaded for it
///
/// Images are the draft's existing images followed by `uploaded`, each list
/// in its own order.
pub fn assemble_payload(draft: &CoinDraft, uploaded: Vec<ImageRef>) -> CoinPayload {
    let prices = draft
        .prices()
        .values()
        .filter_map(|row| parse_amount(&row.amount).map(|amount| Price::new(amount, row.currency)))
        .collect();

    let mut images: Vec<ImageRef> = draft.existing().values().cloned().collect();
    images.extend(uploaded);

    let stock = parse_stock(&draft.stock);

    CoinPayload {
        name: draft.name.trim().to_string(),
        prices,
        description: draft.description.trim().to_string(),
        country: draft.country.trim().to_string(),
        stock,
        active: stock > 0,
        images,
        details: CoinDetails {
            issuer: optional_text(&draft.issuer),
            authority: optional_text(&draft.authority),
            year: optional_text(&draft.year),
            coin_type: optional_text(&draft.coin_type),
            face_value: optional_text(&draft.face_value),
            monetary_unit: optional_text(&draft.monetary_unit),
            composition: optional_text(&draft.composition),
            weight: parse_decimal(&draft.weight),
            diameter: parse_decimal(&draft.diameter),
            thickness: parse_decimal(&draft.thickness),
            shape: optional_text(&draft.shape),
            technique: optional_text(&draft.technique),
            orientation: draft.orientation,
            demonetized: draft.demonetized,
            catalog_number: optional_text(&draft.catalog_number),
            references: optional_text(&draft.references),
        },
    }
}

/// A price amount that counts: parses and is greater than zero
pub fn parse_amount(input: &str) -> Option<f64> {
    parse_decimal(input).filter(|amount| *amount > 0.0)
}

/// Decimal from the leading number of the input, so `"10 USD"` reads as 10
///
/// `,` is accepted as the decimal separator. Input with no leading number is
/// `None`.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    let number = &normalized[..numeric_prefix_len(&normalized)];
    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Byte length of the longest `[+-]digits[.digits][e[+-]digits]` prefix
fn numeric_prefix_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        (i, i - start)
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let (after_int, int_digits) = digits_from(end);
    end = after_int;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        let (after_frac, count) = digits_from(end + 1);
        frac_digits = count;
        if int_digits + frac_digits > 0 {
            end = after_frac;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let (after_exp, exp_digits) = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end = after_exp;
        }
    }
    end
}

/// Stock from its leading integer; unparseable input is 0, negatives clamp to 0
pub fn parse_stock(input: &str) -> u32 {
    let trimmed = input.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);

    match trimmed[..digits_end].parse::<i64>() {
        Ok(value) => u32::try_from(value.max(0)).unwrap_or(u32::MAX),
        Err(_) => 0,
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
