//! Localized user-facing messages
//!
//! Every message the panel shows is looked up here by [`MessageKey`]. The
//! catalogue is static; Spanish is the default language.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
}

impl Language {
    /// All languages, in selector order
    pub const ALL: [Language; 3] = [Language::Es, Language::En, Language::Pt];

    /// Two-letter language code
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// Native display name
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Es => "Español",
            Language::En => "English",
            Language::Pt => "Português",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            other => Err(format!("Unsupported language: {other}")),
        }
    }
}

/// Identifier of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    // Form validation
    NameRequired,
    PriceRequired,
    ValidPriceRequired,
    ImageRequired,
    MaxImages,

    // Form submit
    UploadFailed,
    CreateSuccess,
    CreateError,
    EditSuccess,
    EditError,

    // Dashboard
    Deleted,
    DashboardError,
    Activated,
    Deactivated,
    CannotActivate,
}

impl MessageKey {
    /// Every key, for catalogue completeness checks
    pub const ALL: [MessageKey; 15] = [
        MessageKey::NameRequired,
        MessageKey::PriceRequired,
        MessageKey::ValidPriceRequired,
        MessageKey::ImageRequired,
        MessageKey::MaxImages,
        MessageKey::UploadFailed,
        MessageKey::CreateSuccess,
        MessageKey::CreateError,
        MessageKey::EditSuccess,
        MessageKey::EditError,
        MessageKey::Deleted,
        MessageKey::DashboardError,
        MessageKey::Activated,
        MessageKey::Deactivated,
        MessageKey::CannotActivate,
    ];
}

/// Look up the message for `key` in `language`
pub fn translate(language: Language, key: MessageKey) -> &'static str {
    match language {
        Language::Es => spanish(key),
        Language::En => english(key),
        Language::Pt => portuguese(key),
    }
}

fn spanish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::NameRequired => "El nombre es obligatorio",
        MessageKey::PriceRequired => "Debe agregar al menos un precio",
        MessageKey::ValidPriceRequired => "Debe ingresar al menos un precio válido mayor a 0",
        MessageKey::ImageRequired => "Debe agregar al menos una imagen",
        MessageKey::MaxImages => "Máximo 5 imágenes permitidas",
        MessageKey::UploadFailed => "Error al subir imagen",
        MessageKey::CreateSuccess => "Moneda creada exitosamente",
        MessageKey::CreateError => "Error al crear la moneda",
        MessageKey::EditSuccess => "Moneda actualizada exitosamente",
        MessageKey::EditError => "Error al actualizar la moneda",
        MessageKey::Deleted => "Moneda eliminada exitosamente",
        MessageKey::DashboardError => "Ocurrió un error, intente nuevamente",
        MessageKey::Activated => "Moneda activada",
        MessageKey::Deactivated => "Moneda desactivada",
        MessageKey::CannotActivate => "No se puede activar una moneda sin stock",
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::NameRequired => "Name is required",
        MessageKey::PriceRequired => "Add at least one price",
        MessageKey::ValidPriceRequired => "Enter at least one valid price greater than 0",
        MessageKey::ImageRequired => "Add at least one image",
        MessageKey::MaxImages => "Maximum 5 images allowed",
        MessageKey::UploadFailed => "Error uploading image",
        MessageKey::CreateSuccess => "Coin created successfully",
        MessageKey::CreateError => "Error creating coin",
        MessageKey::EditSuccess => "Coin updated successfully",
        MessageKey::EditError => "Error updating coin",
        MessageKey::Deleted => "Coin deleted successfully",
        MessageKey::DashboardError => "Something went wrong, please try again",
        MessageKey::Activated => "Coin activated",
        MessageKey::Deactivated => "Coin deactivated",
        MessageKey::CannotActivate => "A coin without stock cannot be activated",
    }
}

fn portuguese(key: MessageKey) -> &'static str {
    match key {
        MessageKey::NameRequired => "O nome é obrigatório",
        MessageKey::PriceRequired => "Adicione pelo menos um preço",
        MessageKey::ValidPriceRequired => "Informe pelo menos um preço válido maior que 0",
        MessageKey::ImageRequired => "Adicione pelo menos uma imagem",
        MessageKey::MaxImages => "Máximo de 5 imagens permitidas",
        MessageKey::UploadFailed => "Erro ao enviar imagem",
        MessageKey::CreateSuccess => "Moeda criada com sucesso",
        MessageKey::CreateError => "Erro ao criar a moeda",
        MessageKey::EditSuccess => "Moeda atualizada com sucesso",
        MessageKey::EditError => "Erro ao atualizar a moeda",
        MessageKey::Deleted => "Moeda excluída com sucesso",
        MessageKey::DashboardError => "Ocorreu um erro, tente novamente",
        MessageKey::Activated => "Moeda ativada",
        MessageKey::Deactivated => "Moeda desativada",
        MessageKey::CannotActivate => "Não é possível ativar uma moeda sem estoque",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_is_spanish() {
        assert_eq!(Language::default(), Language::Es);
    }

    #[test]
    fn every_key_is_translated_in_every_language() {
        for language in Language::ALL {
            for key in MessageKey::ALL {
                assert!(!translate(language, key).is_empty(), "{language} {key:?}");
            }
        }
    }

    #[test]
    fn languages_differ() {
        let es = translate(Language::Es, MessageKey::CreateSuccess);
        let en = translate(Language::En, MessageKey::CreateSuccess);
        let pt = translate(Language::Pt, MessageKey::CreateSuccess);
        assert_ne!(es, en);
        assert_ne!(en, pt);
    }

    #[test]
    fn language_codes_round_trip() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>(), Ok(language));
        }
        assert!("fr".parse::<Language>().is_err());
    }
}
