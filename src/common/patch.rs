// src/common/patch.rs

use serde::{Deserialize, Deserializer};

/// Desserializador para campos "duplo-Option" dos payloads de atualização
/// parcial: campo ausente = mantém o valor atual, campo presente como `null`
/// = limpa a coluna, campo presente com valor = substitui.
///
/// Uso: `#[serde(default, deserialize_with = "double_option")]` em um campo
/// `Option<Option<T>>`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        nickname: Option<Option<String>>,
    }

    #[test]
    fn campo_ausente_vira_none() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.nickname, None);
    }

    #[test]
    fn null_explicito_vira_some_none() {
        let p: Patch = serde_json::from_str(r#"{"nickname": null}"#).unwrap();
        assert_eq!(p.nickname, Some(None));
    }

    #[test]
    fn valor_presente_vira_some_some() {
        let p: Patch = serde_json::from_str(r#"{"nickname": "zeca"}"#).unwrap();
        assert_eq!(p.nickname, Some(Some("zeca".to_string())));
    }
}
