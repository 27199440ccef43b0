//! Static option catalog for the assessment form.
//!
//! Each category has a title and exactly five ordered option labels. The
//! label for a given answer is found by indexing with the score itself, so
//! `options(key)[score]` is always the text the field worker picked.

use crate::core::{CategoryKey, CategoryScore, CATEGORY_COUNT};

/// Display metadata for one category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub key: CategoryKey,
    pub title: &'static str,
    pub options: [&'static str; 5],
}

pub static CATALOG: [CategoryEntry; CATEGORY_COUNT] = [
    CategoryEntry {
        key: CategoryKey::Structural,
        title: "CONDIÇÃO ESTRUTURAL",
        options: [
            "0 – Estrutura íntegra",
            "1 – Trincas leves",
            "2 – Infiltração moderada",
            "3 – Risco elétrico",
            "4 – Risco iminente",
        ],
    },
    CategoryEntry {
        key: CategoryKey::Sanitary,
        title: "RISCO SANITÁRIO / HIGIÊNICO",
        options: [
            "0 – Ambiente limpo",
            "1 – Lixo leve",
            "2 – Lixo moderado",
            "3 – Lixo putrefato",
            "4 – Infestação grave",
        ],
    },
    CategoryEntry {
        key: CategoryKey::Animals,
        title: "ACÚMULO DE ANIMAIS",
        options: [
            "0 – Quantidade adequada",
            "1 – Leve desorganização",
            "2 – Número acima do suportado",
            "3 – Maus-tratos",
            "4 – Acumulação severa",
        ],
    },
    CategoryEntry {
        key: CategoryKey::Obstruction,
        title: "USO DO ESPAÇO / OBSTRUÇÃO",
        options: [
            "0 – Todos funcionais",
            "1 – Bagunça leve",
            "2 – 1–2 cômodos inutilizados",
            "3 – Casa inacessível",
            "4 – Saídas bloqueadas",
        ],
    },
    CategoryEntry {
        key: CategoryKey::Psychosocial,
        title: "VULNERABILIDADE PSICOSSOCIAL",
        options: [
            "0 – Autonomia preservada",
            "1 – Isolamento leve",
            "2 – Sem rede de apoio",
            "3 – Autoabandono",
            "4 – Incapacidade grave",
        ],
    },
];

pub fn entry(key: CategoryKey) -> &'static CategoryEntry {
    &CATALOG[key.index()]
}

pub fn options(key: CategoryKey) -> &'static [&'static str; 5] {
    &entry(key).options
}

/// Label of the option matching `score` for `key`.
pub fn option_label(key: CategoryKey, score: CategoryScore) -> &'static str {
    options(key)[usize::from(score.value())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_follows_category_order() {
        for (entry, key) in CATALOG.iter().zip(CategoryKey::ALL) {
            assert_eq!(entry.key, key);
        }
    }

    #[test]
    fn test_option_labels_are_prefixed_by_their_score() {
        for key in CategoryKey::ALL {
            for value in 0..=4u8 {
                let score = CategoryScore::new(key, value).unwrap();
                assert!(option_label(key, score).starts_with(&format!("{value} –")));
            }
        }
    }

    #[test]
    fn test_lookup_by_key() {
        assert_eq!(entry(CategoryKey::Animals).title, "ACÚMULO DE ANIMAIS");
        assert_eq!(
            option_label(CategoryKey::Obstruction, CategoryScore::MAX),
            "4 – Saídas bloqueadas"
        );
    }
}
