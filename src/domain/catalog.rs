// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Multilingual term catalog
//!
//! Query terms drive search-query generation, validation terms drive
//! content scoring. Both are fixed per category for the lifetime of a
//! run; components receive the catalog explicitly instead of reading
//! process-wide globals.

use crate::domain::models::category::Category;
use std::collections::HashMap;

/// Search-query terms per category, in priority order. Languages:
/// Spanish, English, Catalan, Portuguese, French, Italian.
const QUERY_CIENCIA_ABIERTA: &[&str] = &[
    "universidad ciencia abierta",
    "universidad datos abiertos",
    "universidad acceso abierto",
    "universidad investigación abierta",
    "university open science",
    "university open data",
    "university open access",
    "university open research",
    "university fair data",
    "universitat ciència oberta",
    "universitat dades obertes",
    "universitat accés obert",
    "universidade ciência aberta",
    "universidade dados abertos",
    "universidade acesso aberto",
    "université science ouverte",
    "université données ouvertes",
    "université accès libre",
    "università scienza aperta",
    "università dati aperti",
    "università accesso aperto",
];

const QUERY_COMUNICACION_PUBLICA: &[&str] = &[
    "universidad comunicación científica",
    "universidad divulgación científica",
    "universidad comunicación pública ciencia",
    "universidad outreach científico",
    "university science communication",
    "university public engagement science",
    "university science outreach",
    "university public understanding science",
    "universitat comunicació científica",
    "universitat divulgació científica",
    "universitat comunicació pública ciència",
    "universidade comunicação científica",
    "universidade divulgação científica",
    "universidade comunicação pública ciência",
    "université communication scientifique",
    "université vulgarisation scientifique",
    "université communication publique science",
    "università comunicazione scientifica",
    "università divulgazione scientifica",
];

const QUERY_DIPLOMACIA_CIENTIFICA: &[&str] = &[
    "universidad diplomacia científica",
    "universidad cooperación internacional científica",
    "universidad política científica",
    "universidad ciencia global",
    "university science diplomacy",
    "university scientific diplomacy",
    "university international scientific cooperation",
    "university global science",
    "universitat diplomàcia científica",
    "universitat cooperació internacional científica",
    "universidade diplomacia científica",
    "universidade cooperação internacional científica",
    "université diplomatie scientifique",
    "université coopération internationale scientifique",
    "università diplomazia scientifica",
    "università cooperazione internazionale scientifica",
];

/// Validation terms per category, in scan order.
const VALIDATION_CIENCIA_ABIERTA: &[&str] = &[
    "ciencia abierta",
    "datos abiertos",
    "acceso abierto",
    "investigación abierta",
    "repositorio institucional",
    "datos fair",
    "investigación reproducible",
    "open science",
    "open data",
    "open access",
    "open research",
    "fair data",
    "institutional repository",
    "reproducible research",
    "transparent research",
    "ciència oberta",
    "dades obertes",
    "accés obert",
    "investigació oberta",
    "repositori institucional",
    "investigació reproductible",
    "ciência aberta",
    "dados abertos",
    "acesso aberto",
    "pesquisa aberta",
    "repositório institucional",
    "pesquisa reproduzível",
    "science ouverte",
    "données ouvertes",
    "accès libre",
    "recherche ouverte",
    "dépôt institutionnel",
    "recherche reproductible",
    "scienza aperta",
    "dati aperti",
    "accesso aperto",
    "ricerca aperta",
    "repository istituzionale",
    "ricerca riproducibile",
];

const VALIDATION_COMUNICACION_PUBLICA: &[&str] = &[
    "comunicación científica",
    "divulgación científica",
    "comunicación pública de la ciencia",
    "cultura científica",
    "alfabetización científica",
    "museo de la ciencia",
    "science communication",
    "public engagement",
    "science outreach",
    "science literacy",
    "public understanding of science",
    "science museum",
    "science culture",
    "comunicació científica",
    "divulgació científica",
    "comunicació pública de la ciència",
    "museu de la ciència",
    "comunicação científica",
    "divulgação científica",
    "comunicação pública da ciência",
    "museu de ciência",
    "communication scientifique",
    "vulgarisation scientifique",
    "culture scientifique",
    "musée de science",
    "médiation scientifique",
    "comunicazione scientifica",
    "divulgazione scientifica",
    "cultura scientifica",
    "museo della scienza",
];

const VALIDATION_DIPLOMACIA_CIENTIFICA: &[&str] = &[
    "diplomacia científica",
    "cooperación internacional científica",
    "política científica",
    "ciencia global",
    "relaciones internacionales científicas",
    "science diplomacy",
    "scientific diplomacy",
    "international scientific cooperation",
    "global science",
    "science policy",
    "international science relations",
    "diplomàcia científica",
    "cooperació internacional científica",
    "cooperação internacional científica",
    "política científica",
    "diplomatie scientifique",
    "coopération internationale scientifique",
    "politique scientifique",
    "diplomazia scientifica",
    "cooperazione internazionale scientifica",
    "politica scientifica",
];

/// Keywords a link's href or anchor text must contain for the link
/// to be followed during a scan.
const LINK_KEYWORDS: &[&str] = &[
    "research",
    "investigación",
    "investigació",
    "pesquisa",
    "recherche",
    "ricerca",
    "science",
    "ciencia",
    "ciència",
    "ciência",
    "scienza",
    "open",
    "abierto",
    "obert",
    "aberto",
    "ouvert",
    "aperto",
    "communication",
    "comunicación",
    "comunicació",
    "comunicação",
    "comunicazione",
    "outreach",
    "divulgación",
    "divulgació",
    "divulgação",
    "policy",
    "política",
    "politique",
    "politica",
];

/// Per-language detection keywords. The order of this table is the
/// tie-break order: the first language at the maximum vote wins.
const LANGUAGE_PROFILES: &[(&str, &[&str; 5])] = &[
    (
        "español",
        &[
            "universidad",
            "investigación",
            "ciencia",
            "estudiantes",
            "facultad",
        ],
    ),
    (
        "catalán",
        &[
            "universitat",
            "investigació",
            "ciència",
            "estudiants",
            "facultat",
        ],
    ),
    (
        "inglés",
        &["university", "research", "science", "students", "faculty"],
    ),
    (
        "portugués",
        &[
            "universidade",
            "pesquisa",
            "ciência",
            "estudantes",
            "faculdade",
        ],
    ),
    (
        "francés",
        &[
            "université",
            "recherche",
            "science",
            "étudiants",
            "faculté",
        ],
    ),
    (
        "italiano",
        &["università", "ricerca", "scienza", "studenti", "facoltà"],
    ),
];

/// Terms used in site-restricted reinforcement queries when the
/// control institution's direct scan comes back empty.
const REINFORCEMENT_TERMS: &[&str] = &[
    "ciencia abierta",
    "ciència oberta",
    "open science",
    "acceso abierto",
    "comunicación científica",
    "divulgació científica",
    "science communication",
    "diplomacia científica",
    "science diplomacy",
];

/// Immutable term catalog, built once at startup and passed into
/// every component that matches terms.
#[derive(Debug, Clone)]
pub struct TermCatalog {
    query_terms: HashMap<Category, Vec<String>>,
    validation_terms: HashMap<Category, Vec<String>>,
    link_keywords: Vec<String>,
    language_profiles: Vec<(String, Vec<String>)>,
    reinforcement_terms: Vec<String>,
}

impl TermCatalog {
    /// The built-in six-language catalog.
    pub fn builtin() -> Self {
        let query_terms = HashMap::from([
            (Category::CienciaAbierta, owned(QUERY_CIENCIA_ABIERTA)),
            (
                Category::ComunicacionPublica,
                owned(QUERY_COMUNICACION_PUBLICA),
            ),
            (
                Category::DiplomaciaCientifica,
                owned(QUERY_DIPLOMACIA_CIENTIFICA),
            ),
        ]);
        let validation_terms = HashMap::from([
            (Category::CienciaAbierta, owned(VALIDATION_CIENCIA_ABIERTA)),
            (
                Category::ComunicacionPublica,
                owned(VALIDATION_COMUNICACION_PUBLICA),
            ),
            (
                Category::DiplomaciaCientifica,
                owned(VALIDATION_DIPLOMACIA_CIENTIFICA),
            ),
        ]);
        Self::custom(query_terms, validation_terms)
    }

    /// Catalog with substituted term lists. Link keywords, language
    /// profiles and reinforcement terms keep the built-in values.
    pub fn custom(
        query_terms: HashMap<Category, Vec<String>>,
        validation_terms: HashMap<Category, Vec<String>>,
    ) -> Self {
        Self {
            query_terms,
            validation_terms,
            link_keywords: owned(LINK_KEYWORDS),
            language_profiles: LANGUAGE_PROFILES
                .iter()
                .map(|(lang, words)| (lang.to_string(), owned(*words)))
                .collect(),
            reinforcement_terms: owned(REINFORCEMENT_TERMS),
        }
    }

    pub fn query_terms(&self, category: Category) -> &[String] {
        self.query_terms
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn validation_terms(&self, category: Category) -> &[String] {
        self.validation_terms
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn link_keywords(&self) -> &[String] {
        &self.link_keywords
    }

    pub fn language_profiles(&self) -> &[(String, Vec<String>)] {
        &self.language_profiles
    }

    pub fn reinforcement_terms(&self) -> &[String] {
        &self.reinforcement_terms
    }
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}
